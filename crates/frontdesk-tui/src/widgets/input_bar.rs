//! Full-width input bar widget.
//!
//! Always visible at the bottom of the screen for text entry. Ctrl+J inserts
//! a newline. While a reply is pending the bar is disabled and shows a
//! waiting notice instead of the draft.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::{Palette, Styles, Symbols};
use crate::ui::widgets::TextInputState;

/// Placeholder shown while the draft is empty.
pub const PLACEHOLDER: &str = "Ask me anything...";

/// Shown instead of the draft while a reply is pending.
pub const WAITING: &str = "● Waiting for reply...";

/// Full-width input bar for text entry.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    disabled: bool,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState) -> Self {
        Self {
            input,
            disabled: false,
        }
    }

    /// Disable the bar while a reply is pending.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Build the draft lines and the index of the line holding the cursor.
    fn build_input_lines(&self) -> (Vec<Line<'static>>, usize) {
        let content = self.input.content();
        if content.is_empty() {
            let line = Line::from(vec![
                Span::raw("> "),
                Span::raw(Symbols::CURSOR),
                Span::styled(PLACEHOLDER, Styles::dim()),
            ]);
            return (vec![line], 0);
        }

        // Locate the cursor as (line, column) in characters.
        let mut remaining = self.input.cursor;
        let mut cursor_line = 0;
        let mut cursor_col = 0;
        let text_lines: Vec<&str> = content.split('\n').collect();
        for (idx, line) in text_lines.iter().enumerate() {
            let len = line.chars().count();
            cursor_line = idx;
            cursor_col = remaining.min(len);
            if remaining <= len {
                break;
            }
            remaining -= len + 1;
        }

        let lines = text_lines
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                let prefix = if idx == 0 { "> " } else { "  " };
                if idx != cursor_line {
                    return Line::from(format!("{prefix}{text}"));
                }
                let before: String = text.chars().take(cursor_col).collect();
                let after: String = text.chars().skip(cursor_col).collect();
                Line::from(vec![
                    Span::raw(prefix),
                    Span::raw(before),
                    Span::raw(Symbols::CURSOR),
                    Span::raw(after),
                ])
            })
            .collect();

        (lines, cursor_line)
    }
}

#[allow(clippy::cast_possible_truncation)]
impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.disabled {
            Styles::border()
        } else {
            Styles::border_active()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Styles::default());

        let paragraph = if self.disabled {
            Paragraph::new(WAITING)
                .block(block)
                .style(Style::default().fg(Palette::DIM))
        } else {
            let inner_height = area.height.saturating_sub(2) as usize;
            let (lines, cursor_line) = self.build_input_lines();

            // Keep the cursor line visible.
            let scroll_offset = cursor_line.saturating_sub(inner_height.saturating_sub(1));

            Paragraph::new(lines)
                .block(block)
                .style(Style::default().fg(Palette::FG))
                .scroll((scroll_offset as u16, 0))
        };

        paragraph.render(area, buf);
    }
}
