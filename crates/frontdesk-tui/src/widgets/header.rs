//! Header with the assistant's title and the clear-conversation control.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Styles;

/// Label of the clear control.
pub const CLEAR_LABEL: &str = "[Ctrl+L] Clear";

/// Shown while the service has asked for a human follow-up.
pub const FOLLOW_UP_LABEL: &str = "A staff member will follow up";

/// Two-line header.
pub struct Header<'a> {
    title: &'a str,
    subtitle: &'a str,
    show_clear: bool,
    follow_up: bool,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, subtitle: &'a str) -> Self {
        Self {
            title,
            subtitle,
            show_clear: false,
            follow_up: false,
        }
    }

    /// Offer the clear control.
    #[must_use]
    pub fn show_clear(mut self, show: bool) -> Self {
        self.show_clear = show;
        self
    }

    /// Show the follow-up hint.
    #[must_use]
    pub fn follow_up(mut self, follow_up: bool) -> Self {
        self.follow_up = follow_up;
        self
    }
}

/// Cells covered by the clear control when the header is drawn into `area`.
#[allow(clippy::cast_possible_truncation)]
pub fn clear_area(area: Rect) -> Option<Rect> {
    let width = CLEAR_LABEL.width() as u16;
    (area.height > 0 && width < area.width)
        .then(|| Rect::new(area.x + area.width - width - 1, area.y, width, 1))
}

/// Draw `text` right-aligned on row `y`, one cell in from the edge.
#[allow(clippy::cast_possible_truncation)]
fn set_right(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: ratatui::style::Style) {
    let width = text.width() as u16;
    if width < area.width {
        buf.set_string(area.x + area.width - width - 1, y, text, style);
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, Styles::default());

        let title = Line::from(vec![Span::raw(" "), Span::styled(self.title, Styles::title())]);
        buf.set_line(area.x, area.y, &title, area.width);
        if self.show_clear {
            if let Some(clear) = clear_area(area) {
                buf.set_string(clear.x, clear.y, CLEAR_LABEL, Styles::key_hint());
            }
        }

        if area.height < 2 {
            return;
        }
        let y = area.y + 1;
        let subtitle = Line::from(vec![Span::raw(" "), Span::styled(self.subtitle, Styles::dim())]);
        buf.set_line(area.x, y, &subtitle, area.width);
        if self.follow_up {
            set_right(buf, area, y, FOLLOW_UP_LABEL, Styles::warning());
        }
    }
}
