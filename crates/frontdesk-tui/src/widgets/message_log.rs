//! Message log widget.
//!
//! Projects the session's messages, in order, into a bordered pane:
//! assistant messages on the left, user messages on the right. While a reply
//! is pending a typing row follows the last message.
//!
//! ```text
//! ┌ Conversation ────────────────────────┐
//! │Assistant                             │
//! │Hello! How can I assist you today?    │
//! │                                      │
//! │                                   You│
//! │                           Book a room│
//! │                                      │
//! │Assistant is typing...                │
//! └──────────────────────────────────────┘
//! ```

use frontdesk_engine::{Message, Role, Session};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::{typing_frame, Styles};

/// Share of the pane width a message body may use.
const BODY_WIDTH_PERCENT: usize = 80;

/// Message log pane.
pub struct MessageLog<'a> {
    session: &'a Session,
    tick: usize,
    scroll: usize,
}

impl<'a> MessageLog<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            tick: 0,
            scroll: 0,
        }
    }

    /// Animation tick for the typing indicator.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Lines scrolled up from the newest message.
    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn block() -> Block<'static> {
        Block::default()
            .title(" Conversation ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Styles::border())
            .style(Styles::default())
    }

    /// How far the log can scroll when drawn into `area`.
    pub fn max_scroll(session: &Session, area: Rect) -> usize {
        let inner = Self::block().inner(area);
        let total = build_lines(session, usize::from(inner.width), 0).len();
        total.saturating_sub(usize::from(inner.height))
    }
}

fn body_width(pane_width: usize) -> usize {
    (pane_width * BODY_WIDTH_PERCENT / 100).max(1)
}

fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let (label, label_style, alignment) = match message.role() {
        Role::Assistant => ("Assistant", Styles::assistant_label(), Alignment::Left),
        Role::User => ("You", Styles::user_label(), Alignment::Right),
    };

    let mut lines = vec![Line::from(Span::styled(label, label_style)).alignment(alignment)];
    for paragraph in message.text().split('\n') {
        if paragraph.is_empty() {
            lines.push(Line::default());
            continue;
        }
        for wrapped in textwrap::wrap(paragraph, body_width(width)) {
            lines.push(
                Line::from(Span::styled(wrapped.into_owned(), Styles::default()))
                    .alignment(alignment),
            );
        }
    }
    lines
}

/// All display lines for the session, including the typing row.
fn build_lines(session: &Session, width: usize, tick: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, message) in session.messages().iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(message_lines(message, width));
    }

    if session.is_pending() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Assistant", Styles::assistant_label()),
            Span::styled(format!(" is typing{}", typing_frame(tick)), Styles::dim()),
        ]));
    }
    lines
}

impl Widget for MessageLog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Self::block();
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = build_lines(self.session, usize::from(inner.width), self.tick);
        let height = usize::from(inner.height);
        let overflow = lines.len().saturating_sub(height);
        let start = overflow - self.scroll.min(overflow);

        let visible: Vec<Line<'static>> = lines.into_iter().skip(start).take(height).collect();
        Paragraph::new(visible).render(inner, buf);
    }
}
