//! Chat screen: header, message log, suggestions, input and footer.

use crate::app::App;
use crate::screens::Screen;
use crate::ui::layout::chat_layout;
use crate::ui::theme::Styles;
use crate::ui::widgets::{KeyHint, StatusBar};
use crate::widgets::{Header, InputBar, MessageLog, SuggestionBar};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Paragraph, Widget},
};

pub const TITLE: &str = "AI Receptionist";
pub const SUBTITLE: &str = "Always here to help";
pub const DISCLAIMER: &str = "AI can make mistakes. Please verify important information.";

/// The chat screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let session = app.controller.session();
        let offered = session.offered_actions();
        let layout = chat_layout(area, !offered.is_empty());

        Header::new(TITLE, SUBTITLE)
            .show_clear(session.can_reset())
            .follow_up(session.follow_up_requested())
            .render(layout.header, buf);

        MessageLog::new(session)
            .tick(app.tick)
            .scroll(app.scroll)
            .render(layout.log, buf);

        if !offered.is_empty() {
            SuggestionBar::new(offered)
                .selected(app.selected_suggestion)
                .render(layout.suggestions, buf);
        }

        InputBar::new(&app.input)
            .disabled(session.is_pending())
            .render(layout.input, buf);

        Paragraph::new(DISCLAIMER)
            .style(Styles::dim())
            .alignment(Alignment::Center)
            .render(layout.disclaimer, buf);

        let mut hints = vec![KeyHint::new("Enter", "Send")];
        if !offered.is_empty() {
            hints.push(KeyHint::new("Tab", "Suggest"));
        }
        if session.can_reset() {
            hints.push(KeyHint::new("Ctrl+L", "Clear"));
        }
        hints.push(KeyHint::new("F1", "Help"));

        let mode = if session.is_pending() { "WAITING" } else { "READY" };
        let right = session
            .conversation_id()
            .map_or_else(|| app.api_label.clone(), |id| format!("#{id}"));
        StatusBar::new(mode).hints(hints).right(right).render(layout.status_bar, buf);
    }
}
