//! Test utilities for frontdesk-tui rendering tests.
//!
//! Helpers for building apps over a mock chat service, rendering screens and
//! converting buffers to strings for assertions and snapshots.

use crate::app::App;
use crate::event::Action;
use crate::screens::Screen as ScreenTrait;
use frontdesk_engine::{ConversationController, MockChatService, Notices};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};
use std::sync::Arc;

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a test app with no replies queued.
pub fn create_test_app() -> App {
    App::new_for_test()
}

/// Create a test app talking to `service`.
pub fn create_test_app_with_service(service: Arc<MockChatService>) -> App {
    let controller = ConversationController::new(service, Notices::default());
    App::new(controller, "mock")
}

/// Type `text` into the draft one key at a time.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_action(Action::Insert(c));
    }
}

/// Convert a buffer to a string representation for snapshot testing.
///
/// Trailing whitespace is trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render a screen to a buffer and return it as a string.
pub fn render_screen_to_string<S: ScreenTrait>(screen: &S, app: &App) -> String {
    let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    let mut buffer = Buffer::empty(area);
    screen.render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_type_text_fills_draft() {
        let mut app = create_test_app();
        type_text(&mut app, "Hi there");
        assert_eq!(app.input.content(), "Hi there");
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
