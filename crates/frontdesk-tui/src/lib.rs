//! frontdesk-tui: Terminal chat widget for the frontdesk chat client
//!
//! This crate provides the TUI layer for frontdesk, including:
//! - The chat screen (header, message log, suggestions, input)
//! - Shared widgets (status bar, text input)
//! - The event loop that runs chat requests off the UI thread

mod app;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod ui;
mod widgets;

use screens::Screen as ScreenTrait;

pub use app::{App, Task};
pub use event::{Action, Event, EventHandler};
pub use frontdesk_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use frontdesk_engine::{ConversationController, ReplyOutcome, ServiceError};
use ratatui::{backend::Backend, backend::CrosstermBackend, Frame, Terminal};
use std::io::stdout;
use tokio::task::JoinHandle;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the chat TUI until the user quits.
///
/// `api_label` is shown in the status bar until the service assigns a
/// conversation id.
pub async fn run_tui(
    controller: ConversationController,
    api_label: impl Into<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller, api_label);

    // 4 Hz tick drives the typing animation.
    let mut events = EventHandler::new(250);

    run_app(&mut terminal, &mut app, &mut events).await
}

/// Draw one frame of the app.
fn draw(app: &App, frame: &mut Frame<'_>) {
    let area = frame.area();
    let buf = frame.buffer_mut();

    screens::chat::ChatScreen.render(app, area, buf);

    if app.show_help {
        screens::render_help_overlay(area, buf);
    }
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    // At most one reply is outstanding; clears are fire-and-forget.
    let mut reply: Option<JoinHandle<ReplyOutcome>> = None;
    let mut clears: Vec<JoinHandle<()>> = Vec::new();

    loop {
        let completed = terminal.draw(|frame| draw(app, frame))?;
        app.update_viewport(completed.area);

        // Check for a finished reply (non-blocking)
        if reply.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = reply.take() {
                let outcome = handle.await.unwrap_or_else(|e| {
                    let reason = format!("reply task failed: {e}");
                    ReplyOutcome::Failed(ServiceError::Unavailable(reason))
                });
                app.complete(outcome);
            }
        }
        clears.retain(|handle| !handle.is_finished());

        let task = match events.next().await {
            Some(Event::Key(key)) => app.handle_action(event::key_to_action(key)),
            Some(Event::Mouse(mouse)) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    app.scroll_up(app::WHEEL_STEP);
                    None
                }
                MouseEventKind::ScrollDown => {
                    app.scroll_down(app::WHEEL_STEP);
                    None
                }
                MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
                _ => None,
            },
            Some(Event::Tick) => {
                app.tick();
                None
            }
            // Terminal will handle resize automatically
            Some(Event::Resize(_, _)) => None,
            None => {
                app.should_quit = true;
                None
            }
        };

        match task {
            Some(Task::Reply(pending)) => {
                tracing::debug!(request = ?pending.request(), "sending chat request");
                reply = Some(tokio::spawn(pending.wait()));
            }
            Some(Task::Clear(clear)) => clears.push(tokio::spawn(clear.run())),
            None => {}
        }

        if app.should_quit {
            if let Some(handle) = reply {
                handle.abort();
            }
            for handle in clears {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}


#[cfg(test)]
mod snapshot_tests {
    use super::*;
    use crate::test_utils::*;
    use insta::assert_snapshot;

    #[test]
    fn test_snapshot_initial_frame() {
        let app = create_test_app();
        let mut terminal = create_test_terminal_sized(60, 14);
        terminal.draw(|frame| draw(&app, frame)).unwrap();

        assert_snapshot!(buffer_to_string(terminal.backend().buffer()), @r"
 AI Receptionist
 Always here to help
┌ Conversation ────────────────────────────────────────────┐
│Assistant                                                 │
│Hello! I'm your AI Receptionist. How can I                │
│assist you today?                                         │
│                                                          │
│                                                          │
└──────────────────────────────────────────────────────────┘
┌──────────────────────────────────────────────────────────┐
│> █Ask me anything...                                     │
└──────────────────────────────────────────────────────────┘
 AI can make mistakes. Please verify important information.
 READY   Enter  Send  F1  Help                         mock
");
    }

    #[test]
    fn test_help_overlay_drawn_over_chat() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        let mut terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        terminal.draw(|frame| draw(&app, frame)).unwrap();

        let screen = buffer_to_string(terminal.backend().buffer());
        assert!(screen.contains(" Help "));
        assert!(screen.contains("Clear conversation"));
    }
}
