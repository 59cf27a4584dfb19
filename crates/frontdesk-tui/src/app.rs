//! Application state and update logic for the frontdesk TUI.

use crate::event::Action;
use crate::ui::layout::{chat_layout, chip_at, ChatLayout};
use crate::ui::widgets::TextInputState;
use crate::widgets::{header, MessageLog};
use frontdesk_engine::{ConversationController, PendingClear, PendingReply, ReplyOutcome};
use ratatui::layout::{Position, Rect};

/// Lines moved per mouse wheel step.
pub const WHEEL_STEP: usize = 3;

/// Work the run loop must spawn on behalf of the app.
#[derive(Debug)]
pub enum Task {
    /// Await the reply and hand it back through [`App::complete`].
    Reply(PendingReply),
    /// Best-effort clear notification; nobody waits for it.
    Clear(PendingClear),
}

/// Application state.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Tick counter for animations.
    pub tick: usize,

    /// Draft being edited.
    pub input: TextInputState,

    /// Owner of the session.
    pub controller: ConversationController,

    /// Chip highlighted with Tab, if any.
    pub selected_suggestion: Option<usize>,

    /// Lines scrolled back from the newest message.
    pub scroll: usize,

    /// Shown in the status bar until the service assigns a conversation id.
    pub api_label: String,

    max_scroll: usize,
    viewport: Rect,
}

impl App {
    /// Create a new app around `controller`.
    pub fn new(controller: ConversationController, api_label: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            tick: 0,
            input: TextInputState::new(),
            controller,
            selected_suggestion: None,
            scroll: 0,
            api_label: api_label.into(),
            max_scroll: 0,
            viewport: Rect::default(),
        }
    }

    /// Whether the suggestion chips are on screen.
    pub fn shows_suggestions(&self) -> bool {
        !self.controller.session().offered_actions().is_empty()
    }

    /// Layout of the last drawn frame.
    pub fn layout(&self) -> ChatLayout {
        chat_layout(self.viewport, self.shows_suggestions())
    }

    /// Record the frame area after a draw so scrolling and clicks can be
    /// resolved against what is on screen.
    pub fn update_viewport(&mut self, area: Rect) {
        self.viewport = area;
        self.max_scroll = MessageLog::max_scroll(self.controller.session(), self.layout().log);
        self.scroll = self.scroll.min(self.max_scroll);
    }

    /// Advance animations.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Handle an action. Returns work for the run loop to spawn.
    pub fn handle_action(&mut self, action: Action) -> Option<Task> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return None;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return None;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return None;
        }

        let pending = self.controller.session().is_pending();
        match action {
            Action::Send => return self.send(),
            Action::Clear => return self.clear(),
            Action::NextSuggestion => self.cycle_suggestion(true),
            Action::PrevSuggestion => self.cycle_suggestion(false),
            Action::Back => {
                if self.selected_suggestion.take().is_none() {
                    self.input.clear();
                }
            }
            Action::PageUp => self.scroll_up(self.page_size()),
            Action::PageDown => self.scroll_down(self.page_size()),
            Action::HistoryPrev if !pending => self.input.history_prev(),
            Action::HistoryNext if !pending => self.input.history_next(),
            Action::Newline if !pending => self.input.insert('\n'),
            Action::Insert(c) if !pending => self.input.insert(c),
            Action::Backspace if !pending => self.input.backspace(),
            Action::Delete if !pending => self.input.delete(),
            Action::Left => self.input.move_left(),
            Action::Right => self.input.move_right(),
            Action::Home => self.input.move_home(),
            Action::End => self.input.move_end(),
            _ => {}
        }
        None
    }

    /// Handle a left click at `(column, row)`.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Task> {
        if self.show_help {
            self.show_help = false;
            return None;
        }

        let layout = self.layout();
        let session = self.controller.session();
        if let Some(index) = chip_at(layout.suggestions, session.offered_actions(), column, row) {
            self.selected_suggestion = None;
            let task = self.controller.submit_suggestion(index).map(Task::Reply);
            self.follow_newest();
            return task;
        }

        let on_clear = header::clear_area(layout.header)
            .is_some_and(|area| area.contains(Position::new(column, row)));
        if on_clear {
            return self.clear();
        }
        None
    }

    /// Apply the outcome of a reply task.
    pub fn complete(&mut self, outcome: ReplyOutcome) {
        if let Err(e) = self.controller.complete(outcome) {
            tracing::debug!(error = %e, "dropped stale reply");
        }
        self.selected_suggestion = None;
        self.follow_newest();
    }

    /// Scroll towards older messages.
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll);
    }

    /// Scroll towards the newest message.
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    fn send(&mut self) -> Option<Task> {
        if self.controller.session().is_pending() {
            return None;
        }

        let task = if self.input.is_empty() {
            let index = self.selected_suggestion.take()?;
            self.controller.submit_suggestion(index)
        } else {
            let text = self.input.submit(false)?;
            match self.controller.submit(&text) {
                Ok(pending) => Some(pending),
                Err(e) => {
                    tracing::debug!(error = %e, "submission rejected");
                    None
                }
            }
        };

        self.selected_suggestion = None;
        self.follow_newest();
        task.map(Task::Reply)
    }

    fn clear(&mut self) -> Option<Task> {
        if !self.controller.session().can_reset() {
            return None;
        }
        let clear = match self.controller.reset() {
            Ok(clear) => clear,
            Err(e) => {
                tracing::debug!(error = %e, "reset rejected");
                return None;
            }
        };
        self.selected_suggestion = None;
        self.scroll = 0;
        clear.map(Task::Clear)
    }

    fn cycle_suggestion(&mut self, forward: bool) {
        let count = self.controller.session().offered_actions().len();
        if count == 0 {
            self.selected_suggestion = None;
            return;
        }
        self.selected_suggestion = Some(match (self.selected_suggestion, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
    }

    fn page_size(&self) -> usize {
        usize::from(self.layout().log.height.saturating_sub(2)).max(1)
    }

    fn follow_newest(&mut self) {
        self.scroll = 0;
    }
}

#[cfg(test)]
impl App {
    /// App backed by an empty [`frontdesk_engine::MockChatService`].
    pub fn new_for_test() -> Self {
        crate::test_utils::create_test_app_with_service(std::sync::Arc::default())
    }
}
