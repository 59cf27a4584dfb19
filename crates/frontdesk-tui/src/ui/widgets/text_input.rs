//! Draft buffer behind the input bar.
//!
//! This is the input surface: it owns the text being typed and decides
//! whether a submission is accepted. It never touches the network.

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    pub cursor: usize,
    /// Submitted inputs for up/down recall.
    history: Vec<String>,
    /// Current history index (`None` = editing the live draft).
    history_index: Option<usize>,
    /// Live draft saved while browsing history.
    saved_input: String,
}

impl Default for TextInputState {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
            saved_input: String::new(),
        }
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the draft holds something other than whitespace.
    pub fn has_text(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the character index `idx`.
    fn byte_offset(&self, idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(idx)
            .map_or(self.content.len(), |(offset, _)| offset)
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.content.insert(offset, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        let offset = self.byte_offset(self.cursor);
        self.content.insert_str(offset, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let offset = self.byte_offset(self.cursor);
            self.content.remove(offset);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let offset = self.byte_offset(self.cursor);
            self.content.remove(offset);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Commit the draft.
    ///
    /// Returns `None` and leaves the draft untouched when it is blank or the
    /// input is `disabled`. Otherwise returns the trimmed text, records it in
    /// the history and clears the draft.
    pub fn submit(&mut self, disabled: bool) -> Option<String> {
        if disabled || !self.has_text() {
            return None;
        }

        let text = self.content.trim().to_string();
        self.clear();
        self.history.push(text.clone());
        self.history_index = None;
        self.saved_input.clear();
        Some(text)
    }

    /// Navigate to previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }

        let next_index = match self.history_index {
            None => {
                self.saved_input = self.content.clone();
                0
            }
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(_) => return,
        };

        self.history_index = Some(next_index);
        self.content = self.history[self.history.len() - 1 - next_index].clone();
        self.move_end();
    }

    /// Navigate to next history entry.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.history_index = None;
                self.content = std::mem::take(&mut self.saved_input);
                self.move_end();
            }
            Some(i) => {
                self.history_index = Some(i - 1);
                self.content = self.history[self.history.len() - i].clone();
                self.move_end();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_state_basic() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");
        assert_eq!(state.cursor, 2);

        state.backspace();
        assert_eq!(state.content(), "H");

        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_text_input_state_cursor_movement() {
        let mut state = TextInputState::new();
        state.insert_str("Hello");

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor, 3);

        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        assert_eq!(state.cursor, 0);

        state.move_end();
        assert_eq!(state.cursor, 6);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut state = TextInputState::new();
        state.insert_str("café");
        state.move_left();
        state.insert('!');
        assert_eq!(state.content(), "caf!é");
        state.move_end();
        state.backspace();
        assert_eq!(state.content(), "caf!");
        state.move_home();
        state.delete();
        assert_eq!(state.content(), "af!");
    }

    #[test]
    fn test_submit_trims_and_clears() {
        let mut state = TextInputState::new();
        state.insert_str("  Hello  ");
        assert_eq!(state.submit(false), Some("Hello".to_string()));
        assert!(state.is_empty());
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_submit_rejects_blank() {
        let mut state = TextInputState::new();
        state.insert_str("   \n ");
        assert_eq!(state.submit(false), None);
        assert_eq!(state.content(), "   \n ");
    }

    #[test]
    fn test_submit_rejects_while_disabled() {
        let mut state = TextInputState::new();
        state.insert_str("Hello");
        assert_eq!(state.submit(true), None);
        assert_eq!(state.content(), "Hello");
    }

    #[test]
    fn test_text_input_state_history() {
        let mut state = TextInputState::new();

        state.insert_str("first");
        state.submit(false);
        assert!(state.is_empty());

        state.insert_str("second");
        state.submit(false);

        state.insert_str("draft");
        state.history_prev();
        assert_eq!(state.content(), "second");

        state.history_prev();
        assert_eq!(state.content(), "first");

        state.history_prev();
        assert_eq!(state.content(), "first");

        state.history_next();
        assert_eq!(state.content(), "second");

        state.history_next();
        assert_eq!(state.content(), "draft");
    }
}
