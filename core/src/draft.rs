//! Single-line draft input with a char-indexed cursor.

/// The text being composed in the form field. The cursor is a char index,
/// not a byte index; `byte_index` converts at the insertion point.
#[derive(Debug, Default)]
pub struct DraftInput {
    text: String,
    cursor: usize,
}

impl DraftInput {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the draft wholesale, cursor at the end. Used when an edit
    /// begins and the task's current name pre-fills the form.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.move_cursor_end();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.text.insert(index, new_char);
        self.move_cursor_right();
    }

    /// Insert pasted text at the cursor. Line breaks collapse to spaces:
    /// the form is single-line.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' | '\r' => self.enter_char(' '),
                ch if ch.is_control() => {}
                ch => self.enter_char(ch),
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let before = self.text.chars().take(self.cursor - 1);
        let after = self.text.chars().skip(self.cursor);
        self.text = before.chain(after).collect();
        self.move_cursor_left();
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.text.chars().count() {
            return;
        }

        let before = self.text.chars().take(self.cursor);
        let after = self.text.chars().skip(self.cursor + 1);
        self.text = before.chain(after).collect();
    }

    pub fn delete_word_backwards(&mut self) {
        while self.cursor > 0 {
            let ch = self.text.chars().nth(self.cursor - 1);
            if ch.is_some_and(char::is_whitespace) {
                self.delete_char();
            } else {
                break;
            }
        }

        while self.cursor > 0 {
            let ch = self.text.chars().nth(self.cursor - 1);
            if ch.is_some_and(|c| !c.is_whitespace()) {
                self.delete_char();
            } else {
                break;
            }
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = self.clamp_cursor(self.cursor.saturating_add(1));
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.text.len())
    }

    fn clamp_cursor(&self, cursor: usize) -> usize {
        cursor.min(self.text.chars().count())
    }
}
