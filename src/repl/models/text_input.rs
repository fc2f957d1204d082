//! Single-line input slot (URL, Method)
//!
//! Each slot owns its cursor, measured in characters, so clamping always
//! happens against the slot's own value.

/// A single-line editable field with its own cursor and focus flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    label: &'static str,
    value: String,
    cursor: usize,
    char_limit: usize,
    focused: bool,
}

impl TextInput {
    pub fn new(label: &'static str, char_limit: usize) -> Self {
        Self {
            label,
            value: String::new(),
            cursor: 0,
            char_limit,
            focused: false,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Replace the value, truncating at the limit, and park the cursor at the end
    pub fn set_value(&mut self, value: &str) {
        self.value = value
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r'))
            .take(self.char_limit)
            .collect();
        self.cursor = self.len();
    }

    /// Clamp and set the cursor; returns the position actually applied
    pub fn set_cursor(&mut self, position: usize) -> usize {
        self.cursor = position.min(self.len());
        self.cursor
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.set_cursor(self.cursor.saturating_add(1));
    }

    /// Insert text at the cursor, dropping line breaks and anything past the limit.
    /// Returns the number of characters inserted.
    pub fn insert_str(&mut self, text: &str) -> usize {
        let room = self.char_limit.saturating_sub(self.len());
        let insert: String = text
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r'))
            .take(room)
            .collect();
        if insert.is_empty() {
            return 0;
        }

        let index = self.byte_index();
        self.value.insert_str(index, &insert);
        let inserted = insert.chars().count();
        self.cursor += inserted;
        inserted
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf)) == 1
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let index = self.byte_index();
        self.value.remove(index);
        true
    }

    /// Byte offset of the cursor inside the value
    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.value.len())
    }
}
