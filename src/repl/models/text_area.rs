//! Multi-line text buffer (request headers, request body, collection)
//!
//! Owns its lines and its own cursor. Columns are counted in characters and
//! always clamped to the current line, never to another buffer.

use crate::repl::events::LogicalPosition;

/// Editable multi-line buffer with a line/column cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArea {
    lines: Vec<String>,
    cursor: LogicalPosition,
    focused: bool,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl TextArea {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: LogicalPosition::zero(),
            focused: false,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// Whole content joined with `\n`
    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> LogicalPosition {
        self.cursor
    }

    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor.line]
    }

    /// Width in characters of the line the cursor is on
    pub fn current_line_width(&self) -> usize {
        self.current_line().chars().count()
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

    /// Replace the content; the cursor goes to the end of the last line
    pub fn set_value(&mut self, value: &str) {
        self.lines = split_lines(value);
        let line = self.lines.len() - 1;
        self.cursor = LogicalPosition::new(line, self.lines[line].chars().count());
    }

    /// Clamp and apply a column on the current line
    pub fn set_column(&mut self, column: usize) -> usize {
        self.cursor.column = column.min(self.current_line_width());
        self.cursor.column
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor.column = self.current_line_width();
    }

    pub fn move_left(&mut self) {
        self.cursor.column = self.cursor.column.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.set_column(self.cursor.column.saturating_add(1));
    }

    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.set_column(self.cursor.column);
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.set_column(self.cursor.column);
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        let index = self.byte_index();
        self.lines[self.cursor.line].insert(index, ch);
        self.cursor.column += 1;
    }

    /// Insert arbitrary text, line breaks included
    pub fn insert_str(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        for ch in normalized.chars() {
            self.insert_char(ch);
        }
    }

    /// Split the current line at the cursor
    pub fn insert_newline(&mut self) {
        let index = self.byte_index();
        let rest = self.lines[self.cursor.line].split_off(index);
        self.lines.insert(self.cursor.line + 1, rest);
        self.cursor = LogicalPosition::new(self.cursor.line + 1, 0);
    }

    /// Delete before the cursor, joining with the previous line at column 0
    pub fn backspace(&mut self) -> bool {
        if self.cursor.column > 0 {
            self.cursor.column -= 1;
            let index = self.byte_index();
            self.lines[self.cursor.line].remove(index);
            return true;
        }
        if self.cursor.line == 0 {
            return false;
        }

        let line = self.lines.remove(self.cursor.line);
        self.cursor.line -= 1;
        self.cursor.column = self.current_line_width();
        self.lines[self.cursor.line].push_str(&line);
        true
    }

    fn byte_index(&self) -> usize {
        let line = &self.lines[self.cursor.line];
        line.char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor.column)
            .unwrap_or(line.len())
    }
}

fn split_lines(value: &str) -> Vec<String> {
    let normalized = value.replace("\r\n", "\n");
    normalized.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_should_have_one_empty_line() {
        let area = TextArea::new();
        assert_eq!(area.line_count(), 1);
        assert_eq!(area.value(), "");
        assert_eq!(area.cursor(), LogicalPosition::zero());
    }

    #[test]
    fn set_value_should_place_cursor_at_end_of_last_line() {
        let area = TextArea::new().with_value("Accept: */*\nX-Id: 42");
        assert_eq!(area.cursor(), LogicalPosition::new(1, 8));
    }

    #[test]
    fn vertical_moves_should_clamp_column_to_target_line() {
        let mut area = TextArea::new().with_value("a long first line\nab");
        area.move_up();
        area.move_to_line_end();
        assert_eq!(area.cursor(), LogicalPosition::new(0, 17));

        area.move_down();
        assert_eq!(area.cursor(), LogicalPosition::new(1, 2));
        area.move_down();
        assert_eq!(area.cursor(), LogicalPosition::new(1, 2));
    }

    #[test]
    fn horizontal_moves_should_stay_within_line() {
        let mut area = TextArea::new().with_value("abc");
        area.move_right();
        assert_eq!(area.cursor().column, 3);
        for _ in 0..10 {
            area.move_left();
        }
        assert_eq!(area.cursor().column, 0);
    }

    #[test]
    fn newline_should_split_line_at_cursor() {
        let mut area = TextArea::new().with_value("Name: Value");
        area.set_column(5);
        area.insert_newline();
        assert_eq!(area.lines(), &["Name:".to_string(), " Value".to_string()]);
        assert_eq!(area.cursor(), LogicalPosition::new(1, 0));
    }

    #[test]
    fn backspace_at_line_start_should_join_lines() {
        let mut area = TextArea::new().with_value("ab\ncd");
        area.set_column(0);
        assert!(area.backspace());
        assert_eq!(area.value(), "abcd");
        assert_eq!(area.cursor(), LogicalPosition::new(0, 2));
    }

    #[test]
    fn backspace_at_origin_should_do_nothing() {
        let mut area = TextArea::new();
        assert!(!area.backspace());
    }

    #[test]
    fn insert_str_should_handle_crlf() {
        let mut area = TextArea::new();
        area.insert_str("a: 1\r\nb: 2");
        assert_eq!(area.value(), "a: 1\nb: 2");
        assert_eq!(area.cursor(), LogicalPosition::new(1, 4));
    }
}
