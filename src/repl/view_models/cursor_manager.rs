//! # Cursor Management
//!
//! Cursor movement, viewer scrolling and text editing, always routed to the
//! active buffer. Buffers clamp their own cursors, so no operation here can
//! move a cursor outside `[0, len]`.

use crate::repl::commands::MovementDirection;
use crate::repl::view_models::core::{ActiveBuffer, ViewModel};

impl ViewModel {
    pub fn move_cursor(&mut self, direction: MovementDirection) {
        match self.active_buffer() {
            ActiveBuffer::Input(index) => {
                let input = &mut self.inputs[index];
                match direction {
                    MovementDirection::Left => input.move_left(),
                    MovementDirection::Right => input.move_right(),
                    // single-line slots have nowhere to go
                    MovementDirection::Up | MovementDirection::Down => {}
                }
            }
            ActiveBuffer::Editor(tab) => {
                if let Some(editor) = self.editor_mut(tab) {
                    match direction {
                        MovementDirection::Left => editor.move_left(),
                        MovementDirection::Right => editor.move_right(),
                        MovementDirection::Up => editor.move_up(),
                        MovementDirection::Down => editor.move_down(),
                    }
                }
            }
            ActiveBuffer::Viewer => self.scroll_viewer(direction),
        }
    }

    /// Scroll the viewer by one line or column; no-op unless it is showing
    pub fn scroll_viewer(&mut self, direction: MovementDirection) {
        if !self.is_viewing() {
            return;
        }
        match direction {
            MovementDirection::Left => self.viewer.scroll_left(1),
            MovementDirection::Right => self.viewer.scroll_right(1),
            MovementDirection::Up => self.viewer.scroll_up(1),
            MovementDirection::Down => self.viewer.scroll_down(1),
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        match self.active_buffer() {
            ActiveBuffer::Input(index) => {
                if !self.inputs[index].insert_char(ch) {
                    tracing::debug!("{} slot is full", self.inputs[index].label());
                }
            }
            ActiveBuffer::Editor(tab) => {
                if let Some(editor) = self.editor_mut(tab) {
                    editor.insert_char(ch);
                }
            }
            ActiveBuffer::Viewer => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active_buffer() {
            ActiveBuffer::Input(index) => {
                self.inputs[index].backspace();
            }
            ActiveBuffer::Editor(tab) => {
                if let Some(editor) = self.editor_mut(tab) {
                    editor.backspace();
                }
            }
            ActiveBuffer::Viewer => {}
        }
    }

    /// Enter: splits the line in a multi-line buffer, ignored by slots
    pub fn insert_newline(&mut self) {
        if let ActiveBuffer::Editor(tab) = self.active_buffer() {
            if let Some(editor) = self.editor_mut(tab) {
                editor.insert_newline();
            }
        }
    }

    /// Splice pasted text at the cursor. Slots drop line breaks and stop at
    /// their limit; multi-line buffers take the text verbatim. Returns the
    /// number of characters inserted.
    pub fn paste_text(&mut self, text: &str) -> usize {
        match self.active_buffer() {
            ActiveBuffer::Input(index) => {
                let inserted = self.inputs[index].insert_str(text);
                tracing::debug!(
                    "pasted {} chars into {} slot",
                    inserted,
                    self.inputs[index].label()
                );
                inserted
            }
            ActiveBuffer::Editor(tab) => match self.editor_mut(tab) {
                Some(editor) => {
                    editor.insert_str(text);
                    text.chars().filter(|c| *c != '\r').count()
                }
                None => 0,
            },
            ActiveBuffer::Viewer => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::repl::commands::MovementDirection;
    use crate::repl::events::{CycleDirection, LogicalPosition, Tab};
    use crate::repl::view_models::ViewModel;

    fn vm_with_url(url: &str) -> ViewModel {
        let mut vm = ViewModel::new();
        vm.set_initial_request(Some(url), None);
        vm
    }

    fn vm_on_tab(tab: Tab) -> ViewModel {
        let mut vm = ViewModel::new();
        vm.activate_tab(tab);
        vm.cycle_view(CycleDirection::Next);
        vm
    }

    #[test]
    fn slot_cursor_should_clamp_at_both_ends() {
        let mut vm = vm_with_url("abc");
        for _ in 0..10 {
            vm.move_cursor(MovementDirection::Right);
        }
        assert_eq!(vm.cursor_position().column, 3);
        for _ in 0..10 {
            vm.move_cursor(MovementDirection::Left);
        }
        assert_eq!(vm.cursor_position().column, 0);
    }

    #[test]
    fn typed_chars_should_insert_at_cursor() {
        let mut vm = vm_with_url("http://h/");
        vm.move_cursor(MovementDirection::Left);
        vm.insert_char('x');
        assert_eq!(vm.url(), "http://hx/");
        assert_eq!(vm.cursor_position().column, 9);
    }

    #[test]
    fn backspace_should_stop_at_zero() {
        let mut vm = vm_with_url("ab");
        for _ in 0..5 {
            vm.backspace();
        }
        assert_eq!(vm.url(), "");
        assert_eq!(vm.cursor_position().column, 0);
    }

    #[test]
    fn enter_should_be_ignored_by_slots() {
        let mut vm = vm_with_url("http://h/");
        vm.insert_newline();
        assert_eq!(vm.url(), "http://h/");
    }

    #[test]
    fn enter_should_split_lines_in_editors() {
        let mut vm = vm_on_tab(Tab::RequestBody);
        for ch in "ab".chars() {
            vm.insert_char(ch);
        }
        vm.move_cursor(MovementDirection::Left);
        vm.insert_newline();

        assert_eq!(vm.request_body().value(), "a\nb");
        assert_eq!(vm.cursor_position(), LogicalPosition::new(1, 0));
    }

    #[test]
    fn editor_column_should_clamp_to_current_line() {
        let mut vm = vm_on_tab(Tab::RequestHeaders);
        vm.paste_text("Accept: application/json\nX: 1");
        vm.move_cursor(MovementDirection::Up);
        for _ in 0..100 {
            vm.move_cursor(MovementDirection::Right);
        }
        assert_eq!(vm.cursor_position().column, "Accept: application/json".len());

        vm.move_cursor(MovementDirection::Down);
        assert_eq!(vm.cursor_position(), LogicalPosition::new(1, 4));
    }

    #[test]
    fn paste_into_slot_should_drop_newlines_and_advance_cursor() {
        let mut vm = vm_with_url("http://h");
        let inserted = vm.paste_text("/a\n/b");
        assert_eq!(inserted, 4);
        assert_eq!(vm.url(), "http://h/a/b");
        assert_eq!(vm.cursor_position().column, 12);
    }

    #[test]
    fn paste_into_method_slot_should_respect_limit() {
        let mut vm = ViewModel::new();
        vm.cycle_tab(CycleDirection::Next);
        let inserted = vm.paste_text("OPTIONS-AND-MORE");
        assert_eq!(inserted, 7);
        assert_eq!(vm.method(), "GETOPTIONS");
        assert_eq!(vm.cursor_position().column, 10);
    }

    #[test]
    fn paste_into_editor_should_keep_line_breaks() {
        let mut vm = vm_on_tab(Tab::RequestBody);
        vm.paste_text("{\n  \"a\": 1\n}");
        assert_eq!(vm.request_body().line_count(), 3);
        assert_eq!(vm.cursor_position(), LogicalPosition::new(2, 1));
    }

    #[test]
    fn read_only_tab_should_ignore_edits_and_scroll() {
        let mut vm = ViewModel::new();
        vm.tab_content
            .insert(Tab::ResponseBody, "line one\nline two\nline three".to_string());
        let mut vm = {
            vm.activate_tab(Tab::ResponseBody);
            vm.cycle_view(CycleDirection::Next);
            vm
        };

        vm.insert_char('x');
        vm.backspace();
        assert_eq!(vm.paste_text("zzz"), 0);
        assert_eq!(vm.viewer().lines().len(), 3);

        vm.move_cursor(MovementDirection::Down);
        vm.move_cursor(MovementDirection::Down);
        vm.move_cursor(MovementDirection::Down);
        assert_eq!(vm.viewer().scroll_offset(), (2, 0));
        vm.move_cursor(MovementDirection::Right);
        assert_eq!(vm.viewer().scroll_offset(), (2, 1));
    }

    #[test]
    fn cursors_should_be_independent_per_buffer() {
        let mut vm = vm_on_tab(Tab::RequestBody);
        vm.paste_text("body text");
        vm.cycle_tab(CycleDirection::Prev); // request headers
        vm.paste_text("H: v");
        vm.cycle_tab(CycleDirection::Next); // back to body

        assert_eq!(vm.cursor_position(), LogicalPosition::new(0, 9));
        assert_eq!(vm.request_headers().cursor(), LogicalPosition::new(0, 4));
    }
}
