//! # Focus and Tab Management
//!
//! Region switching and slot/tab cycling. Every transition ends with
//! `sync_focus`, so exactly the active buffer carries focus afterwards.

use crate::repl::events::{CycleDirection, Focus, Tab};
use crate::repl::view_models::core::{ActiveBuffer, ViewModel};

impl ViewModel {
    /// Toggle between the input region and the response region.
    ///
    /// With two regions both directions toggle; the direction is kept so the
    /// binding stays meaningful if a region is added.
    pub fn cycle_view(&mut self, direction: CycleDirection) {
        let previous = self.focus;
        self.focus = self.focus.toggled();
        tracing::debug!("focus {:?} -> {:?} ({:?})", previous, self.focus, direction);

        match self.focus {
            Focus::InputRegion => {
                self.inputs[self.focused_input].move_to_end();
            }
            Focus::ResponseRegion => {
                let tab = self.active_tab();
                if let Some(editor) = self.editor_mut(tab) {
                    editor.move_to_line_end();
                } else {
                    self.show_stored_content(tab);
                }
            }
        }
        self.sync_focus();
    }

    /// Cycle input slots in the input region, tabs in the response region
    pub fn cycle_tab(&mut self, direction: CycleDirection) {
        match self.focus {
            Focus::InputRegion => {
                self.focused_input = direction.step(self.focused_input, self.inputs.len());
                self.inputs[self.focused_input].move_to_end();
                tracing::debug!("input slot -> {}", self.inputs[self.focused_input].label());
            }
            Focus::ResponseRegion => {
                self.active_tab_index = direction.step(self.active_tab_index, self.tabs.len());
                let tab = self.active_tab();
                tracing::debug!("tab -> {}", tab);
                if !tab.is_editable() {
                    self.show_stored_content(tab);
                }
            }
        }
        self.sync_focus();
    }

    /// Make `tab` the active tab, if it is part of the tab bar
    pub fn activate_tab(&mut self, tab: Tab) -> bool {
        let Some(index) = self.tabs.iter().position(|t| *t == tab) else {
            return false;
        };
        self.active_tab_index = index;
        if !tab.is_editable() {
            self.show_stored_content(tab);
        }
        self.sync_focus();
        true
    }

    /// Push a read-only tab's stored content into the viewer
    pub(super) fn show_stored_content(&mut self, tab: Tab) {
        let content = self.tab_content.get(&tab).cloned().unwrap_or_default();
        self.viewer.set_content(&content);
    }

    /// Whether the viewer is what the user is looking at
    pub fn is_viewing(&self) -> bool {
        self.active_buffer() == ActiveBuffer::Viewer
    }
}

#[cfg(test)]
mod tests {
    use crate::repl::events::{CycleDirection, Focus, Tab};
    use crate::repl::view_models::{ActiveBuffer, ViewModel};

    #[test]
    fn view_model_should_start_with_url_slot_focused() {
        let vm = ViewModel::new();
        assert_eq!(vm.focus(), Focus::InputRegion);
        assert_eq!(vm.active_buffer(), ActiveBuffer::Input(0));
        assert!(vm.inputs()[0].is_focused());
        assert_eq!(vm.focused_buffer_count(), 1);
    }

    #[test]
    fn cycle_view_should_focus_editable_tab_at_line_end() {
        let mut vm = ViewModel::new();
        vm.request_headers = vm.request_headers.clone().with_value("Accept: */*\nX-Id: 7");
        vm.request_headers.move_up();
        vm.request_headers.set_column(0);
        vm.activate_tab(Tab::RequestHeaders);

        vm.cycle_view(CycleDirection::Next);

        assert_eq!(vm.focus(), Focus::ResponseRegion);
        assert_eq!(vm.active_buffer(), ActiveBuffer::Editor(Tab::RequestHeaders));
        assert!(vm.request_headers().is_focused());
        assert_eq!(vm.cursor_position().line, 0);
        assert_eq!(vm.cursor_position().column, "Accept: */*".len());
        assert_eq!(vm.focused_buffer_count(), 1);
    }

    #[test]
    fn cycle_view_to_read_only_tab_should_focus_nothing() {
        let mut vm = ViewModel::new();
        vm.activate_tab(Tab::ResponseBody);

        vm.cycle_view(CycleDirection::Next);

        assert_eq!(vm.active_buffer(), ActiveBuffer::Viewer);
        assert_eq!(vm.focused_buffer_count(), 0);
    }

    #[test]
    fn cycle_view_back_should_restore_slot_with_cursor_at_end() {
        let mut vm = ViewModel::new();
        vm.cycle_tab(CycleDirection::Next); // Method slot
        vm.inputs[1].set_cursor(0);
        vm.cycle_view(CycleDirection::Next);
        vm.cycle_view(CycleDirection::Prev);

        assert_eq!(vm.focus(), Focus::InputRegion);
        assert_eq!(vm.active_buffer(), ActiveBuffer::Input(1));
        assert_eq!(vm.cursor_position().column, "GET".len());
        assert!(vm.inputs()[1].is_focused());
        assert!(!vm.inputs()[0].is_focused());
    }

    #[test]
    fn cycle_tab_in_input_region_should_wrap_slots() {
        let mut vm = ViewModel::new();
        vm.cycle_tab(CycleDirection::Next);
        assert_eq!(vm.focused_input(), 1);
        vm.cycle_tab(CycleDirection::Next);
        assert_eq!(vm.focused_input(), 0);
        vm.cycle_tab(CycleDirection::Prev);
        assert_eq!(vm.focused_input(), 1);
        assert_eq!(vm.cursor_position().column, vm.method().chars().count());
        assert_eq!(vm.focused_buffer_count(), 1);
    }

    #[test]
    fn cycle_tab_in_response_region_should_wrap_tabs() {
        let mut vm = ViewModel::new();
        vm.cycle_view(CycleDirection::Next);
        assert_eq!(vm.active_tab(), Tab::Collection);

        vm.cycle_tab(CycleDirection::Prev);
        assert_eq!(vm.active_tab(), Tab::ResponseHeaders);
        assert_eq!(vm.focused_buffer_count(), 0);

        vm.cycle_tab(CycleDirection::Next);
        assert_eq!(vm.active_tab(), Tab::Collection);
        assert!(vm.collection_buffer().is_focused());
    }

    #[test]
    fn any_tab_cycle_sequence_should_keep_index_in_range() {
        let mut vm = ViewModel::new();
        vm.cycle_view(CycleDirection::Next);
        let pattern = [
            CycleDirection::Prev,
            CycleDirection::Prev,
            CycleDirection::Next,
            CycleDirection::Prev,
            CycleDirection::Next,
            CycleDirection::Next,
            CycleDirection::Prev,
        ];
        for step in 0..200 {
            vm.cycle_tab(pattern[step % pattern.len()]);
            assert!(vm.active_tab_index() < vm.tabs().len());
            assert!(vm.focused_buffer_count() <= 1);
        }
    }

    #[test]
    fn entering_read_only_tab_should_show_stored_content() {
        let mut vm = ViewModel::new();
        vm.tab_content
            .insert(Tab::ResponseHeaders, "content-type: text/plain\n".to_string());
        vm.cycle_view(CycleDirection::Next);
        vm.cycle_tab(CycleDirection::Prev);

        assert_eq!(vm.active_tab(), Tab::ResponseHeaders);
        assert_eq!(vm.viewer().lines(), ["content-type: text/plain"]);
    }

    #[test]
    fn set_tabs_should_reject_incomplete_lists() {
        let mut vm = ViewModel::new();
        assert!(!vm.set_tabs(vec![Tab::RequestBody, Tab::ResponseBody]));
        assert_eq!(vm.tabs().len(), 5);

        assert!(vm.set_tabs(Tab::REQUIRED.to_vec()));
        assert_eq!(vm.tabs(), Tab::REQUIRED);
        assert!(vm.active_tab_index() < vm.tabs().len());
    }
}
