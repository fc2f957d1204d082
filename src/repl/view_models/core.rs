//! # Core ViewModel Structure
//!
//! Contains the main ViewModel struct and basic initialization logic.
//! Behaviour is split across the manager modules, each adding an `impl`
//! block: focus and tabs, cursor and editing, requests, and the collection.

use crate::repl::events::{Focus, LogicalPosition, RequestSeq, Tab};
use crate::repl::models::{Collection, ResponseSnapshot, TextArea, TextInput, Viewer};
use std::collections::HashMap;

pub const URL_SLOT: usize = 0;
pub const METHOD_SLOT: usize = 1;
pub const URL_CHAR_LIMIT: usize = 256;
pub const METHOD_CHAR_LIMIT: usize = 10;

pub const DEFAULT_URL: &str = "https://v2.jokeapi.dev/joke/Any?type=twopart";
pub const DEFAULT_METHOD: &str = "GET";

/// Frames of the busy indicator, advanced on every tick
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The buffer that receives keys right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveBuffer {
    /// A single-line input slot, by index
    Input(usize),
    /// The multi-line buffer behind an editable tab
    Editor(Tab),
    /// The read-only viewer; no text cursor
    Viewer,
}

/// State of the whole client, mutated only from the event loop
#[derive(Debug)]
pub struct ViewModel {
    pub(super) focus: Focus,
    pub(super) tabs: Vec<Tab>,
    pub(super) active_tab_index: usize,
    pub(super) inputs: [TextInput; 2],
    pub(super) focused_input: usize,
    pub(super) request_headers: TextArea,
    pub(super) request_body: TextArea,
    pub(super) collection_buffer: TextArea,
    pub(super) viewer: Viewer,
    /// Last content stored for each read-only tab
    pub(super) tab_content: HashMap<Tab, String>,
    pub(super) response: ResponseSnapshot,
    pub(super) collection: Option<Collection>,
    pub(super) busy: bool,
    pub(super) spinner_frame: usize,
    pub(super) latest_seq: RequestSeq,
    pub(super) status_message: Option<String>,
    pub(super) terminal_size: (u16, u16),
}

impl ViewModel {
    /// Create new ViewModel with the default tab set and initial request
    pub fn new() -> Self {
        let mut view_model = Self {
            focus: Focus::InputRegion,
            tabs: Tab::ALL.to_vec(),
            active_tab_index: 0,
            inputs: [
                TextInput::new("URL", URL_CHAR_LIMIT).with_value(DEFAULT_URL),
                TextInput::new("Method", METHOD_CHAR_LIMIT).with_value(DEFAULT_METHOD),
            ],
            focused_input: URL_SLOT,
            request_headers: TextArea::new(),
            request_body: TextArea::new(),
            collection_buffer: TextArea::new(),
            viewer: Viewer::new(),
            tab_content: HashMap::new(),
            response: ResponseSnapshot::new(),
            collection: None,
            busy: false,
            spinner_frame: 0,
            latest_seq: 0,
            status_message: None,
            terminal_size: (80, 24),
        };
        view_model.sync_focus();
        view_model
    }

    /// Replace the tab bar. Rejected (returning false) unless every required
    /// tab is present exactly once.
    pub fn set_tabs(&mut self, tabs: Vec<Tab>) -> bool {
        let complete = Tab::REQUIRED.iter().all(|tab| tabs.contains(tab));
        let unique = tabs
            .iter()
            .enumerate()
            .all(|(i, tab)| !tabs[..i].contains(tab));
        if !complete || !unique {
            tracing::warn!("rejected tab list {:?}", tabs);
            return false;
        }

        let current = self.active_tab();
        self.active_tab_index = tabs.iter().position(|tab| *tab == current).unwrap_or(0);
        self.tabs = tabs;
        self.sync_focus();
        true
    }

    /// Seed the input slots, e.g. from configuration
    pub fn set_initial_request(&mut self, url: Option<&str>, method: Option<&str>) {
        if let Some(url) = url {
            self.inputs[URL_SLOT].set_value(url);
        }
        if let Some(method) = method {
            self.inputs[METHOD_SLOT].set_value(method);
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab_index(&self) -> usize {
        self.active_tab_index
    }

    pub fn active_tab(&self) -> Tab {
        self.tabs[self.active_tab_index]
    }

    pub fn inputs(&self) -> &[TextInput] {
        &self.inputs
    }

    pub fn focused_input(&self) -> usize {
        self.focused_input
    }

    pub fn url(&self) -> &str {
        self.inputs[URL_SLOT].value()
    }

    pub fn method(&self) -> &str {
        self.inputs[METHOD_SLOT].value()
    }

    pub fn request_headers(&self) -> &TextArea {
        &self.request_headers
    }

    pub fn request_body(&self) -> &TextArea {
        &self.request_body
    }

    pub fn collection_buffer(&self) -> &TextArea {
        &self.collection_buffer
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn tab_content(&self, tab: Tab) -> &str {
        self.tab_content.get(&tab).map(String::as_str).unwrap_or("")
    }

    pub fn response(&self) -> &ResponseSnapshot {
        &self.response
    }

    pub fn collection(&self) -> Option<&Collection> {
        self.collection.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn latest_seq(&self) -> RequestSeq {
        self.latest_seq
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        tracing::debug!("terminal resized to {}x{}", width, height);
    }

    /// Advance the busy indicator; returns whether anything changed
    pub fn tick(&mut self) -> bool {
        if !self.busy {
            return false;
        }
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        true
    }

    /// Resolve which buffer receives keys
    pub fn active_buffer(&self) -> ActiveBuffer {
        match self.focus {
            Focus::InputRegion => ActiveBuffer::Input(self.focused_input),
            Focus::ResponseRegion => {
                let tab = self.active_tab();
                if tab.is_editable() {
                    ActiveBuffer::Editor(tab)
                } else {
                    ActiveBuffer::Viewer
                }
            }
        }
    }

    /// Cursor of the active buffer; the viewer reports its scroll offset
    pub fn cursor_position(&self) -> LogicalPosition {
        match self.active_buffer() {
            ActiveBuffer::Input(index) => LogicalPosition::new(0, self.inputs[index].cursor()),
            ActiveBuffer::Editor(tab) => self
                .editor(tab)
                .map(TextArea::cursor)
                .unwrap_or_default(),
            ActiveBuffer::Viewer => {
                let (line, column) = self.viewer.scroll_offset();
                LogicalPosition::new(line, column)
            }
        }
    }

    pub fn editor(&self, tab: Tab) -> Option<&TextArea> {
        match tab {
            Tab::Collection => Some(&self.collection_buffer),
            Tab::RequestHeaders => Some(&self.request_headers),
            Tab::RequestBody => Some(&self.request_body),
            Tab::ResponseBody | Tab::ResponseHeaders => None,
        }
    }

    pub(super) fn editor_mut(&mut self, tab: Tab) -> Option<&mut TextArea> {
        match tab {
            Tab::Collection => Some(&mut self.collection_buffer),
            Tab::RequestHeaders => Some(&mut self.request_headers),
            Tab::RequestBody => Some(&mut self.request_body),
            Tab::ResponseBody | Tab::ResponseHeaders => None,
        }
    }

    /// Make focus flags agree with `active_buffer`: at most one buffer is
    /// focused, and it is the active one
    pub(super) fn sync_focus(&mut self) {
        let active = self.active_buffer();
        for (index, input) in self.inputs.iter_mut().enumerate() {
            if active == ActiveBuffer::Input(index) {
                input.focus();
            } else {
                input.blur();
            }
        }
        for tab in [Tab::Collection, Tab::RequestHeaders, Tab::RequestBody] {
            let focused = active == ActiveBuffer::Editor(tab);
            if let Some(editor) = self.editor_mut(tab) {
                if focused {
                    editor.focus();
                } else {
                    editor.blur();
                }
            }
        }
    }

    /// Number of buffers with their focus flag set
    pub fn focused_buffer_count(&self) -> usize {
        let inputs = self.inputs.iter().filter(|input| input.is_focused()).count();
        let editors = [
            &self.collection_buffer,
            &self.request_headers,
            &self.request_body,
        ]
        .iter()
        .filter(|editor| editor.is_focused())
        .count();
        inputs + editors
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}
