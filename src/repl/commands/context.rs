//! # Command Context
//!
//! Read-only view of the state a command needs to decide whether it applies.

use crate::repl::commands::KeyAction;
use crate::repl::events::{Focus, LogicalPosition, Tab};
use crate::repl::view_models::ViewModel;

/// Read-only snapshot of ViewModel state for commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModelSnapshot {
    pub focus: Focus,
    pub active_tab: Tab,
    pub focused_input: usize,
    pub cursor_position: LogicalPosition,
    pub busy: bool,
    pub terminal_dimensions: (u16, u16),
}

impl ViewModelSnapshot {
    /// Create snapshot from current ViewModel state
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self {
            focus: view_model.focus(),
            active_tab: view_model.active_tab(),
            focused_input: view_model.focused_input(),
            cursor_position: view_model.cursor_position(),
            busy: view_model.is_busy(),
            terminal_dimensions: view_model.terminal_size(),
        }
    }

    /// Whether the response region shows a read-only viewer
    pub fn is_viewing(&self) -> bool {
        self.focus == Focus::ResponseRegion && !self.active_tab.is_editable()
    }

    /// Whether some text buffer currently takes typed characters
    pub fn has_text_target(&self) -> bool {
        !self.is_viewing()
    }
}

/// Context passed to every command: the snapshot plus the logical action
/// the key map resolved for the key, if any
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub state: ViewModelSnapshot,
    pub action: Option<KeyAction>,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot, action: Option<KeyAction>) -> Self {
        Self { state, action }
    }

    pub fn is_action(&self, action: KeyAction) -> bool {
        self.action == Some(action)
    }
}
