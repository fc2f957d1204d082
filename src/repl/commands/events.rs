//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the ViewModel.

use crate::repl::events::CycleDirection;

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
    /// Toggle focus between the input region and the response region
    ViewCycleRequested { direction: CycleDirection },

    /// Cycle input slots or tabs, depending on focus
    TabCycleRequested { direction: CycleDirection },

    /// Move the focused buffer's cursor
    CursorMoveRequested { direction: MovementDirection },

    /// Scroll the read-only viewer
    ScrollRequested { direction: MovementDirection },

    /// Insert a typed character at the cursor
    CharInsertRequested { ch: char },

    /// Delete the character before the cursor
    BackspaceRequested,

    /// Enter routed to the focused buffer
    NewlineRequested,

    /// Insert the clipboard content at the cursor
    PasteRequested,

    /// Build a draft and dispatch it
    RunRequested,

    /// Merge the current request into the collection
    AddToCollectionRequested,

    /// Load the endpoint under the collection cursor into the input slots
    ExtractFromCollectionRequested,

    /// Request to quit application
    QuitRequested,

    /// No action needed (for commands that only query state)
    NoAction,
}

/// Direction for movement operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementDirection {
    Left,
    Right,
    Up,
    Down,
}

impl CommandEvent {
    pub fn cursor_move(direction: MovementDirection) -> Self {
        Self::CursorMoveRequested { direction }
    }

    pub fn scroll(direction: MovementDirection) -> Self {
        Self::ScrollRequested { direction }
    }

    pub fn view_cycle(direction: CycleDirection) -> Self {
        Self::ViewCycleRequested { direction }
    }

    pub fn tab_cycle(direction: CycleDirection) -> Self {
        Self::TabCycleRequested { direction }
    }
}
