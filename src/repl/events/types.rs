//! # Core Event Types
//!
//! Common types shared by the state machine, commands and views: focus
//! regions, tabs and the capabilities that decide how a tab reacts to keys.

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

/// Line and column (in characters) inside a multi-line buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LogicalPosition {
    pub line: usize,
    pub column: usize,
}

impl LogicalPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }
}

/// Which region currently receives raw key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    /// The single-line URL/Method slots
    #[default]
    InputRegion,
    /// The tabbed viewer below the slots
    ResponseRegion,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::InputRegion => Focus::ResponseRegion,
            Focus::ResponseRegion => Focus::InputRegion,
        }
    }
}

/// Named panes sharing the viewer region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tab {
    Collection,
    RequestHeaders,
    RequestBody,
    ResponseBody,
    ResponseHeaders,
}

impl Tab {
    /// Default ordering of the tab bar
    pub const ALL: [Tab; 5] = [
        Tab::Collection,
        Tab::RequestHeaders,
        Tab::RequestBody,
        Tab::ResponseBody,
        Tab::ResponseHeaders,
    ];

    /// Tabs every configuration has to include
    pub const REQUIRED: [Tab; 4] = [
        Tab::RequestHeaders,
        Tab::RequestBody,
        Tab::ResponseBody,
        Tab::ResponseHeaders,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Collection => "Collection",
            Tab::RequestHeaders => "Request Headers",
            Tab::RequestBody => "Request Body",
            Tab::ResponseBody => "Response Body",
            Tab::ResponseHeaders => "Response Headers",
        }
    }

    pub fn capabilities(self) -> TabCapabilities {
        match self {
            Tab::Collection | Tab::RequestHeaders | Tab::RequestBody => TabCapabilities::EDITOR,
            Tab::ResponseBody | Tab::ResponseHeaders => TabCapabilities::VIEWER,
        }
    }

    pub fn is_editable(self) -> bool {
        self.capabilities().contains(TabCapabilities::EDITABLE)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "collection" => Ok(Tab::Collection),
            "request_headers" | "headers" => Ok(Tab::RequestHeaders),
            "request_body" | "body" => Ok(Tab::RequestBody),
            "response_body" => Ok(Tab::ResponseBody),
            "response_headers" => Ok(Tab::ResponseHeaders),
            other => Err(format!("unknown tab '{other}'")),
        }
    }
}

bitflags! {
    /// What a tab allows while it is active in the response region
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TabCapabilities: u32 {
        const NONE       = 0b0000;
        /// Owns a text buffer that takes focus and receives characters
        const EDITABLE   = 0b0001;
        /// Directional keys scroll a viewer instead of moving a cursor
        const SCROLLABLE = 0b0010;
        /// Holds a multi-line cursor that up/down move
        const NAVIGABLE  = 0b0100;

        const EDITOR = Self::EDITABLE.bits() | Self::NAVIGABLE.bits();
        const VIEWER = Self::SCROLLABLE.bits();
    }
}

/// Direction for view, slot and tab cycling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Next,
    Prev,
}

impl CycleDirection {
    /// Step `index` by one within `len`, wrapping at both ends
    pub fn step(self, index: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        match self {
            CycleDirection::Next => (index + 1) % len,
            CycleDirection::Prev => (index + len - 1) % len,
        }
    }
}
