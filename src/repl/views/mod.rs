//! # Views Module
//!
//! Renders the view model to the terminal. Views read state; they never
//! change it.

pub mod styles;
pub mod terminal_renderer;

pub use terminal_renderer::{help_line, TerminalRenderer, ViewRenderer};
