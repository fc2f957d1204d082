//! # Terminal I/O
//!
//! The event loop reads input through an [`EventStream`] and the renderer
//! writes frames through a [`RenderStream`]. Production wires both to
//! crossterm; tests inject the mocks and inspect the drawn screen.
//!
//! ```text
//! Production:  AppController ──▶ TerminalEventStream ──▶ crossterm::event
//!                            ──▶ TerminalRenderStream ──▶ stdout
//!
//! Testing:     AppController ──▶ MockEventStream     ──▶ VecDeque<Event>
//!                            ──▶ MockRenderStream    ──▶ MockScreen (shared)
//! ```

use anyhow::Result;
use crossterm::event::Event;
use std::io::Write;
use std::time::Duration;

pub mod mock;
pub mod terminal;

pub use mock::{MockEventStream, MockRenderStream, MockScreen, RenderCommand};
pub use terminal::{TerminalEventStream, TerminalRenderStream};

/// (width, height) in cells
pub type TerminalSize = (u16, u16);

/// Source of key and resize events
pub trait EventStream: Send {
    /// Whether an event is ready within `timeout`
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Next event; only called after `poll` returned true
    fn read(&mut self) -> Result<Event>;
}

/// Sink for rendered frames plus the terminal mode switches around them
pub trait RenderStream: Write + Send {
    fn clear_screen(&mut self) -> Result<()>;

    /// Move the cursor to (column, row)
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    fn hide_cursor(&mut self) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;

    fn get_size(&self) -> Result<TerminalSize>;

    fn enter_alternate_screen(&mut self) -> Result<()>;

    fn leave_alternate_screen(&mut self) -> Result<()>;

    fn enable_raw_mode(&mut self) -> Result<()>;

    fn disable_raw_mode(&mut self) -> Result<()>;
}
