//! # Application Events
//!
//! The closed set of events the interaction loop processes. Terminal input
//! and ticks come from the event stream; request outcomes are posted by
//! detached dispatch tasks through a channel.

use crate::repl::error::ReqlineError;
use crossterm::event::KeyEvent;

/// Sequence number handed out for every dispatched request
pub type RequestSeq = u64;

/// A completed HTTP exchange, whatever its status code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOutcome {
    pub status_code: u16,
    pub body: String,
    /// `Name: value` lines, one per header
    pub headers: String,
    pub latency_ms: u64,
}

/// Every kind of event the loop handles, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    RequestCompleted { seq: RequestSeq, outcome: HttpOutcome },
    RequestFailed { seq: RequestSeq, error: ReqlineError },
    Tick,
}

impl AppEvent {
    /// Convert a raw terminal event; events the client ignores map to `None`
    pub fn from_terminal(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{Event, KeyEventKind};

        match event {
            // crossterm also reports release and repeat on some platforms
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
            Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
            _ => None,
        }
    }

    pub fn request_seq(&self) -> Option<RequestSeq> {
        match self {
            AppEvent::RequestCompleted { seq, .. } | AppEvent::RequestFailed { seq, .. } => {
                Some(*seq)
            }
            _ => None,
        }
    }
}
