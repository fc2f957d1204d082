//! # Events Module
//!
//! Re-exports the event types the rest of the client works with.

pub mod app_events;
pub mod types;

pub use app_events::{AppEvent, HttpOutcome, RequestSeq};
pub use types::{CycleDirection, Focus, LogicalPosition, Tab, TabCapabilities};
