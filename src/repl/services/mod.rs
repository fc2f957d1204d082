//! # Services Layer
//!
//! Side-effecting helpers the view model and controller lean on: the HTTP
//! dispatcher, body decoding, header templating and clipboard access.

pub mod clipboard;
pub mod decoder;
pub mod headers;
pub mod http;

pub use clipboard::{ClipboardProvider, StaticClipboard, SystemClipboard};
pub use headers::{resolve_headers, resolve_value, EnvSource, ProcessEnv};
pub use http::{HttpDispatcher, OutcomeSender, DEFAULT_TIMEOUT};
