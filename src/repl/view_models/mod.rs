//! # ViewModel Module
//!
//! The focus/tab state machine, split into focused responsibilities. Each
//! manager module adds an `impl ViewModel` block.

mod collection_manager;
mod core;
mod cursor_manager;
mod focus_manager;
mod http_manager;

pub use collection_manager::endpoint_at_line;
pub use core::{
    ActiveBuffer, ViewModel, DEFAULT_METHOD, DEFAULT_URL, METHOD_CHAR_LIMIT, METHOD_SLOT,
    SPINNER_FRAMES, URL_CHAR_LIMIT, URL_SLOT,
};
