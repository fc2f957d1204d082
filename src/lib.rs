//! # reqline - Keyboard-Driven Terminal HTTP Client
//!
//! Two input slots (URL and Method) above a tabbed region holding the
//! request headers and body, the response body and headers, and a
//! collection of every endpoint sent so far.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   frames    ┌──────────────┐   mutations  ┌─────────┐
//! │    View     │◄────────────│  ViewModel   │─────────────▶│ Models  │
//! │ - Renderer  │             │ - Focus/tabs │              │ - Text  │
//! │ - Styles    │             │ - Dispatch   │              │ - Resp. │
//! └─────────────┘             └──────────────┘              └─────────┘
//!                                    ▲
//!                                    │ CommandEvents / outcomes
//!                                    │
//!                             ┌──────────────┐   spawn   ┌──────────────┐
//!                             │  Controller  │──────────▶│ HTTP service │
//!                             │ - Event loop │◄──────────│ (tokio task) │
//!                             └──────────────┘  channel  └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod logging;
pub mod repl;

pub use repl::*;
