//! # Interactive Client
//!
//! The terminal HTTP client, split MVVM-style: models own buffer and
//! response state, the view model is the focus/tab state machine, commands
//! map keys to intents, views draw frames, and the controller runs the loop.

pub mod commands;
pub mod controllers;
pub mod error;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

pub use controllers::AppController;
pub use error::ReqlineError;
pub use events::{AppEvent, CycleDirection, Focus, HttpOutcome, RequestSeq, Tab};
pub use view_models::{ActiveBuffer, ViewModel};

pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry, KeyAction, KeyMap};
pub use models::{Collection, RequestDraft, ResponseSnapshot, StatusBand};
