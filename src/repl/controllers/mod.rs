//! # Controllers Module
//!
//! The event loop tying input, commands, the view model and the renderer
//! together.

pub mod app_controller;

pub use app_controller::AppController;
