//! # Request Commands
//!
//! Dispatching the current draft.

use anyhow::Result;
use crossterm::event::KeyEvent;

use super::{Command, CommandContext, CommandEvent, KeyAction};

/// Send the request (Ctrl+R by default). Allowed while another request is in
/// flight; the newer dispatch supersedes the older one.
pub struct RunRequestCommand;

impl Command for RunRequestCommand {
    fn is_relevant(&self, context: &CommandContext, _event: &KeyEvent) -> bool {
        context.is_action(KeyAction::Run)
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if context.state.busy {
            tracing::debug!("RunRequestCommand: superseding in-flight request");
        }
        Ok(vec![CommandEvent::RunRequested])
    }

    fn name(&self) -> &'static str {
        "RunRequest"
    }
}
