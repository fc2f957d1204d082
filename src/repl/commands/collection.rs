//! # Collection Commands

use anyhow::Result;
use crossterm::event::KeyEvent;

use super::{Command, CommandContext, CommandEvent, KeyAction};

/// Merge the current request into the collection (Alt+A by default)
pub struct AddToCollectionCommand;

impl Command for AddToCollectionCommand {
    fn is_relevant(&self, context: &CommandContext, _event: &KeyEvent) -> bool {
        context.is_action(KeyAction::AddToCollection)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::AddToCollectionRequested])
    }

    fn name(&self) -> &'static str {
        "AddToCollection"
    }
}

/// Load the endpoint under the collection cursor (Alt+E by default)
pub struct ExtractFromCollectionCommand;

impl Command for ExtractFromCollectionCommand {
    fn is_relevant(&self, context: &CommandContext, _event: &KeyEvent) -> bool {
        context.is_action(KeyAction::ExtractFromCollection)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ExtractFromCollectionRequested])
    }

    fn name(&self) -> &'static str {
        "ExtractFromCollection"
    }
}
