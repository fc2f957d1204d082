//! # Text Editing Commands
//!
//! Commands for text insertion, deletion, line breaks and paste in whichever
//! buffer currently has focus.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent, KeyAction};

/// Insert a printable character
pub struct InsertCharCommand;

impl Command for InsertCharCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Char(ch) => {
                context.action.is_none()
                    && !event
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && !ch.is_control()
                    && context.state.has_text_target()
            }
            _ => false,
        }
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if let KeyCode::Char(ch) = event.code {
            Ok(vec![CommandEvent::CharInsertRequested { ch }])
        } else {
            Ok(vec![])
        }
    }

    fn name(&self) -> &'static str {
        "InsertChar"
    }
}

/// Delete the character before the cursor
pub struct BackspaceCommand;

impl Command for BackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.action.is_none()
            && matches!(event.code, KeyCode::Backspace)
            && context.state.has_text_target()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::BackspaceRequested])
    }

    fn name(&self) -> &'static str {
        "Backspace"
    }
}

/// Enter: a new line in multi-line buffers, nothing in single-line slots
pub struct EnterCommand;

impl Command for EnterCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.action.is_none()
            && matches!(event.code, KeyCode::Enter)
            && context.state.has_text_target()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::NewlineRequested])
    }

    fn name(&self) -> &'static str {
        "Enter"
    }
}

/// Paste the clipboard (Ctrl+V by default)
pub struct PasteCommand;

impl Command for PasteCommand {
    fn is_relevant(&self, context: &CommandContext, _event: &KeyEvent) -> bool {
        context.is_action(KeyAction::Paste) && context.state.has_text_target()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::PasteRequested])
    }

    fn name(&self) -> &'static str {
        "Paste"
    }
}
