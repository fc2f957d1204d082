//! # Focus and Tab Commands
//!
//! Switching between the input region and the response region, and cycling
//! input slots or tabs within the focused region.

use crate::repl::events::CycleDirection;
use anyhow::Result;
use crossterm::event::KeyEvent;

use super::{Command, CommandContext, CommandEvent, KeyAction};

/// Toggle focus between regions (Tab / Shift+Tab)
pub struct SwitchViewCommand;

impl Command for SwitchViewCommand {
    fn is_relevant(&self, context: &CommandContext, _event: &KeyEvent) -> bool {
        context.is_action(KeyAction::NextView) || context.is_action(KeyAction::PrevView)
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let direction = if context.is_action(KeyAction::PrevView) {
            CycleDirection::Prev
        } else {
            CycleDirection::Next
        };
        tracing::debug!(
            "SwitchViewCommand: leaving {:?} ({:?})",
            context.state.focus,
            direction
        );
        Ok(vec![CommandEvent::view_cycle(direction)])
    }

    fn name(&self) -> &'static str {
        "SwitchView"
    }
}

/// Cycle input slots or tabs (Alt+] / Alt+[)
pub struct CycleTabCommand;

impl Command for CycleTabCommand {
    fn is_relevant(&self, context: &CommandContext, _event: &KeyEvent) -> bool {
        context.is_action(KeyAction::NextTab) || context.is_action(KeyAction::PrevTab)
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let direction = if context.is_action(KeyAction::PrevTab) {
            CycleDirection::Prev
        } else {
            CycleDirection::Next
        };
        Ok(vec![CommandEvent::tab_cycle(direction)])
    }

    fn name(&self) -> &'static str {
        "CycleTab"
    }
}
