//! # Movement Commands
//!
//! Arrow keys move the focused buffer's cursor, or scroll the viewer when a
//! read-only tab is active. On read-only tabs h/j/k/l scroll as well; in any
//! editable buffer those keys are ordinary text.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent, KeyAction, MovementDirection};

fn arrow_direction(action: Option<KeyAction>) -> Option<MovementDirection> {
    match action? {
        KeyAction::CursorLeft => Some(MovementDirection::Left),
        KeyAction::CursorRight => Some(MovementDirection::Right),
        KeyAction::CursorUp => Some(MovementDirection::Up),
        KeyAction::CursorDown => Some(MovementDirection::Down),
        _ => None,
    }
}

fn vi_direction(event: &KeyEvent) -> Option<MovementDirection> {
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match event.code {
        KeyCode::Char('h') => Some(MovementDirection::Left),
        KeyCode::Char('j') => Some(MovementDirection::Down),
        KeyCode::Char('k') => Some(MovementDirection::Up),
        KeyCode::Char('l') => Some(MovementDirection::Right),
        _ => None,
    }
}

/// Bound cursor keys: move the cursor, or scroll when viewing
pub struct CursorMoveCommand;

impl Command for CursorMoveCommand {
    fn is_relevant(&self, context: &CommandContext, _event: &KeyEvent) -> bool {
        arrow_direction(context.action).is_some()
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let Some(direction) = arrow_direction(context.action) else {
            return Ok(vec![]);
        };
        if context.state.is_viewing() {
            Ok(vec![CommandEvent::scroll(direction)])
        } else {
            Ok(vec![CommandEvent::cursor_move(direction)])
        }
    }

    fn name(&self) -> &'static str {
        "CursorMove"
    }
}

/// h/j/k/l on a read-only tab
pub struct ViewerScrollCommand;

impl Command for ViewerScrollCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.action.is_none() && context.state.is_viewing() && vi_direction(event).is_some()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vi_direction(&event)
            .map(CommandEvent::scroll)
            .into_iter()
            .collect())
    }

    fn name(&self) -> &'static str {
        "ViewerScroll"
    }
}
