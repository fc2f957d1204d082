//! # Command System
//!
//! Key events are first resolved to a logical [`KeyAction`] through the
//! [`KeyMap`], then offered to each registered [`Command`] in order. The first
//! relevant command produces [`CommandEvent`]s which the controller applies
//! to the view model.

use anyhow::Result;
use crossterm::event::KeyEvent;

pub mod app;
pub mod collection;
pub mod context;
pub mod editing;
pub mod events;
pub mod keymap;
pub mod movement;
pub mod pane;
pub mod request;

pub use app::QuitCommand;
pub use collection::{AddToCollectionCommand, ExtractFromCollectionCommand};
pub use context::{CommandContext, ViewModelSnapshot};
pub use editing::{BackspaceCommand, EnterCommand, InsertCharCommand, PasteCommand};
pub use events::{CommandEvent, MovementDirection};
pub use keymap::{KeyAction, KeyBinding, KeyMap};
pub use movement::{CursorMoveCommand, ViewerScrollCommand};
pub use pane::{CycleTabCommand, SwitchViewCommand};
pub use request::RunRequestCommand;

/// A key handler: decides relevance from the context, then emits events
pub trait Command: Send + Sync {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    fn name(&self) -> &'static str;
}

type CommandCollection = Vec<Box<dyn Command>>;

/// Ordered set of commands; the first relevant one handles the key
pub struct CommandRegistry {
    keymap: KeyMap,
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create new command registry with the default key map
    pub fn new() -> Self {
        Self::with_keymap(KeyMap::default())
    }

    pub fn with_keymap(keymap: KeyMap) -> Self {
        let mut registry = Self {
            keymap,
            commands: Vec::new(),
        };
        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Quit wins over everything
        self.add_command(Box::new(QuitCommand));

        // Focus and tab commands
        self.add_command(Box::new(SwitchViewCommand));
        self.add_command(Box::new(CycleTabCommand));

        // Movement commands
        self.add_command(Box::new(CursorMoveCommand));

        // Request and collection commands
        self.add_command(Box::new(RunRequestCommand));
        self.add_command(Box::new(AddToCollectionCommand));
        self.add_command(Box::new(ExtractFromCollectionCommand));

        // Text editing commands; the viewer claims h/j/k/l before they become text
        self.add_command(Box::new(PasteCommand));
        self.add_command(Box::new(ViewerScrollCommand));
        self.add_command(Box::new(InsertCharCommand));
        self.add_command(Box::new(BackspaceCommand));
        self.add_command(Box::new(EnterCommand));
    }

    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Build the command context for a key from a state snapshot
    pub fn context_for(&self, state: ViewModelSnapshot, event: &KeyEvent) -> CommandContext {
        CommandContext::new(state, self.keymap.resolve(event))
    }

    /// Run the first relevant command; an unhandled key yields no events
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("{} handles {:?}", command.name(), event);
                return command.execute(event, context);
            }
        }
        tracing::debug!("no command for {:?} (action {:?})", event, context.action);
        Ok(Vec::new())
    }

    pub fn commands(&self) -> &CommandCollection {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;
    use crate::repl::events::{CycleDirection, Focus, Tab};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn process(focus: Focus, tab: Tab, code: KeyCode, modifiers: KeyModifiers) -> Vec<CommandEvent> {
        let registry = CommandRegistry::new();
        let event = KeyEvent::new(code, modifiers);
        registry
            .process_event(event, &context(focus, tab, &event))
            .unwrap()
    }

    #[test]
    fn quit_should_win_in_every_focus_and_tab() {
        for focus in [Focus::InputRegion, Focus::ResponseRegion] {
            for tab in Tab::ALL {
                assert_eq!(
                    process(focus, tab, KeyCode::Char('c'), KeyModifiers::CONTROL),
                    vec![CommandEvent::QuitRequested]
                );
            }
        }
    }

    #[test]
    fn tab_key_should_switch_view_rather_than_insert() {
        assert_eq!(
            process(Focus::InputRegion, Tab::RequestBody, KeyCode::Tab, KeyModifiers::NONE),
            vec![CommandEvent::view_cycle(CycleDirection::Next)]
        );
    }

    #[test]
    fn vi_keys_should_scroll_only_on_read_only_tabs() {
        assert_eq!(
            process(Focus::ResponseRegion, Tab::ResponseBody, KeyCode::Char('j'), KeyModifiers::NONE),
            vec![CommandEvent::scroll(MovementDirection::Down)]
        );
        assert_eq!(
            process(Focus::ResponseRegion, Tab::RequestBody, KeyCode::Char('j'), KeyModifiers::NONE),
            vec![CommandEvent::CharInsertRequested { ch: 'j' }]
        );
        assert_eq!(
            process(Focus::InputRegion, Tab::ResponseBody, KeyCode::Char('j'), KeyModifiers::NONE),
            vec![CommandEvent::CharInsertRequested { ch: 'j' }]
        );
    }

    #[test]
    fn unbound_keys_should_produce_no_events() {
        assert!(process(Focus::InputRegion, Tab::ResponseBody, KeyCode::F(9), KeyModifiers::NONE).is_empty());
        assert!(
            process(Focus::ResponseRegion, Tab::ResponseBody, KeyCode::Char('x'), KeyModifiers::NONE)
                .is_empty()
        );
    }

    #[test]
    fn custom_keymap_should_drive_relevance() {
        let mut keymap = KeyMap::default();
        keymap.bind(KeyAction::Run, "f5".parse().unwrap());
        let registry = CommandRegistry::with_keymap(keymap);

        let event = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);
        let state = test_support::snapshot(Focus::InputRegion, Tab::RequestBody);
        let context = registry.context_for(state, &event);
        assert_eq!(
            registry.process_event(event, &context).unwrap(),
            vec![CommandEvent::RunRequested]
        );
    }
}
