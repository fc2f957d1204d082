//! # Key Bindings
//!
//! Maps physical keys to the logical actions the client understands. The
//! defaults can be overridden per action from the `[keys]` config section
//! using strings such as `alt+]`, `shift+tab` or `ctrl+r`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use std::str::FromStr;

/// Logical actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NextView,
    PrevView,
    NextTab,
    PrevTab,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    Paste,
    Run,
    AddToCollection,
    ExtractFromCollection,
    Quit,
}

impl KeyAction {
    pub const ALL: [KeyAction; 13] = [
        KeyAction::NextView,
        KeyAction::PrevView,
        KeyAction::NextTab,
        KeyAction::PrevTab,
        KeyAction::CursorLeft,
        KeyAction::CursorRight,
        KeyAction::CursorUp,
        KeyAction::CursorDown,
        KeyAction::Paste,
        KeyAction::Run,
        KeyAction::AddToCollection,
        KeyAction::ExtractFromCollection,
        KeyAction::Quit,
    ];

    /// Name used for this action in the `[keys]` config section
    pub fn config_key(self) -> &'static str {
        match self {
            KeyAction::NextView => "next_view",
            KeyAction::PrevView => "prev_view",
            KeyAction::NextTab => "next_tab",
            KeyAction::PrevTab => "prev_tab",
            KeyAction::CursorLeft => "left",
            KeyAction::CursorRight => "right",
            KeyAction::CursorUp => "up",
            KeyAction::CursorDown => "down",
            KeyAction::Paste => "paste",
            KeyAction::Run => "run",
            KeyAction::AddToCollection => "add_to_collection",
            KeyAction::ExtractFromCollection => "extract_from_collection",
            KeyAction::Quit => "quit",
        }
    }

    pub fn from_config_key(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|action| action.config_key() == name)
    }

    /// Short description for the help line
    pub fn help(self) -> &'static str {
        match self {
            KeyAction::NextView => "next view",
            KeyAction::PrevView => "prev view",
            KeyAction::NextTab => "next tab",
            KeyAction::PrevTab => "prev tab",
            KeyAction::CursorLeft => "left",
            KeyAction::CursorRight => "right",
            KeyAction::CursorUp => "up",
            KeyAction::CursorDown => "down",
            KeyAction::Paste => "paste",
            KeyAction::Run => "run",
            KeyAction::AddToCollection => "add to collection",
            KeyAction::ExtractFromCollection => "extract from collection",
            KeyAction::Quit => "quit",
        }
    }
}

/// A physical key with modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let (code, modifiers) = normalize(code, modifiers);
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        normalize(event.code, event.modifiers) == (self.code, self.modifiers)
    }
}

/// Terminals disagree about SHIFT on characters and back-tab; drop it there
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    let significant =
        modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
    match code {
        KeyCode::Char(_) | KeyCode::BackTab => (code, significant - KeyModifiers::SHIFT),
        _ => (code, significant),
    }
}

impl FromStr for KeyBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        if text.is_empty() {
            return Err("empty key binding".to_string());
        }

        // the key itself may be '+', as in "ctrl++"
        let (prefix, key) = match text.strip_suffix("++") {
            Some(rest) => (rest, "+"),
            None => match text.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", text.as_str()),
            },
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" | "meta" | "option" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => return Err(format!("unknown modifier '{other}' in '{s}'")),
            };
        }

        let code = match key {
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" | "pageup" => KeyCode::PageUp,
            "pgdown" | "pagedown" => KeyCode::PageDown,
            f if f.len() > 1 && f.starts_with('f') => {
                let n: u8 = f[1..]
                    .parse()
                    .map_err(|_| format!("unknown key '{key}' in '{s}'"))?;
                KeyCode::F(n)
            }
            single => {
                let mut chars = single.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyCode::Char(ch),
                    _ => return Err(format!("unknown key '{key}' in '{s}'")),
                }
            }
        };

        Ok(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("shift+")?;
        }
        match self.code {
            KeyCode::BackTab => f.write_str("shift+tab"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Delete => f.write_str("delete"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::PageUp => f.write_str("pgup"),
            KeyCode::PageDown => f.write_str("pgdown"),
            KeyCode::F(n) => write!(f, "f{n}"),
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(ch) => write!(f, "{ch}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Action lookup for incoming keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<(KeyAction, KeyBinding)>,
}

impl KeyMap {
    /// Replace every binding of `action` with `binding`
    pub fn bind(&mut self, action: KeyAction, binding: KeyBinding) {
        self.bindings.retain(|(bound, _)| *bound != action);
        self.bindings.push((action, binding));
    }

    pub fn resolve(&self, event: &KeyEvent) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find(|(_, binding)| binding.matches(event))
            .map(|(action, _)| *action)
    }

    pub fn binding_for(&self, action: KeyAction) -> Option<KeyBinding> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == action)
            .map(|(_, binding)| *binding)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        use KeyModifiers as M;
        let bindings = vec![
            (KeyAction::NextView, KeyBinding::plain(KeyCode::Tab)),
            (KeyAction::PrevView, KeyBinding::new(KeyCode::BackTab, M::SHIFT)),
            (KeyAction::NextTab, KeyBinding::new(KeyCode::Char(']'), M::ALT)),
            (KeyAction::PrevTab, KeyBinding::new(KeyCode::Char('['), M::ALT)),
            (KeyAction::CursorLeft, KeyBinding::plain(KeyCode::Left)),
            (KeyAction::CursorRight, KeyBinding::plain(KeyCode::Right)),
            (KeyAction::CursorUp, KeyBinding::plain(KeyCode::Up)),
            (KeyAction::CursorDown, KeyBinding::plain(KeyCode::Down)),
            (KeyAction::Paste, KeyBinding::new(KeyCode::Char('v'), M::CONTROL)),
            (KeyAction::Run, KeyBinding::new(KeyCode::Char('r'), M::CONTROL)),
            (KeyAction::AddToCollection, KeyBinding::new(KeyCode::Char('a'), M::ALT)),
            (
                KeyAction::ExtractFromCollection,
                KeyBinding::new(KeyCode::Char('e'), M::ALT),
            ),
            (KeyAction::Quit, KeyBinding::new(KeyCode::Char('c'), M::CONTROL)),
        ];
        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_keymap_should_bind_every_action() {
        let keymap = KeyMap::default();
        for action in KeyAction::ALL {
            assert!(keymap.binding_for(action).is_some(), "{action:?} unbound");
        }
    }

    #[test]
    fn default_keymap_should_resolve_common_keys() {
        let keymap = KeyMap::default();
        assert_eq!(
            keymap.resolve(&key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(KeyAction::NextView)
        );
        assert_eq!(
            keymap.resolve(&key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(KeyAction::PrevView)
        );
        assert_eq!(
            keymap.resolve(&key(KeyCode::Char(']'), KeyModifiers::ALT)),
            Some(KeyAction::NextTab)
        );
        assert_eq!(
            keymap.resolve(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(keymap.resolve(&key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn binding_should_parse_modifier_strings() {
        let binding: KeyBinding = "alt+]".parse().unwrap();
        assert!(binding.matches(&key(KeyCode::Char(']'), KeyModifiers::ALT)));

        let binding: KeyBinding = "shift+tab".parse().unwrap();
        assert!(binding.matches(&key(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert!(binding.matches(&key(KeyCode::BackTab, KeyModifiers::NONE)));

        let binding: KeyBinding = "Ctrl+R".parse().unwrap();
        assert!(binding.matches(&key(KeyCode::Char('r'), KeyModifiers::CONTROL)));

        let binding: KeyBinding = "f5".parse().unwrap();
        assert!(binding.matches(&key(KeyCode::F(5), KeyModifiers::NONE)));

        let binding: KeyBinding = "ctrl++".parse().unwrap();
        assert!(binding.matches(&key(KeyCode::Char('+'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn binding_should_reject_unknown_names() {
        assert!("hyper+x".parse::<KeyBinding>().is_err());
        assert!("ctrl+nothing".parse::<KeyBinding>().is_err());
        assert!("".parse::<KeyBinding>().is_err());
    }

    #[test]
    fn binding_should_display_like_its_config_form() {
        let binding: KeyBinding = "alt+]".parse().unwrap();
        assert_eq!(binding.to_string(), "alt+]");
        let binding: KeyBinding = "shift+tab".parse().unwrap();
        assert_eq!(binding.to_string(), "shift+tab");
    }

    #[test]
    fn bind_should_replace_previous_binding() {
        let mut keymap = KeyMap::default();
        keymap.bind(KeyAction::Run, "f5".parse().unwrap());

        assert_eq!(
            keymap.resolve(&key(KeyCode::F(5), KeyModifiers::NONE)),
            Some(KeyAction::Run)
        );
        assert_eq!(
            keymap.resolve(&key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn action_config_keys_should_round_trip() {
        for action in KeyAction::ALL {
            assert_eq!(KeyAction::from_config_key(action.config_key()), Some(action));
        }
        assert_eq!(KeyAction::from_config_key("launch"), None);
    }
}
