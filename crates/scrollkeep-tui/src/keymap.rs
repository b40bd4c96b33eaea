use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use scrollkeep_core::{KeymapConfig, ScrollCommand};
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Runtime keymap for key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action bound to the "gg" sequence, if configured
    pending_g_action: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut pending_g_action = None;

        let mut add_binding = |key_str: &str, action: Action| {
            if key_str == "gg" {
                pending_g_action = Some(action);
                return;
            }

            match parse_key_binding(key_str) {
                Some(binding) => {
                    if let Some(existing) = bindings.get(&binding) {
                        warn!(
                            "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                            key_str, existing, action
                        );
                    } else {
                        bindings.insert(binding, action);
                    }
                }
                None => warn!("Invalid key binding: '{}', ignoring", key_str),
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.move_down, Action::MoveDown);
        add_binding(&config.move_up, Action::MoveUp);
        add_binding(&config.move_left, Action::MoveLeft);
        add_binding(&config.move_right, Action::MoveRight);
        add_binding(
            &config.scroll_half_down,
            Action::Scroll(ScrollCommand::ScrollDownHalfPage),
        );
        add_binding(
            &config.scroll_half_up,
            Action::Scroll(ScrollCommand::ScrollUpHalfPage),
        );
        add_binding(
            &config.scroll_page_down,
            Action::Scroll(ScrollCommand::ScrollDownPage),
        );
        add_binding(
            &config.scroll_page_up,
            Action::Scroll(ScrollCommand::ScrollUpPage),
        );
        add_binding(&config.jump_to_top, Action::JumpToTop);
        add_binding(&config.jump_to_bottom, Action::JumpToBottom);

        // Ctrl+C always quits
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        // Arrow and paging keys stay available as alternatives
        let fallbacks = [
            (KeyCode::Up, Action::MoveUp),
            (KeyCode::Down, Action::MoveDown),
            (KeyCode::Left, Action::MoveLeft),
            (KeyCode::Right, Action::MoveRight),
            (KeyCode::PageDown, Action::Scroll(ScrollCommand::ScrollDownPage)),
            (KeyCode::PageUp, Action::Scroll(ScrollCommand::ScrollUpPage)),
        ];
        for (code, action) in fallbacks {
            bindings.entry(KeyBinding::simple(code)).or_insert(action);
        }

        Self {
            bindings,
            pending_g_action,
        }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Get the action for a completed "gg" sequence
    pub fn get_pending_g_action(&self) -> Option<&Action> {
        self.pending_g_action.as_ref()
    }

    /// Check if a single 'g' press should start a pending sequence
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.pending_g_action.is_some()
            && binding.code == KeyCode::Char('g')
            && binding.modifiers == KeyModifiers::NONE
    }

    /// Shortest key bound to `action`, in config notation, for help output
    pub fn describe(&self, action: Action) -> Option<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(binding, _)| format_key_binding(binding))
            .collect();
        keys.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        keys.into_iter().next()
    }
}

/// Parse Vim-style key notation into KeyBinding
///
/// - Single char: "j", "/"; uppercase means Shift: "G"
/// - Modifiers: "<C-d>" (Ctrl), "<S-Tab>" (Shift), "<A-j>" / "<M-j>" (Alt)
/// - Named keys: "<CR>", "<Esc>", "<Tab>", "<Space>", "<PageDown>", "<F5>", ...
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
        return parse_special_key(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    let (modifiers, name) = split_modifier(inner);
    parse_key_name(name).map(|code| KeyBinding::new(code, modifiers))
}

/// Split a leading C- (Ctrl), S- (Shift) or A-/M- (Alt) prefix off a key name
fn split_modifier(inner: &str) -> (KeyModifiers, &str) {
    let prefixes = [
        ("C-", KeyModifiers::CONTROL),
        ("S-", KeyModifiers::SHIFT),
        ("A-", KeyModifiers::ALT),
        ("M-", KeyModifiers::ALT),
    ];
    for (prefix, modifier) in prefixes {
        if let Some(rest) = inner.strip_prefix(prefix) {
            return (modifier, rest);
        }
    }
    (KeyModifiers::NONE, inner)
}

/// Parse a key name (without modifiers)
fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "del" | "delete" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "insert" | "ins" => KeyCode::Insert,
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=12).contains(&n).then_some(KeyCode::F(n));
            }
            // Single character after a modifier (e.g. "d" in "<C-d>")
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c.to_ascii_lowercase())
        }
    };
    Some(code)
}

/// Render a binding back into config notation
pub fn format_key_binding(binding: &KeyBinding) -> String {
    let name = match binding.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "CR".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    };

    let is_char = matches!(binding.code, KeyCode::Char(c) if c != ' ');
    if binding.modifiers == KeyModifiers::NONE && is_char {
        return name;
    }
    if binding.modifiers == KeyModifiers::SHIFT && is_char {
        return name.to_ascii_uppercase();
    }

    let prefix = if binding.modifiers.contains(KeyModifiers::CONTROL) {
        "C-"
    } else if binding.modifiers.contains(KeyModifiers::ALT) {
        "A-"
    } else if binding.modifiers.contains(KeyModifiers::SHIFT) {
        "S-"
    } else {
        ""
    };
    format!("<{prefix}{name}>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(
            parse_key_binding("j"),
            Some(KeyBinding::simple(KeyCode::Char('j')))
        );
        assert_eq!(
            parse_key_binding("/"),
            Some(KeyBinding::simple(KeyCode::Char('/')))
        );
        assert_eq!(
            parse_key_binding("G"),
            Some(KeyBinding::shift(KeyCode::Char('G')))
        );
        assert_eq!(parse_key_binding("jk"), None);
    }

    #[test]
    fn test_parse_modifier_keys() {
        assert_eq!(
            parse_key_binding("<C-d>"),
            Some(KeyBinding::ctrl(KeyCode::Char('d')))
        );
        assert_eq!(
            parse_key_binding("<S-Tab>"),
            Some(KeyBinding::shift(KeyCode::Tab))
        );
        assert_eq!(
            parse_key_binding("<A-j>"),
            Some(KeyBinding::new(KeyCode::Char('j'), KeyModifiers::ALT))
        );
        assert_eq!(
            parse_key_binding("<M-j>"),
            Some(KeyBinding::new(KeyCode::Char('j'), KeyModifiers::ALT))
        );
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(
            parse_key_binding("<CR>"),
            Some(KeyBinding::simple(KeyCode::Enter))
        );
        assert_eq!(
            parse_key_binding("<PageDown>"),
            Some(KeyBinding::simple(KeyCode::PageDown))
        );
        assert_eq!(
            parse_key_binding("<F5>"),
            Some(KeyBinding::simple(KeyCode::F(5)))
        );
        assert_eq!(parse_key_binding("<F13>"), None);
        assert_eq!(parse_key_binding("<Nope>"), None);
    }

    #[test]
    fn test_keymap_from_config() {
        let keymap = Keymap::from_config(&KeymapConfig::default());

        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('d'))),
            Some(&Action::Scroll(ScrollCommand::ScrollDownHalfPage))
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('b'))),
            Some(&Action::Scroll(ScrollCommand::ScrollUpPage))
        );
        assert_eq!(
            keymap.get(&KeyBinding::shift(KeyCode::Char('G'))),
            Some(&Action::JumpToBottom)
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('c'))),
            Some(&Action::Quit)
        );
        assert_eq!(keymap.get_pending_g_action(), Some(&Action::JumpToTop));
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            scroll_half_down: "j".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('j'))),
            Some(&Action::MoveDown)
        );
    }

    #[test]
    fn test_describe_uses_config_notation() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.describe(Action::Scroll(ScrollCommand::ScrollDownHalfPage)),
            Some("<C-d>".to_string())
        );
        assert_eq!(keymap.describe(Action::JumpToBottom), Some("G".to_string()));
        assert_eq!(keymap.describe(Action::PendingG), None);
    }
}
