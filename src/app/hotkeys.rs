use crate::app::action::Action;
use crate::app::state::NotebookStatus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Identifier for a pre-registered shortcut. The string form (`as_str`) is
/// what lands in the persisted recent-commands history, so it must stay
/// stable across releases.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HotkeyId {
    Save,
    RunStale,
    Interrupt,
    TogglePresenting,
    CycleLayout,
    UndoDeleteCell,
    CommandPalette,
    KeyboardShortcuts,
    Quit,
}

impl HotkeyId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HotkeyId::Save => "global.save",
            HotkeyId::RunStale => "global.runStale",
            HotkeyId::Interrupt => "global.interrupt",
            HotkeyId::TogglePresenting => "global.togglePresenting",
            HotkeyId::CycleLayout => "global.cycleLayout",
            HotkeyId::UndoDeleteCell => "global.undoDeleteCell",
            HotkeyId::CommandPalette => "global.commandPalette",
            HotkeyId::KeyboardShortcuts => "global.keyboardShortcuts",
            HotkeyId::Quit => "global.quit",
        }
    }
}

impl std::str::FromStr for HotkeyId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ORDER
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or(())
    }
}

/// Display metadata for one shortcut. `keys` is the parseable key string
/// shown in the palette and the shortcuts overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotkey {
    pub name: &'static str,
    pub keys: String,
}

// Iteration order of the registry; also the order of the palette's
// "Commands" section and the shortcuts overlay.
const ORDER: &[HotkeyId] = &[
    HotkeyId::Save,
    HotkeyId::RunStale,
    HotkeyId::Interrupt,
    HotkeyId::TogglePresenting,
    HotkeyId::CycleLayout,
    HotkeyId::UndoDeleteCell,
    HotkeyId::CommandPalette,
    HotkeyId::KeyboardShortcuts,
    HotkeyId::Quit,
];

fn default_binding(id: HotkeyId) -> (&'static str, &'static str) {
    match id {
        HotkeyId::Save => ("Save notebook", "ctrl+s"),
        HotkeyId::RunStale => ("Run stale cells", "ctrl+r"),
        HotkeyId::Interrupt => ("Interrupt execution", "ctrl+x"),
        HotkeyId::TogglePresenting => ("Toggle presenting", "ctrl+p"),
        HotkeyId::CycleLayout => ("Cycle layout", "l"),
        HotkeyId::UndoDeleteCell => ("Undo cell deletion", "u"),
        HotkeyId::CommandPalette => ("Open command palette", "ctrl+k"),
        HotkeyId::KeyboardShortcuts => ("Show keyboard shortcuts", "?"),
        HotkeyId::Quit => ("Quit", "q"),
    }
}

/// The live shortcut registry. Key strings come from the defaults overridden
/// by the user's key config, so every surface that displays a shortcut reads
/// the same authoritative binding.
#[derive(Debug, Clone, PartialEq)]
pub struct HotkeyRegistry {
    entries: Vec<(HotkeyId, Hotkey)>,
}

impl Default for HotkeyRegistry {
    fn default() -> Self {
        Self::with_overrides(&std::collections::HashMap::new())
    }
}

impl HotkeyRegistry {
    #[must_use]
    pub fn with_overrides(custom: &std::collections::HashMap<String, String>) -> Self {
        let entries = ORDER
            .iter()
            .map(|&id| {
                let (name, default_keys) = default_binding(id);
                let keys = custom
                    .get(id.as_str())
                    .filter(|k| parse_shortcut(k).is_some())
                    .cloned()
                    .unwrap_or_else(|| default_keys.to_string());
                (id, Hotkey { name, keys })
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, id: HotkeyId) -> &Hotkey {
        // ORDER covers every variant, so the entry always exists.
        self.entries
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, hk)| hk)
            .unwrap_or_else(|| unreachable!("registry covers all hotkey ids"))
    }

    /// Stable iteration order across a render cycle.
    pub fn iter(&self) -> impl Iterator<Item = HotkeyId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// The action currently registered for `id`, or `None` when the shortcut
    /// has no live target in the given notebook state. Callers render
    /// nothing for a `None` (stale entries vanish rather than break).
    #[must_use]
    pub fn dispatch(&self, id: HotkeyId, status: &NotebookStatus) -> Option<Action> {
        match id {
            HotkeyId::Save if !status.closed => Some(Action::Save),
            HotkeyId::RunStale if !status.closed => Some(Action::RunStale),
            HotkeyId::Interrupt if !status.closed => Some(Action::Interrupt),
            HotkeyId::TogglePresenting if !status.closed => Some(Action::TogglePresenting),
            HotkeyId::CycleLayout if !status.closed && status.presenting => {
                Some(Action::CycleLayout)
            }
            HotkeyId::UndoDeleteCell if !status.closed && status.undo_available => {
                Some(Action::UndoDeleteCell)
            }
            HotkeyId::CommandPalette => Some(Action::TogglePalette),
            HotkeyId::KeyboardShortcuts => Some(Action::ToggleShortcuts),
            HotkeyId::Quit => Some(Action::Quit),
            _ => None,
        }
    }
}

/// A parsed key string like `ctrl+shift+s` or `?`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    /// Whether a terminal key event triggers this combo. Character keys
    /// compare case-insensitively and ignore the shift bit (the terminal
    /// already applied it to the character).
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        match (self.code, event.code) {
            (KeyCode::Char(want), KeyCode::Char(got)) => {
                want.eq_ignore_ascii_case(&got)
                    && without_shift(self.modifiers) == without_shift(event.modifiers)
            }
            (want, got) => want == got && self.modifiers == event.modifiers,
        }
    }
}

fn without_shift(m: KeyModifiers) -> KeyModifiers {
    m.difference(KeyModifiers::SHIFT)
}

/// Parse a `+`-separated key string into a matchable combo. Returns `None`
/// for anything unparseable; callers fall back to the default binding.
#[must_use]
pub fn parse_shortcut(keys: &str) -> Option<KeyCombo> {
    let mut modifiers = KeyModifiers::empty();
    let mut code = None;

    for part in keys.split('+') {
        match part.trim().to_ascii_lowercase().as_str() {
            "ctrl" => modifiers.insert(KeyModifiers::CONTROL),
            "alt" => modifiers.insert(KeyModifiers::ALT),
            "shift" => modifiers.insert(KeyModifiers::SHIFT),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "tab" => code = Some(KeyCode::Tab),
            "space" => code = Some(KeyCode::Char(' ')),
            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "backspace" => code = Some(KeyCode::Backspace),
            s if s.chars().count() == 1 => {
                code = Some(KeyCode::Char(s.chars().next()?));
            }
            _ => return None,
        }
    }

    code.map(|code| KeyCombo { code, modifiers })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> NotebookStatus {
        NotebookStatus::default()
    }

    #[test]
    fn parses_modified_shortcuts() {
        let combo = parse_shortcut("ctrl+s").unwrap();
        assert!(combo.matches(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!combo.matches(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::empty())));
    }

    #[test]
    fn shift_is_ignored_for_character_keys() {
        let combo = parse_shortcut("?").unwrap();
        assert!(combo.matches(&KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_shortcut("ctrl+").is_none());
        assert!(parse_shortcut("hyper+s").is_none());
    }

    #[test]
    fn registry_honors_valid_overrides_only() {
        let mut custom = std::collections::HashMap::new();
        custom.insert("global.save".to_string(), "ctrl+w".to_string());
        custom.insert("global.quit".to_string(), "not a key".to_string());
        let registry = HotkeyRegistry::with_overrides(&custom);
        assert_eq!(registry.get(HotkeyId::Save).keys, "ctrl+w");
        assert_eq!(registry.get(HotkeyId::Quit).keys, "q");
    }

    #[test]
    fn dispatch_soft_fails_when_context_is_gone() {
        let mut st = status();
        st.closed = true;
        assert!(HotkeyRegistry::default()
            .dispatch(HotkeyId::Save, &st)
            .is_none());
        // The palette toggle survives a closed notebook
        assert!(HotkeyRegistry::default()
            .dispatch(HotkeyId::CommandPalette, &st)
            .is_some());
    }

    #[test]
    fn id_round_trips_through_string_form() {
        for id in super::ORDER {
            assert_eq!(id.as_str().parse::<HotkeyId>(), Ok(*id));
        }
        assert!("save".parse::<HotkeyId>().is_err());
    }
}
