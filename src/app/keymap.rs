use crate::app::action::Action;
use crate::app::hotkeys::{parse_shortcut, HotkeyId, HotkeyRegistry, KeyCombo};
use crate::app::state::NotebookStatus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyConfig {
    pub profile: String,
    pub custom: Option<HashMap<String, String>>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            custom: None,
        }
    }
}

impl KeyConfig {
    pub fn config_path() -> Option<PathBuf> {
        home::home_dir().map(|mut path| {
            path.push(".config");
            path.push("bento");
            path.push("keys.toml");
            path
        })
    }

    #[must_use]
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(content) = std::fs::read_to_string(path) {
                    if let Ok(config) = toml::from_str::<KeyConfig>(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    #[must_use]
    pub fn overrides(&self) -> HashMap<String, String> {
        self.custom.clone().unwrap_or_default()
    }
}

pub struct KeyMap {
    // Registry-backed bindings resolve through the registry at lookup time
    // so key handling and palette rendering gate identically.
    registry_bindings: Vec<(KeyCombo, HotkeyId)>,
    extra: Vec<(KeyCombo, Action)>,
}

impl KeyMap {
    #[must_use]
    pub fn from_registry(registry: &HotkeyRegistry) -> Self {
        let registry_bindings = registry
            .iter()
            .filter_map(|id| parse_shortcut(&registry.get(id).keys).map(|combo| (combo, id)))
            .collect();

        let extra = vec![
            (key(KeyCode::Char('j')), Action::FocusNextCell),
            (key(KeyCode::Down), Action::FocusNextCell),
            (key(KeyCode::Char('k')), Action::FocusPrevCell),
            (key(KeyCode::Up), Action::FocusPrevCell),
            (key(KeyCode::Esc), Action::CancelMode),
        ];

        Self {
            registry_bindings,
            extra,
        }
    }

    pub fn get_action(
        &self,
        event: &KeyEvent,
        registry: &HotkeyRegistry,
        status: &NotebookStatus,
    ) -> Option<Action> {
        for (combo, id) in &self.registry_bindings {
            if combo.matches(event) {
                return registry.dispatch(*id, status);
            }
        }
        for (combo, action) in &self.extra {
            if combo.matches(event) {
                return Some(action.clone());
            }
        }
        None
    }
}

fn key(code: KeyCode) -> KeyCombo {
    KeyCombo {
        code,
        modifiers: KeyModifiers::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keys_resolve_to_dispatched_actions() {
        let registry = HotkeyRegistry::default();
        let keymap = KeyMap::from_registry(&registry);
        let status = NotebookStatus::default();

        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            keymap.get_action(&save, &registry, &status),
            Some(Action::Save)
        );
    }

    #[test]
    fn gated_bindings_go_dead_not_rebound() {
        let registry = HotkeyRegistry::default();
        let keymap = KeyMap::from_registry(&registry);
        let mut status = NotebookStatus::default();
        status.closed = true;

        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(keymap.get_action(&save, &registry, &status), None);
    }

    #[test]
    fn navigation_keys_map_directly() {
        let registry = HotkeyRegistry::default();
        let keymap = KeyMap::from_registry(&registry);
        let status = NotebookStatus::default();

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::empty());
        assert_eq!(
            keymap.get_action(&down, &registry, &status),
            Some(Action::FocusNextCell)
        );
    }
}
