use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

/// Configurable keyboard bindings mapping actions to key codes.
///
/// Key strings use the physical key code names shared by
/// `winit::keyboard::KeyCode` (debug format) and the DOM
/// `KeyboardEvent.code`: `"KeyQ"`, `"Space"`, `"Escape"`.
///
/// A parsed `[keybindings.bindings]` table is layered over the defaults:
/// actions it names are rebound, the others keep their default key unless
/// that key was taken by one of the new bindings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "BindingOverrides")]
pub struct KeybindingOptions {
    /// Maps action → key string.
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action).
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

/// The bindings as written in an options file.
#[derive(Deserialize, Default)]
#[serde(default)]
struct BindingOverrides {
    bindings: HashMap<KeyAction, String>,
}

impl From<BindingOverrides> for KeybindingOptions {
    fn from(overrides: BindingOverrides) -> Self {
        let mut opts = Self::default();
        opts.bindings.retain(|action, key| {
            !overrides.bindings.contains_key(action)
                && !overrides.bindings.values().any(|k| *k == *key)
        });
        opts.bindings.extend(overrides.bindings);
        opts.rebuild_reverse_map();
        opts
    }
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::ResetCamera, "KeyQ".into()),
            (KeyAction::TogglePause, "Space".into()),
            (KeyAction::ToggleOrbitRing, "KeyO".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Bind `action` to `key`. Whatever action held `key` before loses its
    /// binding.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let key = key.into();
        self.bindings.retain(|a, k| *a == action || *k != key);
        let _ = self.bindings.insert(action, key);
        self.rebuild_reverse_map();
    }

    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_str: &str) -> KeybindingOptions {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn empty_table_keeps_defaults() {
        assert_eq!(parse(""), KeybindingOptions::default());
    }

    #[test]
    fn taking_a_default_key_unbinds_its_action() {
        let opts = parse("[bindings]\ntoggle_pause = \"KeyQ\"\n");
        assert_eq!(opts.lookup("KeyQ"), Some(KeyAction::TogglePause));
        assert_eq!(opts.lookup("Space"), None);
        assert!(!opts.bindings.contains_key(&KeyAction::ResetCamera));
        assert_eq!(opts.lookup("KeyO"), Some(KeyAction::ToggleOrbitRing));
    }

    #[test]
    fn bind_moves_a_key_between_actions() {
        let mut opts = KeybindingOptions::default();
        opts.bind(KeyAction::ToggleOrbitRing, "Space");
        assert_eq!(opts.lookup("Space"), Some(KeyAction::ToggleOrbitRing));
        assert_eq!(opts.lookup("KeyO"), None);
        assert!(!opts.bindings.contains_key(&KeyAction::TogglePause));
        assert_eq!(opts.lookup("KeyQ"), Some(KeyAction::ResetCamera));
    }
}
