//! Key → action table.
//!
//! Defaults are `1`/`2`/`3` for the camera targets, `P` for a capture, `R`
//! to reload the config file and `Escape` to quit. Overrides come from `config.input.keybindings` as
//! `action name -> key name`, where key names are winit [`KeyCode`] variant
//! names (`"KeyP"`, `"Digit1"`, `"F12"`).

use std::collections::HashMap;
use std::fmt;

use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;

/// Something the user can ask the demo to do.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Action {
    LookAtSun,
    LookAtEarth,
    LookAtMoon,
    /// Write the current frame to a PPM file.
    Capture,
    /// Re-read `config.ron` and apply what changed.
    ReloadConfig,
    Quit,
}

impl Action {
    /// Every action, in the order they are reported each frame.
    pub const ALL: [Action; 6] = [
        Action::LookAtSun,
        Action::LookAtEarth,
        Action::LookAtMoon,
        Action::Capture,
        Action::ReloadConfig,
        Action::Quit,
    ];

    /// Name used in the config file.
    pub fn name(self) -> &'static str {
        match self {
            Action::LookAtSun => "look_at_sun",
            Action::LookAtEarth => "look_at_earth",
            Action::LookAtMoon => "look_at_moon",
            Action::Capture => "capture",
            Action::ReloadConfig => "reload_config",
            Action::Quit => "quit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    pub fn default_key(self) -> KeyCode {
        match self {
            Action::LookAtSun => KeyCode::Digit1,
            Action::LookAtEarth => KeyCode::Digit2,
            Action::LookAtMoon => KeyCode::Digit3,
            Action::Capture => KeyCode::KeyP,
            Action::ReloadConfig => KeyCode::KeyR,
            Action::Quit => KeyCode::Escape,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rejected keybinding override.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("unknown key `{key}` for action `{action}`")]
    UnknownKey { action: Action, key: String },

    /// The override would leave two actions on the same key; it is dropped.
    #[error("key {key:?} for `{action}` is already bound to `{bound_to}`")]
    Conflict {
        action: Action,
        key: KeyCode,
        bound_to: Action,
    },
}

const KEY_NAMES: &[(&str, KeyCode)] = &[
    ("KeyA", KeyCode::KeyA),
    ("KeyB", KeyCode::KeyB),
    ("KeyC", KeyCode::KeyC),
    ("KeyD", KeyCode::KeyD),
    ("KeyE", KeyCode::KeyE),
    ("KeyF", KeyCode::KeyF),
    ("KeyG", KeyCode::KeyG),
    ("KeyH", KeyCode::KeyH),
    ("KeyI", KeyCode::KeyI),
    ("KeyJ", KeyCode::KeyJ),
    ("KeyK", KeyCode::KeyK),
    ("KeyL", KeyCode::KeyL),
    ("KeyM", KeyCode::KeyM),
    ("KeyN", KeyCode::KeyN),
    ("KeyO", KeyCode::KeyO),
    ("KeyP", KeyCode::KeyP),
    ("KeyQ", KeyCode::KeyQ),
    ("KeyR", KeyCode::KeyR),
    ("KeyS", KeyCode::KeyS),
    ("KeyT", KeyCode::KeyT),
    ("KeyU", KeyCode::KeyU),
    ("KeyV", KeyCode::KeyV),
    ("KeyW", KeyCode::KeyW),
    ("KeyX", KeyCode::KeyX),
    ("KeyY", KeyCode::KeyY),
    ("KeyZ", KeyCode::KeyZ),
    ("Digit0", KeyCode::Digit0),
    ("Digit1", KeyCode::Digit1),
    ("Digit2", KeyCode::Digit2),
    ("Digit3", KeyCode::Digit3),
    ("Digit4", KeyCode::Digit4),
    ("Digit5", KeyCode::Digit5),
    ("Digit6", KeyCode::Digit6),
    ("Digit7", KeyCode::Digit7),
    ("Digit8", KeyCode::Digit8),
    ("Digit9", KeyCode::Digit9),
    ("Numpad1", KeyCode::Numpad1),
    ("Numpad2", KeyCode::Numpad2),
    ("Numpad3", KeyCode::Numpad3),
    ("F1", KeyCode::F1),
    ("F2", KeyCode::F2),
    ("F3", KeyCode::F3),
    ("F4", KeyCode::F4),
    ("F5", KeyCode::F5),
    ("F6", KeyCode::F6),
    ("F7", KeyCode::F7),
    ("F8", KeyCode::F8),
    ("F9", KeyCode::F9),
    ("F10", KeyCode::F10),
    ("F11", KeyCode::F11),
    ("F12", KeyCode::F12),
    ("Space", KeyCode::Space),
    ("Enter", KeyCode::Enter),
    ("Escape", KeyCode::Escape),
    ("Tab", KeyCode::Tab),
    ("Backspace", KeyCode::Backspace),
    ("PrintScreen", KeyCode::PrintScreen),
    ("ArrowUp", KeyCode::ArrowUp),
    ("ArrowDown", KeyCode::ArrowDown),
    ("ArrowLeft", KeyCode::ArrowLeft),
    ("ArrowRight", KeyCode::ArrowRight),
];

/// Parse a winit [`KeyCode`] variant name.
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    KEY_NAMES
        .iter()
        .find(|(key_name, _)| *key_name == name)
        .map(|&(_, code)| code)
}

fn parse_override(action_name: &str, key_name: &str) -> Result<(Action, KeyCode), BindingError> {
    let action = Action::from_name(action_name)
        .ok_or_else(|| BindingError::UnknownAction(action_name.to_string()))?;
    let key = parse_key_code(key_name).ok_or_else(|| BindingError::UnknownKey {
        action,
        key: key_name.to_string(),
    })?;
    Ok((action, key))
}

/// The active key for each [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    keys: HashMap<Action, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            keys: Action::ALL
                .into_iter()
                .map(|action| (action, action.default_key()))
                .collect(),
        }
    }
}

impl KeyBindings {
    /// Defaults with the config overrides applied.
    ///
    /// Invalid entries are logged and skipped; the affected action keeps its
    /// default key.
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut bindings = Self::default();
        for error in bindings.apply_overrides(overrides) {
            tracing::warn!("ignoring keybinding: {error}");
        }
        bindings
    }

    /// Apply `action name -> key name` overrides, returning the rejected ones.
    ///
    /// Conflicts are judged on the bindings after every override is applied,
    /// so two actions can swap keys. An override that still collides is
    /// dropped and its action keeps its current key; entries are processed in
    /// action-name order so the outcome does not depend on map iteration.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<BindingError> {
        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort();

        let mut errors = Vec::new();
        let mut accepted = Vec::new();
        for (action_name, key_name) in entries {
            match parse_override(action_name, key_name) {
                Ok(binding) => accepted.push(binding),
                Err(error) => errors.push(error),
            }
        }

        loop {
            let candidate = self.with_keys(&accepted);
            let conflict = accepted.iter().enumerate().find_map(|(i, &(action, key))| {
                Action::ALL
                    .into_iter()
                    .find(|&other| other != action && candidate.key_for(other) == key)
                    .map(|bound_to| (i, action, key, bound_to))
            });

            match conflict {
                Some((i, action, key, bound_to)) => {
                    accepted.remove(i);
                    errors.push(BindingError::Conflict {
                        action,
                        key,
                        bound_to,
                    });
                }
                None => {
                    for &(action, key) in &accepted {
                        tracing::debug!("bound {action} to {key:?}");
                    }
                    *self = candidate;
                    return errors;
                }
            }
        }
    }

    fn with_keys(&self, bindings: &[(Action, KeyCode)]) -> Self {
        let mut next = self.clone();
        next.keys.extend(bindings.iter().copied());
        next
    }

    pub fn key_for(&self, action: Action) -> KeyCode {
        self.keys
            .get(&action)
            .copied()
            .unwrap_or_else(|| action.default_key())
    }

    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&action| self.key_for(action) == key)
    }

    /// Actions whose key went down this frame, in [`Action::ALL`] order.
    pub fn triggered<'a>(
        &'a self,
        keyboard: &'a KeyboardState,
    ) -> impl Iterator<Item = Action> + 'a {
        Action::ALL
            .into_iter()
            .filter(move |&action| keyboard.just_pressed(self.key_for(action)))
    }
}
