//! Frame-coherent keyboard state tracker.
//!
//! [`KeyboardState`] accumulates winit key events between two redraws and
//! answers, per physical key, whether it is held and whether it went down or
//! up since the last [`clear_transients`](KeyboardState::clear_transients).
//!
//! Physical key codes are used so that the number row selects the camera
//! regardless of the keyboard layout. Keys winit cannot identify are ignored.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event, constructible in tests.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: KeyCode,
    pub state: ElementState,
    /// OS auto-repeat while the key is held.
    pub repeat: bool,
}

impl RawKeyEvent {
    pub fn pressed(key: KeyCode) -> Self {
        Self {
            key,
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    pub fn released(key: KeyCode) -> Self {
        Self {
            key,
            state: ElementState::Released,
            repeat: false,
        }
    }
}

/// Tracks held keys and per-frame press/release edges.
///
/// 1. Forward every [`KeyEvent`] to [`process_event`](Self::process_event).
/// 2. Query with [`is_pressed`](Self::is_pressed) and
///    [`just_pressed`](Self::just_pressed).
/// 3. Call [`clear_transients`](Self::clear_transients) once the frame has
///    consumed its input.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
    just_released: HashSet<KeyCode>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a winit [`KeyEvent`].
    pub fn process_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key) = event.physical_key else {
            return;
        };
        self.process_raw(RawKeyEvent {
            key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Processes a [`RawKeyEvent`]. Repeats are ignored, so holding `P`
    /// captures a single frame.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.pressed.insert(event.key) {
                    self.just_pressed.insert(event.key);
                }
            }
            ElementState::Released => {
                if self.pressed.remove(&event.key) {
                    self.just_released.insert(event.key);
                }
            }
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// `true` only until the next [`clear_transients`](Self::clear_transients)
    /// after the key went down.
    #[must_use]
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    #[must_use]
    pub fn just_released(&self, key: KeyCode) -> bool {
        self.just_released.contains(&key)
    }

    /// Clears the per-frame press and release edges.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Forgets every held key, e.g. when the window loses focus and the
    /// matching release events will never arrive.
    pub fn release_all(&mut self) {
        self.just_released.extend(self.pressed.drain());
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_no_keys_pressed() {
        let kb = KeyboardState::new();
        for key in [KeyCode::Digit1, KeyCode::KeyP, KeyCode::Escape] {
            assert!(!kb.is_pressed(key));
            assert!(!kb.just_pressed(key));
            assert!(!kb.just_released(key));
        }
    }

    #[test]
    fn test_press_event_sets_pressed() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::Digit2));
        assert!(kb.is_pressed(KeyCode::Digit2));
        assert!(kb.just_pressed(KeyCode::Digit2));
    }

    #[test]
    fn test_release_clears_pressed() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::KeyP));
        kb.process_raw(RawKeyEvent::released(KeyCode::KeyP));
        assert!(!kb.is_pressed(KeyCode::KeyP));
        assert!(kb.just_released(KeyCode::KeyP));
    }

    #[test]
    fn test_just_pressed_true_for_one_frame_only() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::KeyP));
        assert!(kb.just_pressed(KeyCode::KeyP));
        kb.clear_transients();
        assert!(!kb.just_pressed(KeyCode::KeyP));
        assert!(kb.is_pressed(KeyCode::KeyP));
    }

    #[test]
    fn test_repeat_does_not_retrigger() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::KeyP));
        kb.clear_transients();
        kb.process_raw(RawKeyEvent {
            repeat: true,
            ..RawKeyEvent::pressed(KeyCode::KeyP)
        });
        assert!(!kb.just_pressed(KeyCode::KeyP));
        assert!(kb.is_pressed(KeyCode::KeyP));
    }

    #[test]
    fn test_duplicate_press_without_release_is_not_an_edge() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::Digit3));
        kb.clear_transients();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::Digit3));
        assert!(!kb.just_pressed(KeyCode::Digit3));
    }

    #[test]
    fn test_release_of_unpressed_key_is_ignored() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::released(KeyCode::Escape));
        assert!(!kb.just_released(KeyCode::Escape));
    }

    #[test]
    fn test_press_and_release_in_same_frame_still_counts() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::Digit1));
        kb.process_raw(RawKeyEvent::released(KeyCode::Digit1));
        assert!(kb.just_pressed(KeyCode::Digit1));
        assert!(kb.just_released(KeyCode::Digit1));
        assert!(!kb.is_pressed(KeyCode::Digit1));
    }

    #[test]
    fn test_release_all_on_focus_loss() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::Digit1));
        kb.process_raw(RawKeyEvent::pressed(KeyCode::KeyP));
        kb.release_all();
        assert!(!kb.is_pressed(KeyCode::Digit1));
        assert!(!kb.just_pressed(KeyCode::KeyP));
        assert!(kb.just_released(KeyCode::KeyP));
    }
}
