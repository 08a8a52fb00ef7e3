//! Keyboard handling: frame-coherent key state and the key → action table.

pub mod bindings;
pub mod keyboard;

pub use bindings::{Action, BindingError, KeyBindings, parse_key_code};
pub use keyboard::{KeyboardState, RawKeyEvent};
