//! The orrery application: window, event handling and the per-frame loop
//! tying simulation state, input and rendering together.

pub mod controls;
pub mod scene;
pub mod startup;
pub mod window;
