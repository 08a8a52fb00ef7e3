//! Mapping from triggered input actions to per-frame commands, and the pure
//! step from one [`FrameState`] to the next.

use orrery_config::SimulationConfig;
use orrery_input::Action;
use orrery_space::{CameraMode, FrameState};

/// What the user asked for during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameCommands {
    /// Last camera target selected this frame, if any.
    pub camera_mode: Option<CameraMode>,
    pub capture: bool,
    pub reload_config: bool,
    pub quit: bool,
}

impl FrameCommands {
    pub fn from_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        let mut commands = Self::default();
        for action in actions {
            match action {
                Action::Capture => commands.capture = true,
                Action::ReloadConfig => commands.reload_config = true,
                Action::Quit => commands.quit = true,
                other => {
                    if let Some(mode) = camera_mode_for(other) {
                        commands.camera_mode = Some(mode);
                    }
                }
            }
        }
        commands
    }
}

/// Camera target selected by an action.
pub fn camera_mode_for(action: Action) -> Option<CameraMode> {
    match action {
        Action::LookAtSun => Some(CameraMode::Sun),
        Action::LookAtEarth => Some(CameraMode::Earth),
        Action::LookAtMoon => Some(CameraMode::Moon),
        Action::Capture | Action::ReloadConfig | Action::Quit => None,
    }
}

/// The state rendered this frame: input is applied first, then the clock
/// advances by one step unless paused.
pub fn next_frame_state(
    state: FrameState,
    commands: &FrameCommands,
    simulation: &SimulationConfig,
) -> FrameState {
    let state = match commands.camera_mode {
        Some(mode) => state.with_camera_mode(mode),
        None => state,
    };
    if simulation.paused {
        state
    } else {
        state.advanced(simulation.day_step)
    }
}

/// Initial state from the simulation and camera settings. An out-of-range
/// camera selector falls back to the Sun.
pub fn initial_frame_state(simulation: &SimulationConfig, camera_mode: u8) -> FrameState {
    let mode = CameraMode::try_from(camera_mode).unwrap_or_else(|error| {
        tracing::warn!("{error}, looking at the sun");
        CameraMode::Sun
    });
    FrameState::new(simulation.start_day, mode)
}
