//! Per-tick control inputs and the capability that produces them.
//!
//! A ship never reads the keyboard or a replay directly: it reads whatever
//! `ControlInput` drives it this tick. The live variant is [`LiveInput`]; the
//! replay-driven variant is [`crate::replay::ReplayPlayer`].

pub mod live;
pub mod state;

pub use live::{sample_live_input, LiveInput, RawControls};
pub use state::InputState;

/// The three control channels of a ship for the current tick.
///
/// Implementations recompute their values once per fixed tick and always
/// return something; neutral (0, 0, false) is the fallback.
pub trait ControlInput {
    fn thruster(&self) -> f32;
    fn rudder(&self) -> f32;
    fn is_braking(&self) -> bool;

    /// Capture the current values as the state for `tick`.
    fn snapshot(&self, tick: u64) -> InputState {
        InputState::new(self.thruster(), self.rudder(), self.is_braking(), tick)
    }
}

impl ControlInput for InputState {
    fn thruster(&self) -> f32 {
        self.thruster
    }

    fn rudder(&self) -> f32 {
        self.rudder
    }

    fn is_braking(&self) -> bool {
        self.is_braking
    }
}
