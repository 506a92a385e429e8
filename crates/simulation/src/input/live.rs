//! Live control input: raw platform values gated by the race phase.

use bevy::prelude::*;

use super::ControlInput;
use crate::race::RaceState;

/// Raw axis and button values for the current frame.
///
/// Written by whatever polls the platform (keyboard, gamepad, a scripted bot).
/// Nothing in this crate writes it.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RawControls {
    pub thruster: f32,
    pub rudder: f32,
    pub brake: bool,
}

/// The player's live input for the current tick.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LiveInput {
    thruster: f32,
    rudder: f32,
    is_braking: bool,
}

impl LiveInput {
    /// Recompute this tick's values.
    ///
    /// Outside an active race every channel is neutral and `raw` is not read,
    /// which keeps the intro and outro out of the recording.
    pub fn sample(&mut self, raw: &RawControls, race_active: bool) {
        if !race_active {
            *self = Self::default();
            return;
        }
        self.thruster = axis(raw.thruster);
        self.rudder = axis(raw.rudder);
        self.is_braking = raw.brake;
    }
}

/// Clamp to `[-1, 1]`. Non-finite readings count as centred.
fn axis(value: f32) -> f32 {
    if !value.is_finite() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

impl ControlInput for LiveInput {
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

/// Samples `RawControls` into `LiveInput` once per fixed tick.
pub fn sample_live_input(raw: Res<RawControls>, race: Res<RaceState>, mut live: ResMut<LiveInput>) {
    live.sample(&raw, race.is_active());
}
