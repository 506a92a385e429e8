//! Replay recorder: delta-encodes the live controls every fixed tick.
//!
//! `record_live_input` runs in `PreSim` right after the live input has been
//! sampled, so the recorder sees exactly the values the player's ship is about
//! to be driven with. A tick is stored only when its controls differ from the
//! previous tick's.

use bevy::prelude::*;

use crate::input::{ControlInput, InputState, LiveInput};
use crate::race::RaceFinished;

use super::format::ReplayStore;

/// Accumulates change points for the current run.
///
/// The recorder owns its own tick counter, starting at 0 on creation, and
/// stamps it into every captured state. Once [`ReplayRecorder::finish`] has
/// been called it ignores further input.
#[derive(Resource, Debug)]
pub struct ReplayRecorder {
    store: ReplayStore,
    last_emitted: InputState,
    tick: u64,
    recording: bool,
}

impl Default for ReplayRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayRecorder {
    pub fn new() -> Self {
        Self {
            store: ReplayStore::default(),
            // NaN never compares equal, so the first observed tick is always kept.
            last_emitted: InputState::sentinel(),
            tick: 0,
            recording: true,
        }
    }

    /// Capture one tick of `source`.
    pub fn observe(&mut self, source: &impl ControlInput) {
        if !self.recording {
            return;
        }
        let candidate = source.snapshot(self.tick);
        if candidate != self.last_emitted {
            self.store.change_points.push(candidate);
        }
        self.last_emitted = candidate;
        self.tick += 1;
    }

    /// Freeze the run with its elapsed time and hand the store out.
    ///
    /// Returns `None` if the recording was already finished.
    pub fn finish(&mut self, elapsed_time: f32) -> Option<ReplayStore> {
        if !self.recording {
            return None;
        }
        self.recording = false;
        self.store.elapsed_time = elapsed_time;
        Some(std::mem::take(&mut self.store))
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Number of ticks observed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Change points captured so far. Empty after `finish`.
    pub fn change_points(&self) -> &[InputState] {
        &self.store.change_points
    }
}

/// A recording that has just been frozen by a finished race.
#[derive(Event, Debug, Clone)]
pub struct ReplayFinalized {
    pub store: ReplayStore,
}

/// System: feed this tick's live controls to the recorder.
pub fn record_live_input(live: Res<LiveInput>, mut recorder: ResMut<ReplayRecorder>) {
    recorder.observe(&*live);
}

/// System: freeze the recording when the race reports its finish.
pub fn finalize_recording(
    mut finished: EventReader<RaceFinished>,
    mut recorder: ResMut<ReplayRecorder>,
    mut finalized: EventWriter<ReplayFinalized>,
) {
    for event in finished.read() {
        let ticks = recorder.tick();
        let Some(store) = recorder.finish(event.elapsed_time) else {
            continue;
        };
        info!(
            "Recording finished: {} change points over {} ticks, {:.2}s",
            store.change_points.len(),
            ticks,
            store.elapsed_time
        );
        finalized.send(ReplayFinalized { store });
    }
}
