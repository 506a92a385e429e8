//! Bevy plugin that registers replay resources and systems.

use bevy::prelude::*;

use super::host::{spawn_ghost_mirror, step_replay_host, teardown_replay_host, ReplaySimulationHost};
use super::recorder::{finalize_recording, record_live_input, ReplayFinalized, ReplayRecorder};
use super::settings::ReplaySettings;
use crate::input::sample_live_input;
use crate::SimulationSet;

/// Plugin that records the live run and plays back a stored one.
///
/// - `record_live_input` runs in `PreSim` right after the live input is
///   sampled, so every tick is captured before the ship moves.
/// - `finalize_recording` runs in `PostSim` and turns `RaceFinished` into a
///   `ReplayFinalized` for whoever persists replays.
/// - The ghost host, when something inserts one, is stepped in `Simulation`.
///
/// Recorder systems only run while a `ReplayRecorder` exists and host systems
/// only while a `ReplaySimulationHost` exists; removing either resource
/// detaches it from the tick.
pub struct ReplayPlugin;

impl Plugin for ReplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ReplaySettings>();
        app.add_event::<ReplayFinalized>();

        if app.world().resource::<ReplaySettings>().recording_enabled {
            app.init_resource::<ReplayRecorder>();
        } else {
            info!("Replay recording disabled");
        }

        app.add_systems(
            FixedUpdate,
            record_live_input
                .after(sample_live_input)
                .in_set(SimulationSet::PreSim)
                .run_if(resource_exists::<ReplayRecorder>),
        );
        app.add_systems(
            FixedUpdate,
            finalize_recording
                .in_set(SimulationSet::PostSim)
                .run_if(resource_exists::<ReplayRecorder>),
        );
        app.add_systems(
            FixedUpdate,
            (
                spawn_ghost_mirror.run_if(resource_added::<ReplaySimulationHost>),
                step_replay_host.run_if(resource_exists::<ReplaySimulationHost>),
            )
                .chain()
                .in_set(SimulationSet::Simulation),
        );
        app.add_systems(Last, teardown_replay_host);
    }
}
