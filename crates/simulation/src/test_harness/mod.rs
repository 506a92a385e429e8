//! # TestRace: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` so tests can drive a race tick
//! by tick without a window, a renderer, or real time.

mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::race::RaceState;
use crate::replay::{finalize_recording, ReplayFinalized, ReplaySettings, ReplayStore};
use crate::{SimulationPlugin, SimulationSet};

/// A headless Bevy App running `SimulationPlugin` for integration testing.
///
/// Use the constructors and builder methods to set the race up, then call
/// `tick()` to advance it and the query methods to inspect the result.
pub struct TestRace {
    app: App,
}

/// Every replay finalized during the test, in order.
#[derive(Resource, Default)]
pub struct CapturedReplays(pub Vec<ReplayStore>);

fn capture_finalized_replays(
    mut finalized: EventReader<ReplayFinalized>,
    mut captured: ResMut<CapturedReplays>,
) {
    for event in finalized.read() {
        captured.0.push(event.store.clone());
    }
}

impl TestRace {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A default race: default laps, recording and ghost enabled.
    pub fn new() -> Self {
        Self::with_config(RaceState::default(), ReplaySettings::default())
    }

    /// A race of `laps` laps.
    pub fn with_laps(laps: u32) -> Self {
        Self::with_config(RaceState::new(laps), ReplaySettings::default())
    }

    /// A race with recording switched off.
    pub fn without_recording() -> Self {
        Self::with_config(
            RaceState::default(),
            ReplaySettings {
                recording_enabled: false,
                ..Default::default()
            },
        )
    }

    pub fn with_config(race: RaceState, settings: ReplaySettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Settings are read while the replay plugin builds.
        app.insert_resource(settings);
        app.insert_resource(race);
        app.add_plugins(SimulationPlugin);

        app.init_resource::<CapturedReplays>();
        app.add_systems(
            FixedUpdate,
            capture_finalized_replays
                .after(finalize_recording)
                .in_set(SimulationSet::PostSim),
        );

        // Run one update so Startup systems spawn the player ship.
        app.update();

        Self { app }
    }
}

impl Default for TestRace {
    fn default() -> Self {
        Self::new()
    }
}
