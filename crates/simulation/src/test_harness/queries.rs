//! Query and simulation-tick methods for `TestRace`.

use bevy::prelude::*;

use crate::race::RaceState;
use crate::replay::{GhostMirror, ReplayRecorder, ReplaySimulationHost, ReplayStore};
use crate::vehicle::{PlayerShip, Ship, ShipInput};
use crate::TickCounter;

use super::{CapturedReplays, TestRace};

impl TestRace {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed ticks by executing the `FixedUpdate` schedule directly.
    /// Bypasses Bevy's time system so each call is exactly N ticks.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Tick until the arming delay is over. Returns the ticks taken.
    pub fn start_race(&mut self) -> u32 {
        let mut ticks = 0;
        while !self.race().is_active() {
            assert!(!self.race().is_finished(), "race already finished");
            assert!(ticks < 1_000, "race never went live");
            self.tick(1);
            ticks += 1;
        }
        ticks
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn race(&self) -> &RaceState {
        self.app.world().resource::<RaceState>()
    }

    pub fn tick_count(&self) -> u64 {
        self.app.world().resource::<TickCounter>().0
    }

    pub fn recorder(&self) -> Option<&ReplayRecorder> {
        self.app.world().get_resource::<ReplayRecorder>()
    }

    pub fn host(&self) -> Option<&ReplaySimulationHost> {
        self.app.world().get_resource::<ReplaySimulationHost>()
    }

    /// Replays finalized so far.
    pub fn finalized_replays(&self) -> &[ReplayStore] {
        &self.app.world().resource::<CapturedReplays>().0
    }

    pub fn player_ship(&mut self) -> Ship {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<&Ship, With<PlayerShip>>();
        *query.single(world)
    }

    pub fn player_input(&mut self) -> ShipInput {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<&ShipInput, With<PlayerShip>>();
        *query.single(world)
    }

    /// The live-world copy of the ghost, if one is running.
    pub fn ghost_mirror(&mut self) -> Option<Ship> {
        let world = self.app.world_mut();
        let mut query = world.query_filtered::<&Ship, With<GhostMirror>>();
        query.iter(world).next().copied()
    }
}
