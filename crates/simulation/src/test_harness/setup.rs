//! Builder and input methods for integration tests.

use bevy::prelude::*;

use crate::input::RawControls;
use crate::race::LapCompleted;
use crate::replay::{ReplaySimulationHost, ReplayStore};

use super::TestRace;

impl TestRace {
    /// Start a ghost of `store` next to the live ship.
    pub fn with_ghost(mut self, store: ReplayStore) -> Self {
        self.app
            .world_mut()
            .insert_resource(ReplaySimulationHost::new(store));
        self
    }

    /// Hold these raw controls until changed.
    pub fn set_controls(&mut self, thruster: f32, rudder: f32, brake: bool) {
        *self.app.world_mut().resource_mut::<RawControls>() = RawControls {
            thruster,
            rudder,
            brake,
        };
    }

    /// Report a finish line crossing; it is handled during the next tick.
    pub fn cross_finish_line(&mut self) {
        self.app.world_mut().send_event(LapCompleted);
    }

    /// Send `AppExit` and run the `Last` schedule that reacts to it.
    pub fn exit(&mut self) {
        let world = self.app.world_mut();
        world.send_event(AppExit::Success);
        world.run_schedule(Last);
    }
}
