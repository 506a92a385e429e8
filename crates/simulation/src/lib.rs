use bevy::prelude::*;

pub mod config;
pub mod input;
pub mod race;
pub mod replay;
pub mod simulation_sets;
pub mod vehicle;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Live-world tick counter, incremented at the end of each FixedUpdate.
#[derive(Resource, Debug, Default)]
pub struct TickCounter(pub u64);

pub fn advance_tick(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(config::FIXED_TICK_HZ))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::PreSim,
                    SimulationSet::Simulation,
                    SimulationSet::PostSim,
                )
                    .chain(),
            );

        app.init_resource::<TickCounter>()
            .init_resource::<race::RaceState>()
            .init_resource::<input::RawControls>()
            .init_resource::<input::LiveInput>()
            .add_event::<race::LapCompleted>()
            .add_event::<race::RaceFinished>()
            .add_systems(Startup, vehicle::spawn_player_ship);

        // Race phase, then input: live input is only non-neutral while racing.
        app.add_systems(
            FixedUpdate,
            (
                race::tick_race,
                input::sample_live_input,
                vehicle::apply_live_input,
            )
                .chain()
                .in_set(SimulationSet::PreSim),
        );
        app.add_systems(
            FixedUpdate,
            (vehicle::drive_ships, race::complete_laps)
                .chain()
                .in_set(SimulationSet::Simulation),
        );
        app.add_systems(FixedUpdate, advance_tick.in_set(SimulationSet::PostSim));

        app.add_plugins(replay::ReplayPlugin);
    }
}
