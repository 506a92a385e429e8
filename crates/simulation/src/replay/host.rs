//! Isolated simulation context for replaying a stored run.
//!
//! The ghost ship lives in its own `World` with its own `Schedule`, so
//! nothing in the live world (queries, events, the race) can see or disturb
//! it. The live world only holds a [`GhostMirror`] copy of the ghost's state,
//! refreshed after every step.

use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use bevy::prelude::*;

use crate::vehicle::{drive_ships, Ship, ShipInput};

use super::format::ReplayStore;
use super::player::{apply_replay_input, ReplayPlayer};

/// Label of the schedule that advances the ghost world by one fixed tick.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GhostStep;

/// Owns the ghost world and steps it in lockstep with the live simulation.
#[derive(Resource)]
pub struct ReplaySimulationHost {
    world: World,
    schedule: Schedule,
    ghost: Entity,
    steps: u64,
}

impl ReplaySimulationHost {
    pub fn new(store: ReplayStore) -> Self {
        let mut world = World::new();
        world.insert_resource(ReplayPlayer::new(store));
        let ghost = world.spawn((Ship::default(), ShipInput::default())).id();

        let mut schedule = Schedule::new(GhostStep);
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems((apply_replay_input, drive_ships).chain());

        Self {
            world,
            schedule,
            ghost,
            steps: 0,
        }
    }

    /// Run one fixed tick: resolve the replayed input, then move the ghost.
    pub fn step(&mut self) {
        self.schedule.run(&mut self.world);
        self.steps += 1;
    }

    pub fn ghost_ship(&self) -> Option<&Ship> {
        self.world.get::<Ship>(self.ghost)
    }

    pub fn player(&self) -> Option<&ReplayPlayer> {
        self.world.get_resource::<ReplayPlayer>()
    }

    /// Ticks stepped since creation.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

/// Live-world copy of the ghost ship, for display.
#[derive(Component, Debug, Default)]
pub struct GhostMirror;

/// System: spawn the mirror entity when a host appears.
pub fn spawn_ghost_mirror(mut commands: Commands) {
    commands.spawn((Ship::default(), GhostMirror));
}

/// System: step the ghost world once and copy the ghost into the mirror.
pub fn step_replay_host(
    mut host: ResMut<ReplaySimulationHost>,
    mut mirrors: Query<&mut Ship, With<GhostMirror>>,
) {
    host.step();
    let Some(ghost) = host.ghost_ship().copied() else {
        return;
    };
    for mut mirror in &mut mirrors {
        *mirror = ghost;
    }
}

/// System: drop the ghost world and its mirror when the app exits.
pub fn teardown_replay_host(
    mut exits: EventReader<AppExit>,
    mut commands: Commands,
    host: Option<Res<ReplaySimulationHost>>,
    mirrors: Query<Entity, With<GhostMirror>>,
) {
    if exits.read().next().is_none() {
        return;
    }
    if let Some(host) = host {
        info!("Tearing down ghost replay after {} steps", host.steps());
        commands.remove_resource::<ReplaySimulationHost>();
    }
    for entity in &mirrors {
        commands.entity(entity).despawn();
    }
}
