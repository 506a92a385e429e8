//! Ship stand-in: just enough kinematics for a replay to visibly reproduce a
//! run. The live world and the ghost world both integrate through
//! [`step_ship`], so identical input sequences give identical trajectories.

use bevy::prelude::*;

use crate::config::{FIXED_DT, SHIP_BRAKE_DECEL, SHIP_DRAG, SHIP_THRUST_ACCEL, SHIP_TURN_RATE};
use crate::input::{ControlInput, InputState, LiveInput};
use crate::TickCounter;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Ship {
    pub position: Vec2,
    /// Radians, 0 = +x.
    pub heading: f32,
    /// Signed forward speed in units per second.
    pub speed: f32,
    /// Odometer: total path length driven.
    pub distance: f32,
}

/// The controls driving a ship this tick.
#[derive(Component, Debug, Clone, Copy)]
pub struct ShipInput(pub InputState);

impl Default for ShipInput {
    fn default() -> Self {
        Self(InputState::neutral(0))
    }
}

/// Marker for the ship the live player controls.
#[derive(Component, Debug, Default)]
pub struct PlayerShip;

/// Integrate one tick of ship movement.
pub fn step_ship(ship: &mut Ship, input: &impl ControlInput, dt: f32) {
    ship.heading += input.rudder() * SHIP_TURN_RATE * dt;
    ship.speed += (input.thruster() * SHIP_THRUST_ACCEL - ship.speed * SHIP_DRAG) * dt;
    if input.is_braking() {
        let slowed = (ship.speed.abs() - SHIP_BRAKE_DECEL * dt).max(0.0);
        ship.speed = slowed.copysign(ship.speed);
    }
    ship.position += Vec2::from_angle(ship.heading) * ship.speed * dt;
    ship.distance += ship.speed.abs() * dt;
}

pub fn spawn_player_ship(mut commands: Commands) {
    commands.spawn((Ship::default(), ShipInput::default(), PlayerShip));
}

/// Hands this tick's live input to the player's ship.
pub fn apply_live_input(
    live: Res<LiveInput>,
    tick: Res<TickCounter>,
    mut ships: Query<&mut ShipInput, With<PlayerShip>>,
) {
    for mut input in &mut ships {
        input.0 = live.snapshot(tick.0);
    }
}

/// Moves every ship that has controls attached.
pub fn drive_ships(mut ships: Query<(&mut Ship, &ShipInput)>) {
    for (mut ship, input) in &mut ships {
        step_ship(&mut ship, &input.0, FIXED_DT);
    }
}
