//! Stand-in finish line: a lap is every `LAP_LENGTH` units the player's ship
//! drives.

use bevy::prelude::*;

use simulation::race::LapCompleted;
use simulation::vehicle::{PlayerShip, Ship};

pub const LAP_LENGTH: f32 = 250.0;

/// Laps covered by `distance`.
pub fn laps_driven(distance: f32) -> u32 {
    (distance / LAP_LENGTH).floor() as u32
}

pub fn detect_laps(
    ships: Query<&Ship, With<PlayerShip>>,
    mut counted: Local<u32>,
    mut laps: EventWriter<LapCompleted>,
) {
    for ship in &ships {
        let driven = laps_driven(ship.distance);
        while *counted < driven {
            *counted += 1;
            laps.send(LapCompleted);
        }
    }
}
