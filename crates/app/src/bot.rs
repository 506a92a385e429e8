//! Scripted stand-in for a human driver: holds a random control setting for a
//! random number of ticks, then picks another. Seeded, so a given seed always
//! drives the same race.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use simulation::input::RawControls;

const RUDDER_STEPS: [f32; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];

#[derive(Resource)]
pub struct BotDriver {
    rng: ChaCha8Rng,
    hold_ticks: u32,
    controls: RawControls,
}

impl BotDriver {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            hold_ticks: 0,
            controls: RawControls::default(),
        }
    }

    /// Controls for the next tick.
    pub fn next_controls(&mut self) -> RawControls {
        if self.hold_ticks == 0 {
            self.controls = RawControls {
                thruster: self.rng.gen_range(6..=10) as f32 / 10.0,
                rudder: RUDDER_STEPS[self.rng.gen_range(0..RUDDER_STEPS.len())],
                brake: self.rng.gen_bool(0.04),
            };
            self.hold_ticks = self.rng.gen_range(10..40);
        }
        self.hold_ticks -= 1;
        self.controls
    }
}

/// Writes the bot's controls where a platform input poller would.
pub fn drive_bot(mut bot: ResMut<BotDriver>, mut raw: ResMut<RawControls>) {
    *raw = bot.next_controls();
}
