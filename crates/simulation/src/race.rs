//! Race flow: the arming delay, per-lap timing, and the single finish
//! notification that closes a run.
//!
//! The race starts `Armed` for `ARM_DELAY_TICKS` fixed ticks so the intro can
//! play out with neutral controls, then goes `Racing`. Lap crossings arrive as
//! [`LapCompleted`] events from whatever owns the finish line; completing the
//! last lap moves the race to `Finished` and emits exactly one
//! [`RaceFinished`].

use bevy::prelude::*;

use crate::config::{ticks_to_secs, ARM_DELAY_TICKS, DEFAULT_LAPS};

/// Where the race is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    /// Waiting out the start delay. Controls are neutral.
    Armed { ticks_remaining: u32 },
    /// Live. Controls are read and lap time accumulates.
    Racing,
    /// All laps done. Controls are neutral again.
    Finished,
}

/// Sent by the finish line each time the player's ship crosses it.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LapCompleted;

/// Fired once per run when the final lap completes.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RaceFinished {
    /// Sum of all lap times, in seconds.
    pub elapsed_time: f32,
}

/// Lap bookkeeping and the "is the race active" predicate.
#[derive(Resource, Debug, Clone)]
pub struct RaceState {
    phase: RacePhase,
    laps_required: u32,
    current_lap: u32,
    /// Fixed ticks spent on each lap.
    lap_ticks: Vec<u64>,
}

impl Default for RaceState {
    fn default() -> Self {
        Self::new(DEFAULT_LAPS)
    }
}

impl RaceState {
    pub fn new(laps_required: u32) -> Self {
        let laps_required = laps_required.max(1);
        Self {
            phase: RacePhase::Armed {
                ticks_remaining: ARM_DELAY_TICKS,
            },
            laps_required,
            current_lap: 0,
            lap_ticks: vec![0; laps_required as usize],
        }
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// Armed and finished races are inactive.
    pub fn is_active(&self) -> bool {
        self.phase == RacePhase::Racing
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RacePhase::Finished
    }

    pub fn laps_required(&self) -> u32 {
        self.laps_required
    }

    /// Zero-based index of the lap being driven (equals `laps_required` once
    /// finished).
    pub fn current_lap(&self) -> u32 {
        self.current_lap
    }

    /// Advance one fixed tick.
    pub fn tick(&mut self) {
        if let RacePhase::Armed { ticks_remaining } = self.phase {
            if ticks_remaining > 0 {
                self.phase = RacePhase::Armed {
                    ticks_remaining: ticks_remaining - 1,
                };
                return;
            }
            self.phase = RacePhase::Racing;
        }

        if self.phase == RacePhase::Racing {
            if let Some(ticks) = self.lap_ticks.get_mut(self.current_lap as usize) {
                *ticks += 1;
            }
        }
    }

    /// Register a finish line crossing.
    ///
    /// Returns the total elapsed time when this crossing completes the race.
    /// Crossings while armed or after the finish are ignored.
    pub fn complete_lap(&mut self) -> Option<f32> {
        if !self.is_active() {
            return None;
        }
        self.current_lap += 1;
        if self.current_lap >= self.laps_required {
            self.phase = RacePhase::Finished;
            return Some(self.total_time());
        }
        None
    }

    /// Time spent on lap `lap` (zero-based), in seconds.
    pub fn lap_time(&self, lap: usize) -> Option<f32> {
        self.lap_ticks.get(lap).map(|&t| ticks_to_secs(t))
    }

    /// Sum of all lap times so far, in seconds.
    pub fn total_time(&self) -> f32 {
        ticks_to_secs(self.lap_ticks.iter().sum())
    }
}

/// Advances the race phase and lap timer. First system of every tick.
pub fn tick_race(mut race: ResMut<RaceState>) {
    race.tick();
}

/// Consumes finish line crossings and emits `RaceFinished` on the last one.
pub fn complete_laps(
    mut laps: EventReader<LapCompleted>,
    mut race: ResMut<RaceState>,
    mut finished: EventWriter<RaceFinished>,
) {
    for _ in laps.read() {
        let lap = race.current_lap() as usize;
        let Some(elapsed_time) = race.complete_lap() else {
            if race.is_active() {
                info!(
                    "Lap {}/{} completed in {:.2}s",
                    lap + 1,
                    race.laps_required(),
                    race.lap_time(lap).unwrap_or_default()
                );
            }
            continue;
        };
        info!("Race finished in {:.2}s", elapsed_time);
        finished.send(RaceFinished { elapsed_time });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn about_to_start(laps: u32) -> RaceState {
        let mut race = RaceState::new(laps);
        for _ in 0..ARM_DELAY_TICKS {
            race.tick();
        }
        race
    }

    #[test]
    fn test_armed_for_the_start_delay() {
        let mut race = RaceState::new(3);
        for _ in 0..ARM_DELAY_TICKS {
            assert!(!race.is_active());
            race.tick();
        }
        assert!(!race.is_active(), "still armed until the next tick");
        race.tick();
        assert!(race.is_active());
        assert_eq!(race.lap_time(0), Some(ticks_to_secs(1)));
    }

    #[test]
    fn test_laps_while_armed_are_ignored() {
        let mut race = RaceState::new(1);
        assert_eq!(race.complete_lap(), None);
        assert_eq!(race.current_lap(), 0);
    }

    #[test]
    fn test_finishing_returns_summed_lap_time_once() {
        let mut race = about_to_start(2);
        for _ in 0..100 {
            race.tick();
        }
        assert_eq!(race.complete_lap(), None);
        for _ in 0..50 {
            race.tick();
        }
        let total = race.complete_lap().expect("second lap ends the race");
        assert_eq!(total, ticks_to_secs(150));
        assert_eq!(race.lap_time(0), Some(ticks_to_secs(100)));
        assert_eq!(race.lap_time(1), Some(ticks_to_secs(50)));
        assert!(race.is_finished());
        assert!(!race.is_active());

        // Later crossings never re-fire.
        assert_eq!(race.complete_lap(), None);
    }

    #[test]
    fn test_finished_race_stops_the_clock() {
        let mut race = about_to_start(1);
        race.tick();
        race.complete_lap();
        let total = race.total_time();
        for _ in 0..10 {
            race.tick();
        }
        assert_eq!(race.total_time(), total);
    }

    #[test]
    fn test_zero_laps_is_treated_as_one() {
        assert_eq!(RaceState::new(0).laps_required(), 1);
    }
}
