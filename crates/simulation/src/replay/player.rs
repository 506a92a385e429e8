//! Replay player: turns a stored list of change points back into one
//! `InputState` per tick.

use bevy::prelude::*;

use crate::input::{ControlInput, InputState};
use crate::vehicle::ShipInput;

use super::format::ReplayStore;

/// Resolves the control state active at each tick of a loaded replay.
///
/// The cursor starts on the first change point and only ever moves forward.
/// An empty store plays back as neutral controls.
#[derive(Resource, Debug, Clone)]
pub struct ReplayPlayer {
    store: ReplayStore,
    tick: u64,
    cursor: usize,
    current: InputState,
}

impl Default for ReplayPlayer {
    fn default() -> Self {
        Self::new(ReplayStore::default())
    }
}

impl ReplayPlayer {
    pub fn new(store: ReplayStore) -> Self {
        if let Err(e) = store.validate() {
            warn!("Replay is not in recorded order, playing it back as-is: {e}");
        }
        Self {
            store,
            tick: 0,
            cursor: 0,
            current: InputState::neutral(0),
        }
    }

    /// Resolve the state for the current tick, then move to the next tick.
    pub fn advance(&mut self) -> InputState {
        let points = &self.store.change_points;
        self.current = if points.is_empty() {
            InputState::neutral(self.tick)
        } else {
            while let Some(next) = points.get(self.cursor + 1) {
                if next.tick_index > self.tick {
                    break;
                }
                self.cursor += 1;
            }
            points[self.cursor]
        };
        self.tick += 1;
        self.current
    }

    /// Number of ticks played so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// True once the last change point is in effect; the player keeps
    /// returning it from then on.
    pub fn is_exhausted(&self) -> bool {
        match self.store.last_tick() {
            Some(last) => self.tick > last && self.cursor + 1 == self.store.change_points.len(),
            None => true,
        }
    }
}

impl ControlInput for ReplayPlayer {
    fn thruster(&self) -> f32 {
        self.current.thruster
    }

    fn rudder(&self) -> f32 {
        self.current.rudder
    }

    fn is_braking(&self) -> bool {
        self.current.is_braking
    }
}

/// System: advance the player one tick and hand its state to every ship in
/// the world it lives in.
pub fn apply_replay_input(mut player: ResMut<ReplayPlayer>, mut ships: Query<&mut ShipInput>) {
    let state = player.advance();
    for mut input in &mut ships {
        input.0 = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> InputState {
        InputState::new(1.0, 0.0, false, 0)
    }

    fn b() -> InputState {
        InputState::new(0.5, -1.0, false, 5)
    }

    fn c() -> InputState {
        InputState::new(0.0, 0.0, true, 12)
    }

    fn abc_player() -> ReplayPlayer {
        ReplayPlayer::new(ReplayStore {
            elapsed_time: 10.0,
            change_points: vec![a(), b(), c()],
        })
    }

    #[test]
    fn test_lookup_follows_change_points() {
        let mut player = abc_player();
        for tick in 0..5 {
            assert_eq!(player.advance(), a(), "tick {tick}");
        }
        for tick in 5..12 {
            assert_eq!(player.advance(), b(), "tick {tick}");
        }
        for tick in 12..40 {
            assert_eq!(player.advance(), c(), "tick {tick}");
        }
        assert_eq!(player.tick(), 40);
        assert!(player.is_exhausted());
    }

    #[test]
    fn test_exhausted_once_last_change_point_is_active() {
        let mut player = abc_player();
        for _ in 0..12 {
            player.advance();
        }
        assert!(!player.is_exhausted());
        player.advance();
        assert!(player.is_exhausted());
    }

    #[test]
    fn test_empty_store_is_neutral_forever() {
        let mut player = ReplayPlayer::new(ReplayStore::default());
        for _ in 0..100 {
            assert!(player.advance().is_neutral());
        }
        assert!(player.is_exhausted());
    }

    #[test]
    fn test_first_change_point_is_active_from_tick_zero() {
        let first = InputState::new(1.0, 0.0, false, 3);
        let mut player = ReplayPlayer::new(ReplayStore {
            elapsed_time: 1.0,
            change_points: vec![first],
        });
        for tick in 0..6 {
            let state = player.advance();
            assert!(state.same_frame(&first), "tick {tick}: {state:?}");
        }
    }

    #[test]
    fn test_exposes_current_state_as_control_input() {
        let mut player = abc_player();
        player.advance();
        assert_eq!(player.thruster(), 1.0);
        assert_eq!(player.rudder(), 0.0);
        assert!(!player.is_braking());
        assert_eq!(player.snapshot(0), a());
    }

    #[test]
    fn test_out_of_order_points_use_forward_scan() {
        let mut player = ReplayPlayer::new(ReplayStore {
            elapsed_time: 1.0,
            change_points: vec![a(), InputState::new(0.2, 0.0, false, 10), b()],
        });
        for _ in 0..10 {
            assert_eq!(player.advance(), a());
        }
        // Tick 10 reaches the second point, and the third (tick 5) is already due.
        assert_eq!(player.advance(), b());
        assert!(player.is_exhausted());
    }
}
