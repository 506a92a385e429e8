/// Fixed simulation rate. Every recorded tick index is counted at this rate.
pub const FIXED_TICK_HZ: f64 = 50.0;
/// Seconds per fixed tick.
pub const FIXED_DT: f32 = (1.0 / FIXED_TICK_HZ) as f32;

/// Ticks the race stays armed before it goes live (0.1 s at `FIXED_TICK_HZ`).
pub const ARM_DELAY_TICKS: u32 = 5;
/// Laps in a default race.
pub const DEFAULT_LAPS: u32 = 3;

/// Convert a tick count into seconds at the fixed rate.
pub fn ticks_to_secs(ticks: u64) -> f32 {
    (ticks as f64 / FIXED_TICK_HZ) as f32
}

// Ship stand-in tuning. Shared verbatim by the live world and the ghost world
// so both integrate identically.
pub const SHIP_THRUST_ACCEL: f32 = 24.0;
pub const SHIP_DRAG: f32 = 0.6;
pub const SHIP_BRAKE_DECEL: f32 = 40.0;
pub const SHIP_TURN_RATE: f32 = 2.5;
