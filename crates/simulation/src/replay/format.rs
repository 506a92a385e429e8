//! On-disk replay format.
//!
//! A replay is a pretty-printed JSON document:
//!
//! ```text
//! {
//!   "elapsedTime": 61.24,
//!   "changePoints": [
//!     { "thruster": 1.0, "rudder": 0.0, "isBreaking": false, "tickIndex": 0 },
//!     ...
//!   ]
//! }
//! ```
//!
//! Only ticks whose controls differ from the previous tick are stored. An
//! unfinished store has an infinite elapsed time, written as `null`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::input::InputState;

/// Directory, relative to the working directory, holding the best replay.
pub const DEFAULT_REPLAY_DIR: &str = "replays";

/// File name of the single best replay.
pub const REPLAY_FILE_NAME: &str = "best.replay";

/// Recorded control changes of one run plus how long the run took.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStore {
    /// Seconds the run took; `+inf` until a run has finished.
    #[serde(with = "elapsed_time", default = "unfinished")]
    pub elapsed_time: f32,
    /// Control changes in ascending tick order.
    #[serde(default)]
    pub change_points: Vec<InputState>,
}

fn unfinished() -> f32 {
    f32::INFINITY
}

impl Default for ReplayStore {
    fn default() -> Self {
        Self {
            elapsed_time: unfinished(),
            change_points: Vec::new(),
        }
    }
}

impl PartialEq for ReplayStore {
    fn eq(&self, other: &Self) -> bool {
        self.elapsed_time == other.elapsed_time
            && self.change_points.len() == other.change_points.len()
            && self
                .change_points
                .iter()
                .zip(&other.change_points)
                .all(|(a, b)| a.same_frame(b))
    }
}

impl ReplayStore {
    /// `replays/best.replay` under the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_REPLAY_DIR).join(REPLAY_FILE_NAME)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_time.is_finite()
    }

    pub fn is_empty(&self) -> bool {
        self.change_points.is_empty()
    }

    /// Tick index of the last recorded change, if any.
    pub fn last_tick(&self) -> Option<u64> {
        self.change_points.last().map(|p| p.tick_index)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("JSON decode error: {e}"))
    }

    /// Check the ordering guarantees the recorder provides: strictly
    /// increasing tick indices and no two adjacent entries with equal values.
    pub fn validate(&self) -> Result<(), String> {
        for (i, pair) in self.change_points.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.tick_index <= prev.tick_index {
                return Err(format!(
                    "change point {} at tick {} does not follow tick {}",
                    i + 1,
                    next.tick_index,
                    prev.tick_index
                ));
            }
            if next == prev {
                return Err(format!(
                    "change point {} at tick {} repeats the previous values",
                    i + 1,
                    next.tick_index
                ));
            }
        }
        Ok(())
    }
}

/// JSON has no infinity, so `+inf` is written as `null` and `null` reads back
/// as `+inf`. Other non-finite times have no encoding and fail to serialize.
mod elapsed_time {
    use serde::ser::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f32(*value)
        } else if *value == f32::INFINITY {
            serializer.serialize_none()
        } else {
            Err(S::Error::custom(format!("elapsed time {value} cannot be stored")))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::INFINITY))
    }
}
