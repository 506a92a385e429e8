//! Input replays: delta-encoded recording of the live controls, best-run
//! retention, and frame-accurate playback inside an isolated ghost world.
//!
//! Everything is counted in fixed ticks. A recording made at tick rate N can
//! only be played back faithfully at tick rate N.

pub mod format;
pub mod host;
pub mod player;
pub mod plugin;
pub mod recorder;
pub mod retention;
pub mod settings;

pub use format::ReplayStore;
pub use host::{GhostMirror, ReplaySimulationHost};
pub use player::ReplayPlayer;
pub use plugin::ReplayPlugin;
pub use recorder::{finalize_recording, ReplayFinalized, ReplayRecorder};
pub use retention::RetentionDecision;
pub use settings::ReplaySettings;
