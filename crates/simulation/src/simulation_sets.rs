//! Per-tick ordering for the replay engine.
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – race phase bookkeeping, live input sampling, input
//!   recording. Everything a ship reads this tick is settled here.
//! * **Simulation** – ship integration, the isolated ghost step, finish line
//!   detection.
//! * **PostSim** – run completion: freezing the recording and the best-run
//!   retention decision. Never mutates simulation state.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain by `SimulationPlugin`. Plugins add fine-grained
/// `.after()` / `.before()` constraints inside a phase.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Race phase, live input sampling, recording.
    PreSim,
    /// Ship movement, ghost host stepping, lap detection.
    Simulation,
    /// Run completion and persistence decisions.
    PostSim,
}
