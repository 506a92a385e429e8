//! Best-run persistence and ghost startup.

use std::path::Path;

use bevy::prelude::*;
use simulation::replay::retention::{self, RetentionDecision};
use simulation::replay::{ReplayFinalized, ReplaySettings, ReplaySimulationHost, ReplayStore};

use crate::replay_io::{load_prior_best, load_replay_or_default, write_replay};
use crate::save_error::SaveError;

/// Compare `store` with the replay at `path` and overwrite it if `store` is
/// the better run.
pub fn persist_if_best(path: &Path, store: &ReplayStore) -> Result<RetentionDecision, SaveError> {
    let prior = load_prior_best(path);
    let decision = retention::decide(prior.as_ref(), store.elapsed_time);
    if decision.should_persist() {
        write_replay(path, store)?;
    }
    Ok(decision)
}

/// The most recent retention outcome, for reporting.
#[derive(Resource, Debug, Clone, PartialEq)]
pub enum LastRetention {
    Saved(RetentionDecision),
    Discarded(RetentionDecision),
    Failed(String),
}

/// Offers each finalized recording to best-run retention.
pub fn persist_best_run(
    mut finalized: EventReader<ReplayFinalized>,
    settings: Res<ReplaySettings>,
    mut commands: Commands,
) {
    let path = settings.replay_path.as_path();
    for event in finalized.read() {
        let outcome = match persist_if_best(path, &event.store) {
            Ok(decision) if decision.should_persist() => {
                info!("Replay saved to {} ({decision})", path.display());
                LastRetention::Saved(decision)
            }
            Ok(decision) => {
                info!("Replay not saved: {decision}");
                LastRetention::Discarded(decision)
            }
            Err(e) => {
                error!("Failed to save replay to {}: {e}", path.display());
                LastRetention::Failed(e.to_string())
            }
        };
        commands.insert_resource(outcome);
    }
}

/// Startup: if a best run is stored, start its ghost.
pub fn load_ghost_replay(settings: Res<ReplaySettings>, mut commands: Commands) {
    if !settings.ghost_enabled {
        info!("Ghost replay disabled");
        return;
    }
    let path = settings.replay_path.as_path();
    if !path.exists() {
        info!("No replay at {}, racing without a ghost", path.display());
        return;
    }
    let store = load_replay_or_default(path);
    if store.is_empty() {
        info!("Replay {} has no inputs, racing without a ghost", path.display());
        return;
    }
    commands.insert_resource(ReplaySimulationHost::new(store));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay_io::read_replay;
    use crate::test_dir;
    use simulation::input::InputState;
    use std::fs;

    fn run(elapsed_time: f32) -> ReplayStore {
        ReplayStore {
            elapsed_time,
            change_points: vec![InputState::new(1.0, 0.0, false, 0)],
        }
    }

    #[test]
    fn test_retention_sequence() {
        let dir = test_dir("best_run_sequence");
        let path = dir.join("best.replay");

        let first = persist_if_best(&path, &run(60.0)).unwrap();
        assert_eq!(first, RetentionDecision::NoPriorRun);
        assert_eq!(read_replay(&path).unwrap().elapsed_time, 60.0);

        let slower = persist_if_best(&path, &run(65.0)).unwrap();
        assert!(!slower.should_persist());
        assert_eq!(read_replay(&path).unwrap().elapsed_time, 60.0);

        let faster = persist_if_best(&path, &run(45.0)).unwrap();
        assert_eq!(faster, RetentionDecision::Faster { prior: 60.0 });
        assert_eq!(read_replay(&path).unwrap().elapsed_time, 45.0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_prior_is_replaced() {
        let dir = test_dir("best_run_invalid_prior");
        let path = dir.join("best.replay");
        write_replay(&path, &run(0.0)).unwrap();

        let decision = persist_if_best(&path, &run(500.0)).unwrap();
        assert_eq!(decision, RetentionDecision::PriorInvalid { prior: 0.0 });
        assert_eq!(read_replay(&path).unwrap().elapsed_time, 500.0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_prior_is_replaced() {
        let dir = test_dir("best_run_corrupt_prior");
        let path = dir.join("best.replay");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, b"garbage").unwrap();

        assert!(persist_if_best(&path, &run(80.0)).unwrap().should_persist());
        assert_eq!(read_replay(&path).unwrap(), run(80.0));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = test_dir("best_run_write_failure");
        // A directory where the file should be makes the rename fail.
        let path = dir.join("best.replay");
        fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(persist_if_best(&path, &run(10.0)).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
