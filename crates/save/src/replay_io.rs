//! Reading and writing the best-replay file.
//!
//! Writes go through [`atomic_write`]. Reads never fail towards gameplay code:
//! [`load_replay_or_default`] logs and falls back to an empty store.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use simulation::replay::ReplayStore;

use crate::atomic_write::atomic_write;
use crate::save_error::SaveError;

/// Read and decode the replay at `path`.
pub fn read_replay(path: &Path) -> Result<ReplayStore, SaveError> {
    let text = fs::read_to_string(path)?;
    ReplayStore::from_json(&text).map_err(SaveError::Decode)
}

/// Read the replay at `path`, or the default (empty, unfinished) store if it
/// is missing, unreadable, or corrupt.
pub fn load_replay_or_default(path: &Path) -> ReplayStore {
    match read_replay(path) {
        Ok(store) => {
            if let Err(e) = store.validate() {
                warn!("Replay {} is out of order: {e}", path.display());
            }
            info!(
                "Loaded replay {} ({} change points, {:.2}s)",
                path.display(),
                store.change_points.len(),
                store.elapsed_time
            );
            store
        }
        Err(e) => {
            warn!(
                "Could not load replay {}, using an empty one: {e}",
                path.display()
            );
            ReplayStore::default()
        }
    }
}

/// The stored best run, or `None` when no replay file exists.
pub fn load_prior_best(path: &Path) -> Option<ReplayStore> {
    if path.exists() {
        Some(load_replay_or_default(path))
    } else {
        None
    }
}

/// Encode `store` and replace the file at `path` with it.
pub fn write_replay(path: &Path, store: &ReplayStore) -> Result<(), SaveError> {
    let json = store.to_json()?;
    atomic_write(path, json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_dir;
    use simulation::input::InputState;

    fn sample_store() -> ReplayStore {
        ReplayStore {
            elapsed_time: 48.5,
            change_points: vec![
                InputState::new(0.0, 0.0, false, 0),
                InputState::new(1.0, 0.25, false, 5),
            ],
        }
    }

    #[test]
    fn test_write_then_read() {
        let dir = test_dir("io_write_read");
        let path = dir.join("replays/best.replay");

        write_replay(&path, &sample_store()).unwrap();
        assert_eq!(read_replay(&path).unwrap(), sample_store());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_written_file_is_pretty_json() {
        let dir = test_dir("io_pretty");
        let path = dir.join("best.replay");

        write_replay(&path, &ReplayStore::default()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"elapsedTime\": null"), "got {text}");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file() {
        let dir = test_dir("io_missing");
        let path = dir.join("best.replay");

        assert!(matches!(read_replay(&path), Err(SaveError::Io(_))));
        assert_eq!(load_replay_or_default(&path), ReplayStore::default());
        assert!(load_prior_best(&path).is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_and_corrupt_files_load_as_default() {
        let dir = test_dir("io_corrupt");
        let empty = dir.join("empty.replay");
        let corrupt = dir.join("corrupt.replay");
        fs::write(&empty, b"").unwrap();
        fs::write(&corrupt, b"{\"elapsedTime\": 12.0, \"changePoints\": [").unwrap();

        assert!(matches!(read_replay(&empty), Err(SaveError::Decode(_))));
        assert!(matches!(read_replay(&corrupt), Err(SaveError::Decode(_))));
        assert_eq!(load_replay_or_default(&empty), ReplayStore::default());
        assert_eq!(load_replay_or_default(&corrupt), ReplayStore::default());

        // A corrupt file still counts as an existing prior run.
        let prior = load_prior_best(&corrupt).unwrap();
        assert!(prior.elapsed_time.is_infinite());

        let _ = fs::remove_dir_all(&dir);
    }
}
