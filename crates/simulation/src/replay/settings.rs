//! Replay configuration.

use std::path::PathBuf;

use bevy::prelude::*;

use super::format::ReplayStore;

/// Where the best replay lives and which halves of the replay system run.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ReplaySettings {
    pub replay_path: PathBuf,
    /// Record the live run and offer it to best-run retention.
    pub recording_enabled: bool,
    /// Play the stored best run back as a ghost.
    pub ghost_enabled: bool,
}

impl Default for ReplaySettings {
    fn default() -> Self {
        Self {
            replay_path: ReplayStore::default_path(),
            recording_enabled: true,
            ghost_enabled: true,
        }
    }
}

impl ReplaySettings {
    /// Defaults overridden by `GHOSTRUN_REPLAY_PATH`, `GHOSTRUN_RECORD` and
    /// `GHOSTRUN_GHOST`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            replay_path: var("GHOSTRUN_REPLAY_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.replay_path),
            recording_enabled: flag(var("GHOSTRUN_RECORD"), defaults.recording_enabled),
            ghost_enabled: flag(var("GHOSTRUN_GHOST"), defaults.ghost_enabled),
        }
    }
}

fn flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(str::trim) {
        Some("0") | Some("false") | Some("off") | Some("no") => false,
        Some("1") | Some("true") | Some("on") | Some("yes") => true,
        _ => default,
    }
}
