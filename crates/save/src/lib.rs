//! Replay persistence: the on-disk best run and the systems that read and
//! write it.

mod atomic_write;
pub mod best_run;
pub mod replay_io;
mod save_error;
mod save_plugin;

pub use best_run::{persist_best_run, persist_if_best, LastRetention};
pub use replay_io::{load_prior_best, load_replay_or_default, read_replay, write_replay};
pub use save_error::SaveError;
pub use save_plugin::SavePlugin;

/// Fresh, empty scratch directory for a file test.
#[cfg(test)]
pub(crate) fn test_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("ghostrun_save_test_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
