use bevy::prelude::*;
use simulation::replay::finalize_recording;
use simulation::SimulationSet;

use crate::best_run::{load_ghost_replay, persist_best_run};

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Connects the replay engine to the filesystem: loads the stored best run
/// as a ghost at startup and offers every finished recording to best-run
/// retention. Requires `SimulationPlugin`.
pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_ghost_replay);

        // Same tick the recording is frozen, after it has been handed out.
        app.add_systems(
            FixedUpdate,
            persist_best_run
                .after(finalize_recording)
                .in_set(SimulationSet::PostSim),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_run::LastRetention;
    use crate::replay_io::{read_replay, write_replay};
    use crate::test_dir;
    use simulation::input::{InputState, RawControls};
    use simulation::race::{LapCompleted, RaceState};
    use simulation::replay::{GhostMirror, ReplaySettings, ReplaySimulationHost, ReplayStore};
    use simulation::vehicle::Ship;
    use simulation::SimulationPlugin;
    use std::fs;
    use std::path::Path;

    fn headless_app(path: &Path) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(ReplaySettings {
            replay_path: path.to_path_buf(),
            ..Default::default()
        });
        app.insert_resource(RaceState::new(1));
        app.add_plugins((SimulationPlugin, SavePlugin));
        app.update();
        app
    }

    fn tick(app: &mut App, n: u32) {
        for _ in 0..n {
            app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Full thrust for `ticks` racing ticks, then cross the line.
    fn drive_one_lap(app: &mut App, ticks: u32) {
        app.world_mut().resource_mut::<RawControls>().thruster = 1.0;
        while !app.world().resource::<RaceState>().is_active() {
            tick(app, 1);
        }
        tick(app, ticks);
        app.world_mut().send_event(LapCompleted);
        tick(app, 1);
    }

    #[test]
    fn test_finished_race_is_saved_and_replayed() {
        let dir = test_dir("plugin_round_trip");
        let path = dir.join("best.replay");

        let mut app = headless_app(&path);
        assert!(app.world().get_resource::<ReplaySimulationHost>().is_none());
        drive_one_lap(&mut app, 40);

        let saved = read_replay(&path).unwrap();
        let race_time = app.world().resource::<RaceState>().total_time();
        assert_eq!(saved.elapsed_time, race_time);
        assert!(matches!(
            app.world().resource::<LastRetention>(),
            LastRetention::Saved(_)
        ));

        // Next launch races against it.
        let mut next = headless_app(&path);
        assert!(next.world().get_resource::<ReplaySimulationHost>().is_some());
        tick(&mut next, 30);
        let world = next.world_mut();
        let mut mirrors = world.query_filtered::<&Ship, With<GhostMirror>>();
        assert!(mirrors.single(world).distance > 0.0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_slower_race_keeps_stored_replay() {
        let dir = test_dir("plugin_slower_race");
        let path = dir.join("best.replay");
        let best = ReplayStore {
            elapsed_time: 0.5,
            change_points: vec![InputState::new(1.0, 0.0, false, 0)],
        };
        write_replay(&path, &best).unwrap();

        let mut app = headless_app(&path);
        drive_one_lap(&mut app, 60);

        assert_eq!(read_replay(&path).unwrap(), best);
        assert!(matches!(
            app.world().resource::<LastRetention>(),
            LastRetention::Discarded(_)
        ));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_or_empty_replay_starts_without_ghost() {
        let dir = test_dir("plugin_no_ghost");
        let path = dir.join("best.replay");

        let app = headless_app(&path);
        assert!(app.world().get_resource::<ReplaySimulationHost>().is_none());

        write_replay(&path, &ReplayStore::default()).unwrap();
        let app = headless_app(&path);
        assert!(app.world().get_resource::<ReplaySimulationHost>().is_none());

        let _ = fs::remove_dir_all(&dir);
    }
}
