use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::config::{DEFAULT_LAPS, FIXED_TICK_HZ};
use simulation::input::sample_live_input;
use simulation::race::{complete_laps, RaceState};
use simulation::replay::ReplaySettings;
use simulation::vehicle::drive_ships;
use simulation::SimulationSet;

mod bot;
mod finish_line;
mod race_report;

fn main() {
    let settings = ReplaySettings::from_env();
    let seed = env_parse("GHOSTRUN_SEED").unwrap_or(7);
    let laps = env_parse("GHOSTRUN_LAPS").unwrap_or(DEFAULT_LAPS);

    let mut app = App::new();

    // Headless: one frame per fixed tick, no window.
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / FIXED_TICK_HZ,
        ))),
        LogPlugin::default(),
    ));

    info!(
        "ghostrun: {} laps, bot seed {}, replay file {}",
        laps,
        seed,
        settings.replay_path.display()
    );

    // Settings and race length are read while the simulation plugins build.
    app.insert_resource(settings)
        .insert_resource(RaceState::new(laps))
        .insert_resource(bot::BotDriver::new(seed))
        .add_plugins((simulation::SimulationPlugin, save::SavePlugin));

    app.add_systems(
        FixedUpdate,
        bot::drive_bot
            .before(sample_live_input)
            .in_set(SimulationSet::PreSim),
    )
    .add_systems(
        FixedUpdate,
        finish_line::detect_laps
            .after(drive_ships)
            .before(complete_laps)
            .in_set(SimulationSet::Simulation),
    )
    .add_systems(
        FixedUpdate,
        race_report::report_and_exit
            .after(save::persist_best_run)
            .in_set(SimulationSet::PostSim),
    );

    app.run();
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = std::env::var(key).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            eprintln!("ignoring {key}={value:?}: not a valid value");
            None
        }
    }
}
