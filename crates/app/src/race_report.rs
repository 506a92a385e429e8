//! End of run: summarise the race and quit.

use bevy::prelude::*;

use save::LastRetention;
use simulation::race::RaceState;
use simulation::replay::ReplaySimulationHost;
use simulation::vehicle::{PlayerShip, Ship};

pub fn report_and_exit(
    race: Res<RaceState>,
    retention: Option<Res<LastRetention>>,
    host: Option<Res<ReplaySimulationHost>>,
    player: Query<&Ship, With<PlayerShip>>,
    mut exit: EventWriter<AppExit>,
    mut reported: Local<bool>,
) {
    if !race.is_finished() || *reported {
        return;
    }
    *reported = true;

    for lap in 0..race.laps_required() as usize {
        info!("Lap {}: {:.2}s", lap + 1, race.lap_time(lap).unwrap_or_default());
    }
    info!("Total: {:.2}s", race.total_time());

    match retention.as_deref() {
        Some(LastRetention::Saved(decision)) => info!("Best run updated: {decision}"),
        Some(LastRetention::Discarded(decision)) => info!("Best run kept: {decision}"),
        Some(LastRetention::Failed(e)) => warn!("Best run could not be saved: {e}"),
        None => info!("Recording disabled, nothing saved"),
    }

    if let (Some(host), Ok(ship)) = (host, player.get_single()) {
        let ghost_done = host.player().is_some_and(|p| p.is_exhausted());
        if let Some(ghost) = host.ghost_ship() {
            let gap = ship.distance - ghost.distance;
            if gap >= 0.0 {
                info!("Finished {:.1} units ahead of the ghost", gap);
            } else {
                info!("Finished {:.1} units behind the ghost", -gap);
            }
        }
        if ghost_done {
            info!("Ghost had already played out its whole run");
        }
    }

    exit.send(AppExit::Success);
}
