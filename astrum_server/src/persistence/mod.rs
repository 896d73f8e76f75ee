//! Saving & loading of per-player planet data
//!
//! One file per player UUID under `<world>/players/`. Files hold the raw
//! string-keyed schema so a single unknown or malformed planet key is
//! skipped on load instead of poisoning the whole file. Persistence only
//! happens at session boundaries, on the autosave timer and at shutdown -
//! never on the tick path.

pub mod encoder;

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use astrum_core::{
    entities::player::{
        Player,
        spawn_points::{PlanetSpawnPoints, SpawnPoint},
    },
    id::NamespacedId,
    state::GameState,
};
use bevy::{prelude::*, time::common_conditions::on_timer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::settings::ServerSettings;

const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedPlayerData {
    designated_planet: Option<String>,
    spawns: HashMap<String, SpawnPoint>,
}

fn to_saved(points: &PlanetSpawnPoints) -> SavedPlayerData {
    SavedPlayerData {
        designated_planet: points.designated_planet().map(|p| p.to_string()),
        spawns: points.iter().map(|(planet, point)| (planet.to_string(), *point)).collect(),
    }
}

fn from_saved(data: SavedPlayerData) -> PlanetSpawnPoints {
    let mut points = PlanetSpawnPoints::default();

    match data.designated_planet.as_deref().map(NamespacedId::parse) {
        Some(Ok(planet)) => points.set_designated_planet(Some(planet)),
        Some(Err(e)) => warn!("Skipping malformed designated planet in player data - {e}"),
        None => {}
    }

    for (key, point) in data.spawns {
        match NamespacedId::parse(&key) {
            Ok(planet) => points.set_spawn_point(planet, point),
            Err(e) => warn!("Skipping malformed planet key `{key}` in player data - {e}"),
        }
    }

    points
}

/// Where one player's planet data lives on disk
pub fn player_file(world_folder: &str, uuid: Uuid) -> PathBuf {
    Path::new(world_folder).join("players").join(format!("{uuid}.dat"))
}

/// Writes a player's planet data to their save file
pub fn save_player_data(world_folder: &str, uuid: Uuid, points: &PlanetSpawnPoints) -> anyhow::Result<()> {
    let path = player_file(world_folder, uuid);

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("failed to create player data directory {dir:?}"))?;
    }

    let data = encoder::serialize(&to_saved(points))?;
    fs::write(&path, data).with_context(|| format!("failed to write player data to {path:?}"))
}

/// Reads a player's planet data, degrading to empty data on a missing file
/// or any read/decode error (which is logged, not fatal).
pub fn load_player_data(world_folder: &str, uuid: Uuid) -> PlanetSpawnPoints {
    let path = player_file(world_folder, uuid);

    let raw = match fs::read(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return PlanetSpawnPoints::default(),
        Err(e) => {
            error!("Failed to read player data {path:?} - {e}");
            return PlanetSpawnPoints::default();
        }
    };

    match encoder::deserialize::<SavedPlayerData>(&raw) {
        Ok(data) => from_saved(data),
        Err(e) => {
            error!("Corrupt player data {path:?} - starting fresh ({e:#})");
            PlanetSpawnPoints::default()
        }
    }
}

/// Saves every connected player's planet data
pub fn save_all_players<'a>(
    world_folder: &str,
    players: impl Iterator<Item = (&'a Player, &'a PlanetSpawnPoints)>,
) -> usize {
    let mut saved = 0;

    for (player, points) in players {
        match save_player_data(world_folder, player.uuid(), points) {
            Ok(()) => saved += 1,
            Err(e) => error!("Failed to save planet data for {}: {e:#}", player.name()),
        }
    }

    saved
}

fn autosave_players(q_players: Query<(&Player, &PlanetSpawnPoints)>, settings: Res<ServerSettings>) {
    if q_players.is_empty() {
        return;
    }

    let saved = save_all_players(&settings.world_folder, q_players.iter());
    info!("Autosaved planet data for {saved} player(s)");
}

pub(super) fn register(app: &mut App) {
    app.add_systems(
        Update,
        autosave_players
            .run_if(on_timer(AUTOSAVE_INTERVAL))
            .run_if(in_state(GameState::Playing)),
    );
}

#[cfg(test)]
mod tests {
    use astrum_core::coordinates::BlockCoordinate;

    use super::*;

    #[test]
    fn malformed_planet_keys_are_skipped() {
        let mut spawns = HashMap::new();
        spawns.insert("astrum:mars".to_owned(), SpawnPoint::facing_forward(BlockCoordinate::new(1, 70, 1)));
        spawns.insert("not an id".to_owned(), SpawnPoint::facing_forward(BlockCoordinate::new(2, 70, 2)));

        let points = from_saved(SavedPlayerData {
            designated_planet: Some("also bad".to_owned()),
            spawns,
        });

        assert!(points.spawn_point(&NamespacedId::astrum("mars")).is_some());
        assert_eq!(points.iter().count(), 1);
        assert!(points.designated_planet().is_none());
    }

    #[test]
    fn saved_schema_round_trips_through_the_store() {
        let mut points = PlanetSpawnPoints::default();
        points.set_designated_planet(Some(NamespacedId::astrum("space")));
        points.set_spawn_point(
            NamespacedId::astrum("moon"),
            SpawnPoint::new(BlockCoordinate::new(-4, 68, 9), 180.0, -5.0),
        );

        let restored = from_saved(to_saved(&points));

        assert_eq!(restored.designated_planet(), Some(&NamespacedId::astrum("space")));
        assert_eq!(
            restored.spawn_point(&NamespacedId::astrum("moon")),
            points.spawn_point(&NamespacedId::astrum("moon"))
        );
    }
}
