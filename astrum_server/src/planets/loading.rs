//! Loads the planet catalogue from data records on disk
//!
//! One JSON file per planet; the file stem becomes the planet's path in the
//! `astrum` namespace. A record that fails to parse is skipped with an error
//! rather than aborting the load, and a load that produces nothing falls
//! back to the built-in planet set.

use std::{ffi::OsStr, fs, path::Path};

use astrum_core::{
    id::{IdParseError, NamespacedId},
    planet::{Planet, catalog::PlanetCatalog, default_planet_id},
    state::GameState,
};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkdir::WalkDir;

use crate::settings::ServerSettings;

#[derive(Debug, Serialize, Deserialize)]
struct RawPlanet {
    gravity: f32,
    distance: f32,
    noise_settings: NamespacedId,
    dimension_type: NamespacedId,
}

#[derive(Debug, Error)]
/// Why a single planet record could not be loaded
pub enum DataLoadError {
    /// The record file could not be read
    #[error("failed to read planet record: {0}")]
    Io(#[from] std::io::Error),
    /// The record was not valid JSON or was missing fields
    #[error("failed to parse planet record: {0}")]
    Parse(#[from] serde_json::Error),
    /// The file stem could not become a planet identifier
    #[error(transparent)]
    BadId(#[from] IdParseError),
    /// The file stem was not usable as an identifier path
    #[error("planet record file has no usable name")]
    BadFileName,
    /// The record tried to define the virtual default planet
    #[error("`{0}` is reserved for the default planet and cannot be a data record")]
    ReservedId(NamespacedId),
}

fn parse_planet_record(path: &Path) -> Result<(NamespacedId, Planet), DataLoadError> {
    let data = fs::read(path)?;
    let raw = serde_json::from_slice::<RawPlanet>(&data)?;

    let stem = path.file_stem().and_then(OsStr::to_str).ok_or(DataLoadError::BadFileName)?;
    let id = NamespacedId::parse(&format!("astrum:{stem}"))?;

    if id == default_planet_id() {
        return Err(DataLoadError::ReservedId(id));
    }

    Ok((id, Planet::new(raw.gravity, raw.distance, raw.noise_settings, raw.dimension_type)))
}

/// Builds a complete catalogue from the record files in `dir`
pub fn load_catalog(dir: &Path) -> PlanetCatalog {
    let mut catalog = PlanetCatalog::new();

    for file in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .flatten()
        .filter(|x| x.file_type().is_file())
    {
        let path = file.path();

        if path.extension() != Some(OsStr::new("json")) {
            continue;
        }

        match parse_planet_record(path) {
            Ok((id, planet)) => {
                info!("Loaded planet {id} with gravity {}", planet.gravity_factor());
                catalog.insert(id, planet);
            }
            Err(e) => {
                error!("Error loading planet record {path:?} - {e}");
            }
        }
    }

    if catalog.is_empty() {
        info!("No usable planet records found - registering the built-in planet set");
        return PlanetCatalog::builtin_defaults();
    }

    catalog
}

fn load_planets(mut catalog: ResMut<PlanetCatalog>, settings: Res<ServerSettings>) {
    *catalog = load_catalog(Path::new(&settings.planet_data_folder));
    info!("Planet catalogue ready - {} planet(s)", catalog.len());
}

fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::PostLoading);
}

#[derive(Message, Debug, Default)]
/// Asks for the planet catalogue to be rebuilt from data files (the host's
/// resource-reload mechanism feeds this)
pub struct ReloadPlanetsMessage;

#[derive(Message, Debug, Default)]
/// Sent after a reload replaced the catalogue, so dependents (dimension
/// setup) can resynchronize
pub struct PlanetsReloadedMessage;

fn reload_planets(
    mut evr_reload: MessageReader<ReloadPlanetsMessage>,
    mut evw_reloaded: MessageWriter<PlanetsReloadedMessage>,
    mut catalog: ResMut<PlanetCatalog>,
    settings: Res<ServerSettings>,
) {
    if evr_reload.is_empty() {
        return;
    }
    evr_reload.clear();

    // Single wholesale resource write - no system ever observes a partial
    // catalogue.
    *catalog = load_catalog(Path::new(&settings.planet_data_folder));
    info!("Reloaded planet catalogue - {} planet(s)", catalog.len());

    evw_reloaded.write(PlanetsReloadedMessage);
}

pub(super) fn register(app: &mut App) {
    app.init_resource::<PlanetCatalog>();

    app.add_message::<ReloadPlanetsMessage>().add_message::<PlanetsReloadedMessage>();

    app.add_systems(OnEnter(GameState::Loading), load_planets);
    app.add_systems(Update, finish_loading.run_if(in_state(GameState::Loading)));
    app.add_systems(Update, reload_planets.run_if(in_state(GameState::Playing)));
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn record_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("astrum_planets_{test}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("failed to create test dir");
        dir
    }

    const MARS_RECORD: &str = r#"{
        "gravity": 0.38,
        "distance": 225000000.0,
        "noise_settings": "astrum:mars",
        "dimension_type": "astrum:mars"
    }"#;

    #[test]
    fn malformed_records_are_skipped() {
        let dir = record_dir("malformed");
        fs::write(dir.join("mars.json"), MARS_RECORD).unwrap();
        fs::write(dir.join("broken.json"), "{ not json").unwrap();
        fs::write(dir.join("notes.txt"), "not a record").unwrap();

        let catalog = load_catalog(&dir);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.gravity_of(&NamespacedId::astrum("mars")), 0.38);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_directory_falls_back_to_builtin_defaults() {
        let dir = record_dir("empty");

        let catalog = load_catalog(&dir);

        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains(&NamespacedId::astrum("moon")));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn reserved_default_planet_record_is_rejected() {
        let dir = record_dir("reserved");
        fs::write(dir.join("homeworld.json"), MARS_RECORD).unwrap();

        let result = parse_planet_record(&dir.join("homeworld.json"));
        assert!(matches!(result, Err(DataLoadError::ReservedId(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
