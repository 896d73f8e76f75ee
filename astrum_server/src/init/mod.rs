//! Creates the dimension entities this server hosts
//!
//! The host's built-in dimensions always exist; one extra dimension is
//! created per catalogue planet. After a catalogue reload the planet-backed
//! set is resynchronized: dimensions for removed planets unload and players
//! inside them are returned to the primary world.

use astrum_core::{
    coordinates::BlockCoordinate,
    entities::player::{Player, teleport::TeleportPlayerMessage},
    id::NamespacedId,
    planet::catalog::PlanetCatalog,
    state::GameState,
    world::{
        Dimension, PrimaryWorld, SurfaceOracle, WorldBounds, WorldSpawn, WorldSurface, WorldWithin, builtin_dimension_ids,
        is_builtin_dimension,
    },
};
use bevy::prelude::*;

use crate::{planets::loading::PlanetsReloadedMessage, world::terrain::NoiseSurface};

const DEFAULT_BOUNDS: WorldBounds = WorldBounds {
    bottom_y: -64,
    sea_level: 63,
};

const SURFACE_BASE_HEIGHT: i32 = 64;
const SURFACE_AMPLITUDE: f64 = 24.0;

fn spawn_dimension(commands: &mut Commands, id: NamespacedId, primary: bool) -> Entity {
    let surface = NoiseSurface::seeded_from(&id, SURFACE_BASE_HEIGHT, SURFACE_AMPLITUDE);
    let spawn_y = surface.top_solid_y(0, 0) + 1;

    let mut entity = commands.spawn((
        Dimension::new(id),
        WorldSpawn(BlockCoordinate::new(0, spawn_y, 0)),
        DEFAULT_BOUNDS,
        WorldSurface::new(surface),
    ));

    if primary {
        entity.insert(PrimaryWorld);
    }

    entity.id()
}

fn create_worlds(mut commands: Commands, catalog: Res<PlanetCatalog>) {
    for (i, id) in builtin_dimension_ids().into_iter().enumerate() {
        spawn_dimension(&mut commands, id, i == 0);
    }

    for (id, _) in catalog.iter() {
        spawn_dimension(&mut commands, id.clone(), false);
    }

    info!("Created {} dimension(s)", builtin_dimension_ids().len() + catalog.len());
}

fn worlds_ready(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::Playing);
}

fn resync_worlds(
    mut evr_reloaded: MessageReader<PlanetsReloadedMessage>,
    catalog: Res<PlanetCatalog>,
    q_dimensions: Query<(Entity, &Dimension)>,
    q_primary: Query<(Entity, &WorldSpawn), With<PrimaryWorld>>,
    q_players: Query<(Entity, &WorldWithin), With<Player>>,
    mut evw_teleport: MessageWriter<TeleportPlayerMessage>,
    mut commands: Commands,
) {
    if evr_reloaded.is_empty() {
        return;
    }
    evr_reloaded.clear();

    for (entity, dimension) in q_dimensions.iter() {
        if is_builtin_dimension(dimension.id()) || catalog.contains(dimension.id()) {
            continue;
        }

        info!("Unloading dimension {} - its planet was removed on reload", dimension.id());

        // Strand nobody: anyone inside goes back to the primary world first
        if let Ok((primary, spawn)) = q_primary.single() {
            for (player, world_within) in q_players.iter().filter(|(_, w)| w.0 == entity) {
                evw_teleport.write(TeleportPlayerMessage {
                    player,
                    world: primary,
                    pos: spawn.0,
                    yaw: 0.0,
                    pitch: 0.0,
                });
            }
        }

        commands.entity(entity).despawn();
    }

    for (id, _) in catalog.iter() {
        if !q_dimensions.iter().any(|(_, dimension)| dimension.id() == id) {
            info!("Loading dimension {id} for newly added planet");
            spawn_dimension(&mut commands, id.clone(), false);
        }
    }
}

pub(super) fn register(app: &mut App) {
    app.add_systems(OnEnter(GameState::PostLoading), create_worlds);
    app.add_systems(Update, worlds_ready.run_if(in_state(GameState::PostLoading)));
    app.add_systems(Update, resync_worlds.run_if(in_state(GameState::Playing)));
}
