//! Handles server death + respawn logic
//!
//! Where a player reappears is decided in two steps: *which planet* (the one
//! they died on, falling back to their designated home planet and finally
//! the default planet), then *which position on it* (their stored spawn
//! point, re-validated against the terrain every time it is used and
//! corrected in place if it went bad). Respawns resolving to the default
//! planet are left entirely to the host so beds and similar mechanics keep
//! working.

use std::collections::HashMap;

use astrum_core::{
    coordinates::BlockCoordinate,
    ecs::FixedUpdateSet,
    entities::player::{
        Dead, Player, RequestRespawnMessage,
        spawn_points::{PlanetSpawnPoints, SpawnPoint},
        teleport::TeleportPlayerMessage,
    },
    planet::{PlanetError, PlanetId, default_planet_id},
    state::GameState,
    world::{SurfaceOracle, WorldBounds, WorldWithin, find_safe_position},
};
use bevy::prelude::*;
use uuid::Uuid;

use crate::{settings::ServerSettings, world::PlanetWorlds};

#[derive(Resource, Debug, Default)]
/// Remembers which planet each player died on until their next respawn.
///
/// Entries are transient: written at death, consumed by the respawn that
/// follows, and dropped with the player's session if no respawn ever reads
/// them.
pub struct DeathPlanets(HashMap<Uuid, PlanetId>);

impl DeathPlanets {
    /// Records where a player died, overwriting any stale entry
    pub fn record(&mut self, player: Uuid, planet: PlanetId) {
        self.0.insert(player, planet);
    }

    /// Reads and removes the entry for this player in one step. Exclusive
    /// access to the resource makes the read-then-remove atomic per player.
    pub fn take(&mut self, player: Uuid) -> Option<PlanetId> {
        self.0.remove(&player)
    }

    /// Drops any entry for this player without reading it
    pub fn forget(&mut self, player: Uuid) {
        self.0.remove(&player);
    }
}

/// Which planet a player should respawn on: the planet recorded at death
/// (consumed here), else their designated home planet when that feature is
/// enabled, else the default planet. The fallbacks cover death-tracking data
/// lost between death and respawn (e.g. a server restart).
pub fn resolve_respawn_planet(
    memo: &mut DeathPlanets,
    points: &PlanetSpawnPoints,
    player: Uuid,
    designated_enabled: bool,
) -> PlanetId {
    if let Some(planet) = memo.take(player) {
        return planet;
    }

    if designated_enabled && let Some(planet) = points.designated_planet() {
        return planet.clone();
    }

    default_planet_id()
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// What [`resolve_spawn_target`] did to the player's stored spawn point
pub enum SpawnResolution {
    /// The stored point re-validated clean and was used as-is
    Unchanged(SpawnPoint),
    /// The stored point was no longer safe; the validated position replaced
    /// it (facing reset) and should be reported to the player
    Corrected {
        /// Where the unsafe point was
        from: BlockCoordinate,
        /// The replacement now on file
        point: SpawnPoint,
    },
    /// No point was on file; the world spawn was validated and stored so the
    /// next resolution is a plain lookup
    Initialized(SpawnPoint),
}

impl SpawnResolution {
    /// The spawn point the player should be sent to
    pub fn point(&self) -> SpawnPoint {
        match self {
            Self::Unchanged(point) => *point,
            Self::Corrected { point, .. } => *point,
            Self::Initialized(point) => *point,
        }
    }
}

/// Decides the exact position a player appears at on `planet`, re-validating
/// any stored point and self-healing it when terrain changed underneath it.
/// Only ever writes to the store after validating against the (loaded)
/// world's terrain.
pub fn resolve_spawn_target(
    points: &mut PlanetSpawnPoints,
    planet: &PlanetId,
    world_spawn: BlockCoordinate,
    bounds: WorldBounds,
    surface: &dyn SurfaceOracle,
) -> SpawnResolution {
    if let Some(stored) = points.spawn_point(planet) {
        let validated = find_safe_position(surface, bounds, stored.pos);

        if validated == stored.pos {
            return SpawnResolution::Unchanged(stored);
        }

        let corrected = SpawnPoint::facing_forward(validated);
        points.set_spawn_point(planet.clone(), corrected);
        return SpawnResolution::Corrected {
            from: stored.pos,
            point: corrected,
        };
    }

    let point = SpawnPoint::facing_forward(find_safe_position(surface, bounds, world_spawn));
    points.set_spawn_point(planet.clone(), point);
    SpawnResolution::Initialized(point)
}

/// Resolves a planet to its world and a validated spawn target on it, in one
/// step. Fails (mutating nothing) when the planet is unknown or its world is
/// not loaded.
pub fn resolve_planet_spawn(
    worlds: &PlanetWorlds,
    points: &mut PlanetSpawnPoints,
    planet: &PlanetId,
) -> Result<(Entity, SpawnResolution), PlanetError> {
    let world = worlds.resolve(planet)?;
    let resolution = resolve_spawn_target(points, planet, world.spawn, world.bounds, world.surface);

    Ok((world.entity, resolution))
}

fn on_player_death(
    q_dead: Query<(&Player, &WorldWithin), Added<Dead>>,
    worlds: PlanetWorlds,
    mut memo: ResMut<DeathPlanets>,
) {
    for (player, world_within) in q_dead.iter() {
        let planet = worlds.planet_of_world(world_within.0);
        info!("Player {} died on planet {planet}", player.name());
        memo.record(player.uuid(), planet);
    }
}

fn on_respawn_request(
    mut evr_respawn: MessageReader<RequestRespawnMessage>,
    mut q_player: Query<(Entity, &Player, &mut PlanetSpawnPoints), With<Dead>>,
    worlds: PlanetWorlds,
    mut memo: ResMut<DeathPlanets>,
    settings: Res<ServerSettings>,
    mut evw_teleport: MessageWriter<TeleportPlayerMessage>,
    mut commands: Commands,
) {
    for ev in evr_respawn.read() {
        // Requests for living players are ignored
        let Ok((entity, player, mut points)) = q_player.get_mut(ev.player) else {
            continue;
        };

        let planet = resolve_respawn_planet(&mut memo, &points, player.uuid(), settings.designated_respawn);

        if planet == default_planet_id() {
            // Beds, anchors & whatever else the host does stay host-owned
            debug!("Player {} respawning on the default planet - host handles it", player.name());
            commands.entity(entity).remove::<Dead>();
            continue;
        }

        match resolve_planet_spawn(&worlds, &mut points, &planet) {
            Ok((world, resolution)) => {
                if let SpawnResolution::Corrected { from, point } = &resolution {
                    warn!(
                        "Stored spawn for {} on {planet} at {from} was no longer safe - corrected to {}",
                        player.name(),
                        point.pos
                    );
                }

                let point = resolution.point();
                info!("Respawning {} on planet {planet} at {}", player.name(), point.pos);

                commands.entity(entity).remove::<Dead>();
                evw_teleport.write(TeleportPlayerMessage {
                    player: entity,
                    world,
                    pos: point.pos,
                    yaw: point.yaw,
                    pitch: point.pitch,
                });
            }
            Err(e) => {
                error!("Could not respawn {} on planet {planet}: {e}", player.name());
            }
        }
    }
}

pub(super) fn register(app: &mut App) {
    app.init_resource::<DeathPlanets>();

    app.add_systems(
        FixedUpdate,
        (on_player_death, on_respawn_request)
            .chain()
            .in_set(FixedUpdateSet::Main)
            .run_if(in_state(GameState::Playing)),
    );
}

#[cfg(test)]
mod tests {
    use astrum_core::id::NamespacedId;

    use super::*;

    struct FlatSurface {
        height: i32,
    }

    impl SurfaceOracle for FlatSurface {
        fn ensure_loaded(&self, _x: i32, _z: i32) {}

        fn top_solid_y(&self, _x: i32, _z: i32) -> i32 {
            self.height
        }
    }

    const BOUNDS: WorldBounds = WorldBounds {
        bottom_y: -64,
        sea_level: 63,
    };

    const WORLD_SPAWN: BlockCoordinate = BlockCoordinate::new(0, 71, 0);

    #[test]
    fn death_memo_wins_and_is_consumed_once() {
        let mut memo = DeathPlanets::default();
        let mut points = PlanetSpawnPoints::default();
        let player = Uuid::new_v4();
        let mars = NamespacedId::astrum("mars");
        let moon = NamespacedId::astrum("moon");

        points.set_designated_planet(Some(moon.clone()));
        memo.record(player, mars.clone());

        assert_eq!(resolve_respawn_planet(&mut memo, &points, player, true), mars);
        // The entry is gone: the next resolution falls through to designation
        assert_eq!(resolve_respawn_planet(&mut memo, &points, player, true), moon);
    }

    #[test]
    fn falls_back_to_default_without_memo_or_designation() {
        let mut memo = DeathPlanets::default();
        let points = PlanetSpawnPoints::default();

        assert_eq!(
            resolve_respawn_planet(&mut memo, &points, Uuid::new_v4(), true),
            default_planet_id()
        );
    }

    #[test]
    fn disabled_designation_is_skipped() {
        let mut memo = DeathPlanets::default();
        let mut points = PlanetSpawnPoints::default();
        points.set_designated_planet(Some(NamespacedId::astrum("space")));

        assert_eq!(
            resolve_respawn_planet(&mut memo, &points, Uuid::new_v4(), false),
            default_planet_id()
        );
    }

    #[test]
    fn stale_death_entry_is_overwritten() {
        let mut memo = DeathPlanets::default();
        let player = Uuid::new_v4();

        memo.record(player, NamespacedId::astrum("mars"));
        memo.record(player, NamespacedId::astrum("moon"));

        assert_eq!(memo.take(player), Some(NamespacedId::astrum("moon")));
        assert_eq!(memo.take(player), None);
    }

    #[test]
    fn first_resolution_stores_then_reuses_without_rescanning() {
        let mut points = PlanetSpawnPoints::default();
        let mars = NamespacedId::astrum("mars");
        let surface = FlatSurface { height: 70 };

        let first = resolve_spawn_target(&mut points, &mars, WORLD_SPAWN, BOUNDS, &surface);
        let SpawnResolution::Initialized(point) = first else {
            panic!("first resolution should initialize the store");
        };
        assert_eq!(point.pos, BlockCoordinate::new(0, 71, 0));

        // Second resolution is a plain lookup and must not rewrite the store
        let second = resolve_spawn_target(&mut points, &mars, WORLD_SPAWN, BOUNDS, &surface);
        assert_eq!(second, SpawnResolution::Unchanged(point));
        assert_eq!(points.spawn_point(&mars), Some(point));
    }

    #[test]
    fn unsafe_stored_point_self_heals() {
        let mut points = PlanetSpawnPoints::default();
        let mars = NamespacedId::astrum("mars");

        // Stored while the surface was at y=70...
        points.set_spawn_point(mars.clone(), SpawnPoint::new(BlockCoordinate::new(4, 71, 4), 45.0, 10.0));

        // ...but the terrain has since risen
        let surface = FlatSurface { height: 80 };
        let resolution = resolve_spawn_target(&mut points, &mars, WORLD_SPAWN, BOUNDS, &surface);

        let SpawnResolution::Corrected { from, point } = resolution else {
            panic!("unsafe stored point should be corrected");
        };
        assert_eq!(from, BlockCoordinate::new(4, 71, 4));
        assert_eq!(point.pos, BlockCoordinate::new(4, 81, 4));
        assert_eq!((point.yaw, point.pitch), (0.0, 0.0));

        // The corrected point is authoritative from now on
        assert_eq!(points.spawn_point(&mars), Some(point));
        assert_eq!(
            resolve_spawn_target(&mut points, &mars, WORLD_SPAWN, BOUNDS, &surface),
            SpawnResolution::Unchanged(point)
        );
    }
}
