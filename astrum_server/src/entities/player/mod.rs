//! Player session lifecycle
//!
//! The host's session layer tells us when players come and go; this module
//! turns those into entities with their persisted planet data attached.

pub mod respawn;
pub mod teleport;

use astrum_core::{
    ecs::FixedUpdateSet,
    entities::player::{Player, PlayerJoinMessage, PlayerLeaveMessage, spawn_points::PlanetSpawnPoints},
    physics::{Facing, Location, Velocity, gravity::GravityAttribute},
    planet::default_planet_id,
    state::GameState,
    world::{WorldWithin, find_safe_position},
};
use bevy::prelude::*;

use crate::{persistence, settings::ServerSettings, world::PlanetWorlds};

use self::respawn::DeathPlanets;

fn on_player_join(
    mut evr_join: MessageReader<PlayerJoinMessage>,
    worlds: PlanetWorlds,
    settings: Res<ServerSettings>,
    mut commands: Commands,
) {
    for ev in evr_join.read() {
        let Ok(world) = worlds.resolve(&default_planet_id()) else {
            error!("No primary world - cannot spawn player {}", ev.name);
            continue;
        };

        let points = persistence::load_player_data(&settings.world_folder, ev.uuid);
        let pos = find_safe_position(world.surface, world.bounds, world.spawn);

        commands.spawn((
            Player::new(ev.name.clone(), ev.uuid),
            points,
            Location::on_block(pos),
            Facing::default(),
            Velocity::default(),
            GravityAttribute::default(),
            WorldWithin(world.entity),
        ));

        info!("Player {} ({}) joined at {pos}", ev.name, ev.uuid);
    }
}

fn on_player_leave(
    mut evr_leave: MessageReader<PlayerLeaveMessage>,
    q_player: Query<(&Player, &PlanetSpawnPoints)>,
    settings: Res<ServerSettings>,
    mut memo: ResMut<DeathPlanets>,
    mut commands: Commands,
) {
    for ev in evr_leave.read() {
        let Ok((player, points)) = q_player.get(ev.player) else {
            continue;
        };

        if let Err(e) = persistence::save_player_data(&settings.world_folder, player.uuid(), points) {
            error!("Failed to save planet data for {}: {e:#}", player.name());
        }

        memo.forget(player.uuid());
        commands.entity(ev.player).despawn();

        info!("Player {} left", player.name());
    }
}

pub(super) fn register(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (on_player_join, on_player_leave)
            .in_set(FixedUpdateSet::Main)
            .run_if(in_state(GameState::Playing)),
    );

    respawn::register(app);
    teleport::register(app);
}
