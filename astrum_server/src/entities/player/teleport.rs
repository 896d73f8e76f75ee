//! Applies teleport requests to player entities

use astrum_core::{
    ecs::FixedUpdateSet,
    entities::player::teleport::TeleportPlayerMessage,
    physics::{Facing, Location, Velocity},
    state::GameState,
    world::WorldWithin,
};
use bevy::prelude::*;

fn apply_teleports(
    mut evr_teleport: MessageReader<TeleportPlayerMessage>,
    mut q_target: Query<(&mut Location, &mut Facing, &mut WorldWithin, Option<&mut Velocity>)>,
) {
    for ev in evr_teleport.read() {
        let Ok((mut location, mut facing, mut world_within, velocity)) = q_target.get_mut(ev.player) else {
            warn!("Dropping teleport for missing entity {:?}", ev.player);
            continue;
        };

        *location = Location::on_block(ev.pos);
        *facing = Facing {
            yaw: ev.yaw,
            pitch: ev.pitch,
        };
        *world_within = WorldWithin(ev.world);

        // Carrying momentum across a dimension change launches players into
        // terrain
        if let Some(mut velocity) = velocity {
            *velocity = Velocity::default();
        }
    }
}

pub(super) fn register(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        apply_teleports
            .in_set(FixedUpdateSet::Main)
            .run_if(in_state(GameState::Playing)),
    );
}
