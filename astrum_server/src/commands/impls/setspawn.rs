use astrum_core::{
    entities::player::{
        Player,
        spawn_points::{PlanetSpawnPoints, SpawnPoint},
    },
    physics::{Facing, Location},
    world::WorldWithin,
};
use bevy::prelude::*;

use crate::{
    commands::{
        ArgumentError, CommandMessage, CommandSent, CommandType, SendCommandFeedbackMessage, ServerCommand, create_command,
    },
    world::PlanetWorlds,
};

use super::resolve_target;

struct SetSpawnCommand {
    player: Option<String>,
}

impl CommandType for SetSpawnCommand {
    fn from_input(ev: &CommandSent) -> Result<Self, ArgumentError> {
        if ev.args.len() > 1 {
            return Err(ArgumentError::TooManyArguments);
        }

        Ok(Self {
            player: ev.args.first().cloned(),
        })
    }
}

pub(super) fn register(app: &mut App) {
    create_command::<SetSpawnCommand, _>(
        ServerCommand::new(
            "astrum:setspawn",
            "(player)",
            "Stores the player's current position as their spawn point on the planet they are on.",
        ),
        app,
        |mut evr_command: MessageReader<CommandMessage<SetSpawnCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
         q_player: Query<(Entity, &Player)>,
         mut q_target: Query<(&Location, &Facing, &WorldWithin, &mut PlanetSpawnPoints)>,
         worlds: PlanetWorlds| {
            for ev in evr_command.read() {
                let Some(target) = resolve_target(&ev.sender, ev.command.player.as_ref(), &q_player, &mut evw_feedback)
                else {
                    continue;
                };

                let Ok((location, facing, world_within, mut points)) = q_target.get_mut(target) else {
                    continue;
                };

                // Explicit setspawn trusts where the player is standing
                let planet = worlds.planet_of_world(world_within.0);
                let point = SpawnPoint::new(location.block(), facing.yaw, facing.pitch);
                points.set_spawn_point(planet.clone(), point);

                ev.sender.write(
                    format!("Spawn point for planet {planet} set to {}", point.pos),
                    &mut evw_feedback,
                );
            }
        },
    );
}
