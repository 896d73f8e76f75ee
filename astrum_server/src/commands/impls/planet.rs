use astrum_core::{
    entities::player::{Player, spawn_points::PlanetSpawnPoints, teleport::TeleportPlayerMessage},
    id::NamespacedId,
    planet::PlanetError,
};
use bevy::prelude::*;

use crate::{
    commands::{
        ArgumentError, CommandMessage, CommandSent, CommandType, SendCommandFeedbackMessage, ServerCommand, create_command,
    },
    entities::player::respawn::{SpawnResolution, resolve_planet_spawn},
    world::PlanetWorlds,
};

use super::{planet_suggestions, resolve_target};

struct PlanetTeleportCommand {
    planet: String,
    player: Option<String>,
}

impl CommandType for PlanetTeleportCommand {
    fn from_input(ev: &CommandSent) -> Result<Self, ArgumentError> {
        match ev.args.as_slice() {
            [] => Err(ArgumentError::TooFewArguments),
            [planet] => Ok(Self {
                planet: planet.clone(),
                player: None,
            }),
            [planet, player] => Ok(Self {
                planet: planet.clone(),
                player: Some(player.clone()),
            }),
            _ => Err(ArgumentError::TooManyArguments),
        }
    }
}

pub(super) fn register(app: &mut App) {
    create_command::<PlanetTeleportCommand, _>(
        ServerCommand::new(
            "astrum:planet",
            "[planet_id] (player)",
            "Teleports the player to the given planet's spawn point.",
        ),
        app,
        |mut evr_command: MessageReader<CommandMessage<PlanetTeleportCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
         mut evw_teleport: MessageWriter<TeleportPlayerMessage>,
         q_player: Query<(Entity, &Player)>,
         mut q_points: Query<&mut PlanetSpawnPoints>,
         worlds: PlanetWorlds| {
            for ev in evr_command.read() {
                let planet = match NamespacedId::parse(&ev.command.planet) {
                    Ok(planet) => planet,
                    Err(e) => {
                        ev.sender.write(format!("Invalid planet id - {e}"), &mut evw_feedback);
                        continue;
                    }
                };

                let Some(target) = resolve_target(&ev.sender, ev.command.player.as_ref(), &q_player, &mut evw_feedback)
                else {
                    continue;
                };

                let Ok(mut points) = q_points.get_mut(target) else {
                    continue;
                };

                match resolve_planet_spawn(&worlds, &mut points, &planet) {
                    Ok((world, resolution)) => {
                        if let SpawnResolution::Corrected { from, point } = &resolution {
                            ev.sender.write(
                                format!("Stored spawn at {from} was no longer safe - moved to {}", point.pos),
                                &mut evw_feedback,
                            );
                        }

                        let point = resolution.point();
                        evw_teleport.write(TeleportPlayerMessage {
                            player: target,
                            world,
                            pos: point.pos,
                            yaw: point.yaw,
                            pitch: point.pitch,
                        });

                        ev.sender
                            .write(format!("Teleporting to planet {planet}"), &mut evw_feedback);
                    }
                    Err(e @ PlanetError::PlanetUnknown(_)) => {
                        ev.sender.write(
                            format!("{e}. Known planets: {}", planet_suggestions(worlds.catalog())),
                            &mut evw_feedback,
                        );
                    }
                    Err(e) => {
                        ev.sender.write(e.to_string(), &mut evw_feedback);
                    }
                }
            }
        },
    );
}
