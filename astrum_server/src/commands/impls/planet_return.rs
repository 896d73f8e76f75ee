use astrum_core::{
    entities::player::{Player, spawn_points::PlanetSpawnPoints, teleport::TeleportPlayerMessage},
    planet::default_planet_id,
};
use bevy::prelude::*;

use crate::{
    commands::{
        ArgumentError, CommandMessage, CommandSent, CommandType, SendCommandFeedbackMessage, ServerCommand, create_command,
    },
    entities::player::respawn::resolve_planet_spawn,
    settings::ServerSettings,
    world::PlanetWorlds,
};

use super::resolve_target;

struct ReturnCommand {
    player: Option<String>,
}

impl CommandType for ReturnCommand {
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
    create_command::<ReturnCommand, _>(
        ServerCommand::new(
            "astrum:return",
            "(player)",
            "Sends the player home - to their designated planet, or the default planet.",
        ),
        app,
        |mut evr_command: MessageReader<CommandMessage<ReturnCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
         mut evw_teleport: MessageWriter<TeleportPlayerMessage>,
         q_player: Query<(Entity, &Player)>,
         mut q_points: Query<&mut PlanetSpawnPoints>,
         worlds: PlanetWorlds,
         settings: Res<ServerSettings>| {
            for ev in evr_command.read() {
                let Some(target) = resolve_target(&ev.sender, ev.command.player.as_ref(), &q_player, &mut evw_feedback)
                else {
                    continue;
                };

                let Ok(mut points) = q_points.get_mut(target) else {
                    continue;
                };

                let planet = if settings.designated_respawn {
                    points.designated_planet().cloned().unwrap_or_else(default_planet_id)
                } else {
                    default_planet_id()
                };

                match resolve_planet_spawn(&worlds, &mut points, &planet) {
                    Ok((world, resolution)) => {
                        let point = resolution.point();
                        evw_teleport.write(TeleportPlayerMessage {
                            player: target,
                            world,
                            pos: point.pos,
                            yaw: point.yaw,
                            pitch: point.pitch,
                        });

                        ev.sender.write(format!("Returning to {planet}"), &mut evw_feedback);
                    }
                    Err(e) => {
                        ev.sender.write(e.to_string(), &mut evw_feedback);
                    }
                }
            }
        },
    );
}
