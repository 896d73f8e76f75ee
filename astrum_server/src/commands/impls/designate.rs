use astrum_core::{
    entities::player::{Player, spawn_points::PlanetSpawnPoints},
    id::NamespacedId,
    planet::default_planet_id,
};
use bevy::prelude::*;

use crate::{
    commands::{
        ArgumentError, CommandMessage, CommandSent, CommandType, SendCommandFeedbackMessage, ServerCommand, create_command,
    },
    settings::ServerSettings,
    world::PlanetWorlds,
};

use super::{planet_suggestions, resolve_target};

struct DesignateCommand {
    planet: String,
    player: Option<String>,
}

impl CommandType for DesignateCommand {
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
    create_command::<DesignateCommand, _>(
        ServerCommand::new(
            "astrum:designate",
            "[planet_id] (player)",
            "Designates the planet the player calls home; respawns fall back to it when no death location is known.",
        ),
        app,
        |mut evr_command: MessageReader<CommandMessage<DesignateCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
         q_player: Query<(Entity, &Player)>,
         mut q_points: Query<&mut PlanetSpawnPoints>,
         worlds: PlanetWorlds,
         settings: Res<ServerSettings>| {
            for ev in evr_command.read() {
                let planet = match NamespacedId::parse(&ev.command.planet) {
                    Ok(planet) => planet,
                    Err(e) => {
                        ev.sender.write(format!("Invalid planet id - {e}"), &mut evw_feedback);
                        continue;
                    }
                };

                if planet != default_planet_id() && !worlds.catalog().contains(&planet) {
                    ev.sender.write(
                        format!(
                            "Unknown planet `{planet}`. Known planets: {}",
                            planet_suggestions(worlds.catalog())
                        ),
                        &mut evw_feedback,
                    );
                    continue;
                }

                let Some(target) = resolve_target(&ev.sender, ev.command.player.as_ref(), &q_player, &mut evw_feedback)
                else {
                    continue;
                };

                let Ok(mut points) = q_points.get_mut(target) else {
                    continue;
                };

                points.set_designated_planet(Some(planet.clone()));
                ev.sender
                    .write(format!("Designated planet set to {planet}"), &mut evw_feedback);

                if !settings.designated_respawn {
                    ev.sender.write(
                        "Note: designated respawn is disabled on this server",
                        &mut evw_feedback,
                    );
                }
            }
        },
    );
}
