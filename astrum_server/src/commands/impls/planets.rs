use astrum_core::planet::default_planet_id;
use bevy::prelude::*;

use crate::{
    commands::{
        ArgumentError, CommandMessage, CommandSent, CommandType, SendCommandFeedbackMessage, ServerCommand, create_command,
    },
    planets::loading::ReloadPlanetsMessage,
    world::PlanetWorlds,
};

struct PlanetsCommand {
    reload: bool,
}

impl CommandType for PlanetsCommand {
    fn from_input(ev: &CommandSent) -> Result<Self, ArgumentError> {
        match ev.args.as_slice() {
            [] => Ok(Self { reload: false }),
            [arg] if arg.as_str() == "reload" => Ok(Self { reload: true }),
            [arg] => Err(ArgumentError::Invalid(format!("unknown subcommand `{arg}`"))),
            _ => Err(ArgumentError::TooManyArguments),
        }
    }
}

pub(super) fn register(app: &mut App) {
    create_command::<PlanetsCommand, _>(
        ServerCommand::new(
            "astrum:planets",
            "(reload)",
            "Lists every known planet, or reloads the planet data records.",
        ),
        app,
        |mut evr_command: MessageReader<CommandMessage<PlanetsCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
         mut evw_reload: MessageWriter<ReloadPlanetsMessage>,
         worlds: PlanetWorlds| {
            for ev in evr_command.read() {
                if ev.command.reload {
                    evw_reload.write(ReloadPlanetsMessage);
                    ev.sender.write("Reloading planet data records...", &mut evw_feedback);
                    continue;
                }

                let mut lines = worlds
                    .catalog()
                    .iter()
                    .map(|(id, planet)| {
                        let loaded = if worlds.world_for(id).is_some() {
                            "loaded"
                        } else {
                            "not loaded"
                        };

                        format!(
                            "{id} - gravity {:.2}, distance {} km ({loaded})",
                            planet.gravity_factor(),
                            planet.distance()
                        )
                    })
                    .collect::<Vec<String>>();
                lines.sort();
                lines.push(format!("{} - the default planet", default_planet_id()));

                ev.sender.write(lines.join("\n"), &mut evw_feedback);
            }
        },
    );
}
