use astrum_core::entities::player::{Player, spawn_points::PlanetSpawnPoints};
use bevy::prelude::*;

use crate::{
    commands::{
        ArgumentError, CommandMessage, CommandSent, CommandType, SendCommandFeedbackMessage, ServerCommand, create_command,
    },
    persistence,
    settings::ServerSettings,
};

struct StopCommand;

impl CommandType for StopCommand {
    fn from_input(ev: &CommandSent) -> Result<Self, ArgumentError> {
        if !ev.args.is_empty() {
            return Err(ArgumentError::TooManyArguments);
        }

        Ok(Self)
    }
}

pub(super) fn register(app: &mut App) {
    create_command::<StopCommand, _>(
        ServerCommand::new("astrum:stop", "", "Saves every player's data and stops the server."),
        app,
        |mut evr_command: MessageReader<CommandMessage<StopCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
         mut evw_exit: MessageWriter<AppExit>,
         q_players: Query<(&Player, &PlanetSpawnPoints)>,
         settings: Res<ServerSettings>| {
            for ev in evr_command.read() {
                ev.sender.write("Saving player data & stopping server...", &mut evw_feedback);

                let saved = persistence::save_all_players(&settings.world_folder, q_players.iter());
                info!("Saved planet data for {saved} player(s)");

                evw_exit.write(AppExit::Success);
            }
        },
    );
}
