use astrum_core::entities::player::{Player, PlayerLeaveMessage};
use bevy::prelude::*;

use crate::commands::{
    ArgumentError, CommandMessage, CommandSent, CommandType, SendCommandFeedbackMessage, ServerCommand, create_command,
};

struct KickCommand {
    player: String,
}

impl CommandType for KickCommand {
    fn from_input(ev: &CommandSent) -> Result<Self, ArgumentError> {
        match ev.args.as_slice() {
            [] => Err(ArgumentError::TooFewArguments),
            [player] => Ok(Self { player: player.clone() }),
            _ => Err(ArgumentError::TooManyArguments),
        }
    }
}

pub(super) fn register(app: &mut App) {
    create_command::<KickCommand, _>(
        ServerCommand::new("astrum:kick", "[player]", "Disconnects the given player, saving their data."),
        app,
        |mut evr_command: MessageReader<CommandMessage<KickCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
         mut evw_leave: MessageWriter<PlayerLeaveMessage>,
         q_player: Query<(Entity, &Player)>| {
            for ev in evr_command.read() {
                let found = q_player
                    .iter()
                    .find(|(_, player)| player.name().eq_ignore_ascii_case(&ev.command.player));

                let Some((entity, player)) = found else {
                    ev.sender
                        .write(format!("Unable to find player `{}`", ev.command.player), &mut evw_feedback);
                    continue;
                };

                ev.sender.write(format!("Kicking {}", player.name()), &mut evw_feedback);
                evw_leave.write(PlayerLeaveMessage { player: entity });
            }
        },
    );
}
