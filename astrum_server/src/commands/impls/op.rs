use astrum_core::entities::player::Player;
use bevy::prelude::*;

use crate::commands::{
    ArgumentError, CommandMessage, CommandSent, CommandType, Operator, SendCommandFeedbackMessage, ServerCommand,
    create_command,
};

struct OpCommand {
    player: String,
}

impl CommandType for OpCommand {
    fn from_input(ev: &CommandSent) -> Result<Self, ArgumentError> {
        match ev.args.as_slice() {
            [] => Err(ArgumentError::TooFewArguments),
            [player] => Ok(Self { player: player.clone() }),
            _ => Err(ArgumentError::TooManyArguments),
        }
    }
}

pub(super) fn register(app: &mut App) {
    create_command::<OpCommand, _>(
        ServerCommand::new("astrum:op", "[player]", "Grants the given player operator permissions."),
        app,
        |mut evr_command: MessageReader<CommandMessage<OpCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
         q_player: Query<(Entity, &Player)>,
         mut commands: Commands| {
            for ev in evr_command.read() {
                let found = q_player
                    .iter()
                    .find(|(_, player)| player.name().eq_ignore_ascii_case(&ev.command.player));

                let Some((entity, player)) = found else {
                    ev.sender
                        .write(format!("Unable to find player `{}`", ev.command.player), &mut evw_feedback);
                    continue;
                };

                commands.entity(entity).insert(Operator);
                ev.sender
                    .write(format!("{} is now an operator", player.name()), &mut evw_feedback);
            }
        },
    );
}
