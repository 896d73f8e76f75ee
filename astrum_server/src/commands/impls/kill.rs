use astrum_core::entities::player::{Dead, Player};
use bevy::prelude::*;

use crate::commands::{
    ArgumentError, CommandMessage, CommandSent, CommandType, SendCommandFeedbackMessage, ServerCommand, create_command,
};

use super::resolve_target;

struct KillCommand {
    player: Option<String>,
}

impl CommandType for KillCommand {
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
    create_command::<KillCommand, _>(
        ServerCommand::new(
            "astrum:kill",
            "(player)",
            "Kills the specified player or yourself if no player is specified",
        ),
        app,
        |mut evr_command: MessageReader<CommandMessage<KillCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
         q_player: Query<(Entity, &Player)>,
         mut commands: Commands| {
            for ev in evr_command.read() {
                let Some(target) = resolve_target(&ev.sender, ev.command.player.as_ref(), &q_player, &mut evw_feedback)
                else {
                    continue;
                };

                let Ok((_, player)) = q_player.get(target) else {
                    continue;
                };

                ev.sender.write(format!("Killing {}!", player.name()), &mut evw_feedback);
                commands.entity(target).insert(Dead);
            }
        },
    );
}
