use bevy::prelude::*;

use crate::commands::{
    ArgumentError, CommandMessage, CommandSent, CommandType, SendCommandFeedbackMessage, ServerCommand, create_command,
};

struct PingCommand;

impl CommandType for PingCommand {
    fn from_input(ev: &CommandSent) -> Result<Self, ArgumentError> {
        if !ev.args.is_empty() {
            return Err(ArgumentError::TooManyArguments);
        }

        Ok(Self)
    }
}

pub(super) fn register(app: &mut App) {
    create_command::<PingCommand, _>(
        ServerCommand::new("astrum:ping", "", "Says 'Pong'."),
        app,
        |mut evr_command: MessageReader<CommandMessage<PingCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>| {
            for ev in evr_command.read() {
                ev.sender.write("Pong!", &mut evw_feedback);
            }
        },
    );
}
