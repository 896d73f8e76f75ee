use bevy::prelude::*;

use crate::commands::{
    ArgumentError, CommandMessage, CommandSent, CommandType, SendCommandFeedbackMessage, ServerCommand, ServerCommands,
    create_command,
};

struct HelpCommand {
    command: Option<String>,
}

impl CommandType for HelpCommand {
    fn from_input(ev: &CommandSent) -> Result<Self, ArgumentError> {
        if ev.args.len() > 1 {
            return Err(ArgumentError::TooManyArguments);
        }

        Ok(Self {
            command: ev.args.first().cloned(),
        })
    }
}

pub(super) fn register(app: &mut App) {
    create_command::<HelpCommand, _>(
        ServerCommand::new("astrum:help", "(command)", "Gets information about every command."),
        app,
        |mut evr_command: MessageReader<CommandMessage<HelpCommand>>,
         mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
         registry: Res<ServerCommands>| {
            for ev in evr_command.read() {
                if let Some(name) = &ev.command.command {
                    let mut name = name.to_lowercase();
                    if !name.contains(':') {
                        name = format!("astrum:{name}");
                    }

                    let Some(info) = registry.get(&name) else {
                        ev.sender.write(format!("No command named `{name}`"), &mut evw_feedback);
                        continue;
                    };

                    ev.sender.write(
                        format!("=== {} ===\n\t{} {}\n\t{}", info.display_name(), info.display_name(), info.usage, info.description),
                        &mut evw_feedback,
                    );
                    continue;
                }

                let mut listing = String::from("=== All Commands ===");
                for info in registry.iter() {
                    listing.push_str(&format!(
                        "\n{} {}\n\t{}",
                        info.display_name(),
                        info.usage,
                        info.description
                    ));
                }

                ev.sender.write(listing, &mut evw_feedback);
            }
        },
    );
}
