//! Responsible for the registration & creation of all server console commands

use std::marker::PhantomData;

use bevy::prelude::*;
use thiserror::Error;

use astrum_core::{entities::player::Player, state::GameState};

mod console;
mod impls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The entity or server that sent a command
pub enum CommandSender {
    /// The server console sent this command
    Server,
    /// A player sent this command
    Player(Entity),
}

#[derive(Component, Debug, Default)]
/// If a player is an operator, they have all permissions
pub struct Operator;

#[derive(Message, Debug)]
/// Sends output from a command back to a player entity
pub struct SendCommandFeedbackMessage {
    to: Entity,
    message: String,
}

impl CommandSender {
    /// The player entity behind this sender, if any
    pub fn entity(&self) -> Option<Entity> {
        match self {
            Self::Player(e) => Some(*e),
            Self::Server => None,
        }
    }

    /// Checks if this sender is allowed to run elevated commands
    pub fn is_operator(&self, q_operator: &Query<&Operator>) -> bool {
        match self {
            Self::Player(e) => q_operator.contains(*e),
            Self::Server => true,
        }
    }

    /// Sends a message to this command sender.
    ///
    /// Player - forwarded through the feedback message (the host relays it)
    /// Server - logged in the server console
    pub fn write(&self, message: impl Into<String>, evw_feedback: &mut MessageWriter<SendCommandFeedbackMessage>) {
        match self {
            Self::Player(e) => {
                evw_feedback.write(SendCommandFeedbackMessage {
                    to: *e,
                    message: message.into(),
                });
            }
            Self::Server => {
                println!("{}", message.into());
            }
        }
    }
}

#[derive(Message, Debug)]
/// Sent whenever a command is typed into the console (or relayed for a
/// player by the host)
pub struct CommandSent {
    /// The sender of this command
    pub sender: CommandSender,
    /// The raw string the user typed (this includes the command name)
    pub text: String,
    /// The namespaced name of the command
    pub name: String,
    /// The args split around spaces
    pub args: Vec<String>,
}

impl CommandSent {
    /// Creates a new command event.
    ///
    /// * `text` The entire string of text the user typed
    pub fn new(text: String, sender: CommandSender) -> Self {
        let split: Vec<&str> = text.split(' ').collect();
        let (name_arr, args_arr) = split.split_at(1);

        let mut name = name_arr[0].to_lowercase();
        if !name.contains(':') {
            name = format!("astrum:{name}");
        }

        let args = args_arr
            .iter()
            .filter(|x| !x.is_empty())
            .map(|x| (*x).to_owned())
            .collect::<Vec<String>>();

        Self { sender, text, name, args }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Information that describes how a command should be formatted by the user
pub struct ServerCommand {
    /// Name of the command.
    ///
    /// Example: "astrum:planet"
    pub unlocalized_name: String,
    /// How to use the command.
    ///
    /// Example: "\[planet_id\] (player)"
    pub usage: String,
    /// What the command does
    pub description: String,
}

impl ServerCommand {
    /// Creates a new server command with these identifiers
    ///
    /// * `unlocalized_name` Used to call the command (astrum:command_name)
    /// * `usage` Shows the usage - do not include the command name in this
    /// * `description` An overview of what the command does
    pub fn new(unlocalized_name: impl Into<String>, usage: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            unlocalized_name: unlocalized_name.into(),
            usage: usage.into(),
            description: description.into(),
        }
    }

    /// Returns how the command name should be displayed
    pub fn display_name(&self) -> String {
        if self.unlocalized_name.starts_with("astrum:") {
            self.unlocalized_name["astrum:".len()..].to_owned()
        } else {
            self.unlocalized_name.to_owned()
        }
    }
}

#[derive(Resource, Debug, Default)]
/// Every command registered on this server, in registration order
pub struct ServerCommands {
    commands: Vec<ServerCommand>,
}

impl ServerCommands {
    /// Adds a command to the listing
    pub fn register(&mut self, command: ServerCommand) {
        self.commands.push(command);
    }

    /// Finds a command by its namespaced name
    pub fn get(&self, unlocalized_name: &str) -> Option<&ServerCommand> {
        self.commands.iter().find(|c| c.unlocalized_name == unlocalized_name)
    }

    /// Iterates every registered command
    pub fn iter(&self) -> impl Iterator<Item = &ServerCommand> {
        self.commands.iter()
    }
}

#[derive(Debug, Error)]
/// Why a command's arguments could not be understood
pub enum ArgumentError {
    /// Not enough arguments were given
    #[error("too few arguments")]
    TooFewArguments,
    /// Too many arguments were given
    #[error("too many arguments")]
    TooManyArguments,
    /// An argument was present but unusable
    #[error("{0}")]
    Invalid(String),
}

/// A typed command. Implementations parse themselves out of the raw
/// [`CommandSent`] input; handlers then receive them as
/// [`CommandMessage<T>`].
pub trait CommandType: Sized + Send + Sync + 'static {
    /// Parses this command from raw input. The command name has already been
    /// matched - only the args need checking.
    fn from_input(ev: &CommandSent) -> Result<Self, ArgumentError>;
}

#[derive(Debug)]
/// A successfully parsed command, ready for its handler
pub struct CommandMessage<T: CommandType> {
    /// Who ran the command
    pub sender: CommandSender,
    /// The parsed command
    pub command: T,
}

impl<T: CommandType> Message for CommandMessage<T> {}

#[derive(Resource)]
struct CommandName<T: CommandType> {
    name: String,
    _marker: PhantomData<fn() -> T>,
}

fn parse_command<T: CommandType>(
    name: Res<CommandName<T>>,
    registry: Res<ServerCommands>,
    q_operator: Query<&Operator>,
    mut evr_sent: MessageReader<CommandSent>,
    mut evw_command: MessageWriter<CommandMessage<T>>,
    mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
) {
    for ev in evr_sent.read() {
        if ev.name != name.name {
            continue;
        }

        if !ev.sender.is_operator(&q_operator) {
            ev.sender
                .write("You do not have permission to use this command", &mut evw_feedback);
            continue;
        }

        match T::from_input(ev) {
            Ok(command) => {
                evw_command.write(CommandMessage {
                    sender: ev.sender,
                    command,
                });
            }
            Err(e) => {
                let usage = registry
                    .get(&ev.name)
                    .map(|c| format!(" Usage: {} {}", c.display_name(), c.usage))
                    .unwrap_or_default();

                ev.sender.write(format!("{e}.{usage}"), &mut evw_feedback);
            }
        }
    }
}

/// Registers a typed command: its listing entry, its parser and its handler
/// system. The handler reads `CommandMessage<T>` and runs every tick while
/// the server is playing.
pub fn create_command<T: CommandType, M>(info: ServerCommand, app: &mut App, handler: impl IntoSystem<(), (), M>) {
    app.add_message::<CommandMessage<T>>();
    app.insert_resource(CommandName::<T> {
        name: info.unlocalized_name.clone(),
        _marker: PhantomData,
    });

    app.add_systems(
        Startup,
        move |mut registry: ResMut<ServerCommands>| registry.register(info.clone()),
    );

    let handler = IntoSystem::into_system(handler);
    app.add_systems(
        Update,
        (parse_command::<T>, handler).chain().run_if(in_state(GameState::Playing)),
    );
}

fn unknown_commands(
    registry: Res<ServerCommands>,
    mut evr_sent: MessageReader<CommandSent>,
    mut evw_feedback: MessageWriter<SendCommandFeedbackMessage>,
) {
    for ev in evr_sent.read() {
        if registry.get(&ev.name).is_none() {
            ev.sender.write(
                format!("Unknown command `{}` - type `help` for a list of commands", ev.text),
                &mut evw_feedback,
            );
        }
    }
}

fn relay_player_feedback(mut evr_feedback: MessageReader<SendCommandFeedbackMessage>, q_player: Query<&Player>) {
    // Chat delivery belongs to the host; until it picks these up they are
    // mirrored into the server log
    for ev in evr_feedback.read() {
        match q_player.get(ev.to) {
            Ok(player) => info!("[to {}] {}", player.name(), ev.message),
            Err(_) => info!("[to {:?}] {}", ev.to, ev.message),
        }
    }
}

pub(super) fn register(app: &mut App) {
    app.init_resource::<ServerCommands>();

    app.add_message::<CommandSent>().add_message::<SendCommandFeedbackMessage>();

    app.add_systems(
        Update,
        (unknown_commands, relay_player_feedback).run_if(in_state(GameState::Playing)),
    );

    console::register(app);
    impls::register(app);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_command_names_get_the_default_namespace() {
        let ev = CommandSent::new("planet astrum:mars".to_owned(), CommandSender::Server);

        assert_eq!(ev.name, "astrum:planet");
        assert_eq!(ev.args, vec!["astrum:mars".to_owned()]);
    }

    #[test]
    fn namespaced_names_and_blank_args_are_preserved() {
        let ev = CommandSent::new("other:reach  a  b".to_owned(), CommandSender::Server);

        assert_eq!(ev.name, "other:reach");
        assert_eq!(ev.args, vec!["a".to_owned(), "b".to_owned()]);
    }
}
