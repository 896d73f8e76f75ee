//! The commands this server ships with

use astrum_core::{
    entities::player::Player,
    planet::{catalog::PlanetCatalog, default_planet_id},
    state::GameState,
};
use bevy::prelude::*;

use super::{CommandSender, SendCommandFeedbackMessage};

mod designate;
mod help;
mod kick;
mod kill;
mod op;
mod ping;
mod planet;
mod planet_return;
mod planets;
mod setspawn;
mod stop;

fn display_basic_info() {
    info!("Server fully initialized.");
    info!("Type `stop` to stop the server gracefully. Type `help` to view a full list of commands.");
}

/// Finds the player a command should act on: the named player if one was
/// given, otherwise the sender themselves. Reports the problem to the sender
/// and returns `None` when neither works.
pub(super) fn resolve_target(
    sender: &CommandSender,
    named: Option<&String>,
    q_player: &Query<(Entity, &Player)>,
    evw_feedback: &mut MessageWriter<SendCommandFeedbackMessage>,
) -> Option<Entity> {
    if let Some(name) = named {
        let found = q_player
            .iter()
            .find(|(_, player)| player.name().eq_ignore_ascii_case(name))
            .map(|(entity, _)| entity);

        if found.is_none() {
            sender.write(format!("Unable to find player `{name}`"), evw_feedback);
        }

        return found;
    }

    if let Some(entity) = sender.entity() {
        if q_player.get(entity).is_ok() {
            return Some(entity);
        }

        sender.write("Invalid player", evw_feedback);
        return None;
    }

    sender.write("You must specify a player", evw_feedback);
    None
}

/// Every id a planet argument could be - catalogue planets plus the default
/// planet - for "did you mean" output
pub(super) fn planet_suggestions(catalog: &PlanetCatalog) -> String {
    let mut ids = catalog.iter().map(|(id, _)| id.to_string()).collect::<Vec<String>>();
    ids.push(default_planet_id().to_string());
    ids.sort();
    ids.join(", ")
}

pub(super) fn register(app: &mut App) {
    app.add_systems(OnEnter(GameState::Playing), display_basic_info);

    ping::register(app);
    help::register(app);
    planets::register(app);
    planet::register(app);
    planet_return::register(app);
    setspawn::register(app);
    designate::register(app);
    kill::register(app);
    kick::register(app);
    op::register(app);
    stop::register(app);
}
