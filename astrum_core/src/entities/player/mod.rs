//! Represents a player

pub mod spawn_points;
pub mod teleport;

use bevy::prelude::*;
use uuid::Uuid;

#[derive(Component, Debug)]
/// Represents a connected player
pub struct Player {
    name: String,
    uuid: Uuid,
}

impl Player {
    /// Creates a player.
    ///
    /// * `uuid` identifies the player across sessions - all per-player state
    ///   is keyed by it, never by the connection.
    pub fn new(name: String, uuid: Uuid) -> Self {
        Self { name, uuid }
    }

    /// Gets the player's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the player's persistent unique id
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

#[derive(Component, Debug, Default)]
/// Present while a player is dead and has not yet respawned
pub struct Dead;

#[derive(Message, Debug)]
/// Sent by the host when a player session opens
pub struct PlayerJoinMessage {
    /// The player's display name
    pub name: String,
    /// The player's persistent unique id
    pub uuid: Uuid,
}

#[derive(Message, Debug)]
/// Sent by the host when a player session closes
pub struct PlayerLeaveMessage {
    /// The leaving player's entity
    pub player: Entity,
}

#[derive(Message, Debug)]
/// Sent by the host when a dead player asks to respawn
pub struct RequestRespawnMessage {
    /// The dead player's entity
    pub player: Entity,
}

pub(super) fn register(app: &mut App) {
    app.add_message::<PlayerJoinMessage>()
        .add_message::<PlayerLeaveMessage>()
        .add_message::<RequestRespawnMessage>();

    teleport::register(app);
}
