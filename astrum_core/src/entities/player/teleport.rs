//! Cross-dimension teleportation

use bevy::prelude::*;

use crate::coordinates::BlockCoordinate;

#[derive(Message, Debug)]
/// Asks the host to move a player to a position in a (possibly different)
/// dimension. This is the only way the planetary systems move players.
pub struct TeleportPlayerMessage {
    /// The player to move
    pub player: Entity,
    /// The dimension entity to move them into
    pub world: Entity,
    /// The block to stand on
    pub pos: BlockCoordinate,
    /// New facing around the vertical axis
    pub yaw: f32,
    /// New facing tilt
    pub pitch: f32,
}

pub(super) fn register(app: &mut App) {
    app.add_message::<TeleportPlayerMessage>();
}
