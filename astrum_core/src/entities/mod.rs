//! Entity types shared across the server

pub mod player;

use bevy::prelude::*;

pub(crate) fn register(app: &mut App) {
    player::register(app);
}
