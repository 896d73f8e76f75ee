//! Server-side entity handling

pub mod player;

use bevy::prelude::*;

pub(super) fn register(app: &mut App) {
    player::register(app);
}
