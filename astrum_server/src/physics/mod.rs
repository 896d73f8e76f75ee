//! Server-side physics passes

pub mod gravity;

use bevy::prelude::*;

pub(super) fn register(app: &mut App) {
    gravity::register(app);
}
