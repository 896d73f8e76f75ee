//! Data-driven planet content

pub mod loading;

use bevy::prelude::*;

pub(super) fn register(app: &mut App) {
    loading::register(app);
}
