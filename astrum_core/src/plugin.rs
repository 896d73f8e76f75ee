//! Registers everything the core crate adds to an [`App`]

use bevy::prelude::*;

use crate::{ecs, entities, state::GameState};

/// Core types, states, sets & messages shared by every astrum app
pub struct AstrumCorePlugin;

impl Plugin for AstrumCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>();

        ecs::register(app);
        entities::register(app);
    }
}
