//! The plugin that wires every server module into the app

use bevy::prelude::*;

use crate::{commands, entities, init, persistence, physics, planets};

/// Everything the dedicated server adds on top of the core plugin
pub struct ServerPlugin;

impl Plugin for ServerPlugin {
    fn build(&self, app: &mut App) {
        planets::register(app);
        init::register(app);
        entities::register(app);
        physics::register(app);
        persistence::register(app);
        commands::register(app);
    }
}
