//! Server lifecycle states

use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// The state the server is currently in
pub enum GameState {
    #[default]
    /// Data-driven content (the planet catalogue) is being loaded
    Loading,
    /// Content is loaded; worlds are being set up
    PostLoading,
    /// The server is running its normal tick loop
    Playing,
}
