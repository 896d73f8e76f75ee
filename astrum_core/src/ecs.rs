//! Shared system sets

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Ordering for systems that run every simulation tick
pub enum FixedUpdateSet {
    /// Gameplay logic (death handling, respawning, command effects)
    Main,
    /// Runs after [`FixedUpdateSet::Main`], before the host integrates motion
    PrePhysics,
}

pub(crate) fn register(app: &mut App) {
    app.configure_sets(FixedUpdate, (FixedUpdateSet::Main, FixedUpdateSet::PrePhysics).chain());
}
