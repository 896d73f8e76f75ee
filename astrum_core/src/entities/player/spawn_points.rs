//! Per-player, per-planet spawn points

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{coordinates::BlockCoordinate, planet::PlanetId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// A validated position + facing a player returns to on one planet.
///
/// Owned by the (player, planet) pair that created it; replaced wholesale on
/// update, never field-mutated.
pub struct SpawnPoint {
    /// The block the player stands on top of
    pub pos: BlockCoordinate,
    /// Facing around the vertical axis, degrees
    pub yaw: f32,
    /// Facing tilt, degrees
    pub pitch: f32,
}

impl SpawnPoint {
    /// A spawn point with an explicit facing
    pub fn new(pos: BlockCoordinate, yaw: f32, pitch: f32) -> Self {
        Self { pos, yaw, pitch }
    }

    /// A spawn point with a neutral facing, as produced by safety correction
    pub fn facing_forward(pos: BlockCoordinate) -> Self {
        Self::new(pos, 0.0, 0.0)
    }
}

#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
/// Everything a single player has stored about planets: an optional
/// designated "home" planet and one spawn point per planet visited.
///
/// Created with the player entity and persisted per player UUID alongside
/// the rest of their save data.
pub struct PlanetSpawnPoints {
    designated_planet: Option<PlanetId>,
    spawns: HashMap<PlanetId, SpawnPoint>,
}

impl PlanetSpawnPoints {
    /// The stored spawn point for this planet, if any
    pub fn spawn_point(&self, planet: &PlanetId) -> Option<SpawnPoint> {
        self.spawns.get(planet).copied()
    }

    /// Stores `point` for `planet`, replacing any previous point wholesale
    pub fn set_spawn_point(&mut self, planet: PlanetId, point: SpawnPoint) {
        self.spawns.insert(planet, point);
    }

    /// The planet this player explicitly designated as home
    pub fn designated_planet(&self) -> Option<&PlanetId> {
        self.designated_planet.as_ref()
    }

    /// Sets (or clears) the designated home planet
    pub fn set_designated_planet(&mut self, planet: Option<PlanetId>) {
        self.designated_planet = planet;
    }

    /// Iterates over every stored (planet, spawn point) pair
    pub fn iter(&self) -> impl Iterator<Item = (&PlanetId, &SpawnPoint)> {
        self.spawns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NamespacedId;

    #[test]
    fn set_replaces_wholesale() {
        let mut points = PlanetSpawnPoints::default();
        let mars = NamespacedId::astrum("mars");

        points.set_spawn_point(mars.clone(), SpawnPoint::new(BlockCoordinate::new(1, 70, 1), 90.0, -10.0));
        points.set_spawn_point(mars.clone(), SpawnPoint::facing_forward(BlockCoordinate::new(8, 65, -4)));

        let stored = points.spawn_point(&mars).expect("spawn point should exist");
        assert_eq!(stored.pos, BlockCoordinate::new(8, 65, -4));
        assert_eq!(stored.yaw, 0.0);
        assert_eq!(stored.pitch, 0.0);
    }

    #[test]
    fn planets_do_not_interfere() {
        let mut points = PlanetSpawnPoints::default();

        points.set_spawn_point(
            NamespacedId::astrum("mars"),
            SpawnPoint::facing_forward(BlockCoordinate::new(1, 70, 1)),
        );

        assert!(points.spawn_point(&NamespacedId::astrum("moon")).is_none());
    }
}
