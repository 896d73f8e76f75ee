//! Resolves planets to loaded worlds and back
//!
//! This is the single place planet-vs-dimension resolution happens; every
//! caller (respawn, gravity, commands) goes through [`PlanetWorlds`].

pub mod terrain;

use astrum_core::{
    coordinates::BlockCoordinate,
    id::NamespacedId,
    planet::{PlanetError, PlanetId, catalog::PlanetCatalog, default_planet_id},
    world::{Dimension, PrimaryWorld, SurfaceOracle, WorldBounds, WorldSpawn, WorldSurface, is_builtin_dimension},
};
use bevy::{ecs::system::SystemParam, prelude::*};

/// The planet a dimension belongs to: built-in dimensions group under the
/// virtual default planet, a dimension whose id names a catalogue planet
/// belongs to that planet, and anything else falls back to the default.
pub fn planet_of_dimension(catalog: &PlanetCatalog, dimension: &NamespacedId) -> PlanetId {
    if is_builtin_dimension(dimension) {
        return default_planet_id();
    }

    if catalog.contains(dimension) {
        return dimension.clone();
    }

    default_planet_id()
}

/// A dimension entity together with everything spawn resolution needs
pub struct ResolvedWorld<'a> {
    /// The dimension entity
    pub entity: Entity,
    /// The world's configured spawn position
    pub spawn: BlockCoordinate,
    /// Vertical limits for safety validation
    pub bounds: WorldBounds,
    /// The world's terrain queries
    pub surface: &'a dyn SurfaceOracle,
}

#[derive(SystemParam)]
/// Read access to every loaded dimension plus the planet catalogue
pub struct PlanetWorlds<'w, 's> {
    q_dimensions: Query<
        'w,
        's,
        (
            Entity,
            &'static Dimension,
            Has<PrimaryWorld>,
            &'static WorldSpawn,
            &'static WorldBounds,
            &'static WorldSurface,
        ),
    >,
    catalog: Res<'w, PlanetCatalog>,
}

impl PlanetWorlds<'_, '_> {
    /// The planet catalogue in effect this tick
    pub fn catalog(&self) -> &PlanetCatalog {
        &self.catalog
    }

    /// Resolves a planet id to its loaded world. The default planet resolves
    /// to the host's primary world; any other id resolves to the dimension
    /// named by it. `Err` is user-facing and mutates nothing.
    pub fn resolve(&self, planet: &PlanetId) -> Result<ResolvedWorld<'_>, PlanetError> {
        if *planet != default_planet_id() && !self.catalog.contains(planet) {
            return Err(PlanetError::PlanetUnknown(planet.clone()));
        }

        let row = if *planet == default_planet_id() {
            self.q_dimensions.iter().find(|(_, _, primary, ..)| *primary)
        } else {
            self.q_dimensions.iter().find(|(_, dimension, ..)| dimension.id() == planet)
        };

        let Some((entity, _, _, spawn, bounds, surface)) = row else {
            return Err(PlanetError::WorldNotLoaded(planet.clone()));
        };

        Ok(ResolvedWorld {
            entity,
            spawn: spawn.0,
            bounds: *bounds,
            surface: surface.0.as_ref(),
        })
    }

    /// The world this planet maps to, if it is currently loaded
    pub fn world_for(&self, planet: &PlanetId) -> Option<Entity> {
        self.resolve(planet).ok().map(|world| world.entity)
    }

    /// The planet the given dimension entity belongs to. Anything that is
    /// not a loaded catalogue-planet dimension belongs to the default planet.
    pub fn planet_of_world(&self, world: Entity) -> PlanetId {
        match self.q_dimensions.get(world) {
            Ok((_, dimension, ..)) => planet_of_dimension(&self.catalog, dimension.id()),
            Err(_) => default_planet_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use astrum_core::world::{nether_id, overworld_id, the_end_id};

    use super::*;

    #[test]
    fn builtin_dimensions_group_under_default_planet() {
        let catalog = PlanetCatalog::builtin_defaults();

        for id in [overworld_id(), nether_id(), the_end_id()] {
            assert_eq!(planet_of_dimension(&catalog, &id), default_planet_id());
        }
    }

    #[test]
    fn catalogue_dimension_is_its_own_planet() {
        let catalog = PlanetCatalog::builtin_defaults();
        let mars = NamespacedId::astrum("mars");

        assert_eq!(planet_of_dimension(&catalog, &mars), mars);
    }

    #[test]
    fn unknown_dimension_falls_back_to_default_planet() {
        let catalog = PlanetCatalog::builtin_defaults();

        assert_eq!(
            planet_of_dimension(&catalog, &NamespacedId::new("other", "mystery")),
            default_planet_id()
        );
    }
}
