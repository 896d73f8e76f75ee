//! The data-driven catalogue of every known planet

use std::collections::HashMap;

use bevy::prelude::Resource;

use crate::{
    id::NamespacedId,
    planet::{Planet, PlanetId, default_planet_id},
};

#[derive(Resource, Debug, Default, Clone)]
/// Maps planet identifiers to their physical properties.
///
/// Loaded in bulk from data files on startup and on explicit reload; a
/// reload replaces the whole resource value in one system write, so other
/// systems only ever observe a complete catalogue.
pub struct PlanetCatalog {
    planets: HashMap<PlanetId, Planet>,
}

impl PlanetCatalog {
    /// An empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in planet set used when no data files are present (or every
    /// record failed to parse): two reduced-gravity planets and one
    /// zero-gravity planet.
    pub fn builtin_defaults() -> Self {
        let mut catalog = Self::new();

        // Mars: 38% baseline gravity, distance from the sun in km
        catalog.insert(
            NamespacedId::astrum("mars"),
            Planet::new(
                0.38,
                225_000_000.0,
                NamespacedId::astrum("mars"),
                NamespacedId::astrum("mars"),
            ),
        );

        // Moon: 16% baseline gravity, distance from the homeworld in km
        catalog.insert(
            NamespacedId::astrum("moon"),
            Planet::new(0.16, 384_400.0, NamespacedId::astrum("moon"), NamespacedId::astrum("moon")),
        );

        // Space: zero gravity, empty void
        catalog.insert(
            NamespacedId::astrum("space"),
            Planet::new(0.0, 0.0, NamespacedId::astrum("space"), NamespacedId::astrum("space")),
        );

        catalog
    }

    /// Adds a planet to the catalogue, replacing any previous entry for the
    /// same id.
    ///
    /// Returns `false` (and stores nothing) for the reserved default-planet
    /// id, which must never have a catalogue entry.
    pub fn insert(&mut self, id: PlanetId, planet: Planet) -> bool {
        if id == default_planet_id() {
            return false;
        }

        self.planets.insert(id, planet);
        true
    }

    /// Gets a planet by its identifier.
    ///
    /// Always `None` for the default planet - it is virtual and has no entry.
    pub fn get(&self, id: &PlanetId) -> Option<&Planet> {
        if *id == default_planet_id() {
            return None;
        }

        self.planets.get(id)
    }

    /// Whether this id names a catalogue planet
    pub fn contains(&self, id: &PlanetId) -> bool {
        self.get(id).is_some()
    }

    /// The gravity factor for this planet id - 1.0 for the default planet
    /// and for any identifier not in the catalogue.
    pub fn gravity_of(&self, id: &PlanetId) -> f32 {
        self.get(id).map(|p| p.gravity_factor()).unwrap_or(1.0)
    }

    /// True if no planets are loaded
    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    /// Number of loaded planets
    pub fn len(&self) -> usize {
        self.planets.len()
    }

    /// Iterates over every catalogue entry, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&PlanetId, &Planet)> {
        self.planets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gravity_of_unknown_is_baseline() {
        let catalog = PlanetCatalog::builtin_defaults();

        assert_eq!(catalog.gravity_of(&NamespacedId::astrum("pluto")), 1.0);
        assert_eq!(catalog.gravity_of(&NamespacedId::new("other", "mars")), 1.0);
    }

    #[test]
    fn default_planet_short_circuits() {
        let mut catalog = PlanetCatalog::builtin_defaults();

        // Even a malicious insert under the reserved id must not stick
        assert!(!catalog.insert(
            default_planet_id(),
            Planet::new(9.0, 0.0, NamespacedId::astrum("x"), NamespacedId::astrum("x")),
        ));

        assert!(catalog.get(&default_planet_id()).is_none());
        assert_eq!(catalog.gravity_of(&default_planet_id()), 1.0);
    }

    #[test]
    fn builtin_defaults_match_documented_set() {
        let catalog = PlanetCatalog::builtin_defaults();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.gravity_of(&NamespacedId::astrum("mars")), 0.38);
        assert_eq!(catalog.gravity_of(&NamespacedId::astrum("moon")), 0.16);
        assert!(
            catalog
                .get(&NamespacedId::astrum("space"))
                .expect("space should exist")
                .is_zero_gravity()
        );
    }

    #[test]
    fn insert_replaces_wholesale() {
        let mut catalog = PlanetCatalog::new();
        let id = NamespacedId::astrum("mars");

        catalog.insert(
            id.clone(),
            Planet::new(0.38, 1.0, NamespacedId::astrum("a"), NamespacedId::astrum("a")),
        );
        catalog.insert(
            id.clone(),
            Planet::new(0.5, 2.0, NamespacedId::astrum("b"), NamespacedId::astrum("b")),
        );

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.gravity_of(&id), 0.5);
    }
}
