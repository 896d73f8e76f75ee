//! Planets - named groups of world dimensions sharing physical properties
//!
//! Most planets own exactly one dimension (the dimension whose identifier
//! equals the planet's). The one exception is the virtual
//! [default planet](default_planet_id), which groups the host's built-in
//! dimensions and never appears in the [`catalog::PlanetCatalog`].

pub mod catalog;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::NamespacedId;

/// Identifies a planet. One reserved value ([`default_planet_id`]) denotes
/// the virtual default planet.
pub type PlanetId = NamespacedId;

/// The virtual planet grouping the host's built-in dimensions.
///
/// It has no catalogue entry and always reports baseline gravity; respawns
/// resolving to it are left entirely to the host's own mechanics.
pub fn default_planet_id() -> PlanetId {
    NamespacedId::astrum("homeworld")
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Why a planet-targeting operation could not happen. Every variant is a
/// user error surfaced to the invoking actor; none mutate any state.
pub enum PlanetError {
    /// The identifier names neither a catalogue planet nor the default planet
    #[error("unknown planet `{0}`")]
    PlanetUnknown(PlanetId),
    /// The planet exists but its world is not currently loaded
    #[error("the world for planet `{0}` is not loaded")]
    WorldNotLoaded(PlanetId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// The physical properties of one planet. Immutable once loaded - a data
/// reload replaces the whole catalogue rather than mutating entries.
pub struct Planet {
    gravity_factor: f32,
    distance: f32,
    terrain: NamespacedId,
    dimension_type: NamespacedId,
}

impl Planet {
    /// Creates a planet from its loaded properties
    pub fn new(gravity_factor: f32, distance: f32, terrain: NamespacedId, dimension_type: NamespacedId) -> Self {
        Self {
            gravity_factor,
            distance,
            terrain,
            dimension_type,
        }
    }

    /// Downward acceleration relative to the default planet (1.0 = baseline)
    pub fn gravity_factor(&self) -> f32 {
        self.gravity_factor
    }

    /// Distance in km, only used for display
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Reference to the noise settings used to generate this planet's terrain
    pub fn terrain(&self) -> &NamespacedId {
        &self.terrain
    }

    /// Reference to the dimension type this planet's dimension uses
    pub fn dimension_type(&self) -> &NamespacedId {
        &self.dimension_type
    }

    /// Entities on this planet feel no downward pull at all
    pub fn is_zero_gravity(&self) -> bool {
        self.gravity_factor <= 0.0
    }

    /// Entities on this planet fall slower than on the default planet
    pub fn has_reduced_gravity(&self) -> bool {
        self.gravity_factor < 1.0
    }
}
