//! Dimension entities & the host-facing world primitives the core consumes
//!
//! Each loaded dimension is an entity carrying [`Dimension`] plus the
//! components the spawn resolver needs ([`WorldSpawn`], [`WorldBounds`],
//! [`WorldSurface`]). The core never loads or creates dimensions itself -
//! a planet whose dimension entity does not exist is simply "not loaded".

use std::sync::Arc;

use bevy::prelude::*;

use crate::{coordinates::BlockCoordinate, id::NamespacedId};

/// The host's overworld-equivalent dimension
pub fn overworld_id() -> NamespacedId {
    NamespacedId::astrum("overworld")
}

/// The host's nether-equivalent dimension
pub fn nether_id() -> NamespacedId {
    NamespacedId::astrum("nether")
}

/// The host's end-equivalent dimension
pub fn the_end_id() -> NamespacedId {
    NamespacedId::astrum("the_end")
}

/// Every dimension the host ships with - these all belong to the virtual
/// default planet.
pub fn builtin_dimension_ids() -> [NamespacedId; 3] {
    [overworld_id(), nether_id(), the_end_id()]
}

/// Whether this dimension is one of the host's built-in dimensions
pub fn is_builtin_dimension(id: &NamespacedId) -> bool {
    builtin_dimension_ids().contains(id)
}

#[derive(Component, Debug, Clone, PartialEq, Eq)]
/// A loaded world dimension
pub struct Dimension {
    id: NamespacedId,
}

impl Dimension {
    /// Creates the dimension marker for the given identifier
    pub fn new(id: NamespacedId) -> Self {
        Self { id }
    }

    /// This dimension's identifier
    pub fn id(&self) -> &NamespacedId {
        &self.id
    }
}

#[derive(Component, Debug, Default)]
/// Marks the host's primary world (the overworld-equivalent). Exactly one
/// dimension entity carries this.
pub struct PrimaryWorld;

#[derive(Component, Debug, Clone, Copy)]
/// The world's configured spawn position
pub struct WorldSpawn(pub BlockCoordinate);

#[derive(Component, Debug, Clone, Copy)]
/// Vertical limits used when validating spawn positions
pub struct WorldBounds {
    /// No blocks exist at or below this y level
    pub bottom_y: i32,
    /// Fallback reference height for worlds with no solid surface at a column
    pub sea_level: i32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
/// The dimension entity this entity is currently inside of
pub struct WorldWithin(pub Entity);

/// The host's terrain queries, per dimension. Implementations must be cheap
/// enough to call from command handlers; `ensure_loaded` may generate the
/// column synchronously.
pub trait SurfaceOracle: Send + Sync {
    /// Forces the chunk column containing (x, z) to be available
    fn ensure_loaded(&self, x: i32, z: i32);

    /// The y of the highest solid block at (x, z)
    fn top_solid_y(&self, x: i32, z: i32) -> i32;
}

#[derive(Component, Clone)]
/// The [`SurfaceOracle`] for one dimension
pub struct WorldSurface(pub Arc<dyn SurfaceOracle>);

impl WorldSurface {
    /// Wraps a surface oracle into the dimension component
    pub fn new(oracle: impl SurfaceOracle + 'static) -> Self {
        Self(Arc::new(oracle))
    }
}

/// The nearest position to `pos` that is safe to stand at: the column's
/// surface, or `sea_level + 10` if the column has no surface above the
/// world bottom. A stored spawn point is safe exactly when this returns it
/// unchanged.
pub fn find_safe_position(surface: &dyn SurfaceOracle, bounds: WorldBounds, pos: BlockCoordinate) -> BlockCoordinate {
    surface.ensure_loaded(pos.x, pos.z);

    let mut y = surface.top_solid_y(pos.x, pos.z) + 1;
    if y <= bounds.bottom_y {
        y = bounds.sea_level + 10;
    }

    BlockCoordinate::new(pos.x, y, pos.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatSurface {
        height: i32,
    }

    impl SurfaceOracle for FlatSurface {
        fn ensure_loaded(&self, _x: i32, _z: i32) {}

        fn top_solid_y(&self, _x: i32, _z: i32) -> i32 {
            self.height
        }
    }

    const BOUNDS: WorldBounds = WorldBounds {
        bottom_y: -64,
        sea_level: 63,
    };

    #[test]
    fn safe_position_is_one_above_surface() {
        let surface = FlatSurface { height: 70 };

        let pos = find_safe_position(&surface, BOUNDS, BlockCoordinate::new(10, 40, -3));
        assert_eq!(pos, BlockCoordinate::new(10, 71, -3));
    }

    #[test]
    fn bottomless_column_falls_back_to_sea_level() {
        let surface = FlatSurface { height: -70 };

        let pos = find_safe_position(&surface, BOUNDS, BlockCoordinate::new(0, 100, 0));
        assert_eq!(pos, BlockCoordinate::new(0, 73, 0));
    }

    #[test]
    fn standing_on_surface_validates_unchanged() {
        let surface = FlatSurface { height: 70 };

        let stored = BlockCoordinate::new(5, 71, 5);
        assert_eq!(find_safe_position(&surface, BOUNDS, stored), stored);
    }
}
