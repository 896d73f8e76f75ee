//! Integer block coordinates

use std::fmt;

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// The coordinates of a block within a world
pub struct BlockCoordinate {
    /// East/west
    pub x: i32,
    /// Up/down
    pub y: i32,
    /// North/south
    pub z: i32,
}

impl BlockCoordinate {
    /// Creates a new block coordinate
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The point an entity standing on this block occupies - centered on x/z,
    /// feet at the block's y level.
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x as f32 + 0.5, self.y as f32, self.z as f32 + 0.5)
    }
}

impl fmt::Display for BlockCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for BlockCoordinate {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}
