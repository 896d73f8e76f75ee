//! Position & motion components shared with the host's physics

pub mod gravity;

use bevy::prelude::*;

use crate::coordinates::BlockCoordinate;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
/// An entity's position within its current world
pub struct Location(pub Vec3);

impl Location {
    /// The block this location falls inside of
    pub fn block(&self) -> BlockCoordinate {
        BlockCoordinate::new(
            self.0.x.floor() as i32,
            self.0.y.floor() as i32,
            self.0.z.floor() as i32,
        )
    }

    /// A location standing on the given block, centered on x/z
    pub fn on_block(pos: BlockCoordinate) -> Self {
        Self(pos.center())
    }
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
/// Which way an entity is looking, in degrees
pub struct Facing {
    /// Rotation around the vertical axis
    pub yaw: f32,
    /// Up/down tilt
    pub pitch: f32,
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
/// An entity's velocity in blocks per tick
pub struct Velocity(pub Vec3);

#[derive(Component, Debug, Default)]
/// Set by the host while the entity rests on solid ground
pub struct Grounded;

#[derive(Component, Debug, Default)]
/// Set by the host while the entity is in a fluid
pub struct Submerged;

#[derive(Component, Debug, Default)]
/// Set by the host for entities its own physics treats as weightless
pub struct GravityExempt;
