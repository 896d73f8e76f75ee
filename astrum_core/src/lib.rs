// #![warn(missing_docs)]

pub mod coordinates;
pub mod ecs;
pub mod entities;
pub mod id;
pub mod physics;
pub mod planet;
pub mod plugin;
pub mod state;
pub mod world;
