//! Physics module for collision queries and agent movement
//!
//! Obstacles are static axis-aligned boxes derived from each shape's
//! transform. The [`CollisionProbe`] answers overlap queries against them
//! and the [`MovementIntegrator`] uses it to advance the player one tick at
//! a time.

pub mod aabb;
pub mod collision_probe;
pub mod movement;
pub mod obstacle;

pub use aabb::AABB;
pub use collision_probe::CollisionProbe;
pub use movement::{Agent, MoveKeys, MovementInput, MovementIntegrator, MovementStats, PhysicsState};
pub use obstacle::{Obstacle, ObstacleId, ObstacleSet, ObstacleShape, ObstacleSize, ShapePart};
