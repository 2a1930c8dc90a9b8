//! Grid navigation
//!
//! Quantizes the ground plane into square cells and plans routes across the
//! cells the collision probe reports as clear.

pub mod grid;
pub mod pathfinder;

pub use grid::{GridCell, NEIGHBOR_STEPS};
pub use pathfinder::GridPathfinder;
