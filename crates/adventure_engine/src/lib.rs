//! # Adventure Engine
//!
//! The spatial simulation core of a first-person adventure game.
//!
//! ## Features
//!
//! - **Collision Probing**: Axis-aligned overlap queries against static obstacles
//! - **Movement**: Gravity, jumping and per-axis wall sliding for the player
//! - **Pathfinding**: Grid-quantized A* that shares the collision probe
//! - **Level Sessions**: Spawn placement, timed effects and restarts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use adventure_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SimulationConfig::load_from_file("assets/simulation.toml")?;
//!     let layout = LevelLayout::load("assets/levels/city.ron")?;
//!     let mut session = LevelSession::start(config, layout.build_obstacles());
//!
//!     let input = MovementInput::new(MoveKeys::FORWARD, Vec3::new(0.0, 0.0, -1.0), Vec3::x());
//!     for _ in 0..60 {
//!         session.tick(&input, 1.0 / 60.0);
//!     }
//!
//!     let path = session.find_path(session.player().position, Vec3::new(10.0, 1.5, 10.0));
//!     println!("{} waypoints", path.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod gameplay;
pub mod level;
pub mod navigation;
pub mod physics;

mod session;

pub use session::LevelSession;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SimulationConfig, SpawnRule},
        foundation::math::{Quat, Transform, Vec3},
        gameplay::{ActiveEffects, Effect, EffectKind, SpawnPlacer},
        level::{LevelError, LevelLayout},
        navigation::{GridCell, GridPathfinder},
        physics::{
            Agent, CollisionProbe, MoveKeys, MovementInput, MovementIntegrator, Obstacle,
            ObstacleSet, ObstacleShape, AABB,
        },
        LevelSession,
    };
}
