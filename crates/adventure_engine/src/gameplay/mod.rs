//! Gameplay collaborators of the simulation core
//!
//! Spawn placement and timed movement effects. Both read the core's state
//! but never drive it.

pub mod effects;
pub mod spawn;

pub use effects::{ActiveEffects, Effect, EffectKind};
pub use spawn::SpawnPlacer;
