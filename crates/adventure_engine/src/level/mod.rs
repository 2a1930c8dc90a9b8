//! Level loading
//!
//! Turns a layout file into the [`ObstacleSet`](crate::physics::ObstacleSet)
//! a session collides against.

pub mod layout;

pub use layout::{LevelLayout, ObstacleDesc};

/// Level loading errors
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// The layout parsed but describes unusable geometry
    #[error("Invalid level: {0}")]
    Invalid(String),
}
