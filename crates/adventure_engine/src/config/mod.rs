//! Configuration system
//!
//! Configuration files are TOML or RON, selected by file extension.
//! Nothing in the simulation core reads a global: every component receives
//! the section it needs by value when it is constructed.

pub use serde::{Serialize, Deserialize};

use std::path::Path;

mod simulation;

pub use simulation::{
    AgentConfig, EffectConfig, EffectsConfig, PathfindingConfig, PhysicsConfig, SceneConfig,
    SimulationConfig, SpawnConfig, SpawnRule,
};

#[cfg(test)]
pub(crate) use simulation::tests::reference_config;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> {
    /// Check semantic constraints after parsing
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Load configuration from file and validate it
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value parsed but violates a constraint
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
