//! # Simulation Configuration
//!
//! Numeric constants for the spatial simulation core and the collaborators
//! that drive it. There are no built-in defaults: values come from a config
//! file (see `crates/adventure/assets/simulation.toml`) or are spelled out
//! by the caller.
//!
//! Distances are world units, speeds are units per tick and accelerations
//! are units per tick squared, matching a fixed-rate driving loop.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// Vertical motion constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Velocity change per tick while airborne (negative pulls down)
    pub gravity: f32,
    /// Height of the infinite ground plane the agent lands on
    pub ground_level: f32,
}

/// Player agent dimensions and base movement stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Horizontal half-width of the agent's collision box
    pub radius: f32,
    /// Height of the agent's collision box above its position
    pub height: f32,
    /// Horizontal distance covered per tick along one input axis
    pub move_speed: f32,
    /// Upward velocity applied on the tick a jump starts
    pub jump_power: f32,
    /// Where the agent starts and restarts
    pub spawn_position: Vec3,
}

/// Scene extents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Half-size of the square play area on x and z
    pub boundary: f32,
}

/// Grid search parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathfindingConfig {
    /// Edge length of one grid cell
    pub cell_size: f32,
    /// Cells farther than this (Manhattan, world units) from the start are not expanded
    pub max_search_distance: f32,
    /// Height given to every waypoint
    pub waypoint_height: f32,
    /// Largest ring radius, in cells, searched when repairing a blocked goal
    pub goal_repair_radius: u32,
    /// Upper bound on node expansions; `None` leaves the search unbounded
    pub max_expansions: Option<usize>,
}

/// One timed movement effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    /// Factor applied to the base stat
    pub multiplier: f32,
    /// Seconds the effect lasts
    pub duration_secs: f32,
}

/// Movement effects granted by consumables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Scales move speed
    pub speed_boost: EffectConfig,
    /// Scales jump power
    pub jump_boost: EffectConfig,
}

/// Rejection-sampling rule for placing an object on clear ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    /// Samples are drawn from `[-half_extent, half_extent]` on x and z
    pub half_extent: f32,
    /// Height of every sampled point
    pub height: f32,
    /// Radius of the clearance probe around a sample
    pub clearance_radius: f32,
    /// Samples tried before giving up
    pub max_attempts: u32,
    /// Returned when every sample is blocked
    pub fallback: Vec3,
}

/// Spawn rules per object kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Treasure chest placement
    pub treasure: SpawnRule,
    /// Monster placement
    pub monster: SpawnRule,
}

/// Complete configuration for one simulation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Gravity and ground
    pub physics: PhysicsConfig,
    /// Player agent
    pub agent: AgentConfig,
    /// Play area
    pub scene: SceneConfig,
    /// Grid search
    pub pathfinding: PathfindingConfig,
    /// Timed effects
    pub effects: EffectsConfig,
    /// Spawn placement
    pub spawn: SpawnConfig,
}

fn ensure(condition: bool, message: &str) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_string()))
    }
}

fn ensure_finite(name: &str, value: f32) -> Result<(), ConfigError> {
    ensure(value.is_finite(), &format!("{name} must be finite"))
}

fn ensure_finite_vec(name: &str, value: &Vec3) -> Result<(), ConfigError> {
    ensure(value.iter().all(|v| v.is_finite()), &format!("{name} must be finite"))
}

impl SpawnRule {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        ensure_finite(&format!("{name}.half_extent"), self.half_extent)?;
        ensure_finite(&format!("{name}.height"), self.height)?;
        ensure_finite(&format!("{name}.clearance_radius"), self.clearance_radius)?;
        ensure_finite_vec(&format!("{name}.fallback"), &self.fallback)?;
        ensure(self.half_extent >= 0.0, &format!("{name}.half_extent must be non-negative"))?;
        ensure(self.clearance_radius >= 0.0, &format!("{name}.clearance_radius must be non-negative"))?;
        ensure(self.max_attempts > 0, &format!("{name}.max_attempts must be at least 1"))
    }
}

impl EffectConfig {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        ensure_finite(&format!("{name}.multiplier"), self.multiplier)?;
        ensure_finite(&format!("{name}.duration_secs"), self.duration_secs)?;
        ensure(self.multiplier > 0.0, &format!("{name}.multiplier must be positive"))?;
        ensure(self.duration_secs >= 0.0, &format!("{name}.duration_secs must be non-negative"))
    }
}

impl Config for SimulationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("physics.gravity", self.physics.gravity)?;
        ensure(self.physics.gravity < 0.0, "physics.gravity must be negative")?;
        ensure_finite("physics.ground_level", self.physics.ground_level)?;

        ensure_finite("agent.radius", self.agent.radius)?;
        ensure_finite("agent.height", self.agent.height)?;
        ensure_finite("agent.move_speed", self.agent.move_speed)?;
        ensure_finite("agent.jump_power", self.agent.jump_power)?;
        ensure_finite_vec("agent.spawn_position", &self.agent.spawn_position)?;
        ensure(self.agent.radius >= 0.0, "agent.radius must be non-negative")?;
        ensure(self.agent.height >= 0.0, "agent.height must be non-negative")?;
        ensure(self.agent.move_speed >= 0.0, "agent.move_speed must be non-negative")?;
        ensure(self.agent.jump_power >= 0.0, "agent.jump_power must be non-negative")?;

        ensure_finite("scene.boundary", self.scene.boundary)?;
        ensure(self.scene.boundary >= 0.0, "scene.boundary must be non-negative")?;

        ensure_finite("pathfinding.cell_size", self.pathfinding.cell_size)?;
        ensure_finite("pathfinding.max_search_distance", self.pathfinding.max_search_distance)?;
        ensure_finite("pathfinding.waypoint_height", self.pathfinding.waypoint_height)?;
        ensure(self.pathfinding.cell_size > 0.0, "pathfinding.cell_size must be positive")?;
        ensure(
            self.pathfinding.max_search_distance >= 0.0,
            "pathfinding.max_search_distance must be non-negative",
        )?;
        ensure(
            self.pathfinding.max_expansions != Some(0),
            "pathfinding.max_expansions must be at least 1 when set",
        )?;

        self.effects.speed_boost.validate("effects.speed_boost")?;
        self.effects.jump_boost.validate("effects.jump_boost")?;
        self.spawn.treasure.validate("spawn.treasure")?;
        self.spawn.monster.validate("spawn.monster")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// The shipped `simulation.toml` values, spelled out for tests
    pub(crate) fn reference_config() -> SimulationConfig {
        SimulationConfig {
            physics: PhysicsConfig {
                gravity: -0.02,
                ground_level: 1.5,
            },
            agent: AgentConfig {
                radius: 0.4,
                height: 1.8,
                move_speed: 0.05,
                jump_power: 0.15,
                spawn_position: Vec3::new(0.0, 1.5, 0.0),
            },
            scene: SceneConfig { boundary: 45.0 },
            pathfinding: PathfindingConfig {
                cell_size: 0.5,
                max_search_distance: 50.0,
                waypoint_height: 1.5,
                goal_repair_radius: 10,
                max_expansions: Some(20_000),
            },
            effects: EffectsConfig {
                speed_boost: EffectConfig {
                    multiplier: 4.0,
                    duration_secs: 10.0,
                },
                jump_boost: EffectConfig {
                    multiplier: 4.0,
                    duration_secs: 10.0,
                },
            },
            spawn: SpawnConfig {
                treasure: SpawnRule {
                    half_extent: 40.0,
                    height: 0.5,
                    clearance_radius: 0.5,
                    max_attempts: 50,
                    fallback: Vec3::new(0.0, 0.5, 0.0),
                },
                monster: SpawnRule {
                    half_extent: 35.0,
                    height: 0.5,
                    clearance_radius: 0.6,
                    max_attempts: 50,
                    fallback: Vec3::new(10.0, 0.5, 10.0),
                },
            },
        }
    }

    #[test]
    fn test_reference_config_is_valid() {
        assert!(reference_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_cell_size() {
        let mut config = reference_config();
        config.pathfinding.cell_size = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let mut config = reference_config();
        config.physics.gravity = 0.02;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    fn assert_invalid(config: &SimulationConfig, field: &str) {
        match config.validate() {
            Err(ConfigError::Invalid(message)) => assert!(message.starts_with(field), "{message}"),
            other => panic!("expected {field} to be rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_infinite_agent_stats() {
        let mut config = reference_config();
        config.agent.jump_power = f32::INFINITY;
        assert_invalid(&config, "agent.jump_power");

        let mut config = reference_config();
        config.agent.spawn_position.y = f32::NAN;
        assert_invalid(&config, "agent.spawn_position");
    }

    #[test]
    fn test_rejects_infinite_pathfinding_values() {
        let mut config = reference_config();
        config.pathfinding.max_search_distance = f32::INFINITY;
        assert_invalid(&config, "pathfinding.max_search_distance");

        let mut config = reference_config();
        config.pathfinding.waypoint_height = f32::NEG_INFINITY;
        assert_invalid(&config, "pathfinding.waypoint_height");
    }

    #[test]
    fn test_rejects_infinite_effects() {
        let mut config = reference_config();
        config.effects.jump_boost.multiplier = f32::INFINITY;
        assert_invalid(&config, "effects.jump_boost.multiplier");

        let mut config = reference_config();
        config.effects.speed_boost.duration_secs = f32::INFINITY;
        assert_invalid(&config, "effects.speed_boost.duration_secs");
    }

    #[test]
    fn test_rejects_infinite_spawn_rules() {
        let mut config = reference_config();
        config.spawn.treasure.height = f32::NAN;
        assert_invalid(&config, "spawn.treasure.height");

        let mut config = reference_config();
        config.spawn.monster.fallback.x = f32::INFINITY;
        assert_invalid(&config, "spawn.monster.fallback");
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simulation.toml");
        let config = reference_config();

        config.save_to_file(&path).unwrap();
        let loaded = SimulationConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_file_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simulation.ron");
        let mut config = reference_config();
        config.pathfinding.max_expansions = None;

        config.save_to_file(&path).unwrap();
        let loaded = SimulationConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded.pathfinding.max_expansions, None);
        assert_eq!(loaded.agent, config.agent);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simulation.json");
        let result = reference_config().save_to_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_invalid_file_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simulation.toml");
        let mut config = reference_config();
        config.scene.boundary = -1.0;
        config.save_to_file(&path).unwrap();

        let result = SimulationConfig::load_from_file(&path);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_shipped_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../adventure/assets/simulation.toml");
        let loaded = SimulationConfig::load_from_file(path).unwrap();
        assert_eq!(loaded, reference_config());
    }
}
