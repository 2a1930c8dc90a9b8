//! Level layouts stored as RON
//!
//! A layout names the level and lists its obstacles. Rotations are Euler
//! angles in degrees applied X, then Y, then Z.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use super::LevelError;
use crate::foundation::math::{utils, Transform, Vec3};
use crate::physics::{Obstacle, ObstacleSet, ObstacleShape, ObstacleSize};

fn zero_rotation() -> Vec3 {
    Vec3::zeros()
}

fn unit_scale() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

/// One obstacle as written in a layout file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDesc {
    /// Model-space shape
    pub shape: ObstacleShape,
    /// World position of the shape's origin
    pub position: Vec3,
    /// Euler angles in degrees
    #[serde(default = "zero_rotation")]
    pub rotation: Vec3,
    /// Per-axis scale
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    /// Footprint; derived from the scaled shape bounds when omitted
    #[serde(default)]
    pub size: Option<ObstacleSize>,
}

impl ObstacleDesc {
    /// Build the runtime obstacle
    pub fn to_obstacle(&self) -> Obstacle {
        let transform = Transform::from_position_rotation(
            self.position,
            utils::quat_from_euler_degrees(self.rotation),
        )
        .with_scale(self.scale);

        let size = self.size.unwrap_or_else(|| {
            let extent = self.shape.local_aabb().extents().component_mul(&self.scale) * 2.0;
            ObstacleSize {
                width: extent.x,
                height: extent.y,
                depth: extent.z,
            }
        });

        Obstacle::new(self.shape.clone(), transform, size)
    }
}

/// Static geometry of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Display name
    pub name: String,
    /// Obstacles in registration order
    pub obstacles: Vec<ObstacleDesc>,
}

impl LevelLayout {
    /// Read and validate a layout file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let layout = Self::from_ron_str(&contents)?;
        info!(
            "Loaded level '{}' with {} obstacles from {}",
            layout.name,
            layout.obstacles.len(),
            path.display()
        );
        Ok(layout)
    }

    /// Parse and validate a layout from RON text
    pub fn from_ron_str(contents: &str) -> Result<Self, LevelError> {
        let layout: Self = ron::from_str(contents).map_err(|e| LevelError::Parse(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check shapes and transforms are usable
    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, desc) in self.obstacles.iter().enumerate() {
            let finite = desc
                .position
                .iter()
                .chain(desc.rotation.iter())
                .chain(desc.scale.iter())
                .all(|v| v.is_finite());
            if !finite {
                return Err(LevelError::Invalid(format!("obstacle {index} has a non-finite transform")));
            }
            if let Some(size) = desc.size {
                if ![size.width, size.height, size.depth].into_iter().all(extent_is_valid) {
                    return Err(LevelError::Invalid(format!("obstacle {index} has an invalid size")));
                }
            }
            if desc.scale.iter().any(|s| *s <= 0.0) {
                return Err(LevelError::Invalid(format!("obstacle {index} has a non-positive scale")));
            }
            if !shape_is_valid(&desc.shape) {
                return Err(LevelError::Invalid(format!("obstacle {index} has a negative, non-finite or empty shape")));
            }
        }
        Ok(())
    }

    /// Register every obstacle, in file order
    pub fn build_obstacles(&self) -> ObstacleSet {
        self.obstacles.iter().map(ObstacleDesc::to_obstacle).collect()
    }
}

fn extent_is_valid(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn shape_is_valid(shape: &ObstacleShape) -> bool {
    match shape {
        ObstacleShape::Cuboid { half_extents } => half_extents.iter().all(|h| extent_is_valid(*h)),
        ObstacleShape::Cylinder { radius_top, radius_bottom, height } => {
            extent_is_valid(*radius_top) && extent_is_valid(*radius_bottom) && extent_is_valid(*height)
        }
        ObstacleShape::Cone { radius, height } => extent_is_valid(*radius) && extent_is_valid(*height),
        ObstacleShape::Sphere { radius } => extent_is_valid(*radius),
        ObstacleShape::Compound(parts) => {
            !parts.is_empty()
                && parts
                    .iter()
                    .all(|part| part.offset.iter().all(|v| v.is_finite()) && shape_is_valid(&part.shape))
        }
    }
}
