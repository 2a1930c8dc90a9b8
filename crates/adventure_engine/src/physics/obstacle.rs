//! Static obstacles registered for a level
//!
//! Shapes are stored in model space and carry their own [`Transform`]. The
//! world-space box is derived from the transform every time it is asked
//! for, so a moved obstacle can never be tested with a stale box.

use serde::{Deserialize, Serialize};

use super::aabb::AABB;
use crate::foundation::math::{Transform, Vec3};

/// Collision shape of an obstacle in model space, centered on the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// Box with the given half-size on each axis
    Cuboid {
        /// Half-size on x, y and z
        half_extents: Vec3,
    },
    /// Vertical cylinder or truncated cone
    Cylinder {
        /// Radius of the top cap
        radius_top: f32,
        /// Radius of the bottom cap
        radius_bottom: f32,
        /// Total height
        height: f32,
    },
    /// Vertical cone with its apex up
    Cone {
        /// Radius of the base
        radius: f32,
        /// Total height
        height: f32,
    },
    /// Sphere
    Sphere {
        /// Radius
        radius: f32,
    },
    /// Several shapes moving together, e.g. a trunk and a crown
    Compound(Vec<ShapePart>),
}

/// One member of a compound shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapePart {
    /// Offset of the part's origin from the compound's origin
    pub offset: Vec3,
    /// The part's shape
    pub shape: ObstacleShape,
}

impl ObstacleShape {
    /// Bounding box in model space
    pub fn local_aabb(&self) -> AABB {
        match self {
            Self::Cuboid { half_extents } => AABB::from_center_extents(Vec3::zeros(), *half_extents),
            Self::Cylinder { radius_top, radius_bottom, height } => {
                let r = radius_top.max(*radius_bottom);
                AABB::from_center_extents(Vec3::zeros(), Vec3::new(r, height * 0.5, r))
            }
            Self::Cone { radius, height } => {
                AABB::from_center_extents(Vec3::zeros(), Vec3::new(*radius, height * 0.5, *radius))
            }
            Self::Sphere { radius } => AABB::cube(Vec3::zeros(), *radius),
            Self::Compound(parts) => parts
                .iter()
                .map(|part| {
                    let local = part.shape.local_aabb();
                    AABB::new(local.min + part.offset, local.max + part.offset)
                })
                .reduce(|a, b| a.union(&b))
                .unwrap_or_else(|| AABB::cube(Vec3::zeros(), 0.0)),
        }
    }
}

/// Footprint used by placement logic; collision never reads it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSize {
    /// Extent on x
    pub width: f32,
    /// Extent on y
    pub height: f32,
    /// Extent on z
    pub depth: f32,
}

/// A static collider
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Model-space shape
    pub shape: ObstacleShape,
    /// Current placement of the shape
    pub transform: Transform,
    /// Semantic size
    pub size: ObstacleSize,
}

impl Obstacle {
    /// Create an obstacle
    pub fn new(shape: ObstacleShape, transform: Transform, size: ObstacleSize) -> Self {
        Self { shape, transform, size }
    }

    /// Unrotated box obstacle filling `[min, max]`
    pub fn block(min: Vec3, max: Vec3) -> Self {
        let half = (max - min) * 0.5;
        Self::new(
            ObstacleShape::Cuboid { half_extents: half },
            Transform::from_position(min + half),
            ObstacleSize { width: half.x * 2.0, height: half.y * 2.0, depth: half.z * 2.0 },
        )
    }

    /// World-space box, recomputed from the current transform on every call
    pub fn world_aabb(&self) -> AABB {
        self.shape.local_aabb().transformed(&self.transform)
    }
}

/// Index of an obstacle within its [`ObstacleSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstacleId(usize);

impl ObstacleId {
    /// Position in registration order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered collection of a level's obstacles
///
/// Built once when a level loads. Probes borrow it immutably, so nothing can
/// move an obstacle while a probe is alive.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an obstacle
    pub fn push(&mut self, obstacle: Obstacle) -> ObstacleId {
        self.obstacles.push(obstacle);
        ObstacleId(self.obstacles.len() - 1)
    }

    /// Look up an obstacle
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0)
    }

    /// Mutable access, e.g. to move a shape between ticks
    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(id.0)
    }

    /// Obstacles in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    /// Obstacles with their ids, in registration order
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> + '_ {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(index, obstacle)| (ObstacleId(index), obstacle))
    }

    /// Number of obstacles
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether no obstacles are registered
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl FromIterator<Obstacle> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Obstacle>>(iter: I) -> Self {
        Self {
            obstacles: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}
