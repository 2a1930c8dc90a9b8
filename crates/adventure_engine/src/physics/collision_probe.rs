//! Collision queries against a level's static obstacles
//!
//! The probe is a read-only view over an [`ObstacleSet`]. Each query walks
//! the obstacles in registration order, derives each world box from its
//! live transform and stops at the first overlap.
//!
//! Coordinates are assumed finite. NaN or infinite input gives an
//! unspecified answer; callers are responsible for well-formed geometry.

use super::aabb::AABB;
use super::obstacle::{ObstacleId, ObstacleSet};
use crate::foundation::math::Vec3;

/// Read-only collision oracle shared by movement, pathfinding and spawn placement
#[derive(Debug, Clone, Copy)]
pub struct CollisionProbe<'a> {
    obstacles: &'a ObstacleSet,
}

impl<'a> CollisionProbe<'a> {
    /// Create a probe over a level's obstacles
    pub fn new(obstacles: &'a ObstacleSet) -> Self {
        Self { obstacles }
    }

    /// The obstacles this probe tests against
    pub fn obstacles(&self) -> &'a ObstacleSet {
        self.obstacles
    }

    /// Box occupied by an agent standing at `position`
    ///
    /// Spans `radius` either side on x and z and rises `height` from the
    /// agent's position.
    pub fn agent_box(position: Vec3, radius: f32, height: f32) -> AABB {
        AABB::new(
            Vec3::new(position.x - radius, position.y, position.z - radius),
            Vec3::new(position.x + radius, position.y + height, position.z + radius),
        )
    }

    /// First obstacle, in registration order, whose box overlaps `query`
    pub fn first_hit(&self, query: &AABB) -> Option<ObstacleId> {
        self.obstacles
            .iter_with_ids()
            .find(|(_, obstacle)| query.intersects(&obstacle.world_aabb()))
            .map(|(id, _)| id)
    }

    /// Does `query` touch any obstacle?
    pub fn intersects_any(&self, query: &AABB) -> bool {
        self.first_hit(query).is_some()
    }

    /// Is a cube of side `2 * radius` centered on `position` free of obstacles?
    ///
    /// With `radius == 0` this is a point-containment test.
    pub fn is_clear(&self, position: Vec3, radius: f32) -> bool {
        !self.intersects_any(&AABB::cube(position, radius))
    }

    /// Would an agent standing at `position` overlap an obstacle?
    pub fn collides_agent(&self, position: Vec3, radius: f32, height: f32) -> bool {
        self.intersects_any(&Self::agent_box(position, radius, height))
    }
}
