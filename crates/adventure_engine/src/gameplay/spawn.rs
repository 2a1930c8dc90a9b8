//! Placing objects on clear ground by rejection sampling

use log::warn;
use rand::Rng;

use crate::config::SpawnRule;
use crate::foundation::math::Vec3;
use crate::physics::CollisionProbe;

/// Finds spawn points that do not overlap obstacles
#[derive(Debug, Clone, Copy)]
pub struct SpawnPlacer<'a> {
    probe: CollisionProbe<'a>,
}

impl<'a> SpawnPlacer<'a> {
    /// Create a placer over a level's collision probe
    pub fn new(probe: CollisionProbe<'a>) -> Self {
        Self { probe }
    }

    /// Sample positions under `rule` until one is clear
    ///
    /// Falls back to the rule's fixed position when every attempt is
    /// blocked. The fallback is not checked for clearance.
    pub fn place<R: Rng + ?Sized>(&self, rule: &SpawnRule, rng: &mut R) -> Vec3 {
        let extent = rule.half_extent;

        for _ in 0..rule.max_attempts {
            let candidate = Vec3::new(
                rng.gen_range(-extent..=extent),
                rule.height,
                rng.gen_range(-extent..=extent),
            );
            if self.probe.is_clear(candidate, rule.clearance_radius) {
                return candidate;
            }
        }

        warn!(
            "No clear spawn point after {} attempts, using fallback {:?}",
            rule.max_attempts, rule.fallback
        );
        rule.fallback
    }
}
