//! Timed movement effects
//!
//! An effect scales one movement stat from its base value for a fixed time.
//! Applying an effect that is already running restarts its timer; effects
//! never stack.

use log::debug;

use crate::config::{EffectConfig, EffectsConfig};
use crate::physics::MovementStats;

/// Which stat an effect scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Scales move speed
    SpeedBoost,
    /// Scales jump power
    JumpBoost,
}

impl EffectKind {
    /// Every kind, in a fixed order
    pub const ALL: [EffectKind; 2] = [EffectKind::SpeedBoost, EffectKind::JumpBoost];
}

/// A timed stat multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    /// Stat affected
    pub kind: EffectKind,
    /// Factor applied to the base stat
    pub multiplier: f32,
    /// Seconds the effect lasts
    pub duration_secs: f32,
}

impl Effect {
    /// Create an effect
    pub fn new(kind: EffectKind, multiplier: f32, duration_secs: f32) -> Self {
        Self { kind, multiplier, duration_secs }
    }

    /// Configured effect of the given kind
    pub fn from_config(kind: EffectKind, config: &EffectsConfig) -> Self {
        let EffectConfig { multiplier, duration_secs } = match kind {
            EffectKind::SpeedBoost => &config.speed_boost,
            EffectKind::JumpBoost => &config.jump_boost,
        };
        Self::new(kind, *multiplier, *duration_secs)
    }
}

/// Timers for the effects currently applied to one agent
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEffects {
    base: MovementStats,
    speed_boost: Option<f32>,
    jump_boost: Option<f32>,
}

impl ActiveEffects {
    /// No effects running; `base` is what expiry restores
    pub fn new(base: MovementStats) -> Self {
        Self {
            base,
            speed_boost: None,
            jump_boost: None,
        }
    }

    /// Stats with no effect applied
    pub fn base(&self) -> MovementStats {
        self.base
    }

    /// Seconds left on an effect, if it is running
    pub fn remaining(&self, kind: EffectKind) -> Option<f32> {
        match kind {
            EffectKind::SpeedBoost => self.speed_boost,
            EffectKind::JumpBoost => self.jump_boost,
        }
    }

    /// Is an effect of this kind running?
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.remaining(kind).is_some()
    }

    /// Apply `effect` to `stats`, replacing any running effect of the same kind
    pub fn apply(&mut self, effect: &Effect, stats: &mut MovementStats) {
        match effect.kind {
            EffectKind::SpeedBoost => stats.move_speed = self.base.move_speed * effect.multiplier,
            EffectKind::JumpBoost => stats.jump_power = self.base.jump_power * effect.multiplier,
        }
        *self.timer_mut(effect.kind) = Some(effect.duration_secs);
        debug!("Applied {:?} x{} for {}s", effect.kind, effect.multiplier, effect.duration_secs);
    }

    /// Advance timers by `dt` seconds and restore stats for effects that ran out
    ///
    /// Returns the kinds that expired during this call.
    pub fn tick(&mut self, dt: f32, stats: &mut MovementStats) -> Vec<EffectKind> {
        let mut expired = Vec::new();

        for kind in EffectKind::ALL {
            let timer = self.timer_mut(kind);
            let Some(remaining) = timer.as_mut() else {
                continue;
            };

            *remaining -= dt;
            if *remaining <= 0.0 {
                *timer = None;
                self.restore(kind, stats);
                expired.push(kind);
            }
        }

        expired
    }

    /// Stop every effect and restore base stats
    pub fn clear(&mut self, stats: &mut MovementStats) {
        self.speed_boost = None;
        self.jump_boost = None;
        *stats = self.base;
    }

    fn restore(&self, kind: EffectKind, stats: &mut MovementStats) {
        match kind {
            EffectKind::SpeedBoost => stats.move_speed = self.base.move_speed,
            EffectKind::JumpBoost => stats.jump_power = self.base.jump_power,
        }
        debug!("{:?} expired", kind);
    }

    fn timer_mut(&mut self, kind: EffectKind) -> &mut Option<f32> {
        match kind {
            EffectKind::SpeedBoost => &mut self.speed_boost,
            EffectKind::JumpBoost => &mut self.jump_boost,
        }
    }
}
