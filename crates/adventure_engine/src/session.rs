//! One level's simulation state
//!
//! A [`LevelSession`] owns the obstacles, the player and its effects for the
//! lifetime of a level. The driving loop calls [`LevelSession::tick`] once
//! per frame; queries borrow the obstacles read-only in between.

use log::info;
use rand::Rng;

use crate::config::{SimulationConfig, SpawnRule};
use crate::foundation::math::Vec3;
use crate::gameplay::{ActiveEffects, Effect, EffectKind, SpawnPlacer};
use crate::navigation::GridPathfinder;
use crate::physics::{
    Agent, CollisionProbe, MovementInput, MovementIntegrator, MovementStats, Obstacle, ObstacleId, ObstacleSet,
};

/// Simulation state for one loaded level
#[derive(Debug, Clone)]
pub struct LevelSession {
    config: SimulationConfig,
    obstacles: ObstacleSet,
    player: Agent,
    effects: ActiveEffects,
    ticks: u64,
}

impl LevelSession {
    /// Start a level with the player at the configured spawn position
    pub fn start(config: SimulationConfig, obstacles: ObstacleSet) -> Self {
        let player = Agent::new(&config.agent);
        let effects = ActiveEffects::new(MovementStats::from_config(&config.agent));
        info!("Level started with {} obstacles, player at {:?}", obstacles.len(), player.position);

        Self {
            config,
            obstacles,
            player,
            effects,
            ticks: 0,
        }
    }

    /// Configuration the session was started with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The level's obstacles
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// One obstacle, for moving it between ticks
    ///
    /// Membership is fixed once the level starts; obstacles can move but
    /// none can be added or removed.
    pub fn obstacle_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(id)
    }

    /// The player agent
    pub fn player(&self) -> &Agent {
        &self.player
    }

    /// Effects running on the player
    pub fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    /// Ticks since the level started or last restarted
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Collision queries against the level
    pub fn probe(&self) -> CollisionProbe<'_> {
        CollisionProbe::new(&self.obstacles)
    }

    /// Route planning sized for the player
    pub fn pathfinder(&self) -> GridPathfinder<'_> {
        GridPathfinder::new(self.probe(), &self.config.pathfinding, self.config.agent.radius)
    }

    /// Advance one frame: expire effects, then move the player
    ///
    /// `dt` is the frame time in seconds and only drives effect timers;
    /// movement advances by exactly one tick.
    pub fn tick(&mut self, input: &MovementInput, dt: f32) -> Vec3 {
        self.effects.tick(dt, &mut self.player.stats);

        let integrator = MovementIntegrator::new(
            CollisionProbe::new(&self.obstacles),
            &self.config.physics,
            &self.config.scene,
        );
        self.ticks += 1;
        integrator.update(&mut self.player, input)
    }

    /// Plan a route for the player between two points
    pub fn find_path(&self, start: Vec3, goal: Vec3) -> Vec<Vec3> {
        self.pathfinder().find_path(start, goal)
    }

    /// Pick a clear spawn point under `rule`
    pub fn place_spawn<R: Rng + ?Sized>(&self, rule: &SpawnRule, rng: &mut R) -> Vec3 {
        SpawnPlacer::new(self.probe()).place(rule, rng)
    }

    /// Apply the configured effect of `kind` to the player
    pub fn apply_effect(&mut self, kind: EffectKind) {
        let effect = Effect::from_config(kind, &self.config.effects);
        self.effects.apply(&effect, &mut self.player.stats);
    }

    /// Put the player back at spawn with base stats and no effects
    pub fn restart(&mut self) {
        self.effects.clear(&mut self.player.stats);
        self.player.reset(&self.config.agent);
        self.ticks = 0;
        info!("Level restarted, player at {:?}", self.player.position);
    }
}
