//! Per-tick movement for the player agent
//!
//! Vertical motion is a two-state machine. A grounded agent stays on the
//! ground plane until a jump sets its vertical velocity; an airborne agent
//! accumulates gravity every tick and lands the first tick its height
//! reaches the ground level. Landing is tested once per tick, not swept.
//!
//! Horizontal motion is resolved one axis at a time against the collision
//! probe, which lets the agent slide along walls it moves into diagonally.

use bitflags::bitflags;

use super::collision_probe::CollisionProbe;
use crate::config::{AgentConfig, PhysicsConfig, SceneConfig};
use crate::foundation::math::{utils::horizontal_unit, Quat, Vec3};

bitflags! {
    /// Movement keys held during a tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MoveKeys: u8 {
        /// Move along the forward vector
        const FORWARD = 1 << 0;
        /// Move against the forward vector
        const BACKWARD = 1 << 1;
        /// Move against the right vector
        const LEFT = 1 << 2;
        /// Move along the right vector
        const RIGHT = 1 << 3;
        /// Start a jump if grounded
        const JUMP = 1 << 4;
    }
}

/// Input snapshot for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementInput {
    /// Keys held this tick
    pub keys: MoveKeys,
    /// Horizontal unit vector the agent faces
    pub forward: Vec3,
    /// Horizontal unit vector to the agent's right
    pub right: Vec3,
}

impl MovementInput {
    /// Create an input snapshot from pre-normalized horizontal vectors
    pub fn new(keys: MoveKeys, forward: Vec3, right: Vec3) -> Self {
        Self { keys, forward, right }
    }

    /// Derive forward and right from a camera orientation
    ///
    /// The camera looks down its local -Z with +X to its right; both are
    /// flattened onto the ground plane.
    pub fn from_orientation(keys: MoveKeys, orientation: &Quat) -> Self {
        Self {
            keys,
            forward: horizontal_unit(orientation * Vec3::new(0.0, 0.0, -1.0)),
            right: horizontal_unit(orientation * Vec3::new(1.0, 0.0, 0.0)),
        }
    }

    /// Raw horizontal displacement for one tick
    ///
    /// Opposing keys cancel. Perpendicular keys add without renormalizing,
    /// so a diagonal covers `sqrt(2)` times the single-axis distance.
    pub fn displacement(&self, move_speed: f32) -> Vec3 {
        let mut velocity = Vec3::zeros();

        if self.keys.contains(MoveKeys::FORWARD) {
            velocity += self.forward * move_speed;
        }
        if self.keys.contains(MoveKeys::BACKWARD) {
            velocity += self.forward * -move_speed;
        }
        if self.keys.contains(MoveKeys::LEFT) {
            velocity += self.right * -move_speed;
        }
        if self.keys.contains(MoveKeys::RIGHT) {
            velocity += self.right * move_speed;
        }

        velocity
    }
}

/// Vertical motion state of an agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsState {
    /// Standing on the ground plane
    pub grounded: bool,
    /// Units per tick, positive is up
    pub vertical_velocity: f32,
}

impl PhysicsState {
    /// Standing still on the ground
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            vertical_velocity: 0.0,
        }
    }

    /// Back to standing still on the ground
    pub fn reset(&mut self) {
        *self = Self::grounded();
    }
}

impl Default for PhysicsState {
    fn default() -> Self {
        Self::grounded()
    }
}

/// Speeds currently in effect for an agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementStats {
    /// Horizontal distance per tick along one axis
    pub move_speed: f32,
    /// Upward velocity applied when a jump starts
    pub jump_power: f32,
}

impl MovementStats {
    /// Base stats from configuration
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            jump_power: config.jump_power,
        }
    }
}

/// An entity moved by the [`MovementIntegrator`]
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Feet position
    pub position: Vec3,
    /// Horizontal half-width of the collision box
    pub radius: f32,
    /// Height of the collision box
    pub height: f32,
    /// Vertical motion state
    pub physics: PhysicsState,
    /// Current speeds, possibly boosted
    pub stats: MovementStats,
}

impl Agent {
    /// Create a grounded agent at the configured spawn position
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            position: config.spawn_position,
            radius: config.radius,
            height: config.height,
            physics: PhysicsState::grounded(),
            stats: MovementStats::from_config(config),
        }
    }

    /// Return to the spawn position with base stats and no vertical motion
    pub fn reset(&mut self, config: &AgentConfig) {
        *self = Self::new(config);
    }
}

/// Advances one agent by one tick
#[derive(Debug, Clone, Copy)]
pub struct MovementIntegrator<'a> {
    probe: CollisionProbe<'a>,
    gravity: f32,
    ground_level: f32,
    boundary: f32,
}

impl<'a> MovementIntegrator<'a> {
    /// Create an integrator over a level's collision probe
    pub fn new(probe: CollisionProbe<'a>, physics: &PhysicsConfig, scene: &SceneConfig) -> Self {
        Self {
            probe,
            gravity: physics.gravity,
            ground_level: physics.ground_level,
            boundary: scene.boundary,
        }
    }

    /// Advance `agent` by one tick and return its new position
    ///
    /// Only the agent's position and physics state change. The result is a
    /// pure function of the agent, the input and the obstacles.
    pub fn update(&self, agent: &mut Agent, input: &MovementInput) -> Vec3 {
        self.apply_vertical(agent, input.keys.contains(MoveKeys::JUMP));
        self.apply_horizontal(agent, input.displacement(agent.stats.move_speed));
        agent.position
    }

    fn apply_vertical(&self, agent: &mut Agent, jump: bool) {
        // Airborne: integrate gravity, then test for landing
        if !agent.physics.grounded {
            agent.physics.vertical_velocity += self.gravity;
            agent.position.y += agent.physics.vertical_velocity;

            if agent.position.y <= self.ground_level {
                agent.position.y = self.ground_level;
                agent.physics.vertical_velocity = 0.0;
                agent.physics.grounded = true;
            }
        }

        // Grounded: a jump takes effect from the next tick's integration
        if jump && agent.physics.grounded {
            agent.physics.vertical_velocity = agent.stats.jump_power;
            agent.physics.grounded = false;
        }
    }

    fn apply_horizontal(&self, agent: &mut Agent, displacement: Vec3) {
        // X first, then Z from wherever X left us
        let try_x = Vec3::new(agent.position.x + displacement.x, agent.position.y, agent.position.z);
        if !self.probe.collides_agent(try_x, agent.radius, agent.height) {
            agent.position.x = try_x.x;
        }

        let try_z = Vec3::new(agent.position.x, agent.position.y, agent.position.z + displacement.z);
        if !self.probe.collides_agent(try_z, agent.radius, agent.height) {
            agent.position.z = try_z.z;
        }

        // Unlike clamp, max/min accept a negative or NaN boundary
        agent.position.x = agent.position.x.max(-self.boundary).min(self.boundary);
        agent.position.z = agent.position.z.max(-self.boundary).min(self.boundary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::physics::obstacle::{Obstacle, ObstacleSet};
    use approx::assert_relative_eq;

    fn config() -> SimulationConfig {
        crate::config::reference_config()
    }

    fn integrator<'a>(obstacles: &'a ObstacleSet, config: &SimulationConfig) -> MovementIntegrator<'a> {
        MovementIntegrator::new(CollisionProbe::new(obstacles), &config.physics, &config.scene)
    }

    fn along_axes(keys: MoveKeys) -> MovementInput {
        MovementInput::new(keys, Vec3::x(), Vec3::z())
    }

    #[test]
    fn test_idle_grounded_agent_stays_put() {
        let config = config();
        let obstacles = ObstacleSet::new();
        let mut agent = Agent::new(&config.agent);

        let position = integrator(&obstacles, &config).update(&mut agent, &along_axes(MoveKeys::empty()));

        assert_eq!(position, config.agent.spawn_position);
        assert_eq!(agent.physics, PhysicsState::grounded());
    }

    #[test]
    fn test_jump_leaves_ground_without_moving_this_tick() {
        let config = config();
        let obstacles = ObstacleSet::new();
        let mut agent = Agent::new(&config.agent);

        integrator(&obstacles, &config).update(&mut agent, &along_axes(MoveKeys::JUMP));

        assert!(!agent.physics.grounded);
        assert_eq!(agent.physics.vertical_velocity, config.agent.jump_power);
        assert_eq!(agent.position.y, config.physics.ground_level);
    }

    #[test]
    fn test_jump_while_airborne_is_ignored() {
        let config = config();
        let obstacles = ObstacleSet::new();
        let integrator = integrator(&obstacles, &config);
        let mut agent = Agent::new(&config.agent);

        integrator.update(&mut agent, &along_axes(MoveKeys::JUMP));
        integrator.update(&mut agent, &along_axes(MoveKeys::JUMP));

        // Second tick only integrated gravity
        let expected = config.agent.jump_power + config.physics.gravity;
        assert_relative_eq!(agent.physics.vertical_velocity, expected, epsilon = 1e-6);
        assert_relative_eq!(agent.position.y, config.physics.ground_level + expected, epsilon = 1e-6);
    }

    #[test]
    fn test_full_jump_lands_back_on_ground() {
        let config = config();
        let obstacles = ObstacleSet::new();
        let integrator = integrator(&obstacles, &config);
        let mut agent = Agent::new(&config.agent);

        integrator.update(&mut agent, &along_axes(MoveKeys::JUMP));
        let mut ticks = 0;
        while !agent.physics.grounded {
            integrator.update(&mut agent, &along_axes(MoveKeys::empty()));
            ticks += 1;
            assert!(ticks < 100, "agent never landed");
        }

        assert_eq!(agent.position.y, config.physics.ground_level);
        assert_eq!(agent.physics.vertical_velocity, 0.0);
        // 0.15 up with 0.02 gravity per tick peaks around tick 7 and lands by 15
        assert!(ticks <= 15, "landed after {ticks} ticks");
    }

    #[test]
    fn test_landing_converges_from_any_launch() {
        let config = config();
        let obstacles = ObstacleSet::new();
        let integrator = integrator(&obstacles, &config);
        let g = -config.physics.gravity;

        for (height, velocity) in [(10.0_f32, 0.5_f32), (1.6, -3.0), (50.0, 0.0), (2.0, 1.0)] {
            let mut agent = Agent::new(&config.agent);
            agent.position.y = height;
            agent.physics = PhysicsState { grounded: false, vertical_velocity: velocity };

            // Ticks until the fall covers the rise plus the drop:
            // smallest n with n*v - g*n*(n+1)/2 <= ground - height
            let drop = height - config.physics.ground_level;
            let bound = ((velocity + (velocity * velocity + 2.0 * g * drop).sqrt()) / g).ceil() as usize + 2;

            let mut ticks = 0;
            while !agent.physics.grounded {
                integrator.update(&mut agent, &along_axes(MoveKeys::empty()));
                ticks += 1;
                assert!(ticks <= bound, "start ({height}, {velocity}) exceeded {bound} ticks");
            }

            assert_eq!(agent.position.y, config.physics.ground_level);
            assert_eq!(agent.physics.vertical_velocity, 0.0);
        }
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let config = config();
        let obstacles = ObstacleSet::new();
        let mut agent = Agent::new(&config.agent);

        let keys = MoveKeys::FORWARD | MoveKeys::BACKWARD | MoveKeys::LEFT | MoveKeys::RIGHT;
        integrator(&obstacles, &config).update(&mut agent, &along_axes(keys));

        assert_eq!(agent.position, config.agent.spawn_position);
    }

    #[test]
    fn test_diagonal_is_not_renormalized() {
        let input = along_axes(MoveKeys::FORWARD | MoveKeys::RIGHT);
        let step = input.displacement(0.05);
        assert_relative_eq!(step.norm(), 0.05 * std::f32::consts::SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_wall_slide_keeps_unblocked_axis() {
        let mut config = config();
        config.agent.move_speed = 0.2;
        let obstacles: ObstacleSet = std::iter::once(Obstacle::block(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::new(1.0, 4.0, 10.0),
        ))
        .collect();

        let mut agent = Agent::new(&config.agent);
        agent.position = Vec3::new(-0.5, config.physics.ground_level, 0.0);

        integrator(&obstacles, &config).update(&mut agent, &along_axes(MoveKeys::FORWARD | MoveKeys::RIGHT));

        assert_eq!(agent.position.x, -0.5);
        assert_relative_eq!(agent.position.z, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_obstacle_below_feet_does_not_block() {
        let config = config();
        // Top face sits below the ground level the agent stands on
        let obstacles: ObstacleSet = std::iter::once(Obstacle::block(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ))
        .collect();

        let mut agent = Agent::new(&config.agent);
        agent.position = Vec3::new(-0.45, config.physics.ground_level, 0.0);
        integrator(&obstacles, &config).update(&mut agent, &along_axes(MoveKeys::FORWARD));

        assert_relative_eq!(agent.position.x, -0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_position_stays_inside_boundary() {
        let config = config();
        let obstacles = ObstacleSet::new();
        let integrator = integrator(&obstacles, &config);
        let boundary = config.scene.boundary;
        let mut agent = Agent::new(&config.agent);
        agent.stats.move_speed = 3.0;

        let pattern = [
            MoveKeys::FORWARD,
            MoveKeys::FORWARD | MoveKeys::RIGHT,
            MoveKeys::RIGHT | MoveKeys::JUMP,
            MoveKeys::BACKWARD | MoveKeys::LEFT,
            MoveKeys::LEFT,
        ];

        for (tick, keys) in pattern.iter().cycle().take(400).enumerate() {
            // Swing the heading so every direction gets pushed against the wall
            let yaw = tick as f32 * 0.1;
            let forward = Vec3::new(yaw.cos(), 0.0, yaw.sin());
            let right = Vec3::new(-yaw.sin(), 0.0, yaw.cos());
            let keys = if tick < 200 { MoveKeys::FORWARD } else { *keys };

            integrator.update(&mut agent, &MovementInput::new(keys, forward, right));

            assert!(agent.position.x.abs() <= boundary, "tick {tick}: x = {}", agent.position.x);
            assert!(agent.position.z.abs() <= boundary, "tick {tick}: z = {}", agent.position.z);
        }
    }

    #[test]
    fn test_unvalidated_boundary_does_not_panic() {
        let obstacles = ObstacleSet::new();
        let forward = along_axes(MoveKeys::FORWARD);

        let mut config = config();
        config.scene.boundary = -1.0;
        let mut agent = Agent::new(&config.agent);
        let position = integrator(&obstacles, &config).update(&mut agent, &forward);
        assert_relative_eq!(position.x, -1.0);

        config.scene.boundary = f32::NAN;
        let mut agent = Agent::new(&config.agent);
        let position = integrator(&obstacles, &config).update(&mut agent, &forward);
        assert_relative_eq!(position.x, 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_from_orientation_flattens_camera_pitch() {
        let pitched = crate::foundation::math::utils::quat_from_euler_degrees(Vec3::new(-30.0, 0.0, 0.0));
        let input = MovementInput::from_orientation(MoveKeys::FORWARD, &pitched);

        assert_relative_eq!(input.forward, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(input.right, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_agent_reset_restores_spawn_and_stats() {
        let config = config();
        let mut agent = Agent::new(&config.agent);
        agent.position = Vec3::new(3.0, 7.0, -2.0);
        agent.physics = PhysicsState { grounded: false, vertical_velocity: 0.4 };
        agent.stats.move_speed = 1.0;

        agent.reset(&config.agent);

        assert_eq!(agent, Agent::new(&config.agent));
    }
}
