//! Scripted player input for headless runs

use adventure_engine::foundation::math::{utils::quat_from_euler_degrees, Vec3};
use adventure_engine::gameplay::EffectKind;
use adventure_engine::physics::{MoveKeys, MovementInput};

/// One stretch of constant input
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    /// Frames the input is held
    pub ticks: u32,
    /// Keys held
    pub keys: MoveKeys,
    /// Camera heading in degrees, 0 looks down -z
    pub yaw_degrees: f32,
    /// Camera pitch in degrees; only affects the view, not movement
    pub pitch_degrees: f32,
    /// Effect picked up when the segment starts
    pub pickup: Option<EffectKind>,
}

impl Segment {
    const fn hold(ticks: u32, keys: MoveKeys, yaw_degrees: f32) -> Self {
        Self {
            ticks,
            keys,
            yaw_degrees,
            pitch_degrees: 0.0,
            pickup: None,
        }
    }

    /// Input snapshot for every tick of this segment
    pub fn input(&self) -> MovementInput {
        let orientation = quat_from_euler_degrees(Vec3::new(self.pitch_degrees, self.yaw_degrees, 0.0));
        MovementInput::from_orientation(self.keys, &orientation)
    }
}

/// A short tour: walk out, pick up a speed boost, strafe and jump, then
/// sprint diagonally while looking down
pub fn tour() -> Vec<Segment> {
    vec![
        Segment::hold(120, MoveKeys::FORWARD, 0.0),
        Segment {
            pickup: Some(EffectKind::SpeedBoost),
            ..Segment::hold(90, MoveKeys::FORWARD, 90.0)
        },
        Segment::hold(60, MoveKeys::RIGHT | MoveKeys::JUMP, 90.0),
        Segment {
            pickup: Some(EffectKind::JumpBoost),
            ..Segment::hold(45, MoveKeys::JUMP, 90.0)
        },
        Segment {
            pitch_degrees: -35.0,
            ..Segment::hold(240, MoveKeys::FORWARD | MoveKeys::LEFT, 225.0)
        },
        Segment::hold(60, MoveKeys::BACKWARD, 180.0),
        Segment::hold(30, MoveKeys::empty(), 180.0),
    ]
}
