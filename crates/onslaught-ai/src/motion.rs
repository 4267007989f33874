//! Shared per-tick motion input/output and facing rules.

use glam::Vec2;

use onslaught_core::constants::{DIRECTION_EPSILON, FACING_MIN_SPEED_SQ};

/// Input to a motion controller for a single agent.
#[derive(Debug, Clone, Copy)]
pub struct MotionContext {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Tracked target, if the target locator has one.
    pub target: Option<Vec2>,
    /// Fixed tick duration (seconds).
    pub dt: f32,
}

/// Output of a motion controller for a single agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionUpdate {
    pub new_velocity: Vec2,
    /// New facing angle; `None` leaves the current facing unchanged.
    pub new_heading: Option<f32>,
}

impl MotionUpdate {
    /// Zero velocity, facing untouched.
    pub fn halt() -> Self {
        Self {
            new_velocity: Vec2::ZERO,
            new_heading: None,
        }
    }
}

/// Facing angle of `velocity`, or `None` when it is too slow to define one.
pub fn face_velocity(velocity: Vec2) -> Option<f32> {
    if velocity.length_squared() > FACING_MIN_SPEED_SQ {
        Some(velocity.y.atan2(velocity.x))
    } else {
        None
    }
}

/// Distance and unit direction from `from` to `to`.
/// Falls back to +x when the two points (nearly) coincide.
pub fn direction_to(from: Vec2, to: Vec2) -> (f32, Vec2) {
    let offset = to - from;
    let dist = offset.length();
    if dist > DIRECTION_EPSILON {
        (dist, offset / dist)
    } else {
        (dist, Vec2::X)
    }
}
