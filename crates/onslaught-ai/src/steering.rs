//! Direct pursuit: steer toward the target at a fixed speed and stop short
//! of it.
//!
//! Velocity converges on the desired velocity exponentially, with a blend
//! of `1 - e^(-rate * dt)` per tick, so the residual after time `T` is
//! `e^(-rate * T)` of the initial error whatever the tick size.

use glam::Vec2;

use onslaught_core::config::SteeringParams;

use crate::motion::{face_velocity, MotionContext, MotionUpdate};

#[derive(Debug, Clone)]
pub struct SteeringController {
    params: SteeringParams,
}

impl SteeringController {
    pub fn new(params: SteeringParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SteeringParams {
        &self.params
    }

    /// Compute the next velocity and facing.
    pub fn tick(&self, ctx: &MotionContext) -> MotionUpdate {
        let Some(target) = ctx.target else {
            return MotionUpdate::halt();
        };

        let desired = self.desired_velocity(ctx.position, target);
        let blend = smoothing_factor(self.params.steering_rate, ctx.dt);
        let new_velocity = ctx.velocity.lerp(desired, blend);

        MotionUpdate {
            new_velocity,
            new_heading: face_velocity(new_velocity),
        }
    }

    /// Full-speed pursuit outside the stop range, standstill inside it.
    pub fn desired_velocity(&self, position: Vec2, target: Vec2) -> Vec2 {
        let to_target = target - position;
        let dist = to_target.length();
        if dist > self.params.stop_range {
            to_target / dist * self.params.move_speed
        } else {
            Vec2::ZERO
        }
    }
}

/// Per-tick blend factor for exponential smoothing at `rate` (1/s).
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}
