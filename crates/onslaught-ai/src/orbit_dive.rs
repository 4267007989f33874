//! Orbit-and-dive finite state machine.
//!
//! Cruise: circle the target on `cruise_radius`, moving along the
//! direction-to-target rotated 90° counter-clockwise (every agent shares
//! the same rotational sense), with a proportional controller correcting
//! radial error.
//! Dive: dash straight at the target until within `stop_range`.
//!
//! ```text
//!            cooldown <= 0 && dist <= dive_range
//!   Cruise ------------------------------------> Dive
//!     ^                                            |
//!     +------------- dist <= stop_range -----------+
//! ```

use glam::Vec2;
use rand::Rng;

use onslaught_core::config::OrbitDiveParams;
use onslaught_core::enums::DivePhase;
use onslaught_core::state::CruiseCircle;

use crate::motion::{direction_to, face_velocity, MotionContext, MotionUpdate};

#[derive(Debug, Clone)]
pub struct OrbitDiveController {
    params: OrbitDiveParams,
    phase: DivePhase,
    /// Seconds until the next dive is allowed. Only compared, never clamped.
    dive_cooldown: f32,
}

/// Output of one orbit-and-dive tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitDiveUpdate {
    pub motion: MotionUpdate,
    pub new_phase: DivePhase,
    pub phase_changed: bool,
}

impl OrbitDiveController {
    /// Controller in Cruise with an explicit initial cooldown.
    pub fn new(params: OrbitDiveParams, initial_cooldown: f32) -> Self {
        Self {
            params,
            phase: DivePhase::Cruise,
            dive_cooldown: initial_cooldown,
        }
    }

    /// Controller for a freshly spawned agent. The initial cooldown is a
    /// random offset so agents spawned together do not dive in lockstep.
    pub fn spawn<R: Rng + ?Sized>(params: OrbitDiveParams, rng: &mut R) -> Self {
        let offset = rng.gen_range(params.desync_min..params.desync_max);
        Self::new(params, offset)
    }

    pub fn phase(&self) -> DivePhase {
        self.phase
    }

    pub fn dive_cooldown(&self) -> f32 {
        self.dive_cooldown
    }

    pub fn params(&self) -> &OrbitDiveParams {
        &self.params
    }

    /// The circle this agent holds while cruising around `target`.
    pub fn cruise_circle(&self, target: Vec2) -> CruiseCircle {
        CruiseCircle {
            center: target,
            radius: self.params.cruise_radius,
        }
    }

    /// Advance the state machine by one tick.
    pub fn tick(&mut self, ctx: &MotionContext) -> OrbitDiveUpdate {
        let Some(target) = ctx.target else {
            return OrbitDiveUpdate {
                motion: MotionUpdate::halt(),
                new_phase: self.phase,
                phase_changed: false,
            };
        };

        self.dive_cooldown -= ctx.dt;

        let (dist, dir_to_target) = direction_to(ctx.position, target);
        let previous = self.phase;

        let new_velocity = match self.phase {
            DivePhase::Cruise => {
                let desired = self.cruise_velocity(dist, dir_to_target);
                let velocity = ctx.velocity.lerp(desired, self.params.cruise_blend);

                if self.dive_cooldown <= 0.0 && dist <= self.params.dive_range {
                    self.phase = DivePhase::Dive;
                    self.dive_cooldown = self.params.dive_cooldown;
                }
                velocity
            }
            DivePhase::Dive => {
                if dist > self.params.stop_range {
                    dir_to_target * self.params.dive_speed
                } else {
                    // Arrived. Velocity carries over unchanged this tick.
                    self.phase = DivePhase::Cruise;
                    ctx.velocity
                }
            }
        };

        OrbitDiveUpdate {
            motion: MotionUpdate {
                new_velocity,
                new_heading: face_velocity(new_velocity),
            },
            new_phase: self.phase,
            phase_changed: self.phase != previous,
        }
    }

    /// Desired cruise velocity: tangential motion plus a radial correction
    /// toward the cruise circle, clamped to `max_speed`.
    pub fn cruise_velocity(&self, dist: f32, dir_to_target: Vec2) -> Vec2 {
        let tangent = dir_to_target.perp();
        // Positive when outside the circle.
        let radial_error = dist - self.params.cruise_radius;
        let outward = -dir_to_target;

        let tangential = tangent * self.params.tangential_speed;
        let radial = -outward * (radial_error * self.params.radial_gain);

        (tangential + radial).clamp_length_max(self.params.max_speed)
    }
}
