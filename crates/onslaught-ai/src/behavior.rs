//! The behavior controller attached to each agent.

use glam::Vec2;

use onslaught_core::enums::DivePhase;
use onslaught_core::state::CruiseCircle;

use crate::motion::{MotionContext, MotionUpdate};
use crate::orbit_dive::OrbitDiveController;
use crate::steering::SteeringController;

/// Tagged variant over the per-kind controllers. Stored as an ECS
/// component and ticked once per fixed step.
#[derive(Debug, Clone)]
pub enum Behavior {
    Steering(SteeringController),
    OrbitDive(OrbitDiveController),
}

/// Result of ticking a `Behavior`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorUpdate {
    pub motion: MotionUpdate,
    /// Set when an orbit-and-dive agent changed phase this tick.
    pub dive_transition: Option<DivePhase>,
}

impl Behavior {
    pub fn tick(&mut self, ctx: &MotionContext) -> BehaviorUpdate {
        match self {
            Behavior::Steering(controller) => BehaviorUpdate {
                motion: controller.tick(ctx),
                dive_transition: None,
            },
            Behavior::OrbitDive(controller) => {
                let update = controller.tick(ctx);
                BehaviorUpdate {
                    motion: update.motion,
                    dive_transition: update.phase_changed.then_some(update.new_phase),
                }
            }
        }
    }

    pub fn dive_phase(&self) -> Option<DivePhase> {
        match self {
            Behavior::Steering(_) => None,
            Behavior::OrbitDive(controller) => Some(controller.phase()),
        }
    }

    pub fn cruise_circle(&self, target: Option<Vec2>) -> Option<CruiseCircle> {
        match (self, target) {
            (Behavior::OrbitDive(controller), Some(target)) => {
                Some(controller.cruise_circle(target))
            }
            _ => None,
        }
    }
}
