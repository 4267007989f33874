//! Enemy AI system: ticks every agent's behavior controller.
//!
//! Writes the new velocity and facing back onto the agent; the movement
//! system integrates them afterwards.

use glam::Vec2;
use hecs::World;

use onslaught_ai::behavior::Behavior;
use onslaught_ai::motion::MotionContext;
use onslaught_core::enums::DivePhase;
use onslaught_core::events::SimEvent;
use onslaught_core::types::{Heading, Position, Velocity};

use crate::world_setup::entity_id;

pub fn run(world: &mut World, target: Option<Vec2>, dt: f32, events: &mut Vec<SimEvent>) {
    for (entity, (behavior, pos, vel, heading)) in
        world.query_mut::<(&mut Behavior, &Position, &mut Velocity, &mut Heading)>()
    {
        let ctx = MotionContext {
            position: pos.0,
            velocity: vel.0,
            target,
            dt,
        };
        let update = behavior.tick(&ctx);

        vel.0 = update.motion.new_velocity;
        if let Some(angle) = update.motion.new_heading {
            heading.0 = angle;
        }

        match update.dive_transition {
            Some(DivePhase::Dive) => events.push(SimEvent::DiveStarted {
                entity_id: entity_id(entity),
            }),
            Some(DivePhase::Cruise) => events.push(SimEvent::DiveEnded {
                entity_id: entity_id(entity),
            }),
            None => {}
        }
    }
}
