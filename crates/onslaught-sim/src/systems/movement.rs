//! Kinematic integration system.
//!
//! Stands in for the host's physics: position += velocity * dt, with no
//! collision response.

use hecs::World;

use onslaught_core::types::{Position, Velocity};

pub fn run(world: &mut World, dt: f32) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.0 += vel.0 * dt;
    }
}
