//! Cleanup system: removes dead agents and reports each death once.

use hecs::{Entity, World};
use tracing::debug;

use onslaught_core::components::{Enemy, Health};
use onslaught_core::events::SimEvent;

use crate::population::Population;
use crate::world_setup::entity_id;

/// Despawn every agent whose health reached zero.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    population: &Population,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    for (entity, (enemy, health)) in world.query_mut::<(&Enemy, &Health)>() {
        if health.current <= 0 {
            despawn_buffer.push(entity);
            events.push(SimEvent::EnemyDied {
                entity_id: entity_id(entity),
                kind: enemy.kind,
            });
        }
    }

    for entity in despawn_buffer.drain(..) {
        if world.despawn(entity).is_ok() {
            population.report_death();
            debug!(entity = entity_id(entity), "enemy died");
        }
    }
}
