//! Snapshot system: queries the ECS world and builds an `EncounterSnapshot`.
//!
//! This system is read-only and never modifies the world.

use glam::Vec2;
use hecs::World;

use onslaught_ai::behavior::Behavior;
use onslaught_core::components::{Enemy, Health};
use onslaught_core::events::SimEvent;
use onslaught_core::state::{AgentView, EncounterSnapshot, SchedulerStatus};
use onslaught_core::types::{Heading, Position, SimTime, Velocity};

use crate::world_setup::entity_id;

/// Inputs owned by the engine rather than the world.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub scheduler: SchedulerStatus,
    pub target: Option<Vec2>,
    pub spawn_points: &'a [Vec2],
    pub wave_label: Option<&'a str>,
}

pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext<'_>,
    events: Vec<SimEvent>,
) -> EncounterSnapshot {
    EncounterSnapshot {
        time: ctx.time,
        scheduler: ctx.scheduler,
        target: ctx.target,
        spawn_points: ctx.spawn_points.to_vec(),
        wave_label: ctx.wave_label.map(str::to_string),
        agents: build_agents(world, ctx.target),
        events,
    }
}

fn build_agents(world: &World, target: Option<Vec2>) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<(&Enemy, &Position, &Velocity, &Heading, &Health, &Behavior)>()
        .iter()
        .map(|(entity, (enemy, pos, vel, heading, health, behavior))| AgentView {
            entity_id: entity_id(entity),
            kind: enemy.kind,
            position: pos.0,
            velocity: vel.0,
            heading: heading.0,
            health: health.current,
            dive_phase: behavior.dive_phase(),
            cruise_circle: behavior.cruise_circle(target),
        })
        .collect();
    agents.sort_by_key(|a| a.entity_id);
    agents
}
