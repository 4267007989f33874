//! Encounter snapshot: the read-only view an external presentation layer
//! renders after each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::SimTime;

/// Complete encounter state produced after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub time: SimTime,
    pub scheduler: SchedulerStatus,
    pub target: Option<Vec2>,
    pub spawn_points: Vec<Vec2>,
    /// Last label pushed to the display, e.g. "Wave 2\nFlankers".
    pub wave_label: Option<String>,
    pub agents: Vec<AgentView>,
    pub events: Vec<SimEvent>,
}

/// Wave scheduler diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    pub phase: SchedulerPhase,
    pub running: bool,
    /// Index into the wave list; `None` before the first wave begins.
    pub wave_index: Option<usize>,
    pub wave_name: Option<String>,
    /// Completed wrap-arounds.
    pub loop_count: u32,
    pub population: u32,
    pub max_alive_cap: u32,
}

/// A live agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub entity_id: u64,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: f32,
    pub health: i32,
    /// Only set for orbit-and-dive agents.
    pub dive_phase: Option<DivePhase>,
    pub cruise_circle: Option<CruiseCircle>,
}

/// The circle an orbiting agent is trying to hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CruiseCircle {
    pub center: Vec2,
    pub radius: f32,
}
