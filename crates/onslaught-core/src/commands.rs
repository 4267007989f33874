//! Host commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// All external actions the host can request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    // --- Wave scheduling ---
    /// Cancel any running sequence and start again from the first wave.
    StartWaves,
    /// Halt the wave sequence, optionally destroying every live agent.
    StopWaves { kill_remaining: bool },
    /// An agent died outside the simulation's own health bookkeeping.
    ReportDeath,
    /// An agent was spawned by other means and counts against the cap.
    ReportSpawn,

    // --- Health ---
    /// Apply damage to an agent, identified by its entity bits.
    DamageEnemy { entity_id: u64, amount: i32 },

    // --- Environment ---
    /// Update (or clear) the tracked target position.
    SetTarget { position: Option<Vec2> },
    /// The scene changed: re-resolve the target and the spawn-point set.
    EnvironmentChanged {
        target: Option<Vec2>,
        spawn_points: Vec<Vec2>,
    },
}
