//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. Selects the behavior controller attached at spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Direct pursuit with exponential steering.
    #[default]
    Chaser,
    /// Orbits the target and periodically dives at it.
    Diver,
}

/// Behavior state of an orbit-and-dive controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivePhase {
    /// Circling the target on the cruise radius.
    #[default]
    Cruise,
    /// Dashing straight at the target.
    Dive,
}

/// Where the wave sequence is currently suspended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerPhase {
    /// Never started, or started without configuration.
    #[default]
    Idle,
    /// Waiting out the initial start delay.
    StartDelay,
    /// Ready to spawn the next agent of the current entry.
    Spawning,
    /// Spawn withheld because the population is at the cap.
    Throttled,
    /// Waiting between two spawns of the same entry.
    SpawnInterval,
    /// All entries spawned; waiting for the population to reach zero.
    AwaitingClear,
    /// Resting after a cleared wave.
    Intermission,
    /// Ran past the last wave with looping disabled.
    Finished,
    /// Cancelled by `stop`.
    Stopped,
}
