//! Events emitted by the simulation for presentation and telemetry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;

/// Notable things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A wave began; `ordinal` is 1-based within the current loop.
    WaveStarted {
        ordinal: usize,
        name: String,
        loop_count: u32,
    },
    EnemySpawned {
        entity_id: u64,
        kind: EnemyKind,
        position: Vec2,
    },
    /// A spawn slot was consumed without a spawn point to place it on.
    SpawnSkipped { kind: EnemyKind },
    /// The sequence wrapped to the first wave and rescaled every entry.
    WavesLooped { loop_count: u32 },
    /// Population reached zero after every entry of the wave was spawned.
    WaveCleared { ordinal: usize },
    /// Ran past the last wave with looping disabled.
    SchedulerFinished,
    SchedulerStopped { killed: usize },
    EnemyDied { entity_id: u64, kind: EnemyKind },
    DiveStarted { entity_id: u64 },
    DiveEnded { entity_id: u64 },
}
