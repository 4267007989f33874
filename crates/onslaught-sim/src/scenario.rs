//! Built-in encounter definitions.

use std::f32::consts::TAU;

use glam::Vec2;

use onslaught_core::config::{SchedulerConfig, WaveDef, WaveEntryDef};
use onslaught_core::enums::EnemyKind;

/// Three escalating waves: chasers, a mixed push, then a diver swarm.
pub fn default_encounter() -> SchedulerConfig {
    SchedulerConfig {
        waves: vec![
            WaveDef::new(
                "Scouts",
                vec![WaveEntryDef::new(EnemyKind::Chaser, 6, 0.8)],
                4.0,
            ),
            WaveDef::new(
                "Pincer",
                vec![
                    WaveEntryDef::new(EnemyKind::Chaser, 8, 0.5),
                    WaveEntryDef::new(EnemyKind::Diver, 3, 1.2),
                ],
                4.0,
            ),
            WaveDef::new(
                "Swarm",
                vec![
                    WaveEntryDef::new(EnemyKind::Diver, 6, 0.6),
                    WaveEntryDef::new(EnemyKind::Chaser, 10, 0.3),
                ],
                6.0,
            ),
        ],
        ..Default::default()
    }
}

/// `count` spawn points evenly spaced on a circle of `radius` around the
/// arena centre, starting on +x.
pub fn ring_spawn_points(count: usize, radius: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}
