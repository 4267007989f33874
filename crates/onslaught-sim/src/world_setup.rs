//! Entity factory: spawns agents into the hecs world and adapts the world
//! to the wave scheduler's `SpawnHost`.

use glam::Vec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use onslaught_ai::profiles::build_profile;
use onslaught_core::components::{Enemy, Health};
use onslaught_core::config::EnemyTuning;
use onslaught_core::enums::EnemyKind;
use onslaught_core::types::{Heading, Position, Velocity};

use crate::systems::wave_scheduler::{AgentHandle, SpawnHost};

/// Spawn a single agent of `kind` at `position`, at rest, facing +x.
pub fn spawn_enemy(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tuning: &EnemyTuning,
    kind: EnemyKind,
    position: Vec2,
) -> Entity {
    let profile = build_profile(kind, tuning, rng);
    world.spawn((
        Enemy { kind },
        Position(position),
        Velocity::default(),
        Heading::default(),
        Health {
            current: profile.max_hp,
            max: profile.max_hp,
        },
        profile.behavior,
    ))
}

/// Despawn every agent. Returns how many were removed.
pub fn despawn_enemies(world: &mut World) -> usize {
    let doomed: Vec<Entity> = world
        .query::<&Enemy>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    for &entity in &doomed {
        let _ = world.despawn(entity);
    }
    doomed.len()
}

/// Stable numeric id for an entity, used in commands, events and views.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// The arena as seen by the wave scheduler during one tick.
pub struct ArenaHost<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub tuning: &'a EnemyTuning,
    pub target: Option<Vec2>,
    pub spawn_points: &'a [Vec2],
    pub wave_label: &'a mut Option<String>,
}

impl SpawnHost for ArenaHost<'_> {
    fn current_target(&self) -> Option<Vec2> {
        self.target
    }

    fn spawn_points(&self) -> &[Vec2] {
        self.spawn_points
    }

    fn spawn(&mut self, kind: EnemyKind, position: Vec2) -> AgentHandle {
        let entity = spawn_enemy(self.world, self.rng, self.tuning, kind, position);
        AgentHandle(entity_id(entity))
    }

    fn despawn_all(&mut self) -> usize {
        despawn_enemies(self.world)
    }

    fn set_wave_label(&mut self, label: &str) {
        *self.wave_label = Some(label.to_string());
    }
}

