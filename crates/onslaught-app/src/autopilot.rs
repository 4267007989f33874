//! Stand-in player for headless runs: periodically shoots the agent
//! closest to the target so waves clear and the sequence progresses.

use std::time::Duration;

use onslaught_core::commands::SimCommand;
use onslaught_core::state::EncounterSnapshot;

/// Time between shots.
pub const FIRE_INTERVAL: Duration = Duration::from_millis(250);
/// Damage per shot. Four shots kill a default agent.
pub const SHOT_DAMAGE: i32 = 5;

/// Id of the live agent nearest the target. Nothing is aimed at without a
/// target.
pub fn nearest_agent(snapshot: &EncounterSnapshot) -> Option<u64> {
    let target = snapshot.target?;
    snapshot
        .agents
        .iter()
        .filter(|a| a.health > 0)
        .min_by(|a, b| {
            a.position
                .distance_squared(target)
                .total_cmp(&b.position.distance_squared(target))
        })
        .map(|a| a.entity_id)
}

/// The command for the next shot, if there is anything to hit.
pub fn next_shot(snapshot: &EncounterSnapshot) -> Option<SimCommand> {
    nearest_agent(snapshot).map(|entity_id| SimCommand::DamageEnemy {
        entity_id,
        amount: SHOT_DAMAGE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use onslaught_core::enums::EnemyKind;
    use onslaught_core::state::AgentView;
    use glam::vec2;

    fn agent(entity_id: u64, x: f32, health: i32) -> AgentView {
        AgentView {
            entity_id,
            kind: EnemyKind::Chaser,
            position: vec2(x, 0.0),
            velocity: vec2(0.0, 0.0),
            heading: 0.0,
            health,
            dive_phase: None,
            cruise_circle: None,
        }
    }

    #[test]
    fn test_targets_nearest_live_agent() {
        let snapshot = EncounterSnapshot {
            target: Some(vec2(0.0, 0.0)),
            agents: vec![agent(1, 8.0, 20), agent(2, 1.0, 0), agent(3, -3.0, 20)],
            ..Default::default()
        };
        assert_eq!(nearest_agent(&snapshot), Some(3));
        assert!(matches!(
            next_shot(&snapshot),
            Some(SimCommand::DamageEnemy {
                entity_id: 3,
                amount: SHOT_DAMAGE
            })
        ));
    }

    #[test]
    fn test_holds_fire_without_target_or_agents() {
        let no_target = EncounterSnapshot {
            target: None,
            agents: vec![agent(1, 2.0, 20)],
            ..Default::default()
        };
        assert_eq!(nearest_agent(&no_target), None);

        let empty = EncounterSnapshot {
            target: Some(vec2(0.0, 0.0)),
            ..Default::default()
        };
        assert!(next_shot(&empty).is_none());
    }
}
