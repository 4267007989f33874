//! Kind-specific behavior profiles.
//!
//! Maps an enemy kind to the controller and hit points it spawns with.

use rand::Rng;

use onslaught_core::config::EnemyTuning;
use onslaught_core::enums::EnemyKind;

use crate::behavior::Behavior;
use crate::orbit_dive::OrbitDiveController;
use crate::steering::SteeringController;

/// Spawn-time profile for an enemy kind.
pub struct EnemyProfile {
    pub behavior: Behavior,
    pub max_hp: i32,
}

/// Build the profile for a newly spawned agent of `kind`.
pub fn build_profile<R: Rng + ?Sized>(
    kind: EnemyKind,
    tuning: &EnemyTuning,
    rng: &mut R,
) -> EnemyProfile {
    let behavior = match kind {
        EnemyKind::Chaser => Behavior::Steering(SteeringController::new(tuning.chaser)),
        EnemyKind::Diver => Behavior::OrbitDive(OrbitDiveController::spawn(tuning.diver, rng)),
    };
    EnemyProfile {
        behavior,
        max_hp: tuning.max_hp,
    }
}
