//! Spawn-point selection with a best-effort minimum distance from the
//! target.

use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use onslaught_core::constants::SPAWN_POINT_ATTEMPTS;

/// Pick a spawn point at least `min_distance` from `target`.
///
/// Tries `SPAWN_POINT_ATTEMPTS` uniform picks, then falls back to one
/// unconstrained pick. Without a target the first pick is accepted.
/// Returns `None` only when `points` is empty.
pub fn select<R: Rng + ?Sized>(
    points: &[Vec2],
    target: Option<Vec2>,
    min_distance: f32,
    rng: &mut R,
) -> Option<Vec2> {
    for _ in 0..SPAWN_POINT_ATTEMPTS {
        let candidate = *points.choose(rng)?;
        match target {
            None => return Some(candidate),
            Some(target) if candidate.distance(target) >= min_distance => {
                return Some(candidate)
            }
            Some(_) => {}
        }
    }
    points.choose(rng).copied()
}
