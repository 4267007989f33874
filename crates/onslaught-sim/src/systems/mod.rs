//! Systems that advance the encounter each tick.
//!
//! The ECS systems are free functions over `&mut World` (or `&World` for
//! read-only) and keep no state of their own. The wave scheduler is the
//! one stateful system and is owned by the engine.

pub mod cleanup;
pub mod enemy_ai;
pub mod movement;
pub mod snapshot;
pub mod spawn_points;
pub mod wave_scheduler;
