//! Enemy behavior for ONSLAUGHT.
//!
//! Per-agent motion controllers (direct pursuit and orbit-and-dive),
//! the tagged `Behavior` variant attached to each agent, and
//! kind-driven behavior profiles. No ECS dependency: every controller
//! is ticked with plain data by the host's fixed-step driver.

pub mod behavior;
pub mod motion;
pub mod orbit_dive;
pub mod profiles;
pub mod steering;

pub use onslaught_core as core;

#[cfg(test)]
mod tests;
