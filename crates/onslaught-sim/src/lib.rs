//! Simulation engine for Onslaught.
//!
//! Owns the hecs ECS world and the wave scheduler, runs systems at a fixed
//! tick rate, and produces `EncounterSnapshot`s for whatever presents them.

pub mod engine;
pub mod population;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use onslaught_core as core;
pub use population::Population;
