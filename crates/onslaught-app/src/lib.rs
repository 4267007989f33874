//! Onslaught headless runner.
//!
//! Drives the simulation engine on its own thread at the fixed tick rate
//! and exposes it through a command channel and a shared latest snapshot.

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use onslaught_core as core;
