//! Application state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use onslaught_core::commands::SimCommand;
use onslaught_core::config::ConfigError;
use onslaught_core::state::EncounterSnapshot;
use onslaught_sim::engine::SimConfig;

use crate::game_loop;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A command to forward to the simulation engine.
    Sim(SimCommand),
    /// Tear the encounter down and stop the game loop thread.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has exited")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("invalid encounter config: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Handle to a running (or not yet started) simulation.
///
/// - `command_tx` is `None` until `start` succeeds.
/// - `latest_snapshot` is shared with the game loop, which replaces it
///   after every tick.
pub struct AppState {
    command_tx: Option<mpsc::Sender<GameLoopCommand>>,
    worker: Option<JoinHandle<()>>,
    latest_snapshot: Arc<Mutex<Option<EncounterSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: None,
            worker: None,
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop with `config`.
    pub fn start(&mut self, config: SimConfig) -> Result<(), AppError> {
        if self.command_tx.is_some() {
            return Err(AppError::AlreadyRunning);
        }
        let (tx, worker) = game_loop::spawn_game_loop(config, self.latest_snapshot.clone())?;
        self.command_tx = Some(tx);
        self.worker = Some(worker);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.command_tx.is_some()
    }

    /// Forward a command to the engine; applied at the next tick.
    pub fn send(&self, command: SimCommand) -> Result<(), AppError> {
        let tx = self.command_tx.as_ref().ok_or(AppError::NotStarted)?;
        tx.send(GameLoopCommand::Sim(command))
            .map_err(|_| AppError::Disconnected)
    }

    /// The snapshot of the most recent tick, if any tick has run.
    pub fn snapshot(&self) -> Result<Option<EncounterSnapshot>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Stop the game loop and wait for its thread to exit.
    pub fn shutdown(&mut self) -> Result<(), AppError> {
        let tx = self.command_tx.take().ok_or(AppError::NotStarted)?;
        // A loop that already exited has nothing left to tear down.
        let _ = tx.send(GameLoopCommand::Shutdown);
        if let Some(worker) = self.worker.take() {
            worker.join().map_err(|_| AppError::Disconnected)?;
        }
        Ok(())
    }
}
