//! Game loop thread: runs the simulation engine at 50Hz and publishes
//! snapshots.
//!
//! The engine is built and validated on the caller's thread, then moved
//! into the loop thread.
//! Commands arrive via an `mpsc` channel. The latest snapshot is stored in
//! shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use onslaught_core::constants::TICK_RATE;
use onslaught_core::state::EncounterSnapshot;
use onslaught_sim::engine::{SimConfig, SimulationEngine};

use crate::state::{AppError, GameLoopCommand};

/// Duration of one fixed tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// The engine is built (and its config validated) before the thread
/// starts. Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<EncounterSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), AppError> {
    let engine = SimulationEngine::new(config)?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("onslaught-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect; the
/// encounter is torn down either way.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<EncounterSnapshot>>,
) {
    let mut next_tick_time = Instant::now();
    info!(tick_rate = TICK_RATE, "game loop started");

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            engine.teardown();
            info!(tick = engine.time().tick, "game loop stopped");
            return;
        }

        // 2. Advance one tick
        let snapshot = engine.tick();

        // 3. Store latest snapshot for polling
        match latest_snapshot.lock() {
            Ok(mut lock) => *lock = Some(snapshot),
            Err(_) => warn!("snapshot lock poisoned; snapshot dropped"),
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral.
            next_tick_time = now;
        }
    }
}

/// Queue every pending command. Returns `false` once the loop should stop.
fn drain_commands(
    engine: &mut SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::Sim(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onslaught_core::commands::SimCommand;
    use onslaught_core::config::ConfigError;
    use onslaught_core::enums::SchedulerPhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Sim(SimCommand::StartWaves)).unwrap();
        tx.send(GameLoopCommand::Sim(SimCommand::StopWaves {
            kill_remaining: true,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Sim(SimCommand::StartWaves)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Sim(SimCommand::StopWaves {
                kill_remaining: true
            })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_drain_stops_on_shutdown_and_disconnect() {
        let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Sim(SimCommand::StartWaves)).unwrap();
        assert!(drain_commands(&mut engine, &rx));
        let snap = engine.tick();
        assert_eq!(snap.scheduler.phase, SchedulerPhase::StartDelay);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&mut engine, &rx));

        drop(tx);
        assert!(!drain_commands(&mut engine, &rx));
    }

    #[test]
    fn test_loop_exits_when_sender_dropped() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest.clone()).unwrap();
        tx.send(GameLoopCommand::Sim(SimCommand::StartWaves)).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        drop(tx);
        handle.join().unwrap();

        let snapshot = latest.lock().unwrap().clone().expect("loop ticked");
        assert!(snapshot.scheduler.running);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_spawn() {
        let mut config = SimConfig::default();
        config.tuning.diver.desync_min = 0.5;
        config.tuning.diver.desync_max = 0.5;

        let result = spawn_game_loop(config, Arc::new(Mutex::new(None)));
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::EmptyDesyncRange { .. }))
        ));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 50Hz = 20ms per tick
        assert_eq!(TICK_DURATION, Duration::from_millis(20));
    }
}
