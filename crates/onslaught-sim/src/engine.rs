//! Simulation engine: the host context for an encounter.
//!
//! `SimulationEngine` owns the hecs ECS world, the wave scheduler and the
//! arena (target + spawn points), processes host commands, runs all
//! systems at a fixed tick and produces `EncounterSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use onslaught_core::commands::SimCommand;
use onslaught_core::components::Health;
use onslaught_core::config::{ConfigError, EnemyTuning, SchedulerConfig};
use onslaught_core::constants::DT;
use onslaught_core::events::SimEvent;
use onslaught_core::state::EncounterSnapshot;
use onslaught_core::types::SimTime;

use crate::population::Population;
use crate::scenario;
use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::wave_scheduler::WaveScheduler;
use crate::world_setup::{self, ArenaHost};

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Wave rules. `None` leaves the scheduler unconfigured.
    pub scheduler: Option<SchedulerConfig>,
    pub tuning: EnemyTuning,
    /// Initial target position.
    pub target: Option<Vec2>,
    pub spawn_points: Vec<Vec2>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            scheduler: Some(scenario::default_encounter()),
            tuning: EnemyTuning::default(),
            target: Some(Vec2::ZERO),
            spawn_points: scenario::ring_spawn_points(8, 12.0),
        }
    }
}

/// The simulation engine. Owns the ECS world and all encounter state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    scheduler: WaveScheduler,
    tuning: EnemyTuning,
    target: Option<Vec2>,
    spawn_points: Vec<Vec2>,
    wave_label: Option<String>,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    ///
    /// Wave rules and enemy tuning are validated here, so nothing on the
    /// per-tick path has to deal with an invalid config.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.tuning.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let scheduler_rng = ChaCha8Rng::seed_from_u64(rng.gen());
        let scheduler = match config.scheduler {
            Some(rules) => WaveScheduler::new(rules, scheduler_rng)?,
            None => WaveScheduler::unconfigured(scheduler_rng),
        };

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            rng,
            scheduler,
            tuning: config.tuning,
            target: config.target,
            spawn_points: config.spawn_points,
            wave_label: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> EncounterSnapshot {
        self.process_commands();
        self.run_systems();
        self.time.advance();
        self.snapshot()
    }

    /// Start (or restart) the wave sequence immediately.
    pub fn start_waves(&mut self) {
        self.scheduler.start();
    }

    /// Stop the wave sequence immediately. No spawn happens after this
    /// returns.
    pub fn stop_waves(&mut self, kill_remaining: bool) {
        let mut host = ArenaHost {
            world: &mut self.world,
            rng: &mut self.rng,
            tuning: &self.tuning,
            target: self.target,
            spawn_points: &self.spawn_points,
            wave_label: &mut self.wave_label,
        };
        self.scheduler.stop(kill_remaining, &mut host, &mut self.events);
    }

    /// Stop spawning, destroy every agent and drop pending commands.
    ///
    /// Only a running sequence is stopped (and reports `SchedulerStopped`);
    /// otherwise leftover agents are cleared quietly.
    pub fn teardown(&mut self) {
        self.command_queue.clear();
        if self.scheduler.is_running() {
            self.stop_waves(true);
        } else {
            let killed = world_setup::despawn_enemies(&mut self.world);
            self.scheduler.population().reset();
            debug!(killed, "leftover agents cleared");
        }
        info!(tick = self.time.tick, "encounter torn down");
    }

    /// The scene changed: re-resolve the target and the spawn-point set.
    pub fn environment_changed(&mut self, target: Option<Vec2>, spawn_points: Vec<Vec2>) {
        info!(
            has_target = target.is_some(),
            spawn_points = spawn_points.len(),
            "environment changed"
        );
        if spawn_points.is_empty() {
            warn!("no spawn points in the new environment; spawns will be skipped");
        }
        self.target = target;
        self.spawn_points = spawn_points;
    }

    pub fn set_target(&mut self, target: Option<Vec2>) {
        self.target = target;
    }

    /// Apply damage to an agent. The cleanup system removes it and reports
    /// the death once its health reaches zero.
    pub fn damage_enemy(&mut self, entity: Entity, amount: i32) -> bool {
        match self.world.get::<&mut Health>(entity) {
            Ok(mut health) => {
                health.current -= amount;
                true
            }
            Err(_) => {
                debug!(?entity, "damage for missing enemy ignored");
                false
            }
        }
    }

    /// Shared handle to the population counter, for hosts that report
    /// deaths from another execution context.
    pub fn population(&self) -> Population {
        self.scheduler.population()
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    /// Replace the wave rules; cancels a running sequence. Invalid rules
    /// are rejected and the current ones kept.
    pub fn configure_waves(&mut self, config: SchedulerConfig) -> Result<(), ConfigError> {
        self.scheduler.configure(config)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    /// Current state without advancing time. Pending events stay queued.
    pub fn peek(&self) -> EncounterSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            self.snapshot_context(),
            self.events.clone(),
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::StartWaves => self.start_waves(),
            SimCommand::StopWaves { kill_remaining } => self.stop_waves(kill_remaining),
            SimCommand::ReportDeath => self.scheduler.report_death(),
            SimCommand::ReportSpawn => self.scheduler.report_spawn(),
            SimCommand::DamageEnemy { entity_id, amount } => {
                match Entity::from_bits(entity_id) {
                    Some(entity) => {
                        self.damage_enemy(entity, amount);
                    }
                    None => debug!(entity_id, "damage for invalid entity id ignored"),
                }
            }
            SimCommand::SetTarget { position } => self.set_target(position),
            SimCommand::EnvironmentChanged {
                target,
                spawn_points,
            } => self.environment_changed(target, spawn_points),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Wave scheduling
        let mut host = ArenaHost {
            world: &mut self.world,
            rng: &mut self.rng,
            tuning: &self.tuning,
            target: self.target,
            spawn_points: &self.spawn_points,
            wave_label: &mut self.wave_label,
        };
        self.scheduler.tick(DT, &mut host, &mut self.events);
        // 2. Enemy AI
        systems::enemy_ai::run(&mut self.world, self.target, DT, &mut self.events);
        // 3. Movement integration
        systems::movement::run(&mut self.world, DT);
        // 4. Cleanup (dead agents)
        let population = self.scheduler.population();
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &population,
            &mut self.events,
        );
    }

    fn snapshot(&mut self) -> EncounterSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, self.snapshot_context(), events)
    }

    fn snapshot_context(&self) -> SnapshotContext<'_> {
        SnapshotContext {
            time: self.time,
            scheduler: self.scheduler.status(),
            target: self.target,
            spawn_points: &self.spawn_points,
            wave_label: self.wave_label.as_deref(),
        }
    }
}
