//! Wave scheduler: sequences waves, throttles spawns against the alive cap,
//! waits for waves to clear, and rescales the waves on every loop.
//!
//! The wave sequence is a resumable state machine advanced once per fixed
//! tick. It suspends only at the start delay, between spawns, while
//! throttled, while waiting for a wave to clear, and during intermission.
//! `stop` drops the machine into `Stopped`, so nothing spawns afterwards.

use glam::Vec2;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use onslaught_core::config::{ConfigError, SchedulerConfig, WaveDef};
use onslaught_core::constants::{LOOP_INTERVAL_DIVISOR, SPAWN_INTERVAL_FLOOR, TIMER_EPSILON};
use onslaught_core::enums::{EnemyKind, SchedulerPhase};
use onslaught_core::events::SimEvent;
use onslaught_core::state::SchedulerStatus;

use crate::population::Population;
use crate::systems::spawn_points;

/// Opaque id of a spawned agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentHandle(pub u64);

/// What the scheduler needs from the arena it spawns into.
pub trait SpawnHost {
    /// Tracked target position, if any.
    fn current_target(&self) -> Option<Vec2>;
    /// Candidate spawn locations. Never mutated by the scheduler.
    fn spawn_points(&self) -> &[Vec2];
    /// Create an agent of `kind` at `position`.
    fn spawn(&mut self, kind: EnemyKind, position: Vec2) -> AgentHandle;
    /// Destroy every live agent. Returns how many were destroyed.
    fn despawn_all(&mut self) -> usize;
    /// Show the current wave. Hosts without a display ignore it.
    fn set_wave_label(&mut self, _label: &str) {}
}

/// Resume point of the wave sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Idle,
    StartDelay { remaining: f32 },
    NextWave,
    Spawn { entry: usize, spawned: u32 },
    Interval { entry: usize, spawned: u32, remaining: f32 },
    AwaitClear,
    Rest { remaining: f32 },
    Finished,
    Stopped,
}

enum Flow {
    Continue,
    Suspend,
}

/// Scalar rules copied out of the config for the duration of a tick.
#[derive(Debug, Clone, Copy)]
struct Rules {
    loop_waves: bool,
    loop_scale_factor: f32,
    min_spawn_distance: f32,
    max_alive_cap: u32,
}

impl From<&SchedulerConfig> for Rules {
    fn from(config: &SchedulerConfig) -> Self {
        Self {
            loop_waves: config.loop_waves,
            loop_scale_factor: config.loop_scale_factor,
            min_spawn_distance: config.min_spawn_distance_from_player,
            max_alive_cap: config.max_alive_cap,
        }
    }
}

pub struct WaveScheduler {
    /// Config as loaded. `None` until configured.
    config: Option<SchedulerConfig>,
    /// Working copy of the waves; rescaled on every loop.
    waves: Vec<WaveDef>,
    wave_index: Option<usize>,
    loop_count: u32,
    running: bool,
    step: Step,
    population: Population,
    rng: ChaCha8Rng,
}

impl WaveScheduler {
    /// A scheduler holding `config`, which must pass validation.
    pub fn new(config: SchedulerConfig, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut scheduler = Self::unconfigured(rng);
        scheduler.waves = config.waves.clone();
        scheduler.config = Some(config);
        Ok(scheduler)
    }

    /// A scheduler with no configuration. `start` is a no-op until
    /// `configure` is called.
    pub fn unconfigured(rng: ChaCha8Rng) -> Self {
        Self {
            config: None,
            waves: Vec::new(),
            wave_index: None,
            loop_count: 0,
            running: false,
            step: Step::Idle,
            population: Population::new(),
            rng,
        }
    }

    /// Replace the configuration. A running sequence is cancelled; live
    /// agents and the population count are left alone. An invalid config
    /// is rejected and the current one kept.
    pub fn configure(&mut self, config: SchedulerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if self.running {
            info!("wave sequence cancelled by reconfiguration");
            self.running = false;
        }
        self.step = Step::Idle;
        self.wave_index = None;
        self.loop_count = 0;
        self.waves = config.waves.clone();
        self.config = Some(config);
        Ok(())
    }

    /// Cancel any in-progress run and start from the first wave with a
    /// zeroed population.
    pub fn start(&mut self) {
        let Some(config) = self.config.as_ref() else {
            warn!("wave sequence started before configuration; ignoring");
            return;
        };
        if self.running {
            debug!("restarting wave sequence");
        }

        self.waves = config.waves.clone();
        self.wave_index = None;
        self.loop_count = 0;
        self.population.reset();
        self.running = true;
        self.step = if config.start_delay > 0.0 {
            Step::StartDelay {
                remaining: config.start_delay,
            }
        } else {
            Step::NextWave
        };
        info!(
            waves = self.waves.len(),
            start_delay = config.start_delay,
            cap = config.max_alive_cap,
            "wave sequence started"
        );
    }

    /// Halt the sequence. No spawn happens after this returns.
    ///
    /// With `kill_remaining`, every live agent is destroyed and the
    /// population reset to zero; otherwise both are left as they are.
    pub fn stop<H: SpawnHost>(
        &mut self,
        kill_remaining: bool,
        host: &mut H,
        events: &mut Vec<SimEvent>,
    ) {
        self.running = false;
        self.step = Step::Stopped;

        let killed = if kill_remaining {
            let killed = host.despawn_all();
            self.population.reset();
            killed
        } else {
            0
        };
        info!(kill_remaining, killed, "wave sequence stopped");
        events.push(SimEvent::SchedulerStopped { killed });
    }

    pub fn report_death(&self) {
        self.population.report_death();
    }

    pub fn report_spawn(&self) {
        self.population.report_spawn();
    }

    /// Shared handle to the population counter.
    pub fn population(&self) -> Population {
        self.population.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Current (possibly rescaled) waves.
    pub fn waves(&self) -> &[WaveDef] {
        &self.waves
    }

    pub fn status(&self) -> SchedulerStatus {
        let cap = self.config.as_ref().map_or(0, |c| c.max_alive_cap);
        let population = self.population.get();
        let phase = match self.step {
            Step::Idle => SchedulerPhase::Idle,
            Step::StartDelay { .. } => SchedulerPhase::StartDelay,
            Step::Spawn { .. } if population >= cap => SchedulerPhase::Throttled,
            Step::Spawn { .. } => SchedulerPhase::Spawning,
            Step::Interval { .. } => SchedulerPhase::SpawnInterval,
            Step::AwaitClear => SchedulerPhase::AwaitingClear,
            Step::Rest { .. } | Step::NextWave => SchedulerPhase::Intermission,
            Step::Finished => SchedulerPhase::Finished,
            Step::Stopped => SchedulerPhase::Stopped,
        };
        SchedulerStatus {
            phase,
            running: self.running,
            wave_index: self.wave_index,
            wave_name: self
                .wave_index
                .and_then(|i| self.waves.get(i))
                .map(|w| w.name.clone()),
            loop_count: self.loop_count,
            population,
            max_alive_cap: cap,
        }
    }

    /// Advance the wave sequence by one fixed tick of `dt` seconds.
    pub fn tick<H: SpawnHost>(&mut self, dt: f32, host: &mut H, events: &mut Vec<SimEvent>) {
        if !self.running {
            return;
        }
        let Some(rules) = self.config.as_ref().map(Rules::from) else {
            return;
        };

        match &mut self.step {
            Step::StartDelay { remaining }
            | Step::Interval { remaining, .. }
            | Step::Rest { remaining } => *remaining -= dt,
            _ => {}
        }

        // At most one wave begins per tick, so a run of empty waves cannot
        // spin forever inside a single tick.
        let mut wave_started = false;
        while self.running {
            match self.advance(rules, host, events, &mut wave_started) {
                Flow::Continue => {}
                Flow::Suspend => break,
            }
        }
    }

    fn advance<H: SpawnHost>(
        &mut self,
        rules: Rules,
        host: &mut H,
        events: &mut Vec<SimEvent>,
        wave_started: &mut bool,
    ) -> Flow {
        match self.step {
            Step::Idle | Step::Finished | Step::Stopped => Flow::Suspend,
            Step::StartDelay { remaining } | Step::Rest { remaining } => {
                if remaining <= TIMER_EPSILON {
                    self.step = Step::NextWave;
                    Flow::Continue
                } else {
                    Flow::Suspend
                }
            }
            Step::NextWave => {
                if *wave_started {
                    return Flow::Suspend;
                }
                *wave_started = true;
                self.begin_next_wave(rules, host, events);
                Flow::Continue
            }
            Step::Spawn { entry, spawned } => self.spawn_step(rules, entry, spawned, host, events),
            Step::Interval {
                entry,
                spawned,
                remaining,
            } => {
                if remaining <= TIMER_EPSILON {
                    self.step = Step::Spawn { entry, spawned };
                    Flow::Continue
                } else {
                    Flow::Suspend
                }
            }
            Step::AwaitClear => {
                if self.population.get() > 0 {
                    return Flow::Suspend;
                }
                let Some(index) = self.wave_index else {
                    self.step = Step::NextWave;
                    return Flow::Continue;
                };
                events.push(SimEvent::WaveCleared { ordinal: index + 1 });
                let rest = self.waves.get(index).map_or(0.0, |w| w.rest_after_wave);
                debug!(wave = index + 1, rest, "wave cleared");
                self.step = if rest > 0.0 {
                    Step::Rest { remaining: rest }
                } else {
                    Step::NextWave
                };
                Flow::Continue
            }
        }
    }

    fn begin_next_wave<H: SpawnHost>(
        &mut self,
        rules: Rules,
        host: &mut H,
        events: &mut Vec<SimEvent>,
    ) {
        let mut next = self.wave_index.map_or(0, |i| i + 1);
        if next >= self.waves.len() {
            if !rules.loop_waves || self.waves.is_empty() {
                self.finish(events);
                return;
            }
            next = 0;
            scale_waves(&mut self.waves, rules.loop_scale_factor);
            self.loop_count += 1;
            info!(
                loop_count = self.loop_count,
                factor = rules.loop_scale_factor,
                "waves looped and rescaled"
            );
            events.push(SimEvent::WavesLooped {
                loop_count: self.loop_count,
            });
        }

        self.wave_index = Some(next);
        let wave = &self.waves[next];
        let ordinal = next + 1;
        for entry in wave.entries.iter().filter(|e| e.count < 0) {
            warn!(
                wave = ordinal,
                kind = ?entry.kind,
                count = entry.count,
                "negative count spawns nothing"
            );
        }
        host.set_wave_label(&format!("Wave {ordinal}\n{}", wave.name));
        info!(
            wave = ordinal,
            name = %wave.name,
            enemies = wave.total_count(),
            "wave started"
        );
        events.push(SimEvent::WaveStarted {
            ordinal,
            name: wave.name.clone(),
            loop_count: self.loop_count,
        });
        self.step = Step::Spawn {
            entry: 0,
            spawned: 0,
        };
    }

    fn spawn_step<H: SpawnHost>(
        &mut self,
        rules: Rules,
        entry: usize,
        spawned: u32,
        host: &mut H,
        events: &mut Vec<SimEvent>,
    ) -> Flow {
        let Some(def) = self
            .wave_index
            .and_then(|i| self.waves.get(i))
            .and_then(|w| w.entries.get(entry))
        else {
            self.step = Step::AwaitClear;
            return Flow::Continue;
        };
        let (kind, interval) = (def.kind, def.spawn_interval);

        if spawned >= def.count.max(0) as u32 {
            self.step = Step::Spawn {
                entry: entry + 1,
                spawned: 0,
            };
            return Flow::Continue;
        }

        // Throttle: hold this spawn until the population drops below the cap.
        if self.population.get() >= rules.max_alive_cap {
            return Flow::Suspend;
        }

        self.spawn_one(kind, rules.min_spawn_distance, host, events);

        let spawned = spawned + 1;
        self.step = if interval > 0.0 {
            Step::Interval {
                entry,
                spawned,
                remaining: interval,
            }
        } else {
            Step::Spawn { entry, spawned }
        };
        Flow::Continue
    }

    fn spawn_one<H: SpawnHost>(
        &mut self,
        kind: EnemyKind,
        min_distance: f32,
        host: &mut H,
        events: &mut Vec<SimEvent>,
    ) {
        let target = host.current_target();
        let Some(position) =
            spawn_points::select(host.spawn_points(), target, min_distance, &mut self.rng)
        else {
            debug!(?kind, "no spawn points; spawn skipped");
            events.push(SimEvent::SpawnSkipped { kind });
            return;
        };

        let handle = host.spawn(kind, position);
        self.population.report_spawn();
        debug!(?kind, ?handle, x = position.x, y = position.y, "enemy spawned");
        events.push(SimEvent::EnemySpawned {
            entity_id: handle.0,
            kind,
            position,
        });
    }

    fn finish(&mut self, events: &mut Vec<SimEvent>) {
        self.running = false;
        self.step = Step::Finished;
        info!("wave sequence finished");
        events.push(SimEvent::SchedulerFinished);
    }
}

/// Rescale every entry for the next loop: counts are multiplied by
/// `factor` and rounded (ties to even), intervals become
/// `max(floor, interval / (0.9 * factor))`.
pub fn scale_waves(waves: &mut [WaveDef], factor: f32) {
    for entry in waves.iter_mut().flat_map(|w| w.entries.iter_mut()) {
        entry.count = (entry.count as f32 * factor).round_ties_even() as i32;
        entry.spawn_interval = (entry.spawn_interval * (1.0 / (LOOP_INTERVAL_DIVISOR * factor)))
            .max(SPAWN_INTERVAL_FLOOR);
    }
}
