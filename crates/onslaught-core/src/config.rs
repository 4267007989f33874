//! Encounter configuration: wave definitions, scheduler rules and enemy
//! tuning.
//!
//! Configuration is validated once at load. The per-tick code assumes a
//! validated config and never reports errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::EnemyKind;

/// Configuration rejected at load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse encounter config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a finite, non-negative number (got {value})")]
    NegativeOrNonFinite { field: String, value: f32 },
    #[error("{field} must be a finite, positive number (got {value})")]
    NotPositive { field: String, value: f32 },
    #[error("max_alive_cap must be at least 1")]
    ZeroAliveCap,
    #[error("cruise_blend must be in (0, 1] (got {0})")]
    CruiseBlendOutOfRange(f32),
    #[error("diver desync range is empty: [{min}, {max})")]
    EmptyDesyncRange { min: f32, max: f32 },
}

/// One batch of a single enemy kind within a wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveEntryDef {
    pub kind: EnemyKind,
    /// Agents to spawn. Negative values spawn nothing.
    pub count: i32,
    /// Seconds between consecutive spawns of this entry.
    pub spawn_interval: f32,
}

/// An ordered batch of entries followed by a rest period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDef {
    /// Display name only.
    #[serde(default = "default_wave_name")]
    pub name: String,
    #[serde(default)]
    pub entries: Vec<WaveEntryDef>,
    /// Intermission after the wave clears (seconds).
    #[serde(default = "default_rest")]
    pub rest_after_wave: f32,
}

/// Wave scheduler rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub waves: Vec<WaveDef>,
    /// Wrap to the first wave after the last instead of finishing.
    pub loop_waves: bool,
    /// Multiplier applied to counts and intervals on each wrap.
    pub loop_scale_factor: f32,
    /// Seconds before the first wave begins.
    pub start_delay: f32,
    /// Preferred minimum distance between a spawn point and the target.
    pub min_spawn_distance_from_player: f32,
    /// Hard cap on concurrently live agents.
    pub max_alive_cap: u32,
}

/// Direct-pursuit tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringParams {
    pub move_speed: f32,
    pub stop_range: f32,
    /// Exponential convergence rate toward the desired velocity (1/s).
    pub steering_rate: f32,
}

/// Orbit-and-dive tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitDiveParams {
    pub cruise_radius: f32,
    pub tangential_speed: f32,
    pub radial_gain: f32,
    pub max_speed: f32,
    pub dive_speed: f32,
    pub dive_cooldown: f32,
    pub dive_range: f32,
    pub stop_range: f32,
    pub cruise_blend: f32,
    pub desync_min: f32,
    pub desync_max: f32,
}

/// Per-kind enemy tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub chaser: SteeringParams,
    pub diver: OrbitDiveParams,
    pub max_hp: i32,
}

fn default_wave_name() -> String {
    "Wave".to_string()
}

fn default_rest() -> f32 {
    DEFAULT_REST_AFTER_WAVE
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            waves: Vec::new(),
            loop_waves: true,
            loop_scale_factor: DEFAULT_LOOP_SCALE_FACTOR,
            start_delay: DEFAULT_START_DELAY,
            min_spawn_distance_from_player: DEFAULT_MIN_SPAWN_DISTANCE,
            max_alive_cap: DEFAULT_MAX_ALIVE_CAP,
        }
    }
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self {
            move_speed: CHASER_MOVE_SPEED,
            stop_range: CHASER_STOP_RANGE,
            steering_rate: CHASER_STEERING_RATE,
        }
    }
}

impl Default for OrbitDiveParams {
    fn default() -> Self {
        Self {
            cruise_radius: DIVER_CRUISE_RADIUS,
            tangential_speed: DIVER_TANGENTIAL_SPEED,
            radial_gain: DIVER_RADIAL_GAIN,
            max_speed: DIVER_MAX_SPEED,
            dive_speed: DIVER_DIVE_SPEED,
            dive_cooldown: DIVER_DIVE_COOLDOWN,
            dive_range: DIVER_DIVE_RANGE,
            stop_range: DIVER_STOP_RANGE,
            cruise_blend: DIVER_CRUISE_BLEND,
            desync_min: DIVER_DESYNC_MIN,
            desync_max: DIVER_DESYNC_MAX,
        }
    }
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            chaser: SteeringParams::default(),
            diver: OrbitDiveParams::default(),
            max_hp: ENEMY_MAX_HP,
        }
    }
}

impl WaveDef {
    pub fn new(name: impl Into<String>, entries: Vec<WaveEntryDef>, rest_after_wave: f32) -> Self {
        Self {
            name: name.into(),
            entries,
            rest_after_wave,
        }
    }

    /// Agents this wave spawns, ignoring negative counts.
    pub fn total_count(&self) -> u32 {
        self.entries.iter().map(|e| e.count.max(0) as u32).sum()
    }
}

impl WaveEntryDef {
    pub fn new(kind: EnemyKind, count: i32, spawn_interval: f32) -> Self {
        Self {
            kind,
            count,
            spawn_interval,
        }
    }
}

impl SchedulerConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("start_delay", self.start_delay)?;
        non_negative(
            "min_spawn_distance_from_player",
            self.min_spawn_distance_from_player,
        )?;
        positive("loop_scale_factor", self.loop_scale_factor)?;
        if self.max_alive_cap == 0 {
            return Err(ConfigError::ZeroAliveCap);
        }
        for (w, wave) in self.waves.iter().enumerate() {
            non_negative(&format!("waves[{w}].rest_after_wave"), wave.rest_after_wave)?;
            for (e, entry) in wave.entries.iter().enumerate() {
                non_negative(
                    &format!("waves[{w}].entries[{e}].spawn_interval"),
                    entry.spawn_interval,
                )?;
            }
        }
        Ok(())
    }
}

impl EnemyTuning {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.chaser;
        positive("chaser.move_speed", c.move_speed)?;
        non_negative("chaser.stop_range", c.stop_range)?;
        positive("chaser.steering_rate", c.steering_rate)?;

        let d = &self.diver;
        non_negative("diver.cruise_radius", d.cruise_radius)?;
        non_negative("diver.tangential_speed", d.tangential_speed)?;
        non_negative("diver.radial_gain", d.radial_gain)?;
        positive("diver.max_speed", d.max_speed)?;
        positive("diver.dive_speed", d.dive_speed)?;
        non_negative("diver.dive_cooldown", d.dive_cooldown)?;
        non_negative("diver.dive_range", d.dive_range)?;
        non_negative("diver.stop_range", d.stop_range)?;
        if !(d.cruise_blend > 0.0 && d.cruise_blend <= 1.0) {
            return Err(ConfigError::CruiseBlendOutOfRange(d.cruise_blend));
        }
        non_negative("diver.desync_min", d.desync_min)?;
        non_negative("diver.desync_max", d.desync_max)?;
        if d.desync_min >= d.desync_max {
            return Err(ConfigError::EmptyDesyncRange {
                min: d.desync_min,
                max: d.desync_max,
            });
        }

        if self.max_hp <= 0 {
            return Err(ConfigError::NotPositive {
                field: "max_hp".to_string(),
                value: self.max_hp as f32,
            });
        }
        Ok(())
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeOrNonFinite {
            field: field.to_string(),
            value,
        })
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive {
            field: field.to_string(),
            value,
        })
    }
}
