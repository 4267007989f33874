//! Simulation constants and tuning defaults.

/// Fixed simulation tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Motion ---

/// Squared speed below which an agent keeps its current facing.
pub const FACING_MIN_SPEED_SQ: f32 = 0.01;

/// Distance below which the direction to the target is undefined and
/// the canonical fallback direction (+x) is used instead.
pub const DIRECTION_EPSILON: f32 = 0.001;

// --- Chaser (direct pursuit) ---

pub const CHASER_MOVE_SPEED: f32 = 3.2;
/// Stop short of the target to avoid overlapping it.
pub const CHASER_STOP_RANGE: f32 = 0.75;
/// Exponential steering rate (1/s).
pub const CHASER_STEERING_RATE: f32 = 12.0;

// --- Diver (orbit and dive) ---

pub const DIVER_CRUISE_RADIUS: f32 = 3.5;
pub const DIVER_TANGENTIAL_SPEED: f32 = 2.8;
/// Proportional gain pulling the diver back onto the cruise circle.
pub const DIVER_RADIAL_GAIN: f32 = 2.0;
pub const DIVER_MAX_SPEED: f32 = 9.0;
pub const DIVER_DIVE_SPEED: f32 = 8.0;
pub const DIVER_DIVE_COOLDOWN: f32 = 2.2;
pub const DIVER_DIVE_RANGE: f32 = 6.0;
pub const DIVER_STOP_RANGE: f32 = 0.6;
/// Fixed per-tick blend from current toward desired velocity while cruising.
pub const DIVER_CRUISE_BLEND: f32 = 0.35;
/// Spawn-time dive cooldown is drawn from this range to desync divers.
pub const DIVER_DESYNC_MIN: f32 = 0.2;
pub const DIVER_DESYNC_MAX: f32 = 0.9;

// --- Health ---

pub const ENEMY_MAX_HP: i32 = 20;

// --- Wave scheduling ---

pub const DEFAULT_START_DELAY: f32 = 2.0;
pub const DEFAULT_MIN_SPAWN_DISTANCE: f32 = 4.0;
pub const DEFAULT_MAX_ALIVE_CAP: u32 = 30;
pub const DEFAULT_LOOP_SCALE_FACTOR: f32 = 1.25;
pub const DEFAULT_REST_AFTER_WAVE: f32 = 4.0;

/// Lower bound for a spawn interval after loop scaling (seconds).
pub const SPAWN_INTERVAL_FLOOR: f32 = 0.05;

/// Loop scaling divides intervals by `LOOP_INTERVAL_DIVISOR * factor`.
pub const LOOP_INTERVAL_DIVISOR: f32 = 0.9;

/// Random picks that must honor the minimum spawn distance before the
/// selector falls back to an unconstrained pick.
pub const SPAWN_POINT_ATTEMPTS: usize = 10;

/// Simulation-time waits complete once the remaining time is within this
/// tolerance, absorbing f32 accumulation error from repeated `dt` steps.
pub const TIMER_EPSILON: f32 = 1e-4;
