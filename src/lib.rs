//! Firefly - gather pollen, light the flowers, dodge the monsters
//!
//! Core modules:
//! - `sim`: Per-tick simulation (steering, knockback, interactions, session lifecycle)
//! - `tuning`: Data-driven game balance
//! - `input`: Held-key state to movement direction
//! - `autopilot`: Scripted player used by the headless runner

pub mod autopilot;
pub mod input;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
///
/// Time is measured in frame units: a delta of 1.0 is one 60 Hz frame.
pub mod consts {
    /// Nominal frame delta
    pub const FRAME_DT: f32 = 1.0;
    /// Largest delta a single tick will accept (a stalled frame is not a teleport)
    pub const MAX_FRAME_DT: f32 = 4.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 4.5;
    pub const PLAYER_RADIUS: f32 = 10.0;

    /// Light meter
    pub const LIGHT_MAX: f32 = 100.0;
    /// Passive drain per frame unit
    pub const LIGHT_DECAY_RATE: f32 = 0.03;

    /// Pollen
    pub const POLLEN_COUNT: usize = 12;
    pub const POLLEN_LIGHT_VALUE: f32 = 18.0;
    /// Contact distance (player radius + pollen radius)
    pub const POLLEN_RADIUS: f32 = 15.0;

    /// Flowers
    pub const BEACON_RADIUS: f32 = 25.0;
    pub const BEACON_CHARGE_THRESHOLD: f32 = 90.0;
    pub const BEACON_LIGHT_COST: f32 = 30.0;
    pub const BEACON_POSITIONS: [(f32, f32); 3] = [
        (100.0, 150.0),
        (ARENA_WIDTH - 100.0, 300.0),
        (400.0, ARENA_HEIGHT - 100.0),
    ];

    /// Enemies
    pub const ENEMY_COUNT: usize = 7;
    pub const ENEMY_SPEED: f32 = 1.8;
    /// Contact distance (player radius + half body width)
    pub const ENEMY_RADIUS: f32 = 28.0;
    pub const ENEMY_DETECTION_RADIUS: f32 = 220.0;
    /// Pursuit is 35% faster than wandering
    pub const PURSUIT_SPEED_FACTOR: f32 = 1.35;
    pub const ENEMY_LIGHT_PENALTY: f32 = 22.0;
    /// Enemies closer than this show their teeth
    pub const LUNGE_RADIUS: f32 = 60.0;

    /// Wander bookkeeping (frame units)
    pub const WANDER_TIMER_MIN: f32 = 120.0;
    pub const WANDER_TIMER_MAX: f32 = 300.0;
    pub const WANDER_ARRIVE_RADIUS: f32 = 4.0;
    pub const WANDER_JITTER_MIN: f32 = 0.6;
    pub const WANDER_JITTER_MAX: f32 = 1.2;

    /// Knockback
    pub const KNOCKBACK_STRENGTH: f32 = 8.0;
    /// Per-tick decay of the knockback accumulator
    pub const KNOCKBACK_FRICTION: f32 = 0.88;

    /// Invulnerability: 6 visibility toggles, 9 frames (150 ms) apart
    pub const BLINK_COUNT: u32 = 6;
    pub const BLINK_INTERVAL: f32 = 9.0;

    /// Red screen flash after a hit
    pub const HIT_FLASH: f32 = 0.5;
    pub const HIT_FLASH_DECAY: f32 = 0.08;

    /// Falling rocks (off unless a spawn interval is configured)
    pub const HAZARD_RADIUS: f32 = 16.0;
    pub const HAZARD_DAMAGE: f32 = 15.0;
    pub const HAZARD_SPEED_MIN: f32 = 2.0;
    pub const HAZARD_SPEED_MAX: f32 = 4.0;
    /// Shortest allowed spawn interval once rocks are enabled
    pub const HAZARD_MIN_SPAWN_INTERVAL: f32 = 1.0;
    /// Rocks a single tick may spawn while catching up
    pub const HAZARD_MAX_SPAWNS_PER_TICK: u32 = 8;
}

/// Direction used when a vector has no length to normalize
pub const FALLBACK_DIRECTION: Vec2 = Vec2::X;

/// Normalize `v`, falling back to +X when it has zero length
#[inline]
pub fn direction_or_fallback(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(FALLBACK_DIRECTION)
}
