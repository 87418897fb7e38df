//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can rebalance a session
//! without a rebuild. Missing keys fall back to the values in [`crate::consts`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Arena;
use crate::sim::enemy::Steering;

/// Failure to read or parse a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Falling rock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    /// Frames between spawns; 0 disables rocks
    pub spawn_interval: f32,
    pub damage: f32,
    pub radius: f32,
    pub speed_min: f32,
    pub speed_max: f32,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            spawn_interval: 0.0,
            damage: HAZARD_DAMAGE,
            radius: HAZARD_RADIUS,
            speed_min: HAZARD_SPEED_MIN,
            speed_max: HAZARD_SPEED_MAX,
        }
    }
}

impl HazardTuning {
    pub fn enabled(&self) -> bool {
        self.spawn_interval > 0.0
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: Arena,

    // === Player ===
    pub player_speed: f32,
    pub player_radius: f32,
    pub start_light: f32,
    /// Passive light drain per frame unit
    pub light_decay_rate: f32,

    // === Pollen ===
    pub pollen_count: usize,
    pub pollen_value: f32,
    pub pollen_radius: f32,

    // === Flowers ===
    pub beacon_positions: Vec<(f32, f32)>,
    pub beacon_radius: f32,
    pub beacon_charge_threshold: f32,
    pub beacon_cost: f32,

    // === Enemies ===
    pub enemy_count: usize,
    pub enemy_speed: f32,
    pub enemy_radius: f32,
    pub enemy_detection_radius: f32,
    pub enemy_penalty: f32,
    pub steering: Steering,
    /// Scales every enemy's speed
    pub difficulty: f32,

    // === Hits ===
    pub knockback_strength: f32,
    pub knockback_friction: f32,
    pub blink_count: u32,
    /// Frames between blink toggles
    pub blink_interval: f32,

    pub hazards: HazardTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena: Arena::default(),

            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,
            start_light: LIGHT_MAX,
            light_decay_rate: LIGHT_DECAY_RATE,

            pollen_count: POLLEN_COUNT,
            pollen_value: POLLEN_LIGHT_VALUE,
            pollen_radius: POLLEN_RADIUS,

            beacon_positions: BEACON_POSITIONS.to_vec(),
            beacon_radius: BEACON_RADIUS,
            beacon_charge_threshold: BEACON_CHARGE_THRESHOLD,
            beacon_cost: BEACON_LIGHT_COST,

            enemy_count: ENEMY_COUNT,
            enemy_speed: ENEMY_SPEED,
            enemy_radius: ENEMY_RADIUS,
            enemy_detection_radius: ENEMY_DETECTION_RADIUS,
            enemy_penalty: ENEMY_LIGHT_PENALTY,
            steering: Steering::default(),
            difficulty: 1.0,

            knockback_strength: KNOCKBACK_STRENGTH,
            knockback_friction: KNOCKBACK_FRICTION,
            blink_count: BLINK_COUNT,
            blink_interval: BLINK_INTERVAL,

            hazards: HazardTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    /// Read tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Read tuning from a file, using defaults if that fails
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    /// Length of the post-hit invulnerability window, in frames
    pub fn invulnerability_duration(&self) -> f32 {
        self.blink_count as f32 * self.blink_interval
    }

    /// Pull nonsensical values back into range
    pub fn validated(mut self) -> Self {
        self.arena.width = self.arena.width.max(1.0);
        self.arena.height = self.arena.height.max(1.0);

        self.player_speed = self.player_speed.max(0.0);
        self.player_radius = self.player_radius.max(0.0);
        self.start_light = self.start_light.clamp(0.0, LIGHT_MAX);
        self.light_decay_rate = self.light_decay_rate.max(0.0);

        self.pollen_value = self.pollen_value.max(0.0);
        self.pollen_radius = self.pollen_radius.max(0.0);

        self.beacon_radius = self.beacon_radius.max(0.0);
        self.beacon_charge_threshold = self.beacon_charge_threshold.clamp(0.0, LIGHT_MAX);
        self.beacon_cost = self.beacon_cost.max(0.0);

        self.enemy_speed = self.enemy_speed.max(0.0);
        self.enemy_radius = self.enemy_radius.max(0.0);
        self.enemy_detection_radius = self.enemy_detection_radius.max(0.0);
        self.enemy_penalty = self.enemy_penalty.max(0.0);
        self.steering = self.steering.validated();
        self.difficulty = self.difficulty.max(0.0);

        self.knockback_strength = self.knockback_strength.max(0.0);
        self.knockback_friction = self.knockback_friction.clamp(0.0, 0.999);
        self.blink_interval = self.blink_interval.max(0.0);

        let hz = &mut self.hazards;
        // 0 (or less) switches rocks off; anything else is at least one frame
        hz.spawn_interval = if hz.spawn_interval > 0.0 {
            hz.spawn_interval.max(HAZARD_MIN_SPAWN_INTERVAL)
        } else {
            0.0
        };
        hz.damage = hz.damage.max(0.0);
        hz.radius = hz.radius.max(0.0);
        hz.speed_min = hz.speed_min.max(0.0);
        if hz.speed_max < hz.speed_min {
            std::mem::swap(&mut hz.speed_min, &mut hz.speed_max);
        }

        self
    }
}
