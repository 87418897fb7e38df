//! Light meter
//!
//! The firefly's single health-like scalar. Every operation re-clamps into
//! `[0, LIGHT_MAX]`; an out-of-range result is corrected, never reported.

use serde::{Deserialize, Serialize};

use crate::consts::LIGHT_MAX;

/// Clamped light value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightMeter {
    value: f32,
}

impl Default for LightMeter {
    fn default() -> Self {
        Self::full()
    }
}

impl LightMeter {
    /// A meter holding `value`, clamped into range
    pub fn new(value: f32) -> Self {
        Self {
            value: clamp_light(value),
        }
    }

    pub fn full() -> Self {
        Self { value: LIGHT_MAX }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Overwrite the value (clamped)
    pub fn set(&mut self, value: f32) {
        self.value = clamp_light(value);
    }

    /// Passive drain of `rate` per frame unit over `dt`
    pub fn decay(&mut self, rate: f32, dt: f32) {
        self.set(self.value - rate * dt);
    }

    pub fn gain(&mut self, amount: f32) {
        self.set(self.value + amount);
    }

    pub fn lose(&mut self, amount: f32) {
        self.set(self.value - amount);
    }

    pub fn is_empty(&self) -> bool {
        self.value <= 0.0
    }

    /// Fraction of a full meter, for HUD bars
    pub fn fraction(&self) -> f32 {
        self.value / LIGHT_MAX
    }
}

/// NaN collapses to empty
fn clamp_light(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, LIGHT_MAX)
    }
}
