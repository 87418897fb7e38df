//! Decaying knockback impulse
//!
//! Impulses accumulate into a velocity that is added to the owner's
//! displacement once per tick and then shrunk by a friction factor. The
//! accumulator decays geometrically and never snaps to zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::KNOCKBACK_FRICTION;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knockback {
    /// Accumulated impulse velocity
    pub vel: Vec2,
    /// Per-tick retention factor, in [0, 1)
    pub friction: f32,
}

impl Default for Knockback {
    fn default() -> Self {
        Self::new(KNOCKBACK_FRICTION)
    }
}

impl Knockback {
    pub fn new(friction: f32) -> Self {
        Self {
            vel: Vec2::ZERO,
            friction,
        }
    }

    /// Add `direction * strength` to the accumulator
    ///
    /// `direction` is expected to be unit length; it is not renormalized.
    pub fn apply_impulse(&mut self, direction: Vec2, strength: f32) {
        self.vel += direction * strength;
    }

    /// This tick's displacement contribution; decays the accumulator afterwards
    pub fn step(&mut self) -> Vec2 {
        let contribution = self.vel;
        self.vel *= self.friction;
        contribution
    }

    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.vel.length()
    }
}
