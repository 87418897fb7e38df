//! Arena geometry
//!
//! An axis-aligned rectangle from `(0, 0)` to `(width, height)`, y pointing
//! down (screen coordinates, as the renderer expects).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Check if a point lies inside the arena (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Clamp a point so a circle of `radius` stays fully inside
    ///
    /// If the arena is narrower than the circle the point lands on the center line.
    pub fn clamp_inset(&self, point: Vec2, radius: f32) -> Vec2 {
        let clamp_axis = |v: f32, extent: f32| {
            if extent <= 2.0 * radius {
                extent / 2.0
            } else {
                v.clamp(radius, extent - radius)
            }
        };
        Vec2::new(clamp_axis(point.x, self.width), clamp_axis(point.y, self.height))
    }

    /// Uniformly random point inside the arena
    pub fn random_point<R: Rng>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random::<f32>() * self.width,
            rng.random::<f32>() * self.height,
        )
    }

    /// Check if a point has drifted past the arena by more than the given margins
    pub fn is_beyond(&self, point: Vec2, side: f32, top: f32, bottom: f32) -> bool {
        point.x < -side || point.x > self.width + side || point.y < -top || point.y > self.height + bottom
    }
}
