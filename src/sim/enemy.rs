//! Enemy steering
//!
//! Each tick an enemy either pursues the firefly (when it is inside the
//! detection radius) or wanders toward a random point. The choice is made
//! fresh every tick from the current distance; nothing about it is carried
//! over, so an enemy sitting right on the detection edge can switch back and
//! forth between the two every frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use crate::consts::*;
use crate::direction_or_fallback;

/// What an enemy did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Behavior {
    #[default]
    Wandering,
    Pursuing,
}

/// Steering parameters shared by every enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Steering {
    /// Pursuit speed relative to base speed
    pub pursuit_factor: f32,
    /// Wander countdown range (frames)
    pub wander_timer_min: f32,
    pub wander_timer_max: f32,
    /// Wander target counts as reached within this distance
    pub arrive_radius: f32,
    /// Per-axis speed jitter while wandering
    pub jitter_min: f32,
    pub jitter_max: f32,
    /// Render hint: enemy is lunging when the firefly is this close
    pub lunge_radius: f32,
}

impl Default for Steering {
    fn default() -> Self {
        Self {
            pursuit_factor: PURSUIT_SPEED_FACTOR,
            wander_timer_min: WANDER_TIMER_MIN,
            wander_timer_max: WANDER_TIMER_MAX,
            arrive_radius: WANDER_ARRIVE_RADIUS,
            jitter_min: WANDER_JITTER_MIN,
            jitter_max: WANDER_JITTER_MAX,
            lunge_radius: LUNGE_RADIUS,
        }
    }
}

impl Steering {
    pub fn validated(mut self) -> Self {
        self.pursuit_factor = self.pursuit_factor.max(0.0);
        self.wander_timer_min = self.wander_timer_min.max(0.0);
        self.wander_timer_max = self.wander_timer_max.max(0.0);
        if self.wander_timer_max < self.wander_timer_min {
            std::mem::swap(&mut self.wander_timer_min, &mut self.wander_timer_max);
        }
        self.arrive_radius = self.arrive_radius.max(0.0);
        self.jitter_min = self.jitter_min.max(0.0);
        self.jitter_max = self.jitter_max.max(0.0);
        if self.jitter_max < self.jitter_min {
            std::mem::swap(&mut self.jitter_min, &mut self.jitter_max);
        }
        self.lunge_radius = self.lunge_radius.max(0.0);
        self
    }
}

/// A monster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Creation order; also the hit-resolution order
    pub id: u32,
    pub pos: Vec2,
    pub behavior: Behavior,
    pub wander_target: Vec2,
    /// Frames until the next forced retarget
    pub wander_timer: f32,
    pub base_speed: f32,
    pub detection_radius: f32,
    /// Direction of the last pursuit step (eyes follow it)
    pub facing: Vec2,
    /// Firefly is within the lunge radius (mouth opens)
    pub lunging: bool,
}

impl Enemy {
    /// Create an enemy with a fresh wander target
    pub fn new<R: Rng>(
        id: u32,
        pos: Vec2,
        base_speed: f32,
        detection_radius: f32,
        arena: &Arena,
        steering: &Steering,
        rng: &mut R,
    ) -> Self {
        let mut enemy = Self {
            id,
            pos,
            behavior: Behavior::Wandering,
            wander_target: pos,
            wander_timer: 0.0,
            base_speed,
            detection_radius,
            facing: Vec2::ZERO,
            lunging: false,
        };
        enemy.retarget(arena, steering, rng);
        enemy
    }

    /// Pick a new wander point and reset the countdown
    pub fn retarget<R: Rng>(&mut self, arena: &Arena, steering: &Steering, rng: &mut R) {
        self.wander_target = arena.random_point(rng);
        self.wander_timer = rng.random_range(steering.wander_timer_min..=steering.wander_timer_max);
    }

    /// Advance one tick
    ///
    /// `player` is `None` when there is nothing to chase; the enemy then only wanders.
    pub fn update<R: Rng>(
        &mut self,
        player: Option<Vec2>,
        dt: f32,
        difficulty: f32,
        arena: &Arena,
        steering: &Steering,
        rng: &mut R,
    ) {
        self.wander_timer -= dt;
        let speed = self.base_speed * difficulty * dt;

        if let Some(player) = player {
            let to_player = player - self.pos;
            let dist = to_player.length();
            if dist < self.detection_radius {
                let dir = direction_or_fallback(to_player);
                self.pos += dir * speed * steering.pursuit_factor;
                self.behavior = Behavior::Pursuing;
                self.facing = dir;
                self.lunging = dist < steering.lunge_radius;
                return;
            }
        }

        self.behavior = Behavior::Wandering;
        self.lunging = false;

        if self.wander_timer <= 0.0 {
            self.retarget(arena, steering, rng);
            return;
        }

        let to_target = self.wander_target - self.pos;
        let dist = to_target.length();
        if dist > steering.arrive_radius {
            let dir = to_target / dist;
            // Independent jitter per axis keeps the path from being a straight line
            let jitter = Vec2::new(
                rng.random_range(steering.jitter_min..=steering.jitter_max),
                rng.random_range(steering.jitter_min..=steering.jitter_max),
            );
            self.pos += dir * speed * jitter;
        } else {
            self.retarget(arena, steering, rng);
        }
    }
}
