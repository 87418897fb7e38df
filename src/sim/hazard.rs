//! Falling rocks
//!
//! Rocks drop in from above the arena at a fixed cadence and fall in a
//! straight line. Contact is handled with the other hits in
//! [`interaction`](super::interaction); this module only spawns, moves and
//! culls them.

use glam::Vec2;
use rand::Rng;

use super::state::Session;
use crate::consts::HAZARD_MAX_SPAWNS_PER_TICK;

/// Rocks this far outside the arena are gone for good
const CULL_SIDE: f32 = 80.0;
const CULL_TOP: f32 = 80.0;
const CULL_BOTTOM: f32 = 40.0;

/// Spawn, move and cull rocks for one tick
pub fn update(session: &mut Session, dt: f32) {
    if session.tuning.hazards.enabled() {
        let interval = session.tuning.hazards.spawn_interval;
        session.hazard_timer -= dt;
        let mut spawned = 0;
        while session.hazard_timer <= 0.0 {
            if spawned == HAZARD_MAX_SPAWNS_PER_TICK {
                // Drop whatever backlog is left rather than flood the arena
                session.hazard_timer = interval;
                break;
            }
            spawn_rock(session);
            session.hazard_timer += interval;
            spawned += 1;
        }
    }

    for hazard in &mut session.hazards {
        hazard.pos += hazard.vel * dt;
    }

    let arena = session.arena();
    session
        .hazards
        .retain(|h| !arena.is_beyond(h.pos, CULL_SIDE, CULL_TOP, CULL_BOTTOM));
}

fn spawn_rock(session: &mut Session) {
    let tuning = &session.tuning.hazards;
    let radius = tuning.radius;
    let (speed_min, speed_max) = (tuning.speed_min, tuning.speed_max);
    let width = session.arena().width;

    let x = session.rng.random::<f32>() * width;
    let speed = session.rng.random_range(speed_min..=speed_max);
    let id = session.spawn_hazard(Vec2::new(x, -radius), Vec2::new(0.0, speed));
    log::trace!("Rock {id} spawned at x={x:.0}, speed {speed:.2}");
}
