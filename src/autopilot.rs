//! Scripted firefly for demos and soak runs
//!
//! Heads for the nearest unlit flower when charged enough to light it,
//! otherwise for the nearest pollen, and veers away from monsters that get
//! close.

use glam::Vec2;

use crate::sim::{Session, TickInput};

/// Monsters closer than this push the autopilot away
const AVOID_RADIUS: f32 = 90.0;
/// Weight of avoidance relative to the goal pull
const AVOID_WEIGHT: f32 = 1.5;

/// Pick this tick's input
pub fn steer(session: &Session) -> TickInput {
    let pos = session.player.pos;
    let charged = session.player.light.value() >= session.tuning.beacon_charge_threshold;

    let flower = if charged {
        nearest(pos, session.beacons.iter().filter(|b| !b.lit).map(|b| b.pos))
    } else {
        None
    };
    let goal = flower.or_else(|| nearest(pos, session.pollen.iter().map(|p| p.pos)));

    let pull = goal.map_or(Vec2::ZERO, |g| (g - pos).normalize_or_zero());

    let avoid: Vec2 = session
        .enemies
        .iter()
        .filter_map(|e| {
            let away = pos - e.pos;
            let dist = away.length();
            (dist < AVOID_RADIUS).then(|| away.normalize_or_zero() * (1.0 - dist / AVOID_RADIUS))
        })
        .sum();

    TickInput::new((pull + avoid * AVOID_WEIGHT).normalize_or_zero())
}

fn nearest(from: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| {
        from.distance_squared(*a)
            .partial_cmp(&from.distance_squared(*b))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}
