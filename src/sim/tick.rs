//! Per-frame simulation tick
//!
//! Composes the meter, interactions, knockback, enemy steering and the
//! session phase check, in that order, once per rendered frame.

use glam::Vec2;

use super::hazard;
use super::interaction;
use super::state::Session;
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Desired movement direction, magnitude at most 1 (zero when idle)
    pub direction: Vec2,
}

impl TickInput {
    pub fn new(direction: Vec2) -> Self {
        Self { direction }
    }

    /// Direction actually used: non-finite input is dropped, long input is shortened to 1
    pub fn sanitized_direction(&self) -> Vec2 {
        if self.direction.is_finite() {
            self.direction.clamp_length_max(1.0)
        } else {
            Vec2::ZERO
        }
    }
}

/// Advance the session by `dt` frame units
///
/// Does nothing once the session has been won or lost.
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if session.phase.is_terminal() {
        return;
    }
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };

    session.time_ticks += 1;

    // Movement intent
    session.player.vel = input.sanitized_direction() * session.tuning.player_speed;

    // Passive drain
    let decay_rate = session.tuning.light_decay_rate;
    session.player.light.decay(decay_rate, dt);

    interaction::resolve(session);

    // Integrate the firefly: input movement plus whatever knockback is left
    let arena = session.arena();
    let player = &mut session.player;
    let knockback = player.knockback.step();
    player.pos += player.vel * dt + knockback;
    player.pos = arena.clamp_inset(player.pos, player.radius);

    let duration = session.tuning.invulnerability_duration();
    let blink_interval = session.tuning.blink_interval;
    session
        .player
        .tick_invulnerability(dt, duration, blink_interval);

    session.hit_flash = (session.hit_flash - HIT_FLASH_DECAY * dt).max(0.0);

    // Enemies chase the firefly's post-move position
    let player_pos = Some(session.player.pos);
    let difficulty = session.tuning.difficulty;
    let Session {
        enemies,
        tuning,
        rng,
        ..
    } = session;
    for enemy in enemies.iter_mut() {
        enemy.update(player_pos, dt, difficulty, &tuning.arena, &tuning.steering, rng);
    }

    hazard::update(session, dt);

    session.evaluate_phase();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Behavior;
    use crate::sim::state::{GameEvent, SessionPhase};
    use crate::tuning::Tuning;

    fn quiet_tuning() -> Tuning {
        Tuning {
            light_decay_rate: 0.0,
            ..Default::default()
        }
    }

    /// No entities except one unlit flower tucked in a corner, so the session keeps playing
    fn unfinished(tuning: Tuning) -> Session {
        let mut session = Session::empty(1, tuning);
        session.spawn_beacon(Vec2::new(50.0, 550.0));
        session
    }

    #[test]
    fn test_idle_tick_drains_light() {
        let mut session = Session::empty(1, Tuning::default());
        session.spawn_beacon(Vec2::new(50.0, 50.0));
        tick(&mut session, &TickInput::default(), 2.0);
        assert!((session.player.light.value() - (100.0 - LIGHT_DECAY_RATE * 2.0)).abs() < 1e-4);
        assert_eq!(session.time_ticks, 1);
        assert_eq!(session.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_movement_scaled_by_speed_and_dt() {
        let mut session = unfinished(quiet_tuning());
        let start = session.player.pos;
        tick(&mut session, &TickInput::new(Vec2::new(0.0, -1.0)), 2.0);
        assert_eq!(session.player.pos, start + Vec2::new(0.0, -PLAYER_SPEED * 2.0));
    }

    #[test]
    fn test_oversized_input_is_shortened() {
        let mut session = unfinished(quiet_tuning());
        let start = session.player.pos;
        tick(&mut session, &TickInput::new(Vec2::new(3.0, 4.0)), 1.0);
        let moved = session.player.pos - start;
        assert!((moved.length() - PLAYER_SPEED).abs() < 1e-4);

        let nan = TickInput::new(Vec2::new(f32::NAN, 0.0));
        assert_eq!(nan.sanitized_direction(), Vec2::ZERO);
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let mut session = unfinished(quiet_tuning());
        session.player.pos = Vec2::new(12.0, 12.0);
        tick(&mut session, &TickInput::new(Vec2::new(-1.0, 0.0)), 1.0);
        assert_eq!(session.player.pos, Vec2::new(PLAYER_RADIUS, 12.0));
    }

    #[test]
    fn test_knockback_moves_player_and_settles() {
        let mut session = unfinished(quiet_tuning());
        let start = session.player.pos;
        session.player.knockback.apply_impulse(Vec2::X, KNOCKBACK_STRENGTH);

        tick(&mut session, &TickInput::default(), 1.0);
        assert_eq!(session.player.pos, start + Vec2::new(KNOCKBACK_STRENGTH, 0.0));

        for _ in 0..200 {
            tick(&mut session, &TickInput::default(), 1.0);
        }
        assert!(session.player.knockback.magnitude() < 1e-3);
        let travelled = session.player.pos.x - start.x;
        assert!((travelled - KNOCKBACK_STRENGTH / (1.0 - KNOCKBACK_FRICTION)).abs() < 0.05);
    }

    #[test]
    fn test_one_penalty_per_invulnerability_window() {
        let tuning = Tuning {
            light_decay_rate: 0.0,
            enemy_speed: 0.0,
            ..Default::default()
        };
        let mut session = unfinished(tuning);
        let enemy_pos = Vec2::new(400.0, 300.0);
        session.spawn_enemy(enemy_pos);

        let mut hit_ticks = Vec::new();
        for t in 1..=60 {
            // Keep the firefly glued to the monster
            session.player.pos = enemy_pos + Vec2::new(5.0, 0.0);
            session.player.knockback.vel = Vec2::ZERO;
            let before = session.player.light.value();
            tick(&mut session, &TickInput::default(), 1.0);
            if session.player.light.value() < before {
                hit_ticks.push(t);
            }
        }

        assert_eq!(hit_ticks, vec![1, 55]);
        assert_eq!(session.player.light.value(), 100.0 - 2.0 * ENEMY_LIGHT_PENALTY);
    }

    #[test]
    fn test_hit_flash_fades() {
        let mut session = unfinished(quiet_tuning());
        session.hit_flash = HIT_FLASH;
        tick(&mut session, &TickInput::default(), 1.0);
        assert!((session.hit_flash - (HIT_FLASH - HIT_FLASH_DECAY)).abs() < 1e-6);
        for _ in 0..10 {
            tick(&mut session, &TickInput::default(), 1.0);
        }
        assert_eq!(session.hit_flash, 0.0);
    }

    #[test]
    fn test_enemies_chase_after_player_moves() {
        let mut session = unfinished(quiet_tuning());
        session.player.pos = Vec2::new(400.0, 300.0);
        session.spawn_enemy(Vec2::new(400.0, 150.0));
        tick(&mut session, &TickInput::default(), 1.0);
        assert_eq!(session.enemies[0].behavior, Behavior::Pursuing);
        assert!(session.enemies[0].pos.y > 150.0);
    }

    #[test]
    fn test_win_then_frozen() {
        let mut session = Session::new(3, Tuning::default());
        session.enemies.clear();
        for beacon in &mut session.beacons {
            beacon.lit = true;
        }
        session.player.light.set(40.0);

        tick(&mut session, &TickInput::default(), 1.0);
        assert_eq!(session.phase, SessionPhase::Won);
        assert!(session.drain_events().contains(&GameEvent::SessionWon));

        let light = session.player.light.value();
        let pos = session.player.pos;
        let ticks = session.time_ticks;
        for _ in 0..10 {
            tick(&mut session, &TickInput::new(Vec2::X), 1.0);
        }
        assert_eq!(session.player.light.value(), light);
        assert_eq!(session.player.pos, pos);
        assert_eq!(session.time_ticks, ticks);
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_no_flowers_wins_at_once() {
        let mut session = Session::empty(1, quiet_tuning());
        assert!(session.beacons.is_empty());

        tick(&mut session, &TickInput::default(), 1.0);
        assert_eq!(session.phase, SessionPhase::Won);
        assert_eq!(session.drain_events(), vec![GameEvent::SessionWon]);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut session = unfinished(Tuning::default());
        let start = session.player.pos;
        tick(&mut session, &TickInput::new(Vec2::X), 100.0);
        assert_eq!(session.player.pos, start + Vec2::new(PLAYER_SPEED * MAX_FRAME_DT, 0.0));
        let drained = LIGHT_MAX - session.player.light.value();
        assert!((drained - LIGHT_DECAY_RATE * MAX_FRAME_DT).abs() < 1e-4);
    }

    #[test]
    fn test_decay_to_zero_loses() {
        let tuning = Tuning {
            light_decay_rate: 1.0,
            ..Default::default()
        };
        let mut session = Session::empty(1, tuning);
        session.spawn_beacon(Vec2::new(50.0, 50.0));
        session.player.light.set(0.5);

        tick(&mut session, &TickInput::default(), 1.0);
        assert_eq!(session.player.light.value(), 0.0);
        assert_eq!(session.phase, SessionPhase::Lost);
        assert_eq!(session.drain_events(), vec![GameEvent::SessionLost]);
    }

    #[test]
    fn test_last_beacon_with_empty_meter_loses() {
        // Lighting the final flower drains the meter to zero on the same tick
        let tuning = Tuning {
            light_decay_rate: 0.0,
            beacon_charge_threshold: 30.0,
            ..Default::default()
        };
        let mut session = Session::empty(1, tuning);
        session.spawn_beacon(session.player.pos + Vec2::new(5.0, 0.0));
        session.player.light.set(30.0);

        tick(&mut session, &TickInput::default(), 1.0);
        assert!(session.beacons[0].lit);
        assert_eq!(session.phase, SessionPhase::Lost);
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::new(99999, Tuning::default());
        let mut b = Session::new(99999, Tuning::default());
        let inputs = [
            TickInput::new(Vec2::X),
            TickInput::new(Vec2::new(0.6, 0.8)),
            TickInput::default(),
            TickInput::new(Vec2::NEG_Y),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input, FRAME_DT);
                tick(&mut b, input, FRAME_DT);
            }
        }

        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.player.light.value(), b.player.light.value());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
        }
    }
}
