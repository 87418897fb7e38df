//! Firefly contact resolution
//!
//! One pass per tick over every entity category, in a fixed order:
//! pollen, flowers, enemies, rocks. All checks are plain center-distance
//! tests against a per-category contact radius.

use glam::Vec2;

use super::state::{GameEvent, Session};
use crate::consts::HIT_FLASH;
use crate::direction_or_fallback;

/// Strict center-distance contact test
#[inline]
pub fn touching(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Run every contact check for this tick
pub fn resolve(session: &mut Session) {
    collect_pollen(session);
    light_beacons(session);
    if !check_enemy_contact(session) {
        check_hazard_contact(session);
    }
}

/// Pollen under the firefly adds light and respawns elsewhere
///
/// Each pollen is tested once, against where it sits when its turn comes.
pub fn collect_pollen(session: &mut Session) -> usize {
    let arena = session.arena();
    let radius = session.tuning.pollen_radius;
    let value = session.tuning.pollen_value;
    let Session {
        player, pollen, rng, ..
    } = session;

    let mut collected = Vec::new();
    for p in pollen.iter_mut() {
        if touching(player.pos, p.pos, radius) {
            player.light.gain(value);
            collected.push(GameEvent::PollenCollected {
                pollen_id: p.id,
                at: p.pos,
            });
            p.pos = arena.random_point(rng);
        }
    }

    let count = collected.len();
    for event in collected {
        log::debug!("{event:?}");
        session.emit(event);
    }
    count
}

/// Unlit flowers within reach light up if the firefly is charged enough
pub fn light_beacons(session: &mut Session) -> usize {
    let radius = session.tuning.beacon_radius;
    let threshold = session.tuning.beacon_charge_threshold;
    let cost = session.tuning.beacon_cost;
    let Session {
        player, beacons, ..
    } = session;

    let mut lit = Vec::new();
    for beacon in beacons.iter_mut().filter(|b| !b.lit) {
        if touching(player.pos, beacon.pos, radius)
            && player.light.value() >= threshold
            && beacon.light()
        {
            player.light.lose(cost);
            lit.push(GameEvent::BeaconLit {
                beacon_id: beacon.id,
            });
        }
    }

    let count = lit.len();
    for event in lit {
        log::debug!("{event:?}");
        session.emit(event);
    }
    count
}

/// First enemy in creation order touching a hittable firefly lands a hit
///
/// Returns true if a hit was applied.
pub fn check_enemy_contact(session: &mut Session) -> bool {
    if !session.player.can_be_hit() {
        return false;
    }
    let radius = session.tuning.enemy_radius;
    let player_pos = session.player.pos;
    let Some((enemy_id, enemy_pos)) = session
        .enemies
        .iter()
        .find(|e| touching(player_pos, e.pos, radius))
        .map(|e| (e.id, e.pos))
    else {
        return false;
    };

    let penalty = session.tuning.enemy_penalty;
    let push = apply_hit(session, enemy_pos, penalty);
    let event = GameEvent::EnemyHit { enemy_id, push };
    log::debug!("{event:?}, light now {:.1}", session.player.light.value());
    session.emit(event);
    true
}

/// First rock touching a hittable firefly lands a hit and shatters
///
/// Returns true if a hit was applied.
pub fn check_hazard_contact(session: &mut Session) -> bool {
    if !session.player.can_be_hit() {
        return false;
    }
    let radius = session.tuning.hazards.radius;
    let player_pos = session.player.pos;
    let Some(index) = session
        .hazards
        .iter()
        .position(|h| touching(player_pos, h.pos, radius))
    else {
        return false;
    };

    let hazard = session.hazards.remove(index);
    apply_hit(session, hazard.pos, hazard.damage);
    let event = GameEvent::HazardHit {
        hazard_id: hazard.id,
    };
    log::debug!("{event:?}, light now {:.1}", session.player.light.value());
    session.emit(event);
    true
}

/// Drain light, start invulnerability, and push the firefly away from `source`
///
/// Returns the push direction.
fn apply_hit(session: &mut Session, source: Vec2, damage: f32) -> Vec2 {
    let duration = session.tuning.invulnerability_duration();
    let strength = session.tuning.knockback_strength;
    let player = &mut session.player;

    player.light.lose(damage);
    player.start_invulnerability(duration);
    let push = direction_or_fallback(player.pos - source);
    player.knockback.apply_impulse(push, strength);
    session.hit_flash = HIT_FLASH;
    push
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::tuning::Tuning;

    fn session_at(pos: Vec2) -> Session {
        let mut session = Session::empty(4242, Tuning::default());
        session.player.pos = pos;
        session
    }

    #[test]
    fn test_touching_is_strict() {
        assert!(touching(Vec2::ZERO, Vec2::new(14.9, 0.0), 15.0));
        assert!(!touching(Vec2::ZERO, Vec2::new(15.0, 0.0), 15.0));
    }

    #[test]
    fn test_pollen_adds_light_and_relocates() {
        let mut session = session_at(Vec2::new(400.0, 300.0));
        session.tuning.pollen_radius = 20.0;
        session.player.light.set(50.0);
        let id = session.spawn_pollen(Vec2::new(405.0, 300.0));

        assert_eq!(collect_pollen(&mut session), 1);
        assert_eq!(session.player.light.value(), 68.0);
        assert!(session.arena().contains(session.pollen[0].pos));
        assert!(matches!(
            session.events(),
            [GameEvent::PollenCollected { pollen_id, .. }] if *pollen_id == id
        ));
    }

    #[test]
    fn test_pollen_caps_light() {
        let mut session = session_at(Vec2::new(400.0, 300.0));
        session.spawn_pollen(Vec2::new(401.0, 300.0));
        collect_pollen(&mut session);
        assert_eq!(session.player.light.value(), LIGHT_MAX);
    }

    #[test]
    fn test_distant_pollen_untouched() {
        let mut session = session_at(Vec2::new(400.0, 300.0));
        session.spawn_pollen(Vec2::new(500.0, 300.0));
        assert_eq!(collect_pollen(&mut session), 0);
        assert_eq!(session.pollen[0].pos, Vec2::new(500.0, 300.0));
    }

    #[test]
    fn test_beacon_lights_when_charged() {
        let mut session = session_at(Vec2::new(100.0, 150.0));
        session.player.light.set(95.0);
        let id = session.spawn_beacon(Vec2::new(110.0, 150.0));

        assert_eq!(light_beacons(&mut session), 1);
        assert!(session.beacons[0].lit);
        assert_eq!(session.player.light.value(), 65.0);
        assert_eq!(session.events(), &[GameEvent::BeaconLit { beacon_id: id }]);
    }

    #[test]
    fn test_beacon_needs_threshold() {
        let mut session = session_at(Vec2::new(100.0, 150.0));
        session.player.light.set(89.999);
        session.spawn_beacon(Vec2::new(110.0, 150.0));

        assert_eq!(light_beacons(&mut session), 0);
        assert!(!session.beacons[0].lit);
        assert_eq!(session.player.light.value(), 89.999);
    }

    #[test]
    fn test_lit_beacon_costs_nothing() {
        let mut session = session_at(Vec2::new(100.0, 150.0));
        session.player.light.set(100.0);
        session.spawn_beacon(Vec2::new(110.0, 150.0));
        session.beacons[0].lit = true;

        assert_eq!(light_beacons(&mut session), 0);
        assert_eq!(session.player.light.value(), 100.0);
    }

    #[test]
    fn test_one_charge_lights_one_beacon_at_a_time() {
        // Two flowers in reach; the second fails once the first drains below threshold
        let mut session = session_at(Vec2::new(100.0, 150.0));
        session.player.light.set(100.0);
        session.spawn_beacon(Vec2::new(105.0, 150.0));
        session.spawn_beacon(Vec2::new(95.0, 150.0));

        assert_eq!(light_beacons(&mut session), 1);
        assert!(session.beacons[0].lit);
        assert!(!session.beacons[1].lit);
        assert_eq!(session.player.light.value(), 70.0);
    }

    #[test]
    fn test_enemy_hit_applies_penalty_knockback_and_invulnerability() {
        let mut session = session_at(Vec2::new(400.0, 300.0));
        let id = session.spawn_enemy(Vec2::new(390.0, 300.0));

        assert!(check_enemy_contact(&mut session));
        assert_eq!(session.player.light.value(), LIGHT_MAX - ENEMY_LIGHT_PENALTY);
        assert!(session.player.invulnerable);
        assert_eq!(session.player.invulnerable_remaining, 54.0);
        assert_eq!(session.player.knockback.vel, Vec2::new(KNOCKBACK_STRENGTH, 0.0));
        assert_eq!(session.hit_flash, HIT_FLASH);
        assert_eq!(
            session.events(),
            &[GameEvent::EnemyHit {
                enemy_id: id,
                push: Vec2::X
            }]
        );
    }

    #[test]
    fn test_first_enemy_in_order_wins_tie() {
        let mut session = session_at(Vec2::new(400.0, 300.0));
        // The second enemy is closer, but the first was created first
        let first = session.spawn_enemy(Vec2::new(400.0, 320.0));
        session.spawn_enemy(Vec2::new(401.0, 300.0));

        assert!(check_enemy_contact(&mut session));
        assert_eq!(session.player.light.value(), LIGHT_MAX - ENEMY_LIGHT_PENALTY);
        assert_eq!(session.events().len(), 1);
        assert!(matches!(
            session.events()[0],
            GameEvent::EnemyHit { enemy_id, push } if enemy_id == first && push == Vec2::new(0.0, -1.0)
        ));
    }

    #[test]
    fn test_invulnerable_player_takes_no_damage() {
        let mut session = session_at(Vec2::new(400.0, 300.0));
        session.spawn_enemy(Vec2::new(410.0, 300.0));

        assert!(check_enemy_contact(&mut session));
        let after_first = session.player.light.value();
        for _ in 0..10 {
            assert!(!check_enemy_contact(&mut session));
        }
        assert_eq!(session.player.light.value(), after_first);
    }

    #[test]
    fn test_stacked_enemy_pushes_with_fallback() {
        let mut session = session_at(Vec2::new(400.0, 300.0));
        session.spawn_enemy(Vec2::new(400.0, 300.0));
        check_enemy_contact(&mut session);
        assert_eq!(session.player.knockback.vel, Vec2::X * KNOCKBACK_STRENGTH);
    }

    #[test]
    fn test_hazard_hit_consumes_rock() {
        let mut session = session_at(Vec2::new(400.0, 300.0));
        let id = session.spawn_hazard(Vec2::new(400.0, 290.0), Vec2::new(0.0, 3.0));

        assert!(check_hazard_contact(&mut session));
        assert!(session.hazards.is_empty());
        assert_eq!(session.player.light.value(), LIGHT_MAX - HAZARD_DAMAGE);
        assert!(session.player.invulnerable);
        assert_eq!(session.player.knockback.vel, Vec2::Y * KNOCKBACK_STRENGTH);
        assert_eq!(session.events(), &[GameEvent::HazardHit { hazard_id: id }]);
    }

    #[test]
    fn test_resolve_allows_one_hit_per_tick() {
        let mut session = session_at(Vec2::new(400.0, 300.0));
        session.spawn_enemy(Vec2::new(410.0, 300.0));
        session.spawn_hazard(Vec2::new(400.0, 295.0), Vec2::ZERO);

        resolve(&mut session);
        assert_eq!(session.player.light.value(), LIGHT_MAX - ENEMY_LIGHT_PENALTY);
        assert_eq!(session.hazards.len(), 1);
    }
}
