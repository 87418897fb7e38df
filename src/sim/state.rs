//! Session state and entity records
//!
//! Entities are plain data; the renderer reads them through
//! [`Session::snapshot`](super::snapshot) and never mutates them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::enemy::Enemy;
use super::knockback::Knockback;
use super::meter::LightMeter;
use crate::tuning::Tuning;

/// Session lifecycle. `Won` and `Lost` are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Playing,
    Won,
    Lost,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionPhase::Playing)
    }
}

/// One-shot notifications for audio/UI, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PollenCollected { pollen_id: u32, at: Vec2 },
    BeaconLit { beacon_id: u32 },
    EnemyHit { enemy_id: u32, push: Vec2 },
    HazardHit { hazard_id: u32 },
    SessionWon,
    SessionLost,
}

/// The firefly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Movement displacement per frame unit, from input
    pub vel: Vec2,
    pub knockback: Knockback,
    pub light: LightMeter,
    pub radius: f32,
    pub invulnerable: bool,
    /// Frames of invulnerability left
    pub invulnerable_remaining: f32,
    /// Blink state while invulnerable
    pub visible: bool,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            knockback: Knockback::new(tuning.knockback_friction),
            light: LightMeter::new(tuning.start_light),
            radius: tuning.player_radius,
            invulnerable: false,
            invulnerable_remaining: 0.0,
            visible: true,
        }
    }

    /// Enemy and hazard contact only counts while this is true
    #[inline]
    pub fn can_be_hit(&self) -> bool {
        !self.invulnerable
    }

    /// Start an invulnerability window of `duration` frames
    pub fn start_invulnerability(&mut self, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        self.invulnerable = true;
        self.invulnerable_remaining = duration;
        self.visible = true;
    }

    /// Run down the invulnerability window, toggling visibility every `blink_interval` frames
    pub fn tick_invulnerability(&mut self, dt: f32, duration: f32, blink_interval: f32) {
        if !self.invulnerable {
            return;
        }
        self.invulnerable_remaining -= dt;
        if self.invulnerable_remaining <= 0.0 {
            self.invulnerable = false;
            self.invulnerable_remaining = 0.0;
            self.visible = true;
            return;
        }
        if blink_interval > 0.0 {
            let toggles = ((duration - self.invulnerable_remaining) / blink_interval).floor() as u32;
            self.visible = toggles % 2 == 0;
        }
    }
}

/// A respawning light pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pollen {
    pub id: u32,
    pub pos: Vec2,
}

/// A flower that lights once and stays lit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beacon {
    pub id: u32,
    pub pos: Vec2,
    pub lit: bool,
}

impl Beacon {
    /// Light the beacon; returns false if it was already lit
    pub fn light(&mut self) -> bool {
        if self.lit {
            return false;
        }
        self.lit = true;
        true
    }
}

/// A falling rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub player: Player,
    /// Creation order, which is also hit-resolution order
    pub enemies: Vec<Enemy>,
    pub pollen: Vec<Pollen>,
    pub beacons: Vec<Beacon>,
    pub hazards: Vec<Hazard>,
    /// Frames until the next rock spawn
    pub hazard_timer: f32,
    /// Red overlay strength after a hit (0 = none)
    pub hit_flash: f32,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl Session {
    /// A session with no enemies, pollen or flowers
    ///
    /// With nothing left to light it is won on its first tick; spawn a flower to keep it going.
    pub fn empty(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        let player = Player::new(tuning.arena.center(), &tuning);
        let hazard_timer = tuning.hazards.spawn_interval;
        Self {
            seed,
            tuning,
            phase: SessionPhase::Playing,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            pollen: Vec::new(),
            beacons: Vec::new(),
            hazards: Vec::new(),
            hazard_timer,
            hit_flash: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// A fully populated session
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut session = Self::empty(seed, tuning);
        let arena = session.tuning.arena;

        let beacon_positions = session.tuning.beacon_positions.clone();
        for (x, y) in beacon_positions {
            session.spawn_beacon(Vec2::new(x, y));
        }
        for _ in 0..session.tuning.pollen_count {
            let pos = arena.random_point(&mut session.rng);
            session.spawn_pollen(pos);
        }
        for _ in 0..session.tuning.enemy_count {
            let pos = arena.random_point(&mut session.rng);
            session.spawn_enemy(pos);
        }

        log::info!(
            "Session started (seed {}): {} enemies, {} pollen, {} flowers",
            seed,
            session.enemies.len(),
            session.pollen.len(),
            session.beacons.len()
        );
        session
    }

    /// A populated session with an entropy-derived seed
    pub fn random(tuning: Tuning) -> Self {
        Self::new(rand::random(), tuning)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn arena(&self) -> Arena {
        self.tuning.arena
    }

    pub fn spawn_enemy(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let enemy = Enemy::new(
            id,
            pos,
            self.tuning.enemy_speed,
            self.tuning.enemy_detection_radius,
            &self.tuning.arena,
            &self.tuning.steering,
            &mut self.rng,
        );
        self.enemies.push(enemy);
        id
    }

    pub fn spawn_pollen(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.pollen.push(Pollen { id, pos });
        id
    }

    pub fn spawn_beacon(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.beacons.push(Beacon { id, pos, lit: false });
        id
    }

    pub fn spawn_hazard(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        let damage = self.tuning.hazards.damage;
        self.hazards.push(Hazard { id, pos, vel, damage });
        id
    }

    /// True when no flower is left unlit (including when there are none)
    pub fn all_beacons_lit(&self) -> bool {
        self.beacons.iter().all(|b| b.lit)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events produced since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply terminal conditions; an empty meter beats a completed set of flowers
    pub fn evaluate_phase(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        if self.player.light.is_empty() {
            self.phase = SessionPhase::Lost;
            self.emit(GameEvent::SessionLost);
            log::info!("Session lost after {} ticks", self.time_ticks);
        } else if self.all_beacons_lit() {
            self.phase = SessionPhase::Won;
            self.emit(GameEvent::SessionWon);
            log::info!(
                "Session won after {} ticks with {:.1} light left",
                self.time_ticks,
                self.player.light.value()
            );
        }
    }
}
