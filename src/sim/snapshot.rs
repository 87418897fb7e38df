//! Read-only view of a session for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::enemy::Behavior;
use super::state::{Session, SessionPhase};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    /// 0..=100
    pub light: f32,
    pub invulnerable: bool,
    /// False during the "off" half of a blink
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub behavior: Behavior,
    pub facing: Vec2,
    pub lunging: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BeaconView {
    pub id: u32,
    pub pos: Vec2,
    pub lit: bool,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: SessionPhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub pollen: Vec<Vec2>,
    pub beacons: Vec<BeaconView>,
    pub hazards: Vec<Vec2>,
    pub hit_flash: f32,
}

impl Session {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            player: PlayerView {
                pos: self.player.pos,
                light: self.player.light.value(),
                invulnerable: self.player.invulnerable,
                visible: self.player.visible,
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    behavior: e.behavior,
                    facing: e.facing,
                    lunging: e.lunging,
                })
                .collect(),
            pollen: self.pollen.iter().map(|p| p.pos).collect(),
            beacons: self
                .beacons
                .iter()
                .map(|b| BeaconView {
                    id: b.id,
                    pos: b.pos,
                    lit: b.lit,
                })
                .collect(),
            hazards: self.hazards.iter().map(|h| h.pos).collect(),
            hit_flash: self.hit_flash,
        }
    }
}
