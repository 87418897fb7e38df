//! Keyboard state to movement direction
//!
//! Front ends record which movement keys are held and turn that into the
//! normalized direction a [`TickInput`] carries. Nothing here touches the
//! simulation.

use glam::Vec2;

use crate::sim::TickInput;

/// A movement key, independent of layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

impl MoveKey {
    /// Map a DOM-style key code (`"ArrowUp"`, `"KeyW"`, ...) to a movement key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(MoveKey::Up),
            "ArrowDown" | "KeyS" => Some(MoveKey::Down),
            "ArrowLeft" | "KeyA" => Some(MoveKey::Left),
            "ArrowRight" | "KeyD" => Some(MoveKey::Right),
            _ => None,
        }
    }
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn set(&mut self, key: MoveKey, held: bool) {
        match key {
            MoveKey::Up => self.up = held,
            MoveKey::Down => self.down = held,
            MoveKey::Left => self.left = held,
            MoveKey::Right => self.right = held,
        }
    }

    /// Key-down event by code; unknown codes are ignored
    pub fn press(&mut self, code: &str) {
        if let Some(key) = MoveKey::from_code(code) {
            self.set(key, true);
        }
    }

    /// Key-up event by code; unknown codes are ignored
    pub fn release(&mut self, code: &str) {
        if let Some(key) = MoveKey::from_code(code) {
            self.set(key, false);
        }
    }

    /// Unit direction (screen space, y down), zero when idle
    ///
    /// Opposite keys cancel out.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down)).normalize_or_zero()
    }

    pub fn to_tick_input(&self) -> TickInput {
        TickInput::new(self.direction())
    }
}
