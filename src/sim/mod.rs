//! Simulation module
//!
//! All gameplay logic lives here. The rules this module keeps:
//! - One synchronous tick per frame, scaled by the frame delta
//! - Randomness only from the session's seeded RNG
//! - Stable iteration order (creation order, by entity ID)
//! - No rendering or platform dependencies

pub mod arena;
pub mod enemy;
pub mod hazard;
pub mod interaction;
pub mod knockback;
pub mod meter;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use enemy::{Behavior, Enemy, Steering};
pub use knockback::Knockback;
pub use meter::LightMeter;
pub use snapshot::Snapshot;
pub use state::{Beacon, GameEvent, Hazard, Player, Pollen, Session, SessionPhase};
pub use tick::{TickInput, tick};
