//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{circle_distance, circle_hit};
pub use state::{
    DragGesture, Enemy, FireEvent, GameEvent, GamePhase, GameState, Projectile, Ship,
};
pub use tick::{TickInput, tick};
