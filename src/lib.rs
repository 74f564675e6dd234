//! Recoil - a drag-to-fire arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: Canvas 2D rendering (wasm only)

pub mod renderer;
pub mod sim;

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// Drawing surface dimensions (fixed canvas, no resizing contract)
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 600.0;

    /// Minimum drag length (px) for a release to fire
    pub const FIRE_THRESHOLD: f32 = 10.0;
    /// Initial projectile life budget (ms)
    pub const PROJECTILE_LIFE_MS: f32 = 5000.0;
    /// Time after firing (ms) before a projectile can harm its own ship
    pub const FIRE_GRACE_MS: f32 = 500.0;
    /// Drag length is squared then divided by this to get the speed multiplier
    pub const DRAG_SPEED_SCALE: f32 = 100_000.0;
    /// Speed multiplier bounds (long drags saturate, short ones still move)
    pub const SPEED_MULT_MIN: f32 = 0.2;
    pub const SPEED_MULT_MAX: f32 = 2.0;

    /// Ship drift damping (velocity units to px/ms)
    pub const SHIP_DAMPING: f32 = 0.1;
    pub const SHIP_RADIUS: f32 = 10.0;

    pub const ENEMY_RADIUS: f32 = 20.0;
    /// One enemy spawns per this much sim time (ms)
    pub const ENEMY_SPAWN_INTERVAL_MS: f32 = 1000.0;

    /// Number of debris fragments drawn after the ship dies
    pub const DEBRIS_PIECES: usize = 10;
}

/// Wrap a position toroidally into `[0, width) x [0, height)`
///
/// Exiting one edge re-enters the opposite one. Handles displacements larger
/// than one screen.
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, width), wrap_axis(pos.y, height))
}

/// `rem_euclid` can round up to exactly `limit` for tiny negative inputs
#[inline]
fn wrap_axis(v: f32, limit: f32) -> f32 {
    let wrapped = v.rem_euclid(limit);
    if wrapped >= limit { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_positions_in_bounds() {
        let wrapped = wrap_position(Vec2::new(-5.0, 605.0), 800.0, 600.0);
        assert_eq!(wrapped, Vec2::new(795.0, 5.0));
    }

    #[test]
    fn wrap_is_identity_inside_bounds() {
        let pos = Vec2::new(123.0, 456.0);
        assert_eq!(wrap_position(pos, 800.0, 600.0), pos);
    }

    #[test]
    fn wrap_handles_multi_screen_displacement() {
        let wrapped = wrap_position(Vec2::new(1650.0, -1205.0), 800.0, 600.0);
        assert_eq!(wrapped, Vec2::new(50.0, 595.0));
    }
}
