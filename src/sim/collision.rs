//! Circle-circle collision checks
//!
//! Everything in this game is a point or a circle, so overlap is a plain
//! Euclidean distance comparison. Collisions are not swept: a fast projectile
//! can tunnel through an enemy between frames. That is an accepted limitation
//! of the per-frame model, not something to paper over here.

use glam::Vec2;

/// Euclidean distance between two centers
#[inline]
pub fn circle_distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// True if a point lies within `radius` of a circle's center
#[inline]
pub fn circle_hit(point: Vec2, center: Vec2, radius: f32) -> bool {
    circle_distance(point, center) < radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_inside_radius() {
        assert!(circle_hit(
            Vec2::new(105.0, 100.0),
            Vec2::new(100.0, 100.0),
            10.0
        ));
    }

    #[test]
    fn miss_outside_radius() {
        assert!(!circle_hit(
            Vec2::new(130.0, 100.0),
            Vec2::new(100.0, 100.0),
            20.0
        ));
    }

    #[test]
    fn boundary_is_a_miss() {
        // Strict less-than: exactly on the rim does not count
        assert!(!circle_hit(
            Vec2::new(120.0, 100.0),
            Vec2::new(100.0, 100.0),
            20.0
        ));
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::ZERO;
        assert_eq!(circle_distance(a, b), 5.0);
        assert_eq!(circle_distance(b, a), 5.0);
    }
}
