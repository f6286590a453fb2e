//! Snowball vs actor collision
//!
//! Point against circle: a snowball hits when it is strictly closer than the
//! hit radius to its target's current position.

use glam::Vec2;

use crate::distance_squared;

/// True if `pos` lies strictly within the hit radius of `target`.
/// Takes the radius squared so the test needs no square root.
#[inline]
pub fn check_hit(pos: Vec2, target: Vec2, hit_radius_sq: f32) -> bool {
    distance_squared(pos, target) < hit_radius_sq
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SceneSettings;

    const RADIUS_SQ: f32 = 40.0 * 40.0;

    #[test]
    fn test_inside_radius_hits() {
        assert!(check_hit(Vec2::new(200.0, 100.0), Vec2::new(200.0, 100.0), RADIUS_SQ));
        assert!(check_hit(Vec2::new(230.0, 100.0), Vec2::new(200.0, 100.0), RADIUS_SQ));
    }

    #[test]
    fn test_boundary_is_a_miss() {
        // Exactly on the radius does not count
        assert!(!check_hit(Vec2::new(240.0, 100.0), Vec2::new(200.0, 100.0), RADIUS_SQ));
        assert!(!check_hit(Vec2::new(224.0, 132.0), Vec2::new(200.0, 100.0), RADIUS_SQ));
    }

    #[test]
    fn test_uses_configured_radius() {
        let settings = SceneSettings {
            hit_radius: 10.0,
            ..Default::default()
        };
        let target = Vec2::new(200.0, 100.0);
        assert!(check_hit(Vec2::new(209.0, 100.0), target, settings.hit_radius_sq()));
        assert!(!check_hit(Vec2::new(210.0, 100.0), target, settings.hit_radius_sq()));
    }

    #[test]
    fn test_far_is_a_miss() {
        assert!(!check_hit(Vec2::new(0.0, 0.0), Vec2::new(200.0, 100.0), RADIUS_SQ));
    }
}
