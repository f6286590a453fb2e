//! Snowball Chase - the animated scene behind a portfolio page
//!
//! A chaser drifts around the viewport, a runner stays ahead of it, and
//! snowballs are thrown at both from two anchor points on the page.
//!
//! Core modules:
//! - `sim`: Simulation (pursuit motion, snowball lifecycle, collisions)
//! - `reaction`: Hit reaction state with stale-clear protection
//! - `driver`: Frame loop lifecycle (start/stop/frame)
//! - `platform`: Host capabilities the driver runs against
//! - `settings`: Tunable scene configuration

pub mod driver;
pub mod error;
pub mod platform;
pub mod reaction;
pub mod settings;
pub mod sim;

pub use driver::{DriverPhase, LoopDriver};
pub use error::{SettingsError, StartError};
pub use reaction::{ClearToken, HitReaction};
pub use settings::SceneSettings;

use glam::Vec2;

/// Reference scene constants (defaults for `SceneSettings`)
pub mod consts {
    /// Margin kept free on every side of the viewport (px)
    pub const PADDING: f32 = 60.0;

    /// Chaser speed along its heading (px/ms)
    pub const CHASE_SPEED: f32 = 0.25;
    /// Heading jitter per ms, applied as uniform(-0.5, 0.5) * rate * dt
    pub const JITTER_RATE: f32 = 0.0006;
    /// Distance the runner keeps ahead of the chaser (px)
    pub const RUNNER_GAP: f32 = 140.0;
    /// Horizontal offset of the runner from the chaser at start (px)
    pub const RUNNER_START_OFFSET: f32 = 140.0;
    /// Heading at loop start, normalized before use
    pub const INITIAL_HEADING: (f32, f32) = (1.0, 0.12);

    /// Snowball speed (px/ms)
    pub const PROJECTILE_SPEED: f32 = 0.4;
    /// Snowball time-to-live range, [min, max) ms
    pub const PROJECTILE_TTL_MIN: f32 = 1800.0;
    pub const PROJECTILE_TTL_MAX: f32 = 2500.0;
    /// Distance under which a snowball hits its target (px)
    pub const HIT_RADIUS: f32 = 40.0;

    /// How long a hit reaction stays visible (ms)
    pub const REACTION_MS: f64 = 700.0;

    /// Throwing hand position relative to a head's bounding box
    pub const HAND_OFFSET_X: f32 = 14.0;
    pub const HAND_OFFSET_Y_RATIO: f32 = 0.55;

    /// Largest frame delta fed to the simulation (ms)
    pub const MAX_FRAME_DT: f32 = 100.0;
}

/// Clamp `value` into `[min, max]`; resolves to `max` if the range is inverted
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Normalize a vector, treating a zero length as 1 so the result is never NaN
#[inline]
pub fn normalize_or_one(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 0.0 { v / len } else { v }
}

/// Squared euclidean distance between two points
#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    let d = a - b;
    d.x * d.x + d.y * d.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_and_outside() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(12.0, 0.0, 10.0), 10.0);
        // Inverted range never panics
        assert_eq!(clamp(5.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_normalize_or_one() {
        let n = normalize_or_one(Vec2::new(3.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);

        let z = normalize_or_one(Vec2::ZERO);
        assert_eq!(z, Vec2::ZERO);
        assert!(z.is_finite());
    }

    #[test]
    fn test_distance_squared() {
        assert_eq!(distance_squared(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0)), 25.0);
    }
}
