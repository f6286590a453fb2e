//! Scene settings
//!
//! Every tunable of the chase scene. Defaults are the reference values the
//! page was tuned with; a host may override any of them with a JSON document.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Tunable scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    // === Viewport ===
    /// Margin kept free on every side (px)
    pub padding: f32,

    // === Pursuit ===
    /// Chaser speed (px/ms)
    pub chase_speed: f32,
    /// Heading jitter rate (per ms)
    pub jitter_rate: f32,
    /// Runner distance ahead of the chaser (px)
    pub runner_gap: f32,
    /// Runner offset to the right of the chaser at start (px)
    pub runner_start_offset: f32,
    /// Heading at start (normalized on use)
    pub initial_heading: (f32, f32),

    // === Snowballs ===
    /// Snowball speed (px/ms)
    pub projectile_speed: f32,
    /// Lower bound of the ttl draw (ms, inclusive)
    pub ttl_min: f32,
    /// Upper bound of the ttl draw (ms, exclusive)
    pub ttl_max: f32,
    /// Collision distance (px)
    pub hit_radius: f32,
    /// Throwing hand offset right of the head box (px)
    pub hand_offset_x: f32,
    /// Throwing hand height as a fraction of the head box
    pub hand_offset_y_ratio: f32,

    // === Reactions ===
    /// Hit badge duration (ms)
    pub reaction_ms: f64,

    // === Timing ===
    /// Upper clamp for frame deltas (ms)
    pub max_frame_dt: f32,
    /// Fixed RNG seed; the host clock seeds the scene when absent
    pub seed: Option<u64>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            padding: PADDING,

            chase_speed: CHASE_SPEED,
            jitter_rate: JITTER_RATE,
            runner_gap: RUNNER_GAP,
            runner_start_offset: RUNNER_START_OFFSET,
            initial_heading: INITIAL_HEADING,

            projectile_speed: PROJECTILE_SPEED,
            ttl_min: PROJECTILE_TTL_MIN,
            ttl_max: PROJECTILE_TTL_MAX,
            hit_radius: HIT_RADIUS,
            hand_offset_x: HAND_OFFSET_X,
            hand_offset_y_ratio: HAND_OFFSET_Y_RATIO,

            reaction_ms: REACTION_MS,

            max_frame_dt: MAX_FRAME_DT,
            seed: None,
        }
    }
}

impl SceneSettings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with (NaN fails every check)
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });

        if !(self.padding >= 0.0) {
            return invalid("padding", "must be zero or positive");
        }
        if !(self.chase_speed > 0.0) {
            return invalid("chase_speed", "must be positive");
        }
        if !(self.jitter_rate >= 0.0) {
            return invalid("jitter_rate", "must be zero or positive");
        }
        if !(self.projectile_speed > 0.0) {
            return invalid("projectile_speed", "must be positive");
        }
        if !(self.ttl_min >= 0.0 && self.ttl_min < self.ttl_max) {
            return invalid("ttl_min", "ttl range must be non-empty and non-negative");
        }
        if !(self.hit_radius > 0.0) {
            return invalid("hit_radius", "must be positive");
        }
        if !(self.reaction_ms >= 0.0) {
            return invalid("reaction_ms", "must be zero or positive");
        }
        if !(self.max_frame_dt > 0.0) {
            return invalid("max_frame_dt", "must be positive");
        }
        Ok(())
    }

    /// Squared hit radius used by the collision check
    pub fn hit_radius_sq(&self) -> f32 {
        self.hit_radius * self.hit_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SceneSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.padding, 60.0);
        assert_eq!(settings.hit_radius_sq(), 1600.0);
        assert_eq!(settings.reaction_ms, 700.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = SceneSettings::from_json(r#"{ "padding": 20.0, "seed": 7 }"#)
            .expect("valid settings");
        assert_eq!(settings.padding, 20.0);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.chase_speed, CHASE_SPEED);
        assert_eq!(settings.ttl_max, PROJECTILE_TTL_MAX);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = SceneSettings {
            seed: Some(42),
            ..Default::default()
        };
        let json = settings.to_json().expect("serializable");
        assert_eq!(SceneSettings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_invalid_ttl_range_rejected() {
        let err = SceneSettings::from_json(r#"{ "ttl_min": 3000.0, "ttl_max": 2000.0 }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "ttl_min", .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = SceneSettings::from_json("{ padding: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_nan_speed_rejected() {
        let settings = SceneSettings {
            chase_speed: f32::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
