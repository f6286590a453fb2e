//! Error types
//!
//! The scene has no user-visible error state. These only surface to the
//! embedding host so it can log why something was refused.

use thiserror::Error;

/// Loading or validating `SceneSettings` failed
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse scene settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scene setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// The loop driver declined to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// Actor or snowball sprites are not mounted
    #[error("scene sprites are not mounted")]
    Unmounted,
}
