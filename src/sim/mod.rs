//! Scene simulation module
//!
//! All scene logic lives here. This module must stay platform-free:
//! - Time only through the `dt` passed in
//! - Seeded RNG only
//! - Anchors only through `AnchorProvider`
//! - No rendering or DOM dependencies

pub mod anchor;
pub mod collision;
pub mod motion;
pub mod projectile;
pub mod state;
pub mod tick;

pub use anchor::{AnchorId, AnchorProvider, FixedAnchors, Rect, throw_origin};
pub use collision::check_hit;
pub use motion::advance_pursuit;
pub use projectile::{respawn, respawn_all, tick_projectile};
pub use state::{
    Actor, Bounds, PROJECTILE_COUNT, PROJECTILE_ROSTER, Projectile, SceneEvent, SimulationState,
    Target,
};
pub use tick::tick;
