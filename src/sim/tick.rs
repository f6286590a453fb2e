//! Per-frame simulation step
//!
//! Order matters: actors move first, so snowballs collide against the
//! positions rendered this frame.

use super::anchor::AnchorProvider;
use super::motion::advance_pursuit;
use super::projectile::tick_projectile;
use super::state::{SceneEvent, SimulationState};

/// Advance the scene by `dt` ms and report what happened
pub fn tick(state: &mut SimulationState, anchors: &dyn AnchorProvider, dt: f32) -> Vec<SceneEvent> {
    let mut events = Vec::new();
    state.ticks += 1;

    advance_pursuit(state, dt);

    for index in 0..state.projectiles.len() {
        tick_projectile(state, index, dt, anchors, &mut events);
    }

    events
}
