//! Pursuit motion
//!
//! The chaser wanders along a slowly drifting heading and bounces off the
//! padded viewport edges. The runner is placed a fixed gap ahead of it.

use glam::Vec2;
use rand::Rng;

use super::state::{Bounds, SimulationState};
use crate::normalize_or_one;

/// Advance chaser heading and position by `dt` ms, then place the runner
pub fn advance_pursuit(state: &mut SimulationState, dt: f32) {
    let jitter = Vec2::new(
        state.rng.random_range(-0.5..0.5),
        state.rng.random_range(-0.5..0.5),
    );
    state.heading = jitter_heading(state.heading, jitter, state.settings.jitter_rate, dt);

    let bounds = state.bounds();
    let (pos, heading) = step_chaser(
        state.chaser.pos,
        state.heading,
        state.settings.chase_speed * dt,
        &bounds,
    );
    state.chaser.pos = pos;
    state.heading = heading;

    state.runner.pos = runner_position(pos, heading, state.settings.runner_gap, &bounds);
    debug_assert!(bounds.contains(state.chaser.pos) && bounds.contains(state.runner.pos));
}

/// Nudge a heading by `jitter` (each axis in [-0.5, 0.5)) scaled by rate and
/// dt, then renormalize
pub fn jitter_heading(heading: Vec2, jitter: Vec2, rate: f32, dt: f32) -> Vec2 {
    normalize_or_one(heading + jitter * rate * dt)
}

/// Move along `heading` by `distance`, bouncing off each axis independently.
/// Returns the new position and heading.
pub fn step_chaser(pos: Vec2, mut heading: Vec2, distance: f32, bounds: &Bounds) -> (Vec2, Vec2) {
    let moved = pos + heading * distance;
    let clamped = bounds.clamp(moved);

    if moved.x < bounds.min.x || moved.x > bounds.max.x {
        heading.x = -heading.x;
    }
    if moved.y < bounds.min.y || moved.y > bounds.max.y {
        heading.y = -heading.y;
    }

    (clamped, heading)
}

/// Runner sits `gap` px ahead of the chaser, clamped into bounds
pub fn runner_position(chaser: Vec2, heading: Vec2, gap: f32, bounds: &Bounds) -> Vec2 {
    bounds.clamp(chaser + heading * gap)
}
