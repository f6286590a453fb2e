//! Scene state and core simulation types
//!
//! Everything the frame loop mutates lives in `SimulationState`, owned by the
//! loop driver and passed by reference into each update.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anchor::AnchorId;
use crate::settings::SceneSettings;
use crate::{clamp, normalize_or_one};

/// Which actor something refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// Pursuer, bounces off the viewport edges
    Chaser,
    /// Pursued, kept ahead of the chaser
    Runner,
}

impl Target {
    /// Role name written to the actor sprite
    pub fn role(&self) -> &'static str {
        match self {
            Target::Chaser => "chaser",
            Target::Runner => "runner",
        }
    }
}

/// A pursuit actor (viewport coordinates, px)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
}

impl Actor {
    pub fn new(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y) }
    }
}

/// Usable region of the viewport: size minus padding on every side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Derive bounds from a viewport size.
    ///
    /// A viewport narrower than twice the padding collapses to a line at
    /// `padding` instead of producing an inverted range.
    pub fn from_viewport(size: Vec2, padding: f32) -> Self {
        let min = Vec2::splat(padding);
        let max = (size - Vec2::splat(padding)).max(min);
        Self { min, max }
    }

    /// Clamp a point into the bounds, each axis independently
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp(p.x, self.min.x, self.max.x),
            clamp(p.y, self.min.y, self.max.y),
        )
    }

    /// True if `p` lies inside the bounds, edges included
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// A snowball thrown from an anchor at one of the actors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Stable index into the scene's snowball set
    pub id: usize,
    pub pos: Vec2,
    /// Velocity (px/ms)
    pub vel: Vec2,
    /// Time since last launch (ms)
    pub age: f32,
    /// Age at which the snowball is relaunched without hitting (ms)
    pub ttl: f32,
    pub target: Target,
    /// Anchor this snowball is thrown from
    pub anchor: AnchorId,
    /// Where it was last launched from
    pub origin: Vec2,
}

impl Projectile {
    /// Placeholder kinematics; call `respawn` before the first tick
    pub fn new(id: usize, target: Target, anchor: AnchorId) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            age: 0.0,
            ttl: 0.0,
            target,
            anchor,
            origin: Vec2::ZERO,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.age > self.ttl
    }
}

/// Number of snowballs in the scene
pub const PROJECTILE_COUNT: usize = 3;

/// Target and anchor of each snowball, by id.
/// The primary anchor throws two of the three.
pub const PROJECTILE_ROSTER: [(Target, AnchorId); PROJECTILE_COUNT] = [
    (Target::Runner, AnchorId::Primary),
    (Target::Runner, AnchorId::Secondary),
    (Target::Chaser, AnchorId::Primary),
];

/// Something the simulation wants the outside world to know about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// A snowball reached its target
    Hit { projectile: usize, target: Target },
    /// A snowball outlived its ttl and was relaunched
    Expired { projectile: usize },
    /// A relaunch was skipped because the anchor is not mounted
    RespawnSkipped { projectile: usize },
}

/// Complete scene state for one run of the loop
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub settings: SceneSettings,
    /// Cached viewport size (px); bounds derive from it every tick
    pub viewport: Vec2,
    pub chaser: Actor,
    pub runner: Actor,
    /// Chaser heading, unit length
    pub heading: Vec2,
    /// Fixed snowball set, indexed by id
    pub projectiles: [Projectile; PROJECTILE_COUNT],
    /// Ticks since start
    pub ticks: u64,
    pub rng: Pcg32,
}

impl SimulationState {
    /// Fresh scene: chaser at the left edge, vertically centered, runner to its right
    pub fn new(settings: SceneSettings, viewport: Vec2, seed: u64) -> Self {
        let y = viewport.y * 0.5;
        let chaser = Actor::new(settings.padding, y);
        let runner = Actor::new(settings.padding + settings.runner_start_offset, y);
        let (hx, hy) = settings.initial_heading;

        Self {
            heading: normalize_or_one(Vec2::new(hx, hy)),
            projectiles: std::array::from_fn(|id| {
                let (target, anchor) = PROJECTILE_ROSTER[id];
                Projectile::new(id, target, anchor)
            }),
            settings,
            viewport,
            chaser,
            runner,
            ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Current bounds from the cached viewport size
    pub fn bounds(&self) -> Bounds {
        Bounds::from_viewport(self.viewport, self.settings.padding)
    }

    /// Cache a new viewport size; applied on the next tick
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn actor(&self, target: Target) -> &Actor {
        match target {
            Target::Chaser => &self.chaser,
            Target::Runner => &self.runner,
        }
    }
}
