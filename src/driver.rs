//! Frame loop driver
//!
//! Owns the simulation for one run of the scene and ties it to the host's
//! display refresh. Two phases only: `Idle` and `Running`. Every start builds
//! the scene from scratch; there is no pause/resume.

use crate::error::StartError;
use crate::platform::{FrameHandle, SceneHost, Sprite};
use crate::reaction::HitReaction;
use crate::settings::SceneSettings;
use crate::sim::{SceneEvent, SimulationState, Target, respawn_all, tick};

/// Lifecycle phase of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Idle,
    Running,
}

pub struct LoopDriver<H: SceneHost> {
    host: H,
    settings: SceneSettings,
    phase: DriverPhase,
    /// Present only while running
    state: Option<SimulationState>,
    reaction: HitReaction,
    /// Timestamp of the previous frame (ms)
    last_time: f64,
    pending_frame: Option<FrameHandle>,
}

impl<H: SceneHost> LoopDriver<H> {
    pub fn new(host: H, settings: SceneSettings) -> Self {
        let reaction = HitReaction::new(settings.reaction_ms);
        Self {
            host,
            settings,
            phase: DriverPhase::Idle,
            state: None,
            reaction,
            last_time: 0.0,
            pending_frame: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == DriverPhase::Running
    }

    /// Scene state of the current run
    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    /// Mutable scene state, for debug tooling
    pub fn state_mut(&mut self) -> Option<&mut SimulationState> {
        self.state.as_mut()
    }

    /// Actor currently showing a hit reaction
    pub fn reacting(&self) -> Option<Target> {
        self.reaction.current()
    }

    /// Build a fresh scene and start requesting frames.
    ///
    /// `now` is the host clock (ms) the first frame delta is measured from.
    /// Starting while running restarts from scratch.
    pub fn start(&mut self, now: f64) -> Result<(), StartError> {
        if self.is_running() {
            self.stop();
        }

        if !self.host.sprites_mounted() {
            log::debug!("Chase scene not started: sprites not mounted");
            return Err(StartError::Unmounted);
        }

        // The cache may predate a resize made while stopped
        self.host.watch_resize();
        let viewport = self.host.viewport_size();
        let seed = self.settings.seed.unwrap_or_else(|| now.to_bits());
        let mut state = SimulationState::new(self.settings.clone(), viewport, seed);
        respawn_all(&mut state, &self.host);

        self.reaction = HitReaction::new(self.settings.reaction_ms);
        self.host.show_reaction(None);

        self.state = Some(state);
        self.last_time = now;
        self.phase = DriverPhase::Running;
        self.render();
        self.pending_frame = self.host.request_frame();

        log::info!(
            "Chase scene started ({}x{}, seed {})",
            viewport.x,
            viewport.y,
            seed
        );
        Ok(())
    }

    /// Tear down: stop watching resizes and drop the pending frame.
    /// Safe to call at any time, including when already idle.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel_frame(handle);
        }
        if !self.is_running() {
            return;
        }

        self.host.unwatch_resize();
        self.state = None;
        if self.reaction.pending() > 0 {
            log::debug!("Dropping {} pending reaction clears", self.reaction.pending());
        }
        self.reaction.reset();
        self.host.show_reaction(None);
        self.phase = DriverPhase::Idle;

        log::info!("Chase scene stopped");
    }

    /// Display refresh callback. Advances the scene by the time since the
    /// previous frame, renders it and requests the next frame.
    pub fn frame(&mut self, now: f64) -> Vec<SceneEvent> {
        // This call consumes the pending request
        self.pending_frame = None;

        let Some(state) = self.state.as_mut() else {
            return Vec::new();
        };

        let dt = (now - self.last_time)
            .max(0.0)
            .min(f64::from(self.settings.max_frame_dt)) as f32;
        // Reaction deadlines never run backwards with the clock
        let clock = now.max(self.last_time);
        self.last_time = now;

        state.set_viewport(self.host.viewport_size());
        let events = tick(state, &self.host, dt);

        let mut reaction_changed = false;
        for event in &events {
            if let SceneEvent::Hit { target, .. } = *event {
                self.reaction.trigger(target, clock);
                reaction_changed = true;
            }
        }
        reaction_changed |= self.reaction.poll(clock);
        if reaction_changed {
            self.host.show_reaction(self.reaction.current());
        }

        self.render();
        self.pending_frame = self.host.request_frame();
        events
    }

    /// Fire due reaction clears outside of a frame (e.g. from a host timer)
    pub fn poll_reactions(&mut self, now: f64) {
        if self.reaction.poll(now) {
            self.host.show_reaction(self.reaction.current());
        }
    }

    /// Project the scene onto the host's sprites
    fn render(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };

        for actor in [Target::Chaser, Target::Runner] {
            self.host.set_role(actor, actor.role());
            self.host.place(Sprite::Actor(actor), state.actor(actor).pos);
        }
        for p in &state.projectiles {
            self.host.place(Sprite::Projectile(p.id), p.pos);
        }
    }
}

impl<H: SceneHost> Drop for LoopDriver<H> {
    fn drop(&mut self) {
        self.stop();
    }
}
