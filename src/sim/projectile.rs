//! Snowball lifecycle
//!
//! Snowballs are fire-and-forget: on launch they are aimed at where their
//! target is at that moment and then fly straight, never re-aiming.

use rand::Rng;

use super::anchor::{AnchorProvider, throw_origin};
use super::collision::check_hit;
use super::state::{Projectile, SceneEvent, SimulationState};
use crate::normalize_or_one;

/// Relaunch snowball `index` from its anchor toward its target's current
/// position.
///
/// Returns `false` and leaves the snowball untouched when the anchor is not
/// mounted.
pub fn respawn(state: &mut SimulationState, index: usize, anchors: &dyn AnchorProvider) -> bool {
    let anchor = state.projectiles[index].anchor;
    let Some(head) = anchors.anchor_rect(anchor) else {
        log::debug!("Snowball {} respawn skipped: {:?} anchor not mounted", index, anchor);
        return false;
    };

    let settings = &state.settings;
    let origin = throw_origin(head, settings.hand_offset_x, settings.hand_offset_y_ratio);
    let target = state.actor(state.projectiles[index].target).pos;
    let vel = normalize_or_one(target - origin) * settings.projectile_speed;
    let ttl = if settings.ttl_min < settings.ttl_max {
        state.rng.random_range(settings.ttl_min..settings.ttl_max)
    } else {
        settings.ttl_min
    };

    let p = &mut state.projectiles[index];
    p.origin = origin;
    p.pos = origin;
    p.vel = vel;
    p.age = 0.0;
    p.ttl = ttl;
    true
}

/// Relaunch every snowball (loop start)
pub fn respawn_all(state: &mut SimulationState, anchors: &dyn AnchorProvider) {
    for index in 0..state.projectiles.len() {
        respawn(state, index, anchors);
    }
}

/// Age, move and collide snowball `index` for `dt` ms.
///
/// An expired snowball is relaunched and does not move this tick. A snowball
/// that reaches its target emits a hit and is relaunched immediately.
pub fn tick_projectile(
    state: &mut SimulationState,
    index: usize,
    dt: f32,
    anchors: &dyn AnchorProvider,
    events: &mut Vec<SceneEvent>,
) {
    let p = &mut state.projectiles[index];
    p.age += dt;
    if p.is_expired() {
        if respawn(state, index, anchors) {
            events.push(SceneEvent::Expired { projectile: index });
        } else {
            events.push(SceneEvent::RespawnSkipped { projectile: index });
        }
        return;
    }

    advance(p, dt);

    let p = &state.projectiles[index];
    let target = p.target;
    if check_hit(p.pos, state.actor(target).pos, state.settings.hit_radius_sq()) {
        log::debug!("Snowball {} hit the {}", index, target.role());
        events.push(SceneEvent::Hit {
            projectile: index,
            target,
        });
        if !respawn(state, index, anchors) {
            events.push(SceneEvent::RespawnSkipped { projectile: index });
        }
    }
}

/// Straight-line motion
#[inline]
fn advance(p: &mut Projectile, dt: f32) {
    p.pos += p.vel * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance_squared;
    use crate::settings::SceneSettings;
    use crate::sim::anchor::{AnchorId, FixedAnchors, Rect};
    use crate::sim::state::Target;
    use glam::Vec2;

    /// Head rect whose throwing hand lands exactly on `origin` (20x20 head)
    fn head_at(origin: Vec2) -> Rect {
        Rect::new(origin.x - 34.0, origin.y - 11.0, 20.0, 20.0)
    }

    fn anchors_at(origin: Vec2) -> FixedAnchors {
        FixedAnchors {
            primary: Some(head_at(origin)),
            secondary: Some(head_at(origin)),
        }
    }

    fn scene() -> SimulationState {
        SimulationState::new(SceneSettings::default(), Vec2::new(1000.0, 800.0), 99)
    }

    #[test]
    fn test_respawn_aims_at_target_with_configured_speed() {
        let mut state = scene();
        state.runner.pos = Vec2::new(200.0, 100.0);
        let anchors = anchors_at(Vec2::new(100.0, 100.0));

        assert!(respawn(&mut state, 0, &anchors));
        let p = &state.projectiles[0];
        assert_eq!(p.origin, Vec2::new(100.0, 100.0));
        assert_eq!(p.pos, p.origin);
        assert!((p.vel - Vec2::new(0.4, 0.0)).length() < 1e-6);
        assert_eq!(p.age, 0.0);
        assert!(p.ttl >= 1800.0 && p.ttl < 2500.0);
    }

    #[test]
    fn test_respawn_direction_is_exact_for_diagonal() {
        let mut state = scene();
        state.chaser.pos = Vec2::new(400.0, 500.0);
        let anchors = anchors_at(Vec2::new(100.0, 100.0));

        assert!(respawn(&mut state, 2, &anchors));
        let p = &state.projectiles[2];
        assert!((p.vel.length() - 0.4).abs() < 1e-6);
        // (300, 400) / 500 * 0.4
        assert!((p.vel - Vec2::new(0.24, 0.32)).length() < 1e-6);
    }

    #[test]
    fn test_respawn_skipped_without_anchor() {
        let mut state = scene();
        let anchors = FixedAnchors {
            primary: Some(head_at(Vec2::new(100.0, 100.0))),
            secondary: None,
        };
        state.projectiles[1].pos = Vec2::new(5.0, 6.0);
        state.projectiles[1].vel = Vec2::new(0.1, 0.2);
        state.projectiles[1].age = 321.0;
        let before = state.projectiles[1].clone();

        assert!(!respawn(&mut state, 1, &anchors));
        let after = &state.projectiles[1];
        assert_eq!(after.pos, before.pos);
        assert_eq!(after.vel, before.vel);
        assert_eq!(after.age, before.age);
        assert_eq!(after.anchor, AnchorId::Secondary);
    }

    #[test]
    fn test_degenerate_aim_stays_finite() {
        let mut state = scene();
        state.runner.pos = Vec2::new(100.0, 100.0);
        let anchors = anchors_at(Vec2::new(100.0, 100.0));

        assert!(respawn(&mut state, 0, &anchors));
        let p = &state.projectiles[0];
        assert!(p.vel.is_finite());
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_expired_snowball_respawns_without_moving() {
        let mut state = scene();
        let anchors = anchors_at(Vec2::new(100.0, 100.0));
        respawn_all(&mut state, &anchors);
        state.projectiles[0].ttl = 1000.0;
        state.projectiles[0].age = 990.0;
        state.projectiles[0].pos = Vec2::new(500.0, 500.0);

        let mut events = Vec::new();
        tick_projectile(&mut state, 0, 16.0, &anchors, &mut events);

        let p = &state.projectiles[0];
        assert_eq!(events, vec![SceneEvent::Expired { projectile: 0 }]);
        assert_eq!(p.age, 0.0);
        assert_eq!(p.pos, Vec2::new(100.0, 100.0));
        assert!(p.ttl >= 1800.0 && p.ttl < 2500.0);
    }

    #[test]
    fn test_hit_scenario_respawns_away_from_target() {
        let mut state = scene();
        state.runner.pos = Vec2::new(200.0, 100.0);
        let anchors = anchors_at(Vec2::new(100.0, 100.0));
        assert!(respawn(&mut state, 0, &anchors));

        let mut events = Vec::new();
        tick_projectile(&mut state, 0, 250.0, &anchors, &mut events);

        assert_eq!(
            events,
            vec![SceneEvent::Hit {
                projectile: 0,
                target: Target::Runner
            }]
        );
        let p = &state.projectiles[0];
        assert_eq!(p.pos, Vec2::new(100.0, 100.0));
        assert_eq!(p.age, 0.0);
        assert!(distance_squared(p.pos, state.runner.pos) >= state.settings.hit_radius_sq());
    }

    #[test]
    fn test_in_flight_snowball_moves_linearly() {
        let mut state = scene();
        state.runner.pos = Vec2::new(900.0, 100.0);
        let anchors = anchors_at(Vec2::new(100.0, 100.0));
        assert!(respawn(&mut state, 0, &anchors));

        // Target moves; the snowball keeps its launch heading
        state.runner.pos = Vec2::new(900.0, 700.0);
        let mut events = Vec::new();
        tick_projectile(&mut state, 0, 100.0, &anchors, &mut events);

        assert!(events.is_empty());
        let p = &state.projectiles[0];
        assert!((p.pos - Vec2::new(140.0, 100.0)).length() < 1e-4);
        assert_eq!(p.age, 100.0);
    }
}
