//! Hit reactions
//!
//! When a snowball lands, the hit actor shows a short-lived badge. Every hit
//! schedules its own clear, tagged with a generation number. A clear only
//! applies if no newer hit happened since it was scheduled, so an old timer
//! can never cut a newer reaction short.

use std::collections::VecDeque;

use crate::sim::Target;

/// A scheduled reaction clear
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearToken {
    pub target: Target,
    pub generation: u64,
    /// Host time (ms) at which the clear fires
    pub due_at: f64,
}

/// Which actor, if any, is currently reacting to a hit
#[derive(Debug, Clone)]
pub struct HitReaction {
    /// Reaction duration (ms)
    duration: f64,
    current: Option<(Target, u64)>,
    generation: u64,
    /// Pending clears in scheduling order
    pending: VecDeque<ClearToken>,
}

impl HitReaction {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration: duration_ms,
            current: None,
            generation: 0,
            pending: VecDeque::new(),
        }
    }

    /// Reacting actor, read by the presentation layer
    pub fn current(&self) -> Option<Target> {
        self.current.map(|(target, _)| target)
    }

    /// Show a reaction on `target` and schedule its clear
    pub fn trigger(&mut self, target: Target, now: f64) -> ClearToken {
        self.generation += 1;
        self.current = Some((target, self.generation));
        let token = ClearToken {
            target,
            generation: self.generation,
            due_at: now + self.duration,
        };
        self.pending.push_back(token);
        token
    }

    /// Apply a clear; ignored unless it belongs to the latest hit.
    /// Returns true if the reaction was cleared.
    pub fn clear(&mut self, token: ClearToken) -> bool {
        match self.current {
            Some((target, generation)) if target == token.target && generation == token.generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Fire every pending clear due at or before `now`, wherever it sits in
    /// the queue. Returns true if the visible reaction changed.
    pub fn poll(&mut self, now: f64) -> bool {
        let (due, waiting): (VecDeque<ClearToken>, VecDeque<ClearToken>) =
            self.pending.drain(..).partition(|token| token.due_at <= now);
        self.pending = waiting;

        let mut changed = false;
        for token in due {
            changed |= self.clear(token);
        }
        changed
    }

    /// Drop pending clears and hide any reaction
    pub fn reset(&mut self) {
        self.current = None;
        self.pending.clear();
    }

    /// Number of scheduled clears not yet fired
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Default for HitReaction {
    fn default() -> Self {
        Self::new(crate::consts::REACTION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_hit_clears_after_duration() {
        let mut reaction = HitReaction::new(700.0);
        reaction.trigger(Target::Runner, 0.0);
        assert_eq!(reaction.current(), Some(Target::Runner));

        assert!(!reaction.poll(699.0));
        assert_eq!(reaction.current(), Some(Target::Runner));

        assert!(reaction.poll(700.0));
        assert_eq!(reaction.current(), None);
        assert_eq!(reaction.pending(), 0);
    }

    #[test]
    fn test_rehit_same_target_extends_reaction() {
        let mut reaction = HitReaction::new(700.0);
        reaction.trigger(Target::Chaser, 0.0);
        reaction.trigger(Target::Chaser, 500.0);

        // First clear fires at 700 but belongs to a stale hit
        assert!(!reaction.poll(900.0));
        assert_eq!(reaction.current(), Some(Target::Chaser));

        assert!(!reaction.poll(1199.0));
        assert_eq!(reaction.current(), Some(Target::Chaser));

        assert!(reaction.poll(1200.0));
        assert_eq!(reaction.current(), None);
    }

    #[test]
    fn test_stale_clear_does_not_erase_other_target() {
        let mut reaction = HitReaction::new(700.0);
        reaction.trigger(Target::Runner, 0.0);
        reaction.trigger(Target::Chaser, 300.0);

        reaction.poll(700.0);
        assert_eq!(reaction.current(), Some(Target::Chaser));

        reaction.poll(1000.0);
        assert_eq!(reaction.current(), None);
    }

    #[test]
    fn test_manual_clear_with_token() {
        let mut reaction = HitReaction::new(700.0);
        let first = reaction.trigger(Target::Runner, 0.0);
        let second = reaction.trigger(Target::Runner, 100.0);

        assert!(!reaction.clear(first));
        assert!(reaction.clear(second));
        // Clearing twice is harmless
        assert!(!reaction.clear(second));
    }

    #[test]
    fn test_earlier_clear_fires_behind_later_one() {
        let mut reaction = HitReaction::new(700.0);
        reaction.trigger(Target::Runner, 10_000.0);
        reaction.trigger(Target::Chaser, 9_000.0);

        // Chaser clear is due at 9700 even though it was queued second
        assert!(reaction.poll(9_800.0));
        assert_eq!(reaction.current(), None);
        assert_eq!(reaction.pending(), 1);

        // Runner clear is stale and leaves nothing to change
        assert!(!reaction.poll(10_700.0));
        assert_eq!(reaction.pending(), 0);
    }

    #[test]
    fn test_reset_drops_pending() {
        let mut reaction = HitReaction::new(700.0);
        reaction.trigger(Target::Runner, 0.0);
        reaction.reset();
        assert_eq!(reaction.current(), None);
        assert_eq!(reaction.pending(), 0);
        assert!(!reaction.poll(10_000.0));
    }
}
