//! Throwing anchors
//!
//! Snowballs are launched from the hand of a "thrower" drawn elsewhere on the
//! page. The simulation only sees the thrower's head as a bounding rectangle,
//! looked up through `AnchorProvider` every time a snowball is relaunched.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which thrower a snowball comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorId {
    Primary,
    Secondary,
}

/// Axis-aligned rectangle in viewport coordinates (px)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Source of anchor rectangles.
///
/// Returns `None` while the anchor's element is not rendered; the caller must
/// then leave the dependent snowball untouched.
pub trait AnchorProvider {
    fn anchor_rect(&self, id: AnchorId) -> Option<Rect>;
}

/// No anchors mounted
impl AnchorProvider for () {
    fn anchor_rect(&self, _id: AnchorId) -> Option<Rect> {
        None
    }
}

/// Fixed rectangles, handy for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAnchors {
    pub primary: Option<Rect>,
    pub secondary: Option<Rect>,
}

impl AnchorProvider for FixedAnchors {
    fn anchor_rect(&self, id: AnchorId) -> Option<Rect> {
        match id {
            AnchorId::Primary => self.primary,
            AnchorId::Secondary => self.secondary,
        }
    }
}

/// Throwing hand position for a head rectangle: right of the head, a bit
/// below its vertical center
pub fn throw_origin(head: Rect, offset_x: f32, offset_y_ratio: f32) -> Vec2 {
    Vec2::new(
        head.left + head.width + offset_x,
        head.top + head.height * offset_y_ratio,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throw_origin() {
        let head = Rect::new(100.0, 200.0, 40.0, 40.0);
        let origin = throw_origin(head, 14.0, 0.55);
        assert_eq!(origin, Vec2::new(154.0, 222.0));
    }

    #[test]
    fn test_fixed_anchors() {
        let anchors = FixedAnchors {
            primary: Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
            secondary: None,
        };
        assert!(anchors.anchor_rect(AnchorId::Primary).is_some());
        assert!(anchors.anchor_rect(AnchorId::Secondary).is_none());
        assert!(().anchor_rect(AnchorId::Primary).is_none());
    }
}
