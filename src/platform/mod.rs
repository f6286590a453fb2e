//! Platform abstraction layer
//!
//! The loop driver never touches a windowing or DOM API directly. A host
//! provides:
//! - Viewport size (cached, refreshed by its resize observer)
//! - Frame scheduling (display refresh callback)
//! - Anchor rectangles for the throwers
//! - A sink for sprite positions, roles and hit reactions

pub mod headless;

pub use headless::HeadlessHost;

use glam::Vec2;

use crate::sim::{AnchorProvider, Target};

/// Handle of a pending frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// A visual element the driver positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Actor(Target),
    Projectile(usize),
}

/// Capabilities the loop driver needs from whatever embeds the scene
pub trait SceneHost: AnchorProvider {
    /// True when both actor sprites and every snowball sprite are mounted
    fn sprites_mounted(&self) -> bool;

    /// Latest viewport size seen by the resize observer (px)
    fn viewport_size(&self) -> Vec2;

    /// Refresh the cached viewport size from the window and keep it current
    fn watch_resize(&mut self);

    /// Stop caching viewport size changes
    fn unwatch_resize(&mut self);

    /// Ask for one call to `LoopDriver::frame` on the next display refresh
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Drop a pending frame request
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Write a sprite position as a transform
    fn place(&mut self, sprite: Sprite, pos: Vec2);

    /// Tag an actor sprite with its role
    fn set_role(&mut self, actor: Target, role: &str);

    /// Show the hit badge on `reacting`, or hide it
    fn show_reaction(&mut self, reacting: Option<Target>);
}
