//! In-memory host
//!
//! Records everything the driver does. Used by the native shell and by tests.

use std::collections::HashMap;

use glam::Vec2;

use super::{FrameHandle, SceneHost, Sprite};
use crate::sim::{AnchorId, AnchorProvider, FixedAnchors, Rect, Target};

#[derive(Debug, Clone)]
pub struct HeadlessHost {
    pub mounted: bool,
    /// Actual window size
    pub window: Vec2,
    /// Size the scene sees; refreshed from `window` only while watched
    pub viewport: Vec2,
    pub anchors: FixedAnchors,
    pub resize_watched: bool,
    /// Frame request waiting to be served
    pub pending_frame: Option<FrameHandle>,
    pub frames_requested: u32,
    pub frames_cancelled: u32,
    pub positions: HashMap<Sprite, Vec2>,
    pub roles: HashMap<Target, String>,
    pub reaction: Option<Target>,
    next_handle: i32,
}

impl HeadlessHost {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            mounted: true,
            window: viewport,
            viewport,
            anchors: FixedAnchors::default(),
            resize_watched: false,
            pending_frame: None,
            frames_requested: 0,
            frames_cancelled: 0,
            positions: HashMap::new(),
            roles: HashMap::new(),
            reaction: None,
            next_handle: 1,
        }
    }

    /// Host with both throwers mounted along the top of the viewport
    pub fn with_throwers(viewport: Vec2) -> Self {
        let mut host = Self::new(viewport);
        host.anchors = FixedAnchors {
            primary: Some(Rect::new(viewport.x * 0.35, 20.0, 40.0, 40.0)),
            secondary: Some(Rect::new(viewport.x * 0.55, 20.0, 40.0, 40.0)),
        };
        host
    }

    /// Resize the window. The cached viewport follows only while watched.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.window = Vec2::new(width, height);
        if self.resize_watched {
            self.viewport = self.window;
        }
    }

    /// Hand out the pending frame, as the display refresh would
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.pending_frame.take()
    }
}

impl AnchorProvider for HeadlessHost {
    fn anchor_rect(&self, id: AnchorId) -> Option<Rect> {
        self.anchors.anchor_rect(id)
    }
}

impl SceneHost for HeadlessHost {
    fn sprites_mounted(&self) -> bool {
        self.mounted
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn watch_resize(&mut self) {
        self.viewport = self.window;
        self.resize_watched = true;
    }

    fn unwatch_resize(&mut self) {
        self.resize_watched = false;
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.frames_requested += 1;
        self.pending_frame = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending_frame == Some(handle) {
            self.pending_frame = None;
        }
        self.frames_cancelled += 1;
    }

    fn place(&mut self, sprite: Sprite, pos: Vec2) {
        self.positions.insert(sprite, pos);
    }

    fn set_role(&mut self, actor: Target, role: &str) {
        self.roles.insert(actor, role.to_string());
    }

    fn show_reaction(&mut self, reacting: Option<Target>) {
        self.reaction = reacting;
    }
}
