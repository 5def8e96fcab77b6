//! Axis-aligned bodies shared by the player and spiders
//!
//! Screen space: x grows right, y grows down. `pos` is the top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, velocity and bounding box of a simulated actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    /// Body of the given size standing with its bottom edge on `ground_y`
    pub fn on_ground(x: f32, ground_y: f32, size: Vec2) -> Self {
        Self::new(Vec2::new(x, ground_y - size.y), size)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x;
    }

    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x;
    }

    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    /// Change the box height while keeping the bottom edge and x fixed
    pub fn resize_keep_bottom(&mut self, size: Vec2) {
        let bottom = self.bottom();
        self.size = size;
        self.set_bottom(bottom);
    }

    /// Keep the body horizontally inside `[0, width]`
    pub fn clamp_x(&mut self, width: f32) {
        let max_x = (width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
