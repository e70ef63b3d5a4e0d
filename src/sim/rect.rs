//! Axis-aligned rectangle geometry
//!
//! Screen convention: x grows right, y grows down. A rect is its top-left
//! corner plus a non-negative size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Midpoint of the bottom edge (where jump dust spawns)
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.bottom())
    }

    /// Same rect shifted horizontally
    pub fn translated_x(&self, dx: f32) -> Self {
        Self { x: self.x + dx, ..*self }
    }

    /// Strict overlap test, see [`overlaps`]
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// True if the open interiors of `a` and `b` intersect on both axes.
///
/// Rects that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
