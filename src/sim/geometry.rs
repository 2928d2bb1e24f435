//! Axis-aligned rectangle geometry
//!
//! World coordinates: top-left origin, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "degenerate rect");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from a top-left position and a size vector
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Strict overlap test: rectangles that only share an edge do not overlap
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Strict 1D overlap of `[a_start, a_start + a_len)` and `[b_start, b_start + b_len)`
#[inline]
pub fn spans_overlap(a_start: f32, a_len: f32, b_start: f32, b_len: f32) -> bool {
    a_start < b_start + b_len && a_start + a_len > b_start
}
