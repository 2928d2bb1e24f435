//! Collision tests for the platformer resolver
//!
//! Vertical contacts use a straddle test: compare the mover's edge before and
//! after integration and report a hit only when it crossed the solid's edge
//! this tick. Mere overlap is never enough, which keeps fast falls from
//! tunneling and keeps side contact from snapping the player onto a ledge.

use super::geometry::{Rect, spans_overlap};
use super::level::Hole;

/// A vertical contact against a solid rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalContact {
    /// Came down onto the top edge (y of the top)
    Landed { top: f32 },
    /// Came up into the bottom edge (y of the bottom)
    Bonked { bottom: f32 },
}

/// True if `cur` and `solid` overlap horizontally
#[inline]
fn horizontal_overlap(cur: &Rect, solid: &Rect) -> bool {
    spans_overlap(cur.x, cur.width, solid.x, solid.width)
}

/// True if `cur` and `solid` overlap vertically
#[inline]
fn vertical_overlap(cur: &Rect, solid: &Rect) -> bool {
    spans_overlap(cur.y, cur.height, solid.y, solid.height)
}

/// Did the mover's bottom cross `target`'s top edge going down this tick?
#[inline]
pub fn crossed_top(prev: &Rect, cur: &Rect, target: &Rect) -> bool {
    prev.bottom() <= target.y && cur.bottom() >= target.y && horizontal_overlap(cur, target)
}

/// Did the mover's top cross `target`'s bottom edge going up this tick?
#[inline]
pub fn crossed_bottom(prev: &Rect, cur: &Rect, target: &Rect) -> bool {
    prev.y >= target.bottom() && cur.y <= target.bottom() && horizontal_overlap(cur, target)
}

/// Straddle test against a solid that blocks from above and below
pub fn vertical_contact(prev: &Rect, cur: &Rect, vy: f32, solid: &Rect) -> Option<VerticalContact> {
    if vy >= 0.0 && crossed_top(prev, cur, solid) {
        Some(VerticalContact::Landed { top: solid.y })
    } else if vy < 0.0 && crossed_bottom(prev, cur, solid) {
        Some(VerticalContact::Bonked {
            bottom: solid.bottom(),
        })
    } else {
        None
    }
}

/// Side test against a solid block.
///
/// Returns the corrected x when the mover crossed the block's left edge moving
/// right (or its right edge moving left) while vertically overlapping it.
pub fn side_contact(prev: &Rect, cur: &Rect, vx: f32, solid: &Rect) -> Option<f32> {
    if !vertical_overlap(cur, solid) {
        return None;
    }
    if vx > 0.0 && prev.right() <= solid.x && cur.right() > solid.x {
        Some(solid.x - cur.width)
    } else if vx < 0.0 && prev.x >= solid.right() && cur.x < solid.right() {
        Some(solid.right())
    } else {
        None
    }
}

/// True if the span intersects any hole
#[inline]
pub fn over_hole(x: f32, width: f32, holes: &[Hole]) -> bool {
    holes.iter().any(|h| h.intersects(x, width))
}

/// Ground support: the next bottom reaches the ground line and no hole is
/// under the mover's span
#[inline]
pub fn grounded(next_bottom: f32, ground_y: f32, x: f32, width: f32, holes: &[Hole]) -> bool {
    next_bottom >= ground_y && !over_hole(x, width, holes)
}

/// A player/enemy contact is a stomp when the player is falling and its
/// bottom is within `threshold` of the enemy top
#[inline]
pub fn is_stomp(player_bottom: f32, vy: f32, enemy_top: f32, threshold: f32) -> bool {
    vy > 0.0 && player_bottom - enemy_top < threshold
}
