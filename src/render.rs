//! Read-only frame snapshot for the renderer
//!
//! Borrowed from the session after each frame. The renderer picks sprites by
//! key and never touches simulation state.

use serde::Serialize;

use crate::assets;
use crate::session::{FrameMode, SessionPhase};
use crate::sim::{Block, Coin, Enemy, Flag, Hole, Platform, Player, Rect};

#[derive(Debug, Serialize)]
pub struct RenderSnapshot<'a> {
    pub phase: SessionPhase,
    pub mode: FrameMode,
    /// Renderer zoom (world units -> pixels)
    pub zoom: f32,
    pub camera_x: f32,
    pub view_width: f32,
    pub world_width: f32,
    pub ground_y: f32,
    pub score: u32,
    pub character: Option<&'a str>,
    /// Sprite key for the player's current animation
    pub player_sprite: Option<String>,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub blocks: &'a [Block],
    pub coins: &'a [Coin],
    pub platforms: &'a [Platform],
    pub holes: &'a [Hole],
    pub flag: &'a Flag,
}

impl RenderSnapshot<'_> {
    /// World x to screen pixels
    #[inline]
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        (world_x - self.camera_x) * self.zoom
    }

    /// World y to screen pixels
    #[inline]
    pub fn to_screen_y(&self, world_y: f32) -> f32 {
        world_y * self.zoom
    }

    /// True if any part of `rect` is inside the horizontal view
    pub fn is_visible(&self, rect: &Rect) -> bool {
        rect.right() > self.camera_x && rect.x < self.camera_x + self.view_width
    }

    /// Ground segments `(x, width)` between holes, left to right
    pub fn ground_segments(&self) -> Vec<(f32, f32)> {
        let mut holes: Vec<&Hole> = self.holes.iter().collect();
        holes.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut segments = Vec::with_capacity(holes.len() + 1);
        let mut x = 0.0;
        for hole in holes {
            if hole.x > x {
                segments.push((x, hole.x - x));
            }
            x = x.max(hole.x + hole.width);
        }
        if x < self.world_width {
            segments.push((x, self.world_width - x));
        }
        segments
    }

    /// Sprite key for a block in its current state
    pub fn block_sprite(block: &Block) -> &'static str {
        if block.used {
            assets::BLOCK_USED_SPRITE
        } else {
            assets::BLOCK_SPRITE
        }
    }
}
