//! Level layout
//!
//! The level is a fixed design table positioned relative to the ground line.
//! It is rebuilt from scratch on every (re)start; a viewport resize only
//! shifts the existing entities (see `SimulationState::resize`).

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, spans_overlap};
use super::state::{Block, Enemy, Flag};
use crate::consts::*;

/// A gap in the ground line. Only the player can fall through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub x: f32,
    pub width: f32,
}

impl Hole {
    /// True if the span `[x, x + width)` strictly intersects this hole
    #[inline]
    pub fn intersects(&self, x: f32, width: f32) -> bool {
        spans_overlap(x, width, self.x, self.width)
    }
}

/// A floating platform, solid from above and below
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    /// Absolute top, recomputed from `rise` whenever the ground moves
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Height of the top above the ground line
    pub rise: f32,
}

impl Platform {
    pub fn new(x: f32, width: f32, rise: f32, ground_y: f32) -> Self {
        Self {
            x,
            y: ground_y - rise,
            width,
            height: PLATFORM_HEIGHT,
            rise,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Holes as `(x, width)`
const HOLES: [(f32, f32); 5] = [
    (500.0, 100.0),
    (1200.0, 150.0),
    (2500.0, 200.0),
    (4200.0, 150.0),
    (6100.0, 150.0),
];

/// Platforms as `(x, width, rise above ground)`
const PLATFORMS: [(f32, f32, f32); 5] = [
    (600.0, 100.0, 100.0),
    (1600.0, 120.0, 120.0),
    (3200.0, 100.0, 110.0),
    (4800.0, 150.0, 130.0),
    (6500.0, 120.0, 115.0),
];

/// Everything `build_level` produces
#[derive(Debug, Clone)]
pub struct Level {
    pub holes: Vec<Hole>,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub blocks: Vec<Block>,
    pub flag: Flag,
}

/// Evenly spaced positions from `start` (inclusive) up to `end` (exclusive)
fn spaced(start: f32, step: f32, end: f32) -> impl Iterator<Item = f32> {
    (0..)
        .map(move |i| start + i as f32 * step)
        .take_while(move |&x| x < end)
}

/// Build the level for a ground line at `ground_y`
pub fn build_level(ground_y: f32, world_width: f32) -> Level {
    let holes: Vec<Hole> = HOLES
        .iter()
        .map(|&(x, width)| Hole { x, width })
        .collect();

    let platforms = PLATFORMS
        .iter()
        .map(|&(x, width, rise)| Platform::new(x, width, rise, ground_y))
        .collect();

    let enemies = spaced(ENEMY_START_X, ENEMY_SPACING, world_width)
        .map(|x| Enemy::new(x, ground_y))
        .collect();

    let blocks: Vec<Block> = spaced(BLOCK_START_X, BLOCK_SPACING, world_width)
        .filter(|&x| !holes.iter().any(|h| h.intersects(x, BLOCK_SIZE)))
        .map(|x| Block::new(x, ground_y - BLOCK_RISE))
        .collect();

    let flag = Flag {
        rect: Rect::new(
            world_width - FLAG_INSET,
            ground_y - FLAG_HEIGHT,
            FLAG_WIDTH,
            FLAG_HEIGHT,
        ),
        reached: false,
    };

    log::debug!(
        "Built level: ground_y={}, holes={}, blocks={}",
        ground_y,
        holes.len(),
        blocks.len()
    );

    Level {
        holes,
        platforms,
        enemies,
        blocks,
        flag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: f32 = 8000.0;

    #[test]
    fn test_no_block_over_a_hole() {
        let level = build_level(568.0, WORLD);
        for block in &level.blocks {
            for hole in &level.holes {
                assert!(
                    !hole.intersects(block.pos.x, block.size.x),
                    "block at {} overlaps hole at {}",
                    block.pos.x,
                    hole.x
                );
            }
        }
        // 1200 falls inside the second hole
        assert!(!level.blocks.iter().any(|b| b.pos.x == 1200.0));
        assert!(level.blocks.iter().any(|b| b.pos.x == 700.0));
    }

    #[test]
    fn test_spacing_up_to_world_width() {
        let level = build_level(568.0, WORLD);
        assert_eq!(level.enemies.len(), 13); // 400, 1000, ..., 7600
        assert_eq!(level.enemies[0].pos.x, 400.0);
        assert_eq!(level.enemies[1].pos.x, 1000.0);
        assert!(level.enemies.iter().all(|e| e.pos.x < WORLD));
        assert!(level.blocks.iter().all(|b| b.pos.x < WORLD));
    }

    #[test]
    fn test_positions_follow_ground() {
        let level = build_level(400.0, WORLD);
        for p in &level.platforms {
            assert_eq!(p.y, 400.0 - p.rise);
        }
        assert_eq!(level.flag.rect.y, 400.0 - FLAG_HEIGHT);
        assert_eq!(level.flag.rect.x, WORLD - FLAG_INSET);
        assert!(level.enemies.iter().all(|e| e.pos.y + e.size.y == 400.0));
        assert!(level.blocks.iter().all(|b| b.pos.y == 400.0 - BLOCK_RISE));
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let a = build_level(568.0, WORLD);
        let b = build_level(568.0, WORLD);
        assert_eq!(a.holes, b.holes);
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.blocks.len(), b.blocks.len());
        assert_eq!(a.enemies.len(), b.enemies.len());
    }

    #[test]
    fn test_hole_edge_touch_is_not_intersection() {
        let hole = Hole {
            x: 500.0,
            width: 100.0,
        };
        assert!(!hole.intersects(452.0, 48.0));
        assert!(hole.intersects(453.0, 48.0));
        assert!(!hole.intersects(600.0, 48.0));
    }
}
