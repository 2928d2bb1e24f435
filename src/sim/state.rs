//! Simulation state and entity types
//!
//! Everything the resolver mutates lives in [`SimulationState`]. The renderer
//! only ever borrows it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera;
use super::geometry::Rect;
use super::level::{self, Hole, Level, Platform};
use crate::consts::*;
use crate::tuning::Tuning;

/// Sprite/animation state of the player, derived once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    Jump,
    Crouch,
    Dead,
}

impl AnimationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Run => "run",
            AnimationState::Jump => "jump",
            AnimationState::Crouch => "crouch",
            AnimationState::Dead => "dead",
        }
    }

    pub const ALL: [AnimationState; 5] = [
        AnimationState::Idle,
        AnimationState::Run,
        AnimationState::Jump,
        AnimationState::Crouch,
        AnimationState::Dead,
    ];
}

/// Result of a single tick, consumed by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickOutcome {
    #[default]
    None,
    /// The goal flag was reached this tick
    FlagReached,
    /// Player fell out of the world or touched an enemy
    GameOver,
}

/// Things that happened during a tick (for audio/UI feedback)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BlockBumped { block: usize },
    CoinSpawned { x: f32, y: f32 },
    CoinCollected { x: f32, y: f32 },
    EnemyStomped { enemy: usize },
    PlayerHit { enemy: usize },
    PlayerFell,
    FlagReached,
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    pub facing_left: bool,
    pub is_crouching: bool,
    pub alive: bool,
    pub animation: AnimationState,
}

impl Player {
    /// Spawn standing on the ground line
    pub fn new(ground_y: f32) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, ground_y - size.y),
            vel: Vec2::ZERO,
            size,
            on_ground: true,
            facing_left: false,
            is_crouching: false,
            alive: true,
            animation: AnimationState::Idle,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A chasing enemy (stompable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Horizontal only
    pub vel: Vec2,
    pub size: Vec2,
    pub alive: bool,
}

impl Enemy {
    pub fn new(x: f32, ground_y: f32) -> Self {
        let size = Vec2::splat(ENEMY_SIZE);
        Self {
            pos: Vec2::new(x, ground_y - size.y),
            vel: Vec2::new(ENEMY_SPEED, 0.0),
            size,
            alive: true,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A question block; hitting it from below releases one coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub pos: Vec2,
    pub size: Vec2,
    /// Once true, stays true for the rest of the session
    pub used: bool,
    /// Visual bump height, decays to 0
    pub bounce_offset: f32,
}

impl Block {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(BLOCK_SIZE),
            used: false,
            bounce_offset: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Mark the block used. Returns true only on the first hit.
    pub fn trigger(&mut self) -> bool {
        if self.used {
            return false;
        }
        self.used = true;
        self.bounce_offset = BLOCK_BOUNCE;
        true
    }

    /// Decay the bump animation by one tick
    pub fn decay_bounce(&mut self) {
        self.bounce_offset = (self.bounce_offset - 1.0).max(0.0);
    }
}

/// A coin released by a block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    /// Current animation frame (0..COIN_FRAME_COUNT)
    pub frame: u32,
    /// Ticks since spawn
    pub age: u32,
}

impl Coin {
    /// Spawn centered on top of a block
    pub fn above(block: &Rect) -> Self {
        let size = Vec2::splat(COIN_SIZE);
        Self {
            pos: Vec2::new(block.center_x() - size.x / 2.0, block.y - size.y),
            size,
            frame: 0,
            age: 0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn advance_frame(&mut self) {
        self.age += 1;
        if self.age % COIN_FRAME_TICKS == 0 {
            self.frame = (self.frame + 1) % COIN_FRAME_COUNT;
        }
    }
}

/// Level goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub rect: Rect,
    /// One-way within a session
    pub reached: bool,
}

/// Viewport-derived measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldMetrics {
    /// Physical viewport size
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Logical (zoomed) viewport width, used by the camera
    pub view_width: f32,
    /// Top of the ground strip
    pub ground_y: f32,
    /// Player y beyond which the run ends
    pub kill_line: f32,
}

impl WorldMetrics {
    pub fn new(viewport_width: f32, viewport_height: f32, tuning: &Tuning) -> Self {
        let view_height = viewport_height / tuning.zoom;
        Self {
            viewport_width,
            viewport_height,
            view_width: viewport_width / tuning.zoom,
            ground_y: view_height - tuning.ground_thickness,
            kill_line: view_height,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub tuning: Tuning,
    pub metrics: WorldMetrics,
    pub player: Player,
    pub holes: Vec<Hole>,
    pub platforms: Vec<Platform>,
    /// Dead enemies stay in place and are skipped
    pub enemies: Vec<Enemy>,
    pub blocks: Vec<Block>,
    pub coins: Vec<Coin>,
    pub flag: Flag,
    /// Horizontal camera offset (world units)
    pub camera_x: f32,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl SimulationState {
    /// Create a fresh level for the given viewport
    pub fn new(tuning: Tuning, viewport_width: f32, viewport_height: f32) -> Self {
        let metrics = WorldMetrics::new(viewport_width, viewport_height, &tuning);
        let level = level::build_level(metrics.ground_y, tuning.world_width);
        let player = Player::new(metrics.ground_y);
        let camera_x = camera::snap_camera(
            player.pos.x,
            metrics.view_width,
            tuning.world_width,
        );

        Self {
            tuning,
            metrics,
            player,
            holes: level.holes,
            platforms: level.platforms,
            enemies: level.enemies,
            blocks: level.blocks,
            coins: Vec::new(),
            flag: level.flag,
            camera_x,
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Rebuild the level and reset the player, score, flag and camera
    pub fn restart(&mut self) {
        self.install_level(level::build_level(
            self.metrics.ground_y,
            self.tuning.world_width,
        ));
        self.player = Player::new(self.metrics.ground_y);
        self.score = 0;
        self.time_ticks = 0;
        self.events.clear();
        self.snap_camera();
        log::info!(
            "Level restarted: ground_y={}, enemies={}, blocks={}",
            self.metrics.ground_y,
            self.enemies.len(),
            self.blocks.len()
        );
    }

    /// Recompute the ground line for a new viewport and move everything that
    /// sits relative to it.
    ///
    /// Run progress survives: used blocks, dead enemies, live coins, score
    /// and `flag.reached`. Entities keep their height above the ground.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        let metrics = WorldMetrics::new(viewport_width, viewport_height, &self.tuning);
        let delta = metrics.ground_y - self.metrics.ground_y;
        self.metrics = metrics;

        self.player.pos.y += delta;
        for enemy in &mut self.enemies {
            enemy.pos.y += delta;
        }
        for block in &mut self.blocks {
            block.pos.y += delta;
        }
        for coin in &mut self.coins {
            coin.pos.y += delta;
        }
        self.flag.rect.y += delta;
        for platform in &mut self.platforms {
            *platform = Platform::new(platform.x, platform.width, platform.rise, metrics.ground_y);
        }
        self.snap_camera();
        log::info!(
            "Viewport resized to {}x{}, ground_y={}",
            viewport_width,
            viewport_height,
            metrics.ground_y
        );
    }

    /// Put the camera straight onto its target (no smoothing)
    pub fn snap_camera(&mut self) {
        self.camera_x = camera::snap_camera(
            self.player.pos.x,
            self.metrics.view_width,
            self.tuning.world_width,
        );
    }

    fn install_level(&mut self, level: Level) {
        self.holes = level.holes;
        self.platforms = level.platforms;
        self.enemies = level.enemies;
        self.blocks = level.blocks;
        self.flag = level.flag;
        self.coins.clear();
    }

    /// Right-most x the given width may occupy
    #[inline]
    pub fn max_x(&self, width: f32) -> f32 {
        (self.tuning.world_width - width).max(0.0)
    }
}
