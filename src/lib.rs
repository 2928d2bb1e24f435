//! Gigi Run - a side-scrolling platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, entity state)
//! - `session`: Menu / character select / playing / game over state machine
//! - `tuning`: Data-driven world constants
//! - `assets`: Sprite selection and the asset readiness gate
//! - `render`: Read-only frame snapshot for the renderer

pub mod assets;
pub mod render;
pub mod session;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use session::{FrameMode, Session, SessionPhase, UiCommand};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Player spawn x (world units)
    pub const PLAYER_SPAWN_X: f32 = 50.0;
    /// Player bounding box
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;

    /// Enemy bounding box
    pub const ENEMY_SIZE: f32 = 32.0;
    /// First enemy x and spacing between enemies
    pub const ENEMY_START_X: f32 = 400.0;
    pub const ENEMY_SPACING: f32 = 600.0;
    /// Enemy walking speed (units per tick)
    pub const ENEMY_SPEED: f32 = 1.0;

    /// Question block size and placement
    pub const BLOCK_SIZE: f32 = 32.0;
    pub const BLOCK_START_X: f32 = 200.0;
    pub const BLOCK_SPACING: f32 = 500.0;
    /// Height of the block top above the ground line
    pub const BLOCK_RISE: f32 = 150.0;
    /// Visual bump applied when a block is hit from below
    pub const BLOCK_BOUNCE: f32 = 8.0;

    /// Coin size and animation
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_FRAME_TICKS: u32 = 8;
    pub const COIN_FRAME_COUNT: u32 = 4;

    /// Platform thickness
    pub const PLATFORM_HEIGHT: f32 = 10.0;

    /// Goal flag
    pub const FLAG_WIDTH: f32 = 32.0;
    pub const FLAG_HEIGHT: f32 = 96.0;
    /// Distance of the flag from the right end of the world
    pub const FLAG_INSET: f32 = 200.0;
}
