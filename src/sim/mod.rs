//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (collections are never reordered)
//! - No rendering or platform dependencies

pub mod anim;
pub mod camera;
pub mod collision;
pub mod geometry;
pub mod level;
pub mod state;
pub mod tick;

pub use anim::{AnimInputs, classify};
pub use camera::{camera_target, snap_camera, update_camera};
pub use geometry::{Rect, overlaps};
pub use level::{Hole, Level, Platform, build_level};
pub use state::{
    AnimationState, Block, Coin, Enemy, Flag, GameEvent, Player, SimulationState, TickOutcome,
    WorldMetrics,
};
pub use tick::{TickInput, tick};
