//! Fixed timestep simulation tick
//!
//! Processing order (later steps may override earlier position writes):
//!   1. Horizontal intent
//!   2. Jump
//!   3. Crouch
//!   4. Integrate, clamp x to the world
//!   5. Ground / hole
//!   6. Platforms
//!   7. Fall-out
//!   8. Blocks
//!   9. Block bounce decay
//!  10. Coins
//!  11. Enemies
//!  12. Flag
//!  13. Animation + camera

use super::anim::{self, AnimInputs};
use super::camera;
use super::collision::{self, VerticalContact};
use super::geometry::{Rect, overlaps};
use super::state::{Coin, GameEvent, Player, SimulationState, TickOutcome};
use crate::consts::*;

/// Held-key snapshot sampled once at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl TickInput {
    /// Update from a browser key name. Returns false for unmapped keys.
    pub fn apply_key(&mut self, key: &str, held: bool) -> bool {
        let slot = match key {
            "ArrowLeft" | "a" | "A" => &mut self.left,
            "ArrowRight" | "d" | "D" => &mut self.right,
            "ArrowUp" | "w" | "W" | " " => &mut self.up,
            "ArrowDown" | "s" | "S" => &mut self.down,
            _ => return false,
        };
        *slot = held;
        true
    }
}

/// Advance the world by one tick
pub fn tick(state: &mut SimulationState, input: &TickInput) -> TickOutcome {
    state.events.clear();
    state.time_ticks += 1;

    let t = state.tuning;
    let ground_y = state.metrics.ground_y;
    let max_x = state.max_x(state.player.size.x);
    let prev = state.player.rect();

    // 1-3. Intent
    let player = &mut state.player;
    let was_grounded = player.on_ground;
    if input.left {
        player.vel.x -= t.run_accel;
        player.facing_left = true;
    } else if input.right {
        player.vel.x += t.run_accel;
        player.facing_left = false;
    } else {
        player.vel.x *= t.friction;
    }
    player.vel.x = player.vel.x.clamp(-t.max_speed, t.max_speed);

    if input.up && was_grounded {
        player.vel.y = -t.jump_impulse;
        player.on_ground = false;
    }
    player.is_crouching = input.down && was_grounded;

    // 4. Integrate
    player.vel.y += t.gravity;
    let next = player.pos + player.vel;
    player.pos.x = next.x.clamp(0.0, max_x);

    // 5. Ground / hole
    if collision::grounded(
        next.y + player.size.y,
        ground_y,
        player.pos.x,
        player.size.x,
        &state.holes,
    ) {
        player.pos.y = ground_y - player.size.y;
        player.vel.y = 0.0;
        player.on_ground = true;
    } else {
        player.pos.y = next.y;
        player.on_ground = false;
    }

    // 6. Platforms
    for platform in &state.platforms {
        resolve_vertical(&prev, player, &platform.rect());
    }

    // 7. Fall-out
    if player.pos.y > state.metrics.kill_line {
        log::debug!("Player fell out at x={}", player.pos.x);
        player.alive = false;
        state.events.push(GameEvent::PlayerFell);
        finish(state);
        return TickOutcome::GameOver;
    }

    // 8. Blocks
    for (index, block) in state.blocks.iter_mut().enumerate() {
        let solid = block.rect();
        let contact = resolve_vertical(&prev, player, &solid);
        if matches!(contact, Some(VerticalContact::Bonked { .. })) && block.trigger() {
            let coin = Coin::above(&solid);
            log::debug!("Block {} bumped, coin at ({}, {})", index, coin.pos.x, coin.pos.y);
            state.events.push(GameEvent::BlockBumped { block: index });
            state.events.push(GameEvent::CoinSpawned {
                x: coin.pos.x,
                y: coin.pos.y,
            });
            state.coins.push(coin);
        }
        if let Some(x) = collision::side_contact(&prev, &player.rect(), player.vel.x, &solid) {
            player.pos.x = x;
            player.vel.x = 0.0;
        }
    }

    // 9. Bounce decay
    for block in &mut state.blocks {
        block.decay_bounce();
    }

    // 10. Coins. "Falling" is this tick's displacement, so a coin resting on
    // a block is still collected on the tick the player lands on that block.
    let cur = player.rect();
    let falling = cur.y > prev.y;
    let mut collected = 0;
    let events = &mut state.events;
    state.coins.retain_mut(|coin| {
        coin.advance_frame();
        if falling && collision::crossed_top(&prev, &cur, &coin.rect()) {
            events.push(GameEvent::CoinCollected {
                x: coin.pos.x,
                y: coin.pos.y,
            });
            collected += 1;
            false
        } else {
            true
        }
    });
    if collected > 0 {
        state.score += collected;
        player.vel.y = -t.coin_bounce;
        player.on_ground = false;
    }

    // 11. Enemies. Stomps are judged against the player as it stood before
    // this pass so the result does not depend on enemy order.
    let player_rect = player.rect();
    let player_vy = player.vel.y;
    let enemy_max_x = |w: f32| (t.world_width - w).max(0.0);
    let mut stomped = false;
    let mut hit = false;
    for (index, enemy) in state.enemies.iter_mut().enumerate() {
        if !enemy.alive {
            continue;
        }
        enemy.vel.x = if player_rect.x > enemy.pos.x {
            ENEMY_SPEED
        } else {
            -ENEMY_SPEED
        };
        enemy.pos.x += enemy.vel.x;
        let limit = enemy_max_x(enemy.size.x);
        if enemy.pos.x < 0.0 {
            enemy.pos.x = 0.0;
            enemy.vel.x = ENEMY_SPEED;
        } else if enemy.pos.x > limit {
            enemy.pos.x = limit;
            enemy.vel.x = -ENEMY_SPEED;
        }
        enemy.pos.y = (enemy.pos.y + t.gravity).min(ground_y - enemy.size.y);

        if !overlaps(&player_rect, &enemy.rect()) {
            continue;
        }
        if collision::is_stomp(player_rect.bottom(), player_vy, enemy.pos.y, t.stomp_threshold) {
            enemy.alive = false;
            stomped = true;
            log::debug!("Enemy {} stomped", index);
            state.events.push(GameEvent::EnemyStomped { enemy: index });
        } else {
            hit = true;
            log::debug!("Player hit by enemy {}", index);
            state.events.push(GameEvent::PlayerHit { enemy: index });
        }
    }
    if stomped {
        player.vel.y = -t.stomp_bounce();
    }
    if hit {
        player.alive = false;
        finish(state);
        return TickOutcome::GameOver;
    }

    // 12. Flag
    let mut outcome = TickOutcome::None;
    if !state.flag.reached && overlaps(&player_rect, &state.flag.rect) {
        state.flag.reached = true;
        log::info!("Flag reached after {} ticks", state.time_ticks);
        state.events.push(GameEvent::FlagReached);
        outcome = TickOutcome::FlagReached;
    }

    // 13. Animation + camera
    finish(state);
    outcome
}

/// Snap the player against one solid using the straddle test
fn resolve_vertical(prev: &Rect, player: &mut Player, solid: &Rect) -> Option<VerticalContact> {
    let contact = collision::vertical_contact(prev, &player.rect(), player.vel.y, solid)?;
    match contact {
        VerticalContact::Landed { top } => {
            player.pos.y = top - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
        }
        VerticalContact::Bonked { bottom } => {
            player.pos.y = bottom;
            player.vel.y = 0.0;
        }
    }
    Some(contact)
}

/// Derive the animation state and move the camera
fn finish(state: &mut SimulationState) {
    let player = &mut state.player;
    player.animation = anim::classify(&AnimInputs::from_player(player, state.tuning.run_threshold));
    state.camera_x = camera::update_camera(
        state.camera_x,
        player.pos.x,
        state.metrics.view_width,
        state.tuning.world_width,
        state.tuning.camera_smoothing,
    );
}
