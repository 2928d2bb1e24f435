//! Player animation classifier
//!
//! A priority-ordered rule table: the first rule that matches wins.

use super::state::{AnimationState, Player};

/// Inputs the classifier looks at
#[derive(Debug, Clone, Copy)]
pub struct AnimInputs {
    pub alive: bool,
    pub on_ground: bool,
    pub crouching: bool,
    pub speed_x: f32,
    pub run_threshold: f32,
}

impl AnimInputs {
    pub fn from_player(player: &Player, run_threshold: f32) -> Self {
        Self {
            alive: player.alive,
            on_ground: player.on_ground,
            crouching: player.is_crouching,
            speed_x: player.vel.x.abs(),
            run_threshold,
        }
    }
}

type Rule = (AnimationState, fn(&AnimInputs) -> bool);

const RULES: [Rule; 4] = [
    (AnimationState::Dead, is_dead),
    (AnimationState::Jump, is_airborne),
    (AnimationState::Crouch, is_crouching),
    (AnimationState::Run, is_running),
];

fn is_dead(i: &AnimInputs) -> bool {
    !i.alive
}

fn is_airborne(i: &AnimInputs) -> bool {
    !i.on_ground
}

fn is_crouching(i: &AnimInputs) -> bool {
    i.crouching
}

fn is_running(i: &AnimInputs) -> bool {
    i.speed_x > i.run_threshold
}

/// Pick the animation state; `Idle` when no rule matches
pub fn classify(inputs: &AnimInputs) -> AnimationState {
    RULES
        .iter()
        .find(|(_, applies)| applies(inputs))
        .map(|(state, _)| *state)
        .unwrap_or(AnimationState::Idle)
}
