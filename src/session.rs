//! Session state machine
//!
//! Tracks the coarse game phase the UI shell shows overlays for, and decides
//! each frame whether the simulation runs, holds its last frame, or idles.
//!
//! ```text
//! Menu --Play--> CharacterSelect --ChooseCharacter--> Playing
//! Menu <--Back-- Instructions <--ShowInstructions-- Menu
//! Playing --(fell out / enemy hit)--> GameOver
//! GameOver --Retry--> Playing
//! GameOver --ToMenu--> Menu
//! ```

use serde::{Deserialize, Serialize};

use crate::assets::{self, AssetGate};
use crate::render::RenderSnapshot;
use crate::sim::{SimulationState, TickInput, TickOutcome, tick};
use crate::tuning::Tuning;

/// Coarse game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Menu,
    Instructions,
    CharacterSelect,
    Playing,
    GameOver,
}

/// Commands raised by the UI shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiCommand {
    Play,
    ShowInstructions,
    Back,
    /// Opaque character id; does not affect physics
    ChooseCharacter(String),
    Retry,
    ToMenu,
}

#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("Command {command:?} is not valid in phase {phase:?}")]
    Invalid {
        phase: SessionPhase,
        command: UiCommand,
    },
}

/// What the renderer should do with this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameMode {
    /// Simulation advanced; draw the world
    Live,
    /// Draw the last world state behind an overlay, no simulation
    Hold,
    /// Waiting for sprites; nothing simulated
    Loading,
    /// Clear the canvas
    Blank,
}

/// Result of one animation-frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub mode: FrameMode,
    pub outcome: TickOutcome,
}

/// Owns the simulation and the phase it is allowed to run in
#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
    character: Option<String>,
    sim: SimulationState,
    assets: AssetGate,
    last_mode: FrameMode,
}

impl Session {
    pub fn new(tuning: Tuning, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            phase: SessionPhase::Menu,
            character: None,
            sim: SimulationState::new(tuning, viewport_width, viewport_height),
            assets: AssetGate::new(),
            last_mode: FrameMode::Blank,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn character(&self) -> Option<&str> {
        self.character.as_deref()
    }

    pub fn sim(&self) -> &SimulationState {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut SimulationState {
        &mut self.sim
    }

    /// Shared handle for whoever loads sprites
    pub fn assets(&self) -> &AssetGate {
        &self.assets
    }

    /// Apply a UI command
    pub fn apply(&mut self, command: UiCommand) -> Result<SessionPhase, TransitionError> {
        let next = match (self.phase, &command) {
            (SessionPhase::Menu, UiCommand::Play) => SessionPhase::CharacterSelect,
            (SessionPhase::Menu, UiCommand::ShowInstructions) => SessionPhase::Instructions,
            (SessionPhase::Instructions, UiCommand::Back) => SessionPhase::Menu,
            (SessionPhase::CharacterSelect, UiCommand::ChooseCharacter(id)) => {
                self.assets.register(assets::manifest(id));
                self.character = Some(id.clone());
                self.start_game();
                SessionPhase::Playing
            }
            (SessionPhase::GameOver, UiCommand::Retry) => {
                self.start_game();
                SessionPhase::Playing
            }
            (SessionPhase::GameOver, UiCommand::ToMenu) => SessionPhase::Menu,
            (phase, _) => {
                log::warn!("Ignoring {:?} in {:?}", command, phase);
                return Err(TransitionError::Invalid { phase, command });
            }
        };
        log::info!("Phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        Ok(next)
    }

    /// Rebuild the level, reset the player, score and flag
    fn start_game(&mut self) {
        self.sim.restart();
    }

    /// Run one animation-frame callback
    pub fn frame(&mut self, input: &TickInput) -> FrameReport {
        let (mode, outcome) = match self.phase {
            SessionPhase::Playing if !self.assets.is_ready() => (FrameMode::Loading, TickOutcome::None),
            SessionPhase::Playing => {
                let outcome = tick(&mut self.sim, input);
                match outcome {
                    TickOutcome::GameOver => {
                        log::info!(
                            "Game over at x={:.0}, score={}",
                            self.sim.player.pos.x,
                            self.sim.score
                        );
                        self.phase = SessionPhase::GameOver;
                    }
                    TickOutcome::FlagReached => {
                        log::info!("Level complete, score={}", self.sim.score);
                    }
                    TickOutcome::None => {}
                }
                (FrameMode::Live, outcome)
            }
            SessionPhase::CharacterSelect | SessionPhase::GameOver => {
                (FrameMode::Hold, TickOutcome::None)
            }
            SessionPhase::Menu | SessionPhase::Instructions => (FrameMode::Blank, TickOutcome::None),
        };
        self.last_mode = mode;
        FrameReport { mode, outcome }
    }

    /// Viewport changed: recompute the ground line and rebuild the layout
    /// before the next frame runs
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.sim.resize(viewport_width, viewport_height);
    }

    /// Borrow everything the renderer needs for this frame
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        let sim = &self.sim;
        RenderSnapshot {
            phase: self.phase,
            mode: self.last_mode,
            zoom: sim.tuning.zoom,
            camera_x: sim.camera_x,
            view_width: sim.metrics.view_width,
            world_width: sim.tuning.world_width,
            ground_y: sim.metrics.ground_y,
            score: sim.score,
            character: self.character.as_deref(),
            player_sprite: self
                .character
                .as_deref()
                .map(|c| assets::player_sprite_key(c, sim.player.animation)),
            player: &sim.player,
            enemies: &sim.enemies,
            blocks: &sim.blocks,
            coins: &sim.coins,
            platforms: &sim.platforms,
            holes: &sim.holes,
            flag: &sim.flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Sprite;
    use crate::sim::AnimationState;

    fn session() -> Session {
        Session::new(Tuning::default(), 800.0, 600.0)
    }

    fn playing() -> Session {
        let mut s = session();
        s.apply(UiCommand::Play).unwrap();
        s.apply(UiCommand::ChooseCharacter("Gigi".into())).unwrap();
        for key in assets::manifest("Gigi") {
            s.assets().complete(&key, Ok(Sprite::placeholder()));
        }
        s
    }

    #[test]
    fn test_menu_to_playing() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Menu);
        assert_eq!(s.apply(UiCommand::Play).unwrap(), SessionPhase::CharacterSelect);
        assert_eq!(
            s.apply(UiCommand::ChooseCharacter("Gigi".into())).unwrap(),
            SessionPhase::Playing
        );
        assert_eq!(s.character(), Some("Gigi"));
    }

    #[test]
    fn test_instructions_round_trip() {
        let mut s = session();
        assert_eq!(
            s.apply(UiCommand::ShowInstructions).unwrap(),
            SessionPhase::Instructions
        );
        assert_eq!(s.apply(UiCommand::Back).unwrap(), SessionPhase::Menu);
    }

    #[test]
    fn test_invalid_command_keeps_phase() {
        let mut s = session();
        let err = s.apply(UiCommand::Retry).unwrap_err();
        assert!(matches!(
            err,
            TransitionError::Invalid {
                phase: SessionPhase::Menu,
                command: UiCommand::Retry
            }
        ));
        assert_eq!(s.phase(), SessionPhase::Menu);
    }

    #[test]
    fn test_frame_modes_per_phase() {
        let mut s = session();
        let input = TickInput::default();
        assert_eq!(s.frame(&input).mode, FrameMode::Blank);
        s.apply(UiCommand::Play).unwrap();
        assert_eq!(s.frame(&input).mode, FrameMode::Hold);
        assert_eq!(s.sim().time_ticks, 0);
    }

    #[test]
    fn test_waits_for_assets() {
        let mut s = session();
        s.apply(UiCommand::Play).unwrap();
        s.apply(UiCommand::ChooseCharacter("Gigi".into())).unwrap();
        let input = TickInput::default();
        assert_eq!(s.frame(&input).mode, FrameMode::Loading);
        assert_eq!(s.sim().time_ticks, 0);

        for key in assets::manifest("Gigi") {
            s.assets().complete(&key, Ok(Sprite::placeholder()));
        }
        assert_eq!(s.frame(&input).mode, FrameMode::Live);
        assert_eq!(s.sim().time_ticks, 1);
    }

    #[test]
    fn test_game_over_holds_and_retry_resets() {
        let mut s = playing();
        s.sim_mut().player.pos.x = 510.0; // over a hole
        s.sim_mut().score = 4;
        let input = TickInput::default();
        let mut report = s.frame(&input);
        for _ in 0..100 {
            if report.outcome == TickOutcome::GameOver {
                break;
            }
            report = s.frame(&input);
        }
        assert_eq!(report.outcome, TickOutcome::GameOver);
        assert_eq!(s.phase(), SessionPhase::GameOver);

        let ticks = s.sim().time_ticks;
        assert_eq!(s.frame(&input).mode, FrameMode::Hold);
        assert_eq!(s.sim().time_ticks, ticks);

        s.apply(UiCommand::Retry).unwrap();
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(s.sim().score, 0);
        assert!(s.sim().player.alive);
        assert!(!s.sim().flag.reached);
        assert_eq!(s.sim().camera_x, 0.0);

        s.sim_mut().player.pos.x = 510.0;
        for _ in 0..100 {
            if s.frame(&input).outcome == TickOutcome::GameOver {
                break;
            }
        }
        s.apply(UiCommand::ToMenu).unwrap();
        assert_eq!(s.frame(&input).mode, FrameMode::Blank);
    }

    #[test]
    fn test_flag_keeps_playing() {
        let mut s = playing();
        s.sim_mut().enemies.clear();
        let flag_x = s.sim().flag.rect.x;
        s.sim_mut().player.pos.x = flag_x - 10.0;
        let report = s.frame(&TickInput::default());
        assert_eq!(report.outcome, TickOutcome::FlagReached);
        assert_eq!(s.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_snapshot_reports_player_sprite() {
        let mut s = playing();
        s.frame(&TickInput {
            right: true,
            ..Default::default()
        });
        let snap = s.snapshot();
        assert_eq!(snap.mode, FrameMode::Live);
        assert_eq!(snap.player.animation, AnimationState::Run);
        assert_eq!(snap.player_sprite.as_deref(), Some("gigi_run"));
    }

    #[test]
    fn test_resize_is_applied_before_next_frame() {
        let mut s = playing();
        s.resize(1280.0, 720.0);
        assert_eq!(s.sim().metrics.ground_y, 688.0);
        s.frame(&TickInput::default());
        assert!(s.sim().player.on_ground);
        assert_eq!(s.sim().player.bottom(), 688.0);
    }

    #[test]
    fn test_resize_does_not_revive_stomped_enemy() {
        let mut s = playing();
        s.sim_mut().player.pos.x = 1000.0; // enemy 1 spawns here
        s.sim_mut().enemies[1].alive = false;
        s.sim_mut().enemies[1].pos.x = 1500.0;

        s.resize(800.0, 601.0);
        let report = s.frame(&TickInput::default());
        assert_eq!(report.outcome, TickOutcome::None);
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert!(!s.sim().enemies[1].alive);
    }
}
