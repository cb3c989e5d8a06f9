//! Game session state
//!
//! A session owns everything a run needs. Restarting replaces the whole
//! session rather than patching its parts.

use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::level::Level;
use super::player::Player;
use crate::error::ConfigResult;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player died; the simulation is frozen until reset
    GameOver,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Simulation frames advanced while playing
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub camera: Camera,
    pub level: Level,
}

impl GameState {
    /// Start a run. Fails fast if `tuning` is malformed.
    pub fn new(seed: u64, tuning: Tuning) -> ConfigResult<Self> {
        tuning.validate()?;

        let player = Player::new(&tuning);
        let camera = Camera::new(tuning.camera_player_offset);
        let level = Level::new(seed, &tuning)?;

        log::info!("New run with seed {}", seed);

        Ok(Self {
            seed,
            tuning,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player,
            camera,
            level,
        })
    }

    /// Replace the whole session with a fresh run, keeping the tuning
    pub fn reset(&mut self, seed: u64) -> ConfigResult<()> {
        *self = Self::new(seed, self.tuning.clone())?;
        Ok(())
    }

    pub fn score(&self) -> u64 {
        self.player.score
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
