//! Fixed-rate simulation tick
//!
//! One call advances one frame: player, then camera, then level. Each stage
//! reads the state the previous stages settled this frame.

use super::player::PlayerStatus;
use super::state::{GamePhase, GameState};

/// Held keys for a single tick (a snapshot, not an event queue)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Fast-fall
    pub down: bool,
}

/// Advance the game state by one frame and return the resulting phase
pub fn tick(state: &mut GameState, input: &TickInput) -> GamePhase {
    if state.phase == GamePhase::GameOver {
        return GamePhase::GameOver;
    }

    state.time_ticks += 1;

    let status = state.player.update(
        input,
        &mut state.level.platforms,
        &state.camera,
        &state.tuning,
    );
    if status == PlayerStatus::Dead {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} frames: score {} ({:?})",
            state.time_ticks,
            state.player.score,
            state.player.death_cause
        );
        return state.phase;
    }

    state.camera.update(state.player.rect.top());
    state.level.update(&state.camera, &state.tuning);

    state.phase
}
