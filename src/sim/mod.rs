//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed frame rate only (no delta time)
//! - Seeded RNG only
//! - Stable iteration order (platforms in spawn order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod level;
pub mod platform;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use level::Level;
pub use platform::{Fade, Platform, PlatformKind, PowerUp, PowerUpKind, Sway};
pub use player::{DeathCause, Player, PlayerStatus};
pub use rect::Rect;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
