//! Sky Hopper - an endless vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, level generation, camera)
//! - `render`: Draw-list production through a host-supplied canvas
//! - `tuning`: Data-driven game balance
//! - `error`: Configuration errors (the simulation itself has none)

pub mod error;
pub mod render;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, ConfigResult};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Physics values are per frame and tuned for [`consts::FPS`]; there is no
/// delta-time scaling.
pub mod consts {
    /// Fixed simulation rate (frames per second)
    pub const FPS: u32 = 60;

    /// Viewport dimensions (world units)
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Maximum horizontal speed
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Horizontal speed gained per frame while a direction is held
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    /// Horizontal damping factor per frame with no direction held
    pub const PLAYER_FRICTION: f32 = 0.9;
    /// Horizontal speed below which damping snaps to zero
    pub const PLAYER_STOP_EPSILON: f32 = 0.1;
    /// Upward launch velocity (negative = up)
    pub const PLAYER_JUMP_FORCE: f32 = -12.0;
    pub const PLAYER_GRAVITY: f32 = 0.5;
    pub const PLAYER_FAST_FALL_MULTIPLIER: f32 = 2.0;

    /// Jump buffer window (frames)
    pub const JUMP_BUFFER_FRAMES: u32 = 5;
    /// Coyote time window (frames)
    pub const COYOTE_FRAMES: u32 = 5;

    /// Starting platform
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 15.0;
    /// Distance from the bottom of the first screen to the starting platform
    pub const START_PLATFORM_MARGIN: f32 = 100.0;

    /// Generated platform widths
    pub const PLATFORM_MIN_WIDTH: f32 = 60.0;
    pub const PLATFORM_MAX_WIDTH: f32 = 120.0;
    /// Vertical gap between consecutive platforms
    pub const MIN_PLATFORM_DISTANCE: f32 = 60.0;
    pub const MAX_PLATFORM_DISTANCE: f32 = 120.0;
    /// Standard deviation of the platform center around screen center
    pub const PLATFORM_SPREAD: f32 = SCREEN_WIDTH / 4.0;

    /// Platform type weights (normal, disappearing, moving)
    pub const PLATFORM_WEIGHTS: [f32; 3] = [0.6, 0.2, 0.2];
    /// Frames a disappearing platform stays up once stepped on
    pub const DISAPPEAR_DELAY: u32 = 30;
    /// Frames a disappearing platform stays hidden
    pub const REAPPEAR_DELAY: u32 = 120;
    pub const MOVING_PLATFORM_SPEED: f32 = 2.0;
    /// Oscillation amplitude around the spawn x
    pub const MOVING_PLATFORM_DISTANCE: f32 = 100.0;

    /// Level window
    pub const MIN_LIVE_PLATFORMS: usize = 10;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 20.0;
    /// Clearance between a power-up and the platform top
    pub const POWER_UP_GAP: f32 = 5.0;
    pub const POWER_UP_SPAWN_CHANCE: f64 = 0.1;
    pub const POWER_UP_SCORE_BONUS: u64 = 50;
    pub const HIGH_JUMP_MULTIPLIER: f32 = 1.5;
    /// High jump duration (frames)
    pub const HIGH_JUMP_DURATION: u32 = 300;

    /// Scoring
    pub const SCORE_PER_HEIGHT_UNIT: f32 = 1.0;
    /// Height band (world units) per multiplier step
    pub const HEIGHT_SCORE_INTERVAL: f32 = 500.0;
    /// Multiplier growth per height band
    pub const HEIGHT_SCORE_MULTIPLIER: f32 = 1.1;
    pub const MAX_HEIGHT_MULTIPLIER: f32 = 3.0;

    /// Camera keeps the player this far below the top of the viewport
    pub const CAMERA_PLAYER_OFFSET: f32 = SCREEN_HEIGHT * 0.5;
}

/// Score multiplier for a height band: `min(growth ^ level, cap)`
#[inline]
pub fn height_multiplier(height_level: u32, growth: f32, cap: f32) -> f32 {
    let exponent = height_level.min(i32::MAX as u32) as i32;
    growth.powi(exponent).min(cap)
}
