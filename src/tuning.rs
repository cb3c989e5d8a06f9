//! Game balance tunables
//!
//! Defaults come from [`crate::consts`]. A JSON file may override any subset
//! of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};

/// Data-driven game balance (all physics values are per frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_acceleration: f32,
    pub player_friction: f32,
    pub player_stop_epsilon: f32,
    /// Launch velocity (negative = up)
    pub jump_force: f32,
    pub gravity: f32,
    pub fast_fall_multiplier: f32,
    pub jump_buffer_frames: u32,
    pub coyote_frames: u32,

    // === Level generation ===
    pub start_platform_width: f32,
    pub platform_height: f32,
    pub start_platform_margin: f32,
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub min_platform_gap: f32,
    pub max_platform_gap: f32,
    /// Standard deviation of the platform center around screen center
    pub platform_spread: f32,
    /// Weights for normal, disappearing, moving
    pub platform_weights: [f32; 3],
    pub disappear_delay: u32,
    pub reappear_delay: u32,
    pub moving_platform_speed: f32,
    pub moving_platform_distance: f32,
    pub min_live_platforms: usize,

    // === Power-ups ===
    pub power_up_size: f32,
    pub power_up_gap: f32,
    pub power_up_spawn_chance: f64,
    pub power_up_score_bonus: u64,
    pub high_jump_multiplier: f32,
    pub high_jump_duration: u32,

    // === Scoring ===
    pub score_per_height_unit: f32,
    pub height_score_interval: f32,
    pub height_score_multiplier: f32,
    pub max_height_multiplier: f32,

    // === Camera ===
    pub camera_player_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_acceleration: PLAYER_ACCELERATION,
            player_friction: PLAYER_FRICTION,
            player_stop_epsilon: PLAYER_STOP_EPSILON,
            jump_force: PLAYER_JUMP_FORCE,
            gravity: PLAYER_GRAVITY,
            fast_fall_multiplier: PLAYER_FAST_FALL_MULTIPLIER,
            jump_buffer_frames: JUMP_BUFFER_FRAMES,
            coyote_frames: COYOTE_FRAMES,

            start_platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            start_platform_margin: START_PLATFORM_MARGIN,
            platform_min_width: PLATFORM_MIN_WIDTH,
            platform_max_width: PLATFORM_MAX_WIDTH,
            min_platform_gap: MIN_PLATFORM_DISTANCE,
            max_platform_gap: MAX_PLATFORM_DISTANCE,
            platform_spread: PLATFORM_SPREAD,
            platform_weights: PLATFORM_WEIGHTS,
            disappear_delay: DISAPPEAR_DELAY,
            reappear_delay: REAPPEAR_DELAY,
            moving_platform_speed: MOVING_PLATFORM_SPEED,
            moving_platform_distance: MOVING_PLATFORM_DISTANCE,
            min_live_platforms: MIN_LIVE_PLATFORMS,

            power_up_size: POWER_UP_SIZE,
            power_up_gap: POWER_UP_GAP,
            power_up_spawn_chance: POWER_UP_SPAWN_CHANCE,
            power_up_score_bonus: POWER_UP_SCORE_BONUS,
            high_jump_multiplier: HIGH_JUMP_MULTIPLIER,
            high_jump_duration: HIGH_JUMP_DURATION,

            score_per_height_unit: SCORE_PER_HEIGHT_UNIT,
            height_score_interval: HEIGHT_SCORE_INTERVAL,
            height_score_multiplier: HEIGHT_SCORE_MULTIPLIER,
            max_height_multiplier: MAX_HEIGHT_MULTIPLIER,

            camera_player_offset: CAMERA_PLAYER_OFFSET,
        }
    }
}

impl Tuning {
    /// Parse tunables from JSON and validate them
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tunables from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a starter tuning file)
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Horizontal center of the viewport
    #[inline]
    pub fn screen_center_x(&self) -> f32 {
        self.screen_width / 2.0
    }

    /// Reject tunables the simulation cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("platform_height", self.platform_height)?;
        positive("start_platform_width", self.start_platform_width)?;
        positive("power_up_size", self.power_up_size)?;
        positive("height_score_interval", self.height_score_interval)?;
        non_negative("player_speed", self.player_speed)?;
        non_negative("gravity", self.gravity)?;
        non_negative("moving_platform_speed", self.moving_platform_speed)?;
        non_negative("moving_platform_distance", self.moving_platform_distance)?;
        non_negative("score_per_height_unit", self.score_per_height_unit)?;

        if !(0.0..=1.0).contains(&self.player_friction) {
            return Err(ConfigError::InvalidValue {
                name: "player_friction",
                reason: format!("{} is outside [0, 1]", self.player_friction),
            });
        }
        if !self.jump_force.is_finite() || self.jump_force >= 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "jump_force",
                reason: format!("{} must be negative (up)", self.jump_force),
            });
        }

        range(
            "platform_width",
            self.platform_min_width,
            self.platform_max_width,
        )?;
        positive("platform_min_width", self.platform_min_width)?;
        if self.platform_max_width > self.screen_width {
            return Err(ConfigError::InvalidValue {
                name: "platform_max_width",
                reason: format!(
                    "{} does not fit a {} wide screen",
                    self.platform_max_width, self.screen_width
                ),
            });
        }
        range("platform_gap", self.min_platform_gap, self.max_platform_gap)?;
        positive("min_platform_gap", self.min_platform_gap)?;
        if !(0.0..=self.screen_height).contains(&self.start_platform_margin) {
            return Err(ConfigError::InvalidValue {
                name: "start_platform_margin",
                reason: format!(
                    "{} is outside [0, {}]",
                    self.start_platform_margin, self.screen_height
                ),
            });
        }

        if !self.platform_spread.is_finite() || self.platform_spread < 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "platform_spread",
                reason: format!("{} must be finite and >= 0", self.platform_spread),
            });
        }
        if self.platform_weights.iter().any(|w| !w.is_finite() || *w < 0.0)
            || self.platform_weights.iter().sum::<f32>() <= 0.0
        {
            return Err(ConfigError::InvalidValue {
                name: "platform_weights",
                reason: format!("{:?} must be non-negative with a positive sum", self.platform_weights),
            });
        }
        if !(0.0..=1.0).contains(&self.power_up_spawn_chance) {
            return Err(ConfigError::InvalidProbability {
                name: "power_up_spawn_chance",
                value: self.power_up_spawn_chance,
            });
        }
        if self.max_height_multiplier < 1.0 || self.height_score_multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                name: "height_score_multiplier",
                reason: format!(
                    "growth {} and cap {} must both be >= 1",
                    self.height_score_multiplier, self.max_height_multiplier
                ),
            });
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            reason: format!("{value} must be > 0"),
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            reason: format!("{value} must be >= 0"),
        })
    }
}

fn range(name: &'static str, min: f32, max: f32) -> ConfigResult<()> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, min, max })
    }
}
