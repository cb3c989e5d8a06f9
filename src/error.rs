//! Configuration error types.
//!
//! The simulation has no runtime errors; everything here is raised while
//! loading or validating tunables, before the first frame.

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by malformed tunables.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A `[min, max]` range with `min > max` (or a non-finite bound).
    #[error("invalid range for {name}: min {min} > max {max}")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// A probability outside `[0, 1]`.
    #[error("invalid probability for {name}: {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// Any other out-of-domain scalar.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    /// A sampling distribution rejected its parameters.
    #[error("invalid distribution for {name}: {reason}")]
    Distribution { name: &'static str, reason: String },

    /// Tuning file could not be read.
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning file is not valid JSON for [`crate::Tuning`].
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}
