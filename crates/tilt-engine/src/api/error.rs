//! Error types for building and reconfiguring a simulation.

use thiserror::Error;

/// Invalid configuration, rejected before any tick runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Frame rate must be finite and positive.
    #[error("invalid frame rate: {0} (must be > 0)")]
    InvalidFrameRate(f32),

    /// Gravity integration step must be finite and positive.
    #[error("invalid timestep: {0} (must be > 0)")]
    InvalidTimestep(f32),

    /// Friction factor outside (0, 1].
    #[error("invalid friction factor: {0} (must be in (0, 1])")]
    InvalidFriction(f32),

    /// Restitution outside (0, 1].
    #[error("invalid restitution: {0} (must be in (0, 1])")]
    InvalidRestitution(f32),

    /// A threshold or margin is negative or not finite.
    #[error("invalid {name}: {value} (must be >= 0)")]
    InvalidThreshold {
        /// Name of the offending field.
        name: &'static str,
        /// Value that was rejected.
        value: f32,
    },

    /// Ball radius must be finite and positive.
    #[error("invalid radius: {0} (must be > 0)")]
    InvalidRadius(f32),

    /// Random radius range is empty or non-positive.
    #[error("invalid radius range: [{min}, {max})")]
    InvalidRadiusRange {
        /// Lower bound (inclusive).
        min: f32,
        /// Upper bound (exclusive).
        max: f32,
    },

    /// Random spawn speed range is empty.
    #[error("invalid spawn speed range: [{min}, {max})")]
    InvalidSpeedRange {
        /// Lower bound (inclusive).
        min: f32,
        /// Upper bound (exclusive).
        max: f32,
    },

    /// Arena dimensions must be finite and positive.
    #[error("invalid arena size: {width} x {height}")]
    InvalidArena {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },

    /// A ball's position or velocity is not finite.
    #[error("ball {index} has a non-finite position or velocity")]
    NonFiniteBall {
        /// Index of the ball in the configured list.
        index: usize,
    },

    /// More balls than the frame buffer can hold.
    #[error("too many balls: {count} (max {max})")]
    TooManyBalls {
        /// Requested population.
        count: usize,
        /// Configured capacity.
        max: usize,
    },

    /// The native tick loop thread could not be started.
    #[error("failed to start tick loop: {0}")]
    Spawn(std::io::Error),

    /// Configuration JSON could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration and construction.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
