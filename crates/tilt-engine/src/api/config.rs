use serde::Deserialize;

use crate::api::error::{ConfigError, ConfigResult};

/// Tunables for one simulation. Every physics constant lives here;
/// nothing in the systems is hard-coded.
///
/// Loadable from JSON; missing fields fall back to [`SimConfig::default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Target tick rate in Hz (default: 120).
    pub frame_rate: f32,
    /// Step applied to gravity each tick: `vel += gravity * dt` (default: 1.0).
    pub dt: f32,
    /// Per-tick multiplicative velocity decay, in (0, 1] (default: 0.98).
    pub friction: f32,
    /// Fraction of normal speed kept after a bounce, in (0, 1] (default: 0.8).
    pub restitution: f32,
    /// Wall impacts strictly above this emit a haptic event (default: 20).
    pub wall_impact_threshold: f32,
    /// Pair impacts strictly above this emit a haptic event when
    /// `pair_haptics` is on (default: 20).
    pub pair_impact_threshold: f32,
    /// Overlap depth tolerated before two balls count as colliding (default: 20).
    pub pair_epsilon: f32,
    /// Speeds below this are clamped to zero after each tick (default: 0.5).
    pub rest_speed_threshold: f32,
    /// Emit haptic events for ball-ball collisions (default: off).
    pub pair_haptics: bool,
    /// Arena width in world units.
    pub arena_width: f32,
    /// Arena height in world units.
    pub arena_height: f32,
    /// Number of randomly spawned balls, ignored when `balls` is non-empty.
    pub ball_count: usize,
    /// Random radius range `[radius_min, radius_max)`.
    pub radius_min: f32,
    pub radius_max: f32,
    /// Random per-axis spawn velocity range `[spawn_speed_min, spawn_speed_max)`.
    pub spawn_speed_min: f32,
    pub spawn_speed_max: f32,
    /// Seed for the spawn PRNG.
    pub seed: u64,
    /// Capacity of the frame buffer (default: 64).
    pub max_balls: usize,
    /// Maximum impact events kept per tick (default: 64).
    pub max_events: usize,
    /// Explicit initial balls. When non-empty, replaces random spawning.
    pub balls: Vec<BallSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frame_rate: 120.0,
            dt: 1.0,
            friction: 0.98,
            restitution: 0.8,
            wall_impact_threshold: 20.0,
            pair_impact_threshold: 20.0,
            pair_epsilon: 20.0,
            rest_speed_threshold: 0.5,
            pair_haptics: false,
            arena_width: 1080.0,
            arena_height: 1920.0,
            ball_count: 6,
            radius_min: 70.0,
            radius_max: 100.0,
            spawn_speed_min: -10.0,
            spawn_speed_max: 11.0,
            seed: 42,
            max_balls: 64,
            max_events: 64,
            balls: Vec::new(),
        }
    }
}

/// Initial state of one explicitly placed ball.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BallSpec {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
    pub radius: f32,
    /// RGB in [0, 1]. Random when absent.
    #[serde(default)]
    pub color: Option<[f32; 3]>,
}

fn check_threshold(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

fn check_unit_interval(value: f32) -> bool {
    value.is_finite() && value > 0.0 && value <= 1.0
}

impl SimConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Fixed tick period in seconds.
    pub fn tick_period(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Number of balls the simulation will be built with.
    pub fn population(&self) -> usize {
        if self.balls.is_empty() {
            self.ball_count
        } else {
            self.balls.len()
        }
    }

    /// Reject configurations that cannot be simulated.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(ConfigError::InvalidFrameRate(self.frame_rate));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidTimestep(self.dt));
        }
        if !check_unit_interval(self.friction) {
            return Err(ConfigError::InvalidFriction(self.friction));
        }
        if !check_unit_interval(self.restitution) {
            return Err(ConfigError::InvalidRestitution(self.restitution));
        }
        check_threshold("wall_impact_threshold", self.wall_impact_threshold)?;
        check_threshold("pair_impact_threshold", self.pair_impact_threshold)?;
        check_threshold("pair_epsilon", self.pair_epsilon)?;
        check_threshold("rest_speed_threshold", self.rest_speed_threshold)?;

        if !(self.arena_width.is_finite()
            && self.arena_height.is_finite()
            && self.arena_width > 0.0
            && self.arena_height > 0.0)
        {
            return Err(ConfigError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }

        if self.balls.is_empty() {
            if !(self.radius_min.is_finite()
                && self.radius_max.is_finite()
                && self.radius_min > 0.0
                && self.radius_min < self.radius_max)
            {
                return Err(ConfigError::InvalidRadiusRange {
                    min: self.radius_min,
                    max: self.radius_max,
                });
            }
            if !(self.spawn_speed_min.is_finite()
                && self.spawn_speed_max.is_finite()
                && self.spawn_speed_min < self.spawn_speed_max)
            {
                return Err(ConfigError::InvalidSpeedRange {
                    min: self.spawn_speed_min,
                    max: self.spawn_speed_max,
                });
            }
        } else {
            for (index, spec) in self.balls.iter().enumerate() {
                if !(spec.radius.is_finite() && spec.radius > 0.0) {
                    return Err(ConfigError::InvalidRadius(spec.radius));
                }
                if ![spec.x, spec.y, spec.vx, spec.vy].iter().all(|v| v.is_finite()) {
                    return Err(ConfigError::NonFiniteBall { index });
                }
            }
        }

        let count = self.population();
        if count > self.max_balls {
            return Err(ConfigError::TooManyBalls { count, max: self.max_balls });
        }
        Ok(())
    }
}
