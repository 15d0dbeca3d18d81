use glam::Vec2;

use crate::api::error::{ConfigError, ConfigResult};
use crate::api::types::BallId;

/// RGB color for drawing a ball. Not read by the physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BallColor {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }
}

impl Default for BallColor {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// A simulated ball.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Stable identifier.
    pub id: BallId,
    /// Centre in world space.
    pub pos: Vec2,
    /// Velocity in world units per tick.
    pub vel: Vec2,
    /// Fixed at creation, always > 0.
    radius: f32,
    pub color: BallColor,
    /// Reserved for an energy-based sleep pass. Not read by any system.
    pub sleeping: bool,
    /// Reserved alongside `sleeping`.
    pub frames_below_threshold: u32,
}

impl Ball {
    /// Create a ball at rest at `pos`. Fails if `radius` is not a positive finite number.
    pub fn new(id: BallId, pos: Vec2, radius: f32) -> ConfigResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius));
        }
        Ok(Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            color: BallColor::default(),
            sleeping: false,
            frames_below_threshold: 0,
        })
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_color(mut self, color: BallColor) -> Self {
        self.color = color;
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
