use glam::Vec2;

use crate::api::error::{ConfigError, ConfigResult};

/// Rectangular play area `[0, width] x [0, height]`, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    width: f32,
    height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> ConfigResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether a circle lies fully inside, touching edges allowed.
    pub fn contains(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= 0.0
            && pos.x + radius <= self.width
            && pos.y - radius >= 0.0
            && pos.y + radius <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(Arena::new(0.0, 100.0).is_err());
        assert!(Arena::new(100.0, -1.0).is_err());
        assert!(Arena::new(f32::NAN, 100.0).is_err());
        assert!(Arena::new(500.0, 800.0).is_ok());
    }

    #[test]
    fn contains_checks_all_edges() {
        let arena = Arena::new(500.0, 800.0).unwrap();
        assert!(arena.contains(Vec2::new(80.0, 80.0), 80.0));
        assert!(!arena.contains(Vec2::new(79.0, 400.0), 80.0));
        assert!(!arena.contains(Vec2::new(250.0, 721.0), 80.0));
    }
}
