use crate::api::error::{ConfigError, ConfigResult};

/// Fixed timestep accumulator.
/// Turns variable host frame times into a whole number of physics ticks.
pub struct FixedTimestep {
    /// Seconds per tick.
    period: f32,
    /// Host time not yet consumed by a tick.
    accumulator: f32,
}

/// Maximum ticks run for one host frame. Longer stalls are dropped.
pub const MAX_STEPS_PER_FRAME: u32 = 10;

impl FixedTimestep {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            accumulator: 0.0,
        }
    }

    /// Timestep for a tick rate in Hz. Rejects non-positive rates.
    pub fn from_rate(hz: f32) -> ConfigResult<Self> {
        if !(hz.is_finite() && hz > 0.0) {
            return Err(ConfigError::InvalidFrameRate(hz));
        }
        Ok(Self::new(1.0 / hz))
    }

    /// Add host frame time. Returns the number of ticks to run now.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.period * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.accumulator / self.period) as u32;
        self.accumulator -= steps as f32 * self.period;
        steps
    }

    /// How far the host is into the next tick (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.period
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::from_rate(120.0).unwrap();
        assert_eq!(ts.accumulate(1.0 / 120.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::from_rate(120.0).unwrap();
        assert_eq!(ts.accumulate(0.004), 0);
        assert_eq!(ts.accumulate(0.005), 1);
    }

    #[test]
    fn sixty_hz_display_runs_two_ticks() {
        let mut ts = FixedTimestep::from_rate(120.0).unwrap();
        assert_eq!(ts.accumulate(1.0 / 60.0), 2);
    }

    #[test]
    fn caps_long_stalls() {
        let mut ts = FixedTimestep::from_rate(120.0).unwrap();
        assert_eq!(ts.accumulate(1.0), MAX_STEPS_PER_FRAME);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::from_rate(120.0).unwrap();
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn rejects_bad_rate() {
        assert!(FixedTimestep::from_rate(0.0).is_err());
        assert!(FixedTimestep::from_rate(-60.0).is_err());
    }
}
