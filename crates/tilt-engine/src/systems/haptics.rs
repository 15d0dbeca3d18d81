//! Impact magnitude to actuator pulse.
//!
//! Presentation curve layered over the physics impact value. The engine
//! only produces impacts; hosts call [`HapticPulse::from_impact`] when they
//! drive a vibration motor.

use bytemuck::{Pod, Zeroable};

/// Divisor applied to the cubed impact.
pub const IMPACT_CURVE_DIVISOR: f32 = 2000.0;
/// Amplitude range accepted by the actuator.
pub const MIN_AMPLITUDE: f32 = 1.0;
pub const MAX_AMPLITUDE: f32 = 255.0;

/// One vibration command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HapticPulse {
    /// Actuator strength, 1..=255.
    pub amplitude: u8,
    /// Pulse length in milliseconds.
    pub duration_ms: u32,
}

impl HapticPulse {
    /// Map an impact through the fixed curve:
    /// `raw = impact³ / 2000`, amplitude `= clamp(raw, 1, 255)`,
    /// duration `= (clamp(255 - raw, 0, 100) / 30 + 1)²`.
    pub fn from_impact(impact: f32) -> Self {
        let raw = impact.abs().powi(3) / IMPACT_CURVE_DIVISOR;
        let amplitude = raw.clamp(MIN_AMPLITUDE, MAX_AMPLITUDE) as u8;
        let base = (MAX_AMPLITUDE - raw).clamp(0.0, 100.0) / 30.0 + 1.0;
        Self {
            amplitude,
            duration_ms: (base * base).round() as u32,
        }
    }

    pub fn to_wire(self, impact: f32) -> PulseRecord {
        PulseRecord {
            amplitude: self.amplitude as f32,
            duration_ms: self.duration_ms as f32,
            impact,
            _pad: 0.0,
        }
    }
}

/// Wire format of a pulse in the shared buffer: 4 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PulseRecord {
    pub amplitude: f32,
    pub duration_ms: f32,
    pub impact: f32,
    pub _pad: f32,
}

impl PulseRecord {
    pub const FLOATS: usize = 4;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_impact_gets_minimum_amplitude_and_long_pulse() {
        // raw = 8000 / 2000 = 4
        let pulse = HapticPulse::from_impact(20.0);
        assert_eq!(pulse.amplitude, 4);
        // (100 / 30 + 1)^2 = 18.78
        assert_eq!(pulse.duration_ms, 19);

        let pulse = HapticPulse::from_impact(1.0);
        assert_eq!(pulse.amplitude, 1);
    }

    #[test]
    fn strong_impact_saturates_and_shortens() {
        // raw = 512000 / 2000 = 256 > 255
        let pulse = HapticPulse::from_impact(80.0);
        assert_eq!(pulse.amplitude, 255);
        assert_eq!(pulse.duration_ms, 1);
    }

    #[test]
    fn mid_impact_uses_partial_window() {
        // raw = 216000 / 2000 = 108; 255 - 108 = 147 -> clamped to 100
        let pulse = HapticPulse::from_impact(60.0);
        assert_eq!(pulse.amplitude, 108);
        assert_eq!(pulse.duration_ms, 19);

        // raw = 343000 / 2000 = 171.5; 255 - 171.5 = 83.5; (83.5/30 + 1)^2 = 14.31
        let pulse = HapticPulse::from_impact(70.0);
        assert_eq!(pulse.amplitude, 171);
        assert_eq!(pulse.duration_ms, 14);
    }

    #[test]
    fn wire_record_is_16_bytes() {
        assert_eq!(std::mem::size_of::<PulseRecord>(), PulseRecord::FLOATS * 4);
        let rec = HapticPulse::from_impact(80.0).to_wire(80.0);
        assert_eq!(rec.amplitude, 255.0);
        assert_eq!(rec.impact, 80.0);
    }
}
