use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;

/// Gravity vector shared between a sensor producer and the tick.
///
/// Both components are packed into one `AtomicU64`, so a reader always sees
/// a pair written by a single `set` call.
#[derive(Debug)]
pub struct GravityCell {
    bits: AtomicU64,
}

fn pack(g: Vec2) -> u64 {
    ((g.x.to_bits() as u64) << 32) | g.y.to_bits() as u64
}

fn unpack(bits: u64) -> Vec2 {
    Vec2::new(f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

impl GravityCell {
    pub fn new(initial: Vec2) -> Self {
        Self {
            bits: AtomicU64::new(pack(initial)),
        }
    }

    /// Replace the gravity vector. Callable from any thread at any time.
    pub fn set(&self, gx: f32, gy: f32) {
        self.bits.store(pack(Vec2::new(gx, gy)), Ordering::Release);
    }

    /// Latest gravity vector.
    pub fn get(&self) -> Vec2 {
        unpack(self.bits.load(Ordering::Acquire))
    }
}

impl Default for GravityCell {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}
