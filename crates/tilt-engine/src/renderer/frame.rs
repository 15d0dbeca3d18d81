use bytemuck::{Pod, Zeroable};

use crate::components::ball::Ball;

/// Per-ball draw data handed to the renderer once per tick.
/// 8 floats = 32 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&Ball> for BallInstance {
    fn from(ball: &Ball) -> Self {
        Self {
            x: ball.pos.x,
            y: ball.pos.y,
            radius: ball.radius(),
            r: ball.color.r,
            g: ball.color.g,
            b: ball.color.b,
            _pad0: 0.0,
            _pad1: 0.0,
        }
    }
}

/// Read-only snapshot of every ball after the latest tick.
pub struct FrameBuffer {
    instances: Vec<BallInstance>,
    /// Tick that produced this frame.
    tick: u64,
}

impl FrameBuffer {
    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            tick: 0,
        }
    }

    /// Rebuild from the current ball states.
    pub fn rebuild<'a>(&mut self, balls: impl Iterator<Item = &'a Ball>, tick: u64) {
        self.instances.clear();
        self.instances.extend(balls.map(BallInstance::from));
        self.tick = tick;
    }

    pub fn instances(&self) -> &[BallInstance] {
        &self.instances
    }

    /// Flat float view, `FLOATS` per ball.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}
