//! Shared-buffer layout read by the host page.
//! Must stay in sync with the TypeScript reader.
//!
//! Layout (all values f32 / 4 bytes):
//! ```text
//! [Header: 12 floats]
//! [Balls:  max_balls × 8 floats]
//! [Pulses: max_pulses × 4 floats]
//! ```
//!
//! Capacities are written into the header, so the reader computes offsets
//! from the buffer itself.

use crate::api::config::SimConfig;
use crate::renderer::frame::BallInstance;
use crate::systems::haptics::PulseRecord;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_BALLS: usize = 2;
pub const HEADER_BALL_COUNT: usize = 3;
pub const HEADER_MAX_PULSES: usize = 4;
pub const HEADER_PULSE_COUNT: usize = 5;
pub const HEADER_WORLD_WIDTH: usize = 6;
pub const HEADER_WORLD_HEIGHT: usize = 7;
pub const HEADER_GRAVITY_X: usize = 8;
pub const HEADER_GRAVITY_Y: usize = 9;
pub const HEADER_TICKS_RUN: usize = 10;
pub const HEADER_PROTOCOL_VERSION: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Per-frame header values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame_counter: u32,
    pub world_width: f32,
    pub world_height: f32,
    pub gravity_x: f32,
    pub gravity_y: f32,
    /// Physics ticks run since the previous host frame.
    pub ticks_run: u32,
}

/// Buffer layout derived from capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_balls: usize,
    pub max_pulses: usize,

    pub ball_data_floats: usize,
    pub pulse_data_floats: usize,

    pub ball_data_offset: usize,
    pub pulse_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_balls: usize, max_pulses: usize) -> Self {
        let ball_data_floats = max_balls * BallInstance::FLOATS;
        let pulse_data_floats = max_pulses * PulseRecord::FLOATS;

        let ball_data_offset = HEADER_FLOATS;
        let pulse_data_offset = ball_data_offset + ball_data_floats;
        let buffer_total_floats = pulse_data_offset + pulse_data_floats;

        Self {
            max_balls,
            max_pulses,
            ball_data_floats,
            pulse_data_floats,
            ball_data_offset,
            pulse_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Pulses can come from every tick run in one host frame, so the pulse
    /// section holds `max_events` per tick for up to `ticks_per_frame` ticks.
    pub fn from_config(config: &SimConfig, ticks_per_frame: usize) -> Self {
        Self::new(config.max_balls, config.max_events * ticks_per_frame)
    }

    /// Allocate a zeroed buffer of the right size.
    pub fn alloc(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }

    /// Write one frame into `buf`. Balls and pulses beyond capacity are
    /// dropped. Returns `(balls_written, pulses_written)`.
    pub fn write(
        &self,
        buf: &mut [f32],
        header: &FrameHeader,
        balls: &[BallInstance],
        pulses: &[PulseRecord],
    ) -> (usize, usize) {
        debug_assert!(buf.len() >= self.buffer_total_floats);
        let ball_count = balls.len().min(self.max_balls);
        let pulse_count = pulses.len().min(self.max_pulses);

        let ball_floats: &[f32] = bytemuck::cast_slice(&balls[..ball_count]);
        buf[self.ball_data_offset..self.ball_data_offset + ball_floats.len()]
            .copy_from_slice(ball_floats);

        let pulse_floats: &[f32] = bytemuck::cast_slice(&pulses[..pulse_count]);
        buf[self.pulse_data_offset..self.pulse_data_offset + pulse_floats.len()]
            .copy_from_slice(pulse_floats);

        buf[HEADER_FRAME_COUNTER] = header.frame_counter as f32;
        buf[HEADER_MAX_BALLS] = self.max_balls as f32;
        buf[HEADER_BALL_COUNT] = ball_count as f32;
        buf[HEADER_MAX_PULSES] = self.max_pulses as f32;
        buf[HEADER_PULSE_COUNT] = pulse_count as f32;
        buf[HEADER_WORLD_WIDTH] = header.world_width;
        buf[HEADER_WORLD_HEIGHT] = header.world_height;
        buf[HEADER_GRAVITY_X] = header.gravity_x;
        buf[HEADER_GRAVITY_Y] = header.gravity_y;
        buf[HEADER_TICKS_RUN] = header.ticks_run as f32;
        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;

        (ball_count, pulse_count)
    }
}
