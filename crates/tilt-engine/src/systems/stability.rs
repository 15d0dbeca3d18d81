use glam::Vec2;

use crate::components::ball::Ball;

/// Zero out velocities below `threshold`. A hard clamp, not a decay.
/// Returns the number of balls that were brought to rest this call.
pub fn settle(balls: &mut [Ball], threshold: f32) -> usize {
    let mut settled = 0;
    for ball in balls.iter_mut() {
        if ball.vel.length() < threshold {
            if ball.vel != Vec2::ZERO {
                settled += 1;
            }
            ball.vel = Vec2::ZERO;
        }
    }
    settled
}
