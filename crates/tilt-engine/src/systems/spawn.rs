//! Initial ball population: random layout or an explicit list from config.

use glam::Vec2;

use crate::api::config::{BallSpec, SimConfig};
use crate::api::error::{ConfigError, ConfigResult};
use crate::api::types::BallId;
use crate::components::ball::{Ball, BallColor};
use crate::core::arena::Arena;
use crate::systems::rng::Rng;

/// Coordinate in `[radius, extent - radius)`, or the centre when the
/// ball does not fit on this axis.
fn place_on_axis(rng: &mut Rng, extent: f32, radius: f32) -> f32 {
    if extent > 2.0 * radius {
        rng.range(radius, extent - radius)
    } else {
        extent / 2.0
    }
}

fn random_color(rng: &mut Rng) -> BallColor {
    BallColor::from_rgb8(rng.next_u8(), rng.next_u8(), rng.next_u8())
}

/// Spawn `config.ball_count` balls with random radius, position, velocity
/// and color. Positions never start across a wall.
pub fn spawn_random(config: &SimConfig, arena: &Arena, rng: &mut Rng) -> ConfigResult<Vec<Ball>> {
    let mut balls = Vec::with_capacity(config.ball_count);
    for i in 0..config.ball_count {
        let radius = rng.range(config.radius_min, config.radius_max);
        let pos = Vec2::new(
            place_on_axis(rng, arena.width(), radius),
            place_on_axis(rng, arena.height(), radius),
        );
        let vel = Vec2::new(
            rng.range(config.spawn_speed_min, config.spawn_speed_max),
            rng.range(config.spawn_speed_min, config.spawn_speed_max),
        );
        let ball = Ball::new(BallId(i as u32), pos, radius)?
            .with_vel(vel)
            .with_color(random_color(rng));
        balls.push(ball);
    }
    Ok(balls)
}

/// Build balls from explicit specs. Missing colors are drawn from `rng`.
pub fn spawn_from_specs(specs: &[BallSpec], rng: &mut Rng) -> ConfigResult<Vec<Ball>> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            if ![spec.x, spec.y, spec.vx, spec.vy].iter().all(|v| v.is_finite()) {
                return Err(ConfigError::NonFiniteBall { index: i });
            }
            let color = match spec.color {
                Some([r, g, b]) => BallColor::new(r, g, b),
                None => random_color(rng),
            };
            Ok(Ball::new(BallId(i as u32), Vec2::new(spec.x, spec.y), spec.radius)?
                .with_vel(Vec2::new(spec.vx, spec.vy))
                .with_color(color))
        })
        .collect()
}
