use glam::Vec2;

use crate::components::ball::Ball;

/// Advance every ball by one tick.
///
/// Order is fixed: gravity, then damping, then position. The damped
/// velocity is already a per-tick displacement and is added to the
/// position as-is.
pub fn integrate(balls: &mut [Ball], gravity: Vec2, dt: f32, friction: f32) {
    let dv = gravity * dt;
    for ball in balls.iter_mut() {
        ball.vel += dv;
        ball.vel *= friction;
        ball.pos += ball.vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BallId;

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        Ball::new(BallId(0), pos, 10.0).unwrap().with_vel(vel)
    }

    #[test]
    fn gravity_then_damping_then_position() {
        let mut balls = [ball_at(Vec2::new(100.0, 100.0), Vec2::new(2.0, 0.0))];
        integrate(&mut balls, Vec2::new(0.0, 10.0), 0.5, 0.5);

        // vel = ((2, 0) + (0, 5)) * 0.5
        assert_eq!(balls[0].vel, Vec2::new(1.0, 2.5));
        // pos += damped vel, no second dt
        assert_eq!(balls[0].pos, Vec2::new(101.0, 102.5));
    }

    #[test]
    fn unit_friction_and_zero_gravity_is_pure_drift() {
        let mut balls = [ball_at(Vec2::ZERO, Vec2::new(-5.0, 3.0))];
        integrate(&mut balls, Vec2::ZERO, 1.0, 1.0);
        assert_eq!(balls[0].vel, Vec2::new(-5.0, 3.0));
        assert_eq!(balls[0].pos, Vec2::new(-5.0, 3.0));
    }

    #[test]
    fn applies_to_every_ball() {
        let mut balls = [
            ball_at(Vec2::ZERO, Vec2::ZERO),
            ball_at(Vec2::new(50.0, 50.0), Vec2::ZERO),
        ];
        integrate(&mut balls, Vec2::new(1.0, 0.0), 1.0, 1.0);
        assert_eq!(balls[0].pos, Vec2::new(1.0, 0.0));
        assert_eq!(balls[1].pos, Vec2::new(51.0, 50.0));
    }

    #[test]
    fn empty_store_is_a_no_op() {
        let mut balls: [Ball; 0] = [];
        integrate(&mut balls, Vec2::new(0.0, 9.8), 1.0, 0.98);
    }
}
