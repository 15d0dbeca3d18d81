//! Wall collisions against the arena rectangle.
//!
//! Each axis is checked once per tick: left before right, top before
//! bottom, never both. A hit clamps the centre onto the wall and reflects
//! that velocity component scaled by restitution.

use crate::api::types::BallId;
use crate::components::ball::Ball;
use crate::core::arena::Arena;

/// Which wall a ball touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// One ball's wall hits for a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    pub ball: BallId,
    /// Left or right wall, if hit.
    pub x_wall: Option<Wall>,
    /// Top or bottom wall, if hit.
    pub y_wall: Option<Wall>,
    /// Largest per-axis velocity change (not the sum).
    pub impact: f32,
}

/// Reflect one velocity component. Returns the new value and the impact.
fn reflect(v: f32, restitution: f32) -> (f32, f32) {
    let after = -v * restitution;
    (after, (after - v).abs())
}

/// Resolve one ball against all four walls.
/// Returns `None` when the ball did not touch a wall.
pub fn resolve_ball(ball: &mut Ball, arena: &Arena, restitution: f32) -> Option<WallContact> {
    let r = ball.radius();
    let mut x_wall = None;
    let mut y_wall = None;
    let mut impact_x = 0.0_f32;
    let mut impact_y = 0.0_f32;

    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        x_wall = Some(Wall::Left);
    } else if ball.pos.x + r > arena.width() {
        ball.pos.x = arena.width() - r;
        x_wall = Some(Wall::Right);
    }
    if x_wall.is_some() {
        let (vx, impact) = reflect(ball.vel.x, restitution);
        ball.vel.x = vx;
        impact_x = impact;
    }

    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        y_wall = Some(Wall::Top);
    } else if ball.pos.y + r > arena.height() {
        ball.pos.y = arena.height() - r;
        y_wall = Some(Wall::Bottom);
    }
    if y_wall.is_some() {
        let (vy, impact) = reflect(ball.vel.y, restitution);
        ball.vel.y = vy;
        impact_y = impact;
    }

    if x_wall.is_none() && y_wall.is_none() {
        return None;
    }
    Some(WallContact {
        ball: ball.id,
        x_wall,
        y_wall,
        impact: impact_x.max(impact_y),
    })
}

/// Resolve every ball against the walls, appending one contact per ball that hit.
pub fn resolve_walls(
    balls: &mut [Ball],
    arena: &Arena,
    restitution: f32,
    contacts: &mut Vec<WallContact>,
) {
    for ball in balls.iter_mut() {
        if let Some(contact) = resolve_ball(ball, arena, restitution) {
            contacts.push(contact);
        }
    }
}
