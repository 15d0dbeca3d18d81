//! Ball-ball collisions.
//!
//! Every unordered pair is visited once. Overlap shallower than the
//! epsilon margin is ignored so resting stacks do not buzz. A genuine
//! overlap is split evenly between the two balls, then the normal velocity
//! components are swapped and scaled by restitution. Tangential motion is
//! left alone.

use glam::Vec2;

use crate::api::types::BallId;
use crate::components::ball::Ball;

/// A resolved ball-ball collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairContact {
    pub a: BallId,
    pub b: BallId,
    /// Unit normal from `a` to `b`.
    pub normal: Vec2,
    /// Penetration depth before separation.
    pub overlap: f32,
    /// `|Δv_a| + |Δv_b|`.
    pub impact: f32,
}

/// Result of testing one pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    /// Apart, or overlapping by no more than the margin.
    Clear,
    /// Centres coincide; no normal exists, pair skipped this tick.
    Coincident,
    Resolved(PairContact),
}

/// Test and resolve a single pair.
pub fn resolve_pair(a: &mut Ball, b: &mut Ball, restitution: f32, epsilon: f32) -> PairOutcome {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius() + b.radius();

    if dist >= min_dist - epsilon {
        return PairOutcome::Clear;
    }
    if dist == 0.0 {
        return PairOutcome::Coincident;
    }

    let normal = delta / dist;
    let overlap = min_dist - dist;
    let push = normal * (overlap * 0.5);
    a.pos -= push;
    b.pos += push;

    let va = a.vel.dot(normal);
    let vb = b.vel.dot(normal);
    let dv_a = normal * (vb * restitution - va);
    let dv_b = normal * (va * restitution - vb);
    a.vel += dv_a;
    b.vel += dv_b;

    PairOutcome::Resolved(PairContact {
        a: a.id,
        b: b.id,
        normal,
        overlap,
        impact: dv_a.length() + dv_b.length(),
    })
}

/// Resolve all pairs `(i, j)` with `i < j`, appending each resolved contact.
/// Returns how many pairs were skipped for coincident centres.
pub fn resolve_pairs(
    balls: &mut [Ball],
    restitution: f32,
    epsilon: f32,
    contacts: &mut Vec<PairContact>,
) -> usize {
    let mut coincident = 0;
    let n = balls.len();
    for i in 0..n {
        let (head, tail) = balls.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            match resolve_pair(a, b, restitution, epsilon) {
                PairOutcome::Clear => {}
                PairOutcome::Coincident => {
                    log::debug!("balls {:?} and {:?} share a centre, skipping", a.id, b.id);
                    coincident += 1;
                }
                PairOutcome::Resolved(contact) => contacts.push(contact),
            }
        }
    }
    coincident
}
