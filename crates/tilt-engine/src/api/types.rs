use bytemuck::{Pod, Zeroable};

/// Stable identifier for a ball. Assigned at spawn, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BallId(pub u32);

/// What produced an impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactKind {
    /// A ball bounced off one or two walls.
    Wall,
    /// Two balls collided.
    Pair,
}

impl ImpactKind {
    pub const WALL: f32 = 1.0;
    pub const PAIR: f32 = 2.0;

    fn code(self) -> f32 {
        match self {
            ImpactKind::Wall => Self::WALL,
            ImpactKind::Pair => Self::PAIR,
        }
    }
}

/// An impact to be forwarded to the haptic collaborator.
/// Wire format: `kind, ball_a, ball_b, impact` as f32.
/// `ball_b` is -1.0 for wall impacts.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ImpactEvent {
    pub kind: f32,
    pub ball_a: f32,
    pub ball_b: f32,
    pub impact: f32,
}

impl ImpactEvent {
    pub const FLOATS: usize = 4;

    pub fn wall(ball: BallId, impact: f32) -> Self {
        Self {
            kind: ImpactKind::Wall.code(),
            ball_a: ball.0 as f32,
            ball_b: -1.0,
            impact,
        }
    }

    pub fn pair(a: BallId, b: BallId, impact: f32) -> Self {
        Self {
            kind: ImpactKind::Pair.code(),
            ball_a: a.0 as f32,
            ball_b: b.0 as f32,
            impact,
        }
    }

    pub fn kind(&self) -> ImpactKind {
        if self.kind == ImpactKind::PAIR {
            ImpactKind::Pair
        } else {
            ImpactKind::Wall
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_event_is_16_bytes() {
        assert_eq!(std::mem::size_of::<ImpactEvent>(), ImpactEvent::FLOATS * 4);
    }

    #[test]
    fn wall_event_has_no_second_ball() {
        let e = ImpactEvent::wall(BallId(3), 42.0);
        assert_eq!(e.kind(), ImpactKind::Wall);
        assert_eq!(e.ball_a, 3.0);
        assert_eq!(e.ball_b, -1.0);
        assert_eq!(e.impact, 42.0);
    }

    #[test]
    fn pair_event_round_trips_kind() {
        let e = ImpactEvent::pair(BallId(1), BallId(4), 25.0);
        assert_eq!(e.kind(), ImpactKind::Pair);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&e));
        assert_eq!(floats, &[ImpactKind::PAIR, 1.0, 4.0, 25.0]);
    }
}
