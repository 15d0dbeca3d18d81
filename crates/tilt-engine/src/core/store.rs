use crate::api::types::BallId;
use crate::components::ball::Ball;

/// Fixed-population ball storage using a flat Vec.
/// Balls are added once at build time; ticks only mutate them in place.
pub struct BodyStore {
    balls: Vec<Ball>,
}

impl BodyStore {
    pub fn new(balls: Vec<Ball>) -> Self {
        Self { balls }
    }

    /// Get a ball by ID.
    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    /// Get a ball by ID (mutable).
    pub fn get_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn as_slice(&self) -> &[Ball] {
        &self.balls
    }

    /// Mutable view for the systems. The slice cannot grow or shrink.
    pub fn as_mut_slice(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn store() -> BodyStore {
        BodyStore::new(vec![
            Ball::new(BallId(0), Vec2::new(100.0, 100.0), 10.0).unwrap(),
            Ball::new(BallId(1), Vec2::new(200.0, 100.0), 20.0).unwrap(),
        ])
    }

    #[test]
    fn lookup_by_id() {
        let store = store();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(BallId(1)).unwrap().radius(), 20.0);
        assert!(store.get(BallId(7)).is_none());
    }

    #[test]
    fn mutation_keeps_identity() {
        let mut store = store();
        for ball in store.as_mut_slice() {
            ball.pos += Vec2::new(1.0, 0.0);
        }
        store.get_mut(BallId(0)).unwrap().vel = Vec2::new(5.0, 0.0);
        let ids: Vec<_> = store.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![BallId(0), BallId(1)]);
        assert_eq!(store.get(BallId(0)).unwrap().pos.x, 101.0);
        assert_eq!(store.get(BallId(0)).unwrap().vel.x, 5.0);
    }
}
