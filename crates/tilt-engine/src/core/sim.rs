use std::sync::Arc;

use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::error::{ConfigError, ConfigResult};
use crate::api::types::ImpactEvent;
use crate::components::ball::Ball;
use crate::core::arena::Arena;
use crate::core::gravity::GravityCell;
use crate::core::store::BodyStore;
use crate::renderer::frame::FrameBuffer;
use crate::systems::boundary::{resolve_walls, WallContact};
use crate::systems::integrate::integrate;
use crate::systems::pairs::{resolve_pairs, PairContact};
use crate::systems::rng::Rng;
use crate::systems::spawn::{spawn_from_specs, spawn_random};
use crate::systems::stability::settle;

/// The whole simulated world: balls, arena, gravity input, and the
/// per-tick outputs (frame snapshot and impact events).
pub struct Simulation {
    config: SimConfig,
    arena: Arena,
    store: BodyStore,
    gravity: Arc<GravityCell>,
    frame: FrameBuffer,
    impacts: Vec<ImpactEvent>,
    wall_contacts: Vec<WallContact>,
    pair_contacts: Vec<PairContact>,
    tick_count: u64,
}

impl Simulation {
    /// Build from config: explicit `balls` if given, otherwise a random layout.
    pub fn new(config: SimConfig) -> ConfigResult<Self> {
        config.validate()?;
        let arena = Arena::new(config.arena_width, config.arena_height)?;
        let mut rng = Rng::new(config.seed);
        let balls = if config.balls.is_empty() {
            spawn_random(&config, &arena, &mut rng)?
        } else {
            spawn_from_specs(&config.balls, &mut rng)?
        };
        Self::from_balls(config, balls)
    }

    /// Build from an already constructed population.
    pub fn from_balls(config: SimConfig, balls: Vec<Ball>) -> ConfigResult<Self> {
        config.validate()?;
        if balls.len() > config.max_balls {
            return Err(ConfigError::TooManyBalls {
                count: balls.len(),
                max: config.max_balls,
            });
        }
        let arena = Arena::new(config.arena_width, config.arena_height)?;

        log::info!(
            "simulation: {} balls in {}x{} arena at {} Hz",
            balls.len(),
            arena.width(),
            arena.height(),
            config.frame_rate
        );

        let mut frame = FrameBuffer::with_capacity(config.max_balls);
        frame.rebuild(balls.iter(), 0);

        Ok(Self {
            impacts: Vec::with_capacity(config.max_events),
            wall_contacts: Vec::with_capacity(balls.len()),
            pair_contacts: Vec::new(),
            store: BodyStore::new(balls),
            gravity: Arc::new(GravityCell::default()),
            arena,
            frame,
            config,
            tick_count: 0,
        })
    }

    /// Run one fixed step: integrate, walls, pairs, settle, then publish
    /// the frame and this tick's impacts.
    pub fn tick(&mut self) {
        self.impacts.clear();
        self.wall_contacts.clear();
        self.pair_contacts.clear();

        let gravity = self.gravity.get();
        let balls = self.store.as_mut_slice();

        integrate(balls, gravity, self.config.dt, self.config.friction);
        resolve_walls(balls, &self.arena, self.config.restitution, &mut self.wall_contacts);
        resolve_pairs(
            balls,
            self.config.restitution,
            self.config.pair_epsilon,
            &mut self.pair_contacts,
        );
        settle(balls, self.config.rest_speed_threshold);

        self.tick_count += 1;
        self.emit_wall_impacts();
        self.emit_pair_impacts();
        self.frame.rebuild(self.store.iter(), self.tick_count);

        if !self.impacts.is_empty() {
            log::debug!("tick {}: {} impacts", self.tick_count, self.impacts.len());
        }
    }

    fn emit_wall_impacts(&mut self) {
        for i in 0..self.wall_contacts.len() {
            let contact = self.wall_contacts[i];
            if contact.impact > self.config.wall_impact_threshold {
                self.push_impact(ImpactEvent::wall(contact.ball, contact.impact));
            }
        }
    }

    /// Pair impacts are always computed; emission stays off unless
    /// `pair_haptics` is enabled.
    fn emit_pair_impacts(&mut self) {
        if !self.config.pair_haptics {
            return;
        }
        for i in 0..self.pair_contacts.len() {
            let contact = self.pair_contacts[i];
            if contact.impact > self.config.pair_impact_threshold {
                self.push_impact(ImpactEvent::pair(contact.a, contact.b, contact.impact));
            }
        }
    }

    fn push_impact(&mut self, event: ImpactEvent) {
        if self.impacts.len() >= self.config.max_events {
            log::warn!(
                "tick {}: impact queue full ({}), dropping event",
                self.tick_count,
                self.config.max_events
            );
            return;
        }
        self.impacts.push(event);
    }

    /// Replace the gravity vector read by the next tick.
    pub fn set_gravity(&self, gx: f32, gy: f32) {
        self.gravity.set(gx, gy);
    }

    /// Shared handle for a producer on another thread.
    pub fn gravity_cell(&self) -> Arc<GravityCell> {
        Arc::clone(&self.gravity)
    }

    /// Change the arena. Balls are not moved; the next tick's wall pass
    /// pushes any outside ball back in. Invalid sizes keep the old arena.
    pub fn resize(&mut self, width: f32, height: f32) -> ConfigResult<()> {
        self.arena = Arena::new(width, height)?;
        self.config.arena_width = width;
        self.config.arena_height = height;
        log::info!("arena resized to {}x{}", width, height);
        Ok(())
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn balls(&self) -> &[Ball] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &BodyStore {
        &self.store
    }

    /// Snapshot produced by the latest tick.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Haptic impacts produced by the latest tick.
    pub fn impacts(&self) -> &[ImpactEvent] {
        &self.impacts
    }

    pub fn wall_contacts(&self) -> &[WallContact] {
        &self.wall_contacts
    }

    pub fn pair_contacts(&self) -> &[PairContact] {
        &self.pair_contacts
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Current gravity as the next tick will see it.
    pub fn gravity(&self) -> Vec2 {
        self.gravity.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::BallSpec;
    use crate::api::types::{BallId, ImpactKind};

    fn spec(x: f32, y: f32, vx: f32, vy: f32, radius: f32) -> BallSpec {
        BallSpec { x, y, vx, vy, radius, color: None }
    }

    fn config_with(balls: Vec<BallSpec>) -> SimConfig {
        SimConfig {
            arena_width: 500.0,
            arena_height: 800.0,
            friction: 1.0,
            restitution: 0.8,
            balls,
            ..Default::default()
        }
    }

    #[test]
    fn builds_random_population() {
        let sim = Simulation::new(SimConfig::default()).unwrap();
        assert_eq!(sim.balls().len(), 6);
        assert_eq!(sim.frame().instance_count(), 6);
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SimConfig { frame_rate: -1.0, ..Default::default() };
        assert!(matches!(Simulation::new(config), Err(ConfigError::InvalidFrameRate(_))));
    }

    #[test]
    fn gravity_is_read_each_tick() {
        let mut sim = Simulation::new(config_with(vec![spec(250.0, 100.0, 0.0, 0.0, 20.0)])).unwrap();
        sim.set_gravity(0.0, 2.0);
        sim.tick();
        assert_eq!(sim.balls()[0].vel, Vec2::new(0.0, 2.0));
        assert_eq!(sim.balls()[0].pos, Vec2::new(250.0, 102.0));

        sim.gravity_cell().set(0.0, 0.0);
        sim.tick();
        assert_eq!(sim.balls()[0].vel, Vec2::new(0.0, 2.0));
        assert_eq!(sim.tick_count(), 2);
    }

    #[test]
    fn hard_wall_hit_emits_impact() {
        let mut sim = Simulation::new(config_with(vec![spec(30.0, 400.0, -40.0, 0.0, 20.0)])).unwrap();
        sim.tick();
        let impacts = sim.impacts();
        assert_eq!(impacts.len(), 1);
        assert_eq!(impacts[0].kind(), ImpactKind::Wall);
        // |32 - (-40)| = 72
        assert!((impacts[0].impact - 72.0).abs() < 1e-4);
        assert_eq!(sim.wall_contacts().len(), 1);
    }

    #[test]
    fn soft_wall_hit_is_silent() {
        let mut sim = Simulation::new(config_with(vec![spec(22.0, 400.0, -5.0, 0.0, 20.0)])).unwrap();
        sim.tick();
        assert_eq!(sim.wall_contacts().len(), 1);
        assert!(sim.impacts().is_empty());
    }

    #[test]
    fn pair_impacts_are_off_by_default() {
        let balls = vec![
            spec(200.0, 400.0, 10.0, 0.0, 50.0),
            spec(270.0, 400.0, -10.0, 0.0, 50.0),
        ];
        let mut sim = Simulation::new(config_with(balls.clone())).unwrap();
        sim.tick();
        assert_eq!(sim.pair_contacts().len(), 1);
        assert!(sim.pair_contacts()[0].impact > 20.0);
        assert!(sim.impacts().is_empty());

        let mut config = config_with(balls);
        config.pair_haptics = true;
        let mut sim = Simulation::new(config).unwrap();
        sim.tick();
        assert_eq!(sim.impacts().len(), 1);
        assert_eq!(sim.impacts()[0].kind(), ImpactKind::Pair);
    }

    #[test]
    fn impact_queue_is_bounded() {
        let balls = (0..4).map(|i| spec(25.0, 100.0 + i as f32 * 150.0, -50.0, 0.0, 20.0)).collect();
        let mut config = config_with(balls);
        config.max_events = 2;
        let mut sim = Simulation::new(config).unwrap();
        sim.tick();
        assert_eq!(sim.wall_contacts().len(), 4);
        assert_eq!(sim.impacts().len(), 2);
    }

    #[test]
    fn resize_applies_on_next_tick_without_moving_balls() {
        let mut sim = Simulation::new(config_with(vec![spec(400.0, 400.0, 0.0, 0.0, 50.0)])).unwrap();
        sim.resize(300.0, 800.0).unwrap();
        assert_eq!(sim.balls()[0].pos.x, 400.0);
        sim.tick();
        assert_eq!(sim.balls()[0].pos.x, 250.0);
    }

    #[test]
    fn invalid_resize_keeps_arena() {
        let mut sim = Simulation::new(config_with(vec![])).unwrap();
        assert!(sim.resize(0.0, 100.0).is_err());
        assert_eq!(sim.arena().width(), 500.0);
    }

    #[test]
    fn frame_tracks_ticks() {
        let mut sim = Simulation::new(config_with(vec![spec(250.0, 400.0, 3.0, 0.0, 20.0)])).unwrap();
        sim.tick();
        let frame = sim.frame();
        assert_eq!(frame.tick(), 1);
        assert_eq!(frame.instances()[0].x, 253.0);
        assert_eq!(sim.store().get(BallId(0)).unwrap().pos.x, 253.0);
    }
}
