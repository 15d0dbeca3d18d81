//! Native fixed-rate tick loop.
//!
//! Physics runs on its own thread at `1 / frame_rate` seconds per tick,
//! independent of whoever draws. Frames and impacts are pushed to a
//! [`SimObserver`]. Dropping or stopping the [`LoopHandle`] is the teardown
//! signal: no tick is scheduled after it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::api::error::{ConfigError, ConfigResult};
use crate::api::types::ImpactEvent;
use crate::core::gravity::GravityCell;
use crate::core::sim::Simulation;
use crate::renderer::frame::FrameBuffer;

/// Receives tick outputs. Called on the physics thread; implementations
/// must return quickly (hand off to a channel, copy, etc.).
pub trait SimObserver: Send + 'static {
    /// A tick finished; `frame` is valid for rendering.
    fn frame_ready(&mut self, _frame: &FrameBuffer) {}

    /// An impact crossed its haptic threshold during the tick.
    fn impact(&mut self, _event: ImpactEvent) {}
}

/// Observer that ignores everything.
pub struct NullObserver;

impl SimObserver for NullObserver {}

/// Spawns the physics thread.
pub struct TickLoop;

impl TickLoop {
    /// Start ticking `sim` at its configured frame rate.
    pub fn spawn<O: SimObserver>(sim: Simulation, observer: O) -> ConfigResult<LoopHandle> {
        let rate = sim.config().frame_rate;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ConfigError::InvalidFrameRate(rate));
        }
        let period = Duration::from_secs_f64(1.0 / rate as f64);

        let running = Arc::new(AtomicBool::new(true));
        let pending_resize = Arc::new(Mutex::new(None));
        let gravity = sim.gravity_cell();

        let thread = {
            let running = Arc::clone(&running);
            let pending_resize = Arc::clone(&pending_resize);
            thread::Builder::new()
                .name("tilt-physics".into())
                .spawn(move || run(sim, observer, period, running, pending_resize))
                .map_err(ConfigError::Spawn)?
        };

        log::info!("tick loop started, period {:?}", period);
        Ok(LoopHandle {
            running,
            gravity,
            pending_resize,
            thread: Some(thread),
        })
    }
}

fn run<O: SimObserver>(
    mut sim: Simulation,
    mut observer: O,
    period: Duration,
    running: Arc<AtomicBool>,
    pending_resize: Arc<Mutex<Option<(f32, f32)>>>,
) -> Simulation {
    let mut deadline = Instant::now();
    while running.load(Ordering::Acquire) {
        let resize = pending_resize.lock().ok().and_then(|mut slot| slot.take());
        if let Some((w, h)) = resize {
            if let Err(e) = sim.resize(w, h) {
                log::error!("ignoring resize: {}", e);
            }
        }

        sim.tick();
        observer.frame_ready(sim.frame());
        for event in sim.impacts() {
            observer.impact(*event);
        }

        deadline += period;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        } else {
            // Fell behind; restart the schedule rather than bursting.
            deadline = now;
        }
    }
    log::info!("tick loop stopped after {} ticks", sim.tick_count());
    sim
}

/// Owner-side handle of a running [`TickLoop`].
pub struct LoopHandle {
    running: Arc<AtomicBool>,
    gravity: Arc<GravityCell>,
    pending_resize: Arc<Mutex<Option<(f32, f32)>>>,
    thread: Option<JoinHandle<Simulation>>,
}

impl LoopHandle {
    /// Replace the gravity vector; picked up by the next tick.
    pub fn set_gravity(&self, gx: f32, gy: f32) {
        self.gravity.set(gx, gy);
    }

    pub fn gravity_cell(&self) -> Arc<GravityCell> {
        Arc::clone(&self.gravity)
    }

    /// Request an arena resize, applied at the start of the next tick.
    /// A later request replaces an unapplied earlier one.
    pub fn resize(&self, width: f32, height: f32) {
        if let Ok(mut slot) = self.pending_resize.lock() {
            *slot = Some((width, height));
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Teardown: stop scheduling ticks and wait for the current one to
    /// finish. Returns the final simulation state.
    pub fn stop(mut self) -> Option<Simulation> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<Simulation> {
        self.running.store(false, Ordering::Release);
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(sim) => Some(sim),
            Err(_) => {
                log::error!("physics thread panicked");
                None
            }
        }
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{BallSpec, SimConfig};
    use std::sync::mpsc;

    struct ChannelObserver {
        frames: mpsc::Sender<u64>,
        impacts: mpsc::Sender<ImpactEvent>,
    }

    impl SimObserver for ChannelObserver {
        fn frame_ready(&mut self, frame: &FrameBuffer) {
            let _ = self.frames.send(frame.tick());
        }

        fn impact(&mut self, event: ImpactEvent) {
            let _ = self.impacts.send(event);
        }
    }

    fn one_ball(vx: f32) -> Simulation {
        let config = SimConfig {
            frame_rate: 500.0,
            arena_width: 500.0,
            arena_height: 800.0,
            balls: vec![BallSpec { x: 250.0, y: 400.0, vx, vy: 0.0, radius: 20.0, color: None }],
            ..Default::default()
        };
        Simulation::new(config).unwrap()
    }

    #[test]
    fn ticks_until_stopped() {
        let (frames_tx, frames_rx) = mpsc::channel();
        let (impacts_tx, _impacts_rx) = mpsc::channel();
        let handle = TickLoop::spawn(
            one_ball(0.0),
            ChannelObserver { frames: frames_tx, impacts: impacts_tx },
        )
        .unwrap();

        let first = frames_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        let second = frames_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert!(handle.is_running());

        let sim = handle.stop().unwrap();
        let ticks = sim.tick_count();
        assert!(ticks >= 2);

        // No tick after teardown.
        let delivered = frames_rx.try_iter().count() as u64;
        assert!(delivered + 2 <= ticks);
        thread::sleep(Duration::from_millis(20));
        assert!(frames_rx.try_recv().is_err());
    }

    #[test]
    fn gravity_and_resize_reach_the_thread() {
        let (impacts_tx, impacts_rx) = mpsc::channel();
        let (frames_tx, _frames_rx) = mpsc::channel();
        let handle = TickLoop::spawn(
            one_ball(0.0),
            ChannelObserver { frames: frames_tx, impacts: impacts_tx },
        )
        .unwrap();

        handle.set_gravity(30.0, 0.0);
        let event = impacts_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(event.impact > 20.0);

        handle.resize(400.0, 600.0);
        thread::sleep(Duration::from_millis(20));
        let sim = handle.stop().unwrap();
        assert_eq!(sim.arena().width(), 400.0);
        assert!(sim.balls()[0].pos.x <= 380.0);
    }

    #[test]
    fn drop_stops_the_loop() {
        let (frames_tx, frames_rx) = mpsc::channel();
        let (impacts_tx, _impacts_rx) = mpsc::channel();
        {
            let _handle = TickLoop::spawn(
                one_ball(1.0),
                ChannelObserver { frames: frames_tx, impacts: impacts_tx },
            )
            .unwrap();
            frames_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        }
        // Sender lives in the joined thread's observer, so the channel closes.
        while frames_rx.try_recv().is_ok() {}
        assert!(matches!(
            frames_rx.recv_timeout(Duration::from_millis(50)),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
    }
}
