use tilt_engine::core::time::MAX_STEPS_PER_FRAME;
use tilt_engine::{
    ConfigResult, FixedTimestep, FrameHeader, HapticPulse, ProtocolLayout, PulseRecord,
    SimConfig, Simulation,
};

/// Drives one [`Simulation`] from the browser's animation frame.
///
/// The host calls `tick(dt)` once per animation frame with the elapsed time
/// in seconds; the runner converts that into a whole number of fixed physics
/// ticks and then publishes one frame into the shared buffer. wasm-bindgen
/// cannot export this struct's borrowed views directly, so `lib.rs` keeps it
/// in a `thread_local!` and exposes free functions.
pub struct SimRunner {
    sim: Simulation,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    /// Flat buffer read by the host through `buffer_ptr()`.
    shared: Vec<f32>,
    /// Pulses produced by every tick since the previous host frame.
    pulses: Vec<PulseRecord>,
    frame_counter: u32,
    ticks_run: u32,
    vibrate: bool,
    torn_down: bool,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> ConfigResult<Self> {
        let timestep = FixedTimestep::from_rate(config.frame_rate)?;
        let layout = ProtocolLayout::from_config(&config, MAX_STEPS_PER_FRAME as usize);
        let sim = Simulation::new(config)?;
        let shared = layout.alloc();
        let pulses = Vec::with_capacity(layout.max_pulses);

        let mut runner = Self {
            sim,
            timestep,
            layout,
            shared,
            pulses,
            frame_counter: 0,
            ticks_run: 0,
            vibrate: false,
            torn_down: false,
        };
        runner.publish();
        Ok(runner)
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Self::new(SimConfig::from_json(json)?)
    }

    /// Advance by `dt` seconds of host time and publish a frame.
    /// Returns the number of physics ticks that ran. Does nothing after
    /// teardown.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.torn_down {
            return 0;
        }

        self.pulses.clear();
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.sim.tick();
            for event in self.sim.impacts() {
                if self.pulses.len() == self.layout.max_pulses {
                    break;
                }
                self.pulses.push(HapticPulse::from_impact(event.impact).to_wire(event.impact));
            }
        }

        self.ticks_run = steps;
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.publish();

        if self.vibrate {
            if let Some(pulse) = self.strongest_pulse() {
                vibrate(pulse);
            }
        }
        steps
    }

    fn publish(&mut self) {
        let gravity = self.sim.gravity();
        let header = FrameHeader {
            frame_counter: self.frame_counter,
            world_width: self.sim.arena().width(),
            world_height: self.sim.arena().height(),
            gravity_x: gravity.x,
            gravity_y: gravity.y,
            ticks_run: self.ticks_run,
        };
        self.layout.write(
            &mut self.shared,
            &header,
            self.sim.frame().instances(),
            &self.pulses,
        );
    }

    pub fn set_gravity(&self, gx: f32, gy: f32) {
        self.sim.set_gravity(gx, gy);
    }

    /// Resize the arena from the next tick. Invalid sizes are logged and
    /// the old arena kept.
    pub fn resize(&mut self, width: f32, height: f32) {
        if let Err(e) = self.sim.resize(width, height) {
            log::error!("resize rejected: {}", e);
        }
    }

    /// Stop ticking for good. Later `tick` calls are no-ops.
    pub fn teardown(&mut self) {
        if !self.torn_down {
            log::info!("teardown after {} ticks", self.sim.tick_count());
        }
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Forward the strongest pulse of each frame to `navigator.vibrate`.
    pub fn set_vibrate(&mut self, enabled: bool) {
        self.vibrate = enabled;
    }

    /// Strongest pulse of the latest host frame.
    pub fn strongest_pulse(&self) -> Option<HapticPulse> {
        self.pulses
            .iter()
            .max_by(|a, b| a.impact.total_cmp(&b.impact))
            .map(|p| HapticPulse::from_impact(p.impact))
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn buffer(&self) -> &[f32] {
        &self.shared
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.shared.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn ball_count(&self) -> u32 {
        self.sim.frame().instance_count() as u32
    }

    pub fn pulse_count(&self) -> u32 {
        self.pulses.len() as u32
    }

    pub fn max_balls(&self) -> u32 {
        self.layout.max_balls as u32
    }

    pub fn max_pulses(&self) -> u32 {
        self.layout.max_pulses as u32
    }

    pub fn world_width(&self) -> f32 {
        self.sim.arena().width()
    }

    pub fn world_height(&self) -> f32 {
        self.sim.arena().height()
    }
}

#[cfg(target_arch = "wasm32")]
fn vibrate(pulse: HapticPulse) {
    if let Some(window) = web_sys::window() {
        window.navigator().vibrate_with_duration(pulse.duration_ms);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn vibrate(_pulse: HapticPulse) {}
