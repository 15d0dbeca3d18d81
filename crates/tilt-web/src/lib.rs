//! Browser bridge for `tilt-engine`.
//!
//! The page feeds device-orientation gravity in through `tilt_set_gravity`,
//! calls `tilt_tick` from `requestAnimationFrame`, and reads balls and
//! vibration pulses out of linear memory at `get_buffer_ptr()` using the
//! layout in `tilt_engine::bridge::protocol`.

pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use tilt_engine::SimConfig;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
}

/// Run `f` against the live runner. Calls made before init are logged and
/// answered with `R::default()`.
fn with_runner<R: Default>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("tilt: not initialized, call tilt_init() first");
            R::default()
        }
    })
}

fn install(runner: SimRunner) {
    log::info!(
        "tilt: initialized, {} balls in {}x{}",
        runner.ball_count(),
        runner.world_width(),
        runner.world_height()
    );
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Start with the default configuration.
#[wasm_bindgen]
pub fn tilt_init() -> Result<(), JsValue> {
    init_logging();
    let runner = SimRunner::new(SimConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    install(runner);
    Ok(())
}

/// Start from a JSON config. Missing fields take their defaults.
#[wasm_bindgen]
pub fn tilt_init_with_config(json: &str) -> Result<(), JsValue> {
    init_logging();
    let runner = SimRunner::from_json(json).map_err(|e| {
        log::error!("tilt: bad config: {}", e);
        JsValue::from_str(&e.to_string())
    })?;
    install(runner);
    Ok(())
}

/// Advance by `dt` seconds of host time. Returns the physics ticks run.
#[wasm_bindgen]
pub fn tilt_tick(dt: f32) -> u32 {
    with_runner(|r| r.tick(dt))
}

#[wasm_bindgen]
pub fn tilt_set_gravity(gx: f32, gy: f32) {
    with_runner(|r| r.set_gravity(gx, gy));
}

#[wasm_bindgen]
pub fn tilt_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

#[wasm_bindgen]
pub fn tilt_set_vibrate(enabled: bool) {
    with_runner(|r| r.set_vibrate(enabled));
}

/// Stop ticking and release the simulation.
#[wasm_bindgen]
pub fn tilt_teardown() {
    with_runner(|r| r.teardown());
    RUNNER.with(|cell| {
        cell.borrow_mut().take();
    });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    RUNNER.with(|cell| match cell.borrow().as_ref() {
        Some(runner) => runner.buffer_ptr(),
        None => std::ptr::null(),
    })
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_ball_count() -> u32 {
    with_runner(|r| r.ball_count())
}

#[wasm_bindgen]
pub fn get_pulse_count() -> u32 {
    with_runner(|r| r.pulse_count())
}

#[wasm_bindgen]
pub fn get_max_balls() -> u32 {
    with_runner(|r| r.max_balls())
}

#[wasm_bindgen]
pub fn get_max_pulses() -> u32 {
    with_runner(|r| r.max_pulses())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

/// Copy of the whole shared buffer, for hosts without direct memory access.
#[wasm_bindgen]
pub fn frame_snapshot() -> js_sys::Float32Array {
    RUNNER.with(|cell| match cell.borrow().as_ref() {
        Some(runner) => js_sys::Float32Array::from(runner.buffer()),
        None => js_sys::Float32Array::new_with_length(0),
    })
}
