pub mod arena;
pub mod gravity;
pub mod sim;
pub mod store;
pub mod time;
#[cfg(not(target_arch = "wasm32"))]
pub mod scheduler;
