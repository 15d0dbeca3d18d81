pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;

// Re-export key types at crate root for convenience
pub use api::config::{BallSpec, SimConfig};
pub use api::error::{ConfigError, ConfigResult};
pub use api::types::{BallId, ImpactEvent, ImpactKind};
pub use components::ball::{Ball, BallColor};
pub use core::arena::Arena;
pub use core::gravity::GravityCell;
pub use core::sim::Simulation;
pub use core::store::BodyStore;
pub use core::time::FixedTimestep;
pub use renderer::frame::{BallInstance, FrameBuffer};
pub use systems::boundary::{Wall, WallContact};
pub use systems::pairs::{PairContact, PairOutcome};
pub use systems::haptics::{HapticPulse, PulseRecord};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};

#[cfg(not(target_arch = "wasm32"))]
pub use core::scheduler::{LoopHandle, NullObserver, SimObserver, TickLoop};
