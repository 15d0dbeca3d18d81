pub mod frame;

pub use frame::{BallInstance, FrameBuffer};
