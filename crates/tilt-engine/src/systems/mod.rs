pub mod integrate;
pub mod boundary;
pub mod pairs;
pub mod stability;
pub mod haptics;
pub mod spawn;
pub mod rng;
