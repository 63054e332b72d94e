pub mod error;
pub mod rng;
pub mod scene;
pub mod time;
