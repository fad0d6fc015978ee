//! Histogram filter update steps
//!
//! `motion` is the prediction step, `sensing` the correction step. Each takes
//! a belief by reference and returns a new one.

pub mod motion;
pub mod sensing;

pub use motion::MotionModel;
pub use sensing::sense;
