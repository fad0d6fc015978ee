//! Perception module: belief representation, update steps and the localizer
pub mod belief;
pub mod filters;
pub mod localization;
pub mod sensors;

pub use self::belief::Belief;
pub use self::localization::{localize, Localizer};
