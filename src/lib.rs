//! Discrete Bayes localization of a robot on a toroidal color grid.
//!
//! The robot carries a noisy color sensor and executes motion commands that
//! sometimes fail. A [`Belief`] over every cell of a [`ColorMap`] is refined by
//! alternating a motion update and a sensing update.
//!
//! ```
//! use grid_localization::{localize, Color::{Green as G, Red as R}, ColorMap, Displacement};
//!
//! let map = ColorMap::from_rows(vec![vec![G, G, G], vec![G, R, R], vec![G, G, G]]).unwrap();
//! let belief = localize(&map, &[R], &[Displacement::STAY], 1.0, 1.0).unwrap();
//! assert_eq!(belief.get(1, 1), Some(0.5));
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod map;
pub mod perception;

pub use crate::common::types::{Cell, Displacement};
pub use crate::config::{FilterParams, Scenario};
pub use crate::error::{LocalizationError, Result, ScenarioError};
pub use crate::map::{Color, ColorMap};
pub use crate::perception::filters::{sense, MotionModel};
pub use crate::perception::sensors::{ColorSensor, NoisyColorSensor};
pub use crate::perception::{localize, Belief, Localizer};
