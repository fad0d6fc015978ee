//! Sensing (correction) update

use crate::error::{LocalizationError, Result};
use crate::map::ColorMap;
use crate::perception::belief::Belief;
use crate::perception::sensors::ColorSensor;
use nalgebra::DMatrix;
use std::fmt::Display;
use tracing::trace;

/// Reweight `belief` by how likely `measurement` is on each cell, then renormalize.
///
/// The full unnormalized grid is built before dividing by its sum. Fails with
/// [`LocalizationError::ZeroLikelihood`] if that sum is zero, i.e. the
/// measurement is impossible under the current belief.
pub fn sense<C, S>(belief: &Belief, measurement: &C, map: &ColorMap<C>, sensor: &S) -> Result<Belief>
where
    C: PartialEq + Display,
    S: ColorSensor<C> + ?Sized,
{
    if belief.shape() != map.shape() {
        return Err(LocalizationError::ShapeMismatch {
            expected: map.shape(),
            found: belief.shape(),
        });
    }

    let p = belief.as_matrix();
    let weighted = DMatrix::from_fn(map.rows(), map.cols(), |i, j| match map.get(i, j) {
        Some(actual) => p[(i, j)] * sensor.likelihood(measurement, actual),
        None => 0.0,
    });
    trace!(%measurement, mass = weighted.iter().sum::<f64>(), "sensing update");

    Belief::normalized(weighted).ok_or_else(|| LocalizationError::ZeroLikelihood {
        measurement: measurement.to_string(),
    })
}
