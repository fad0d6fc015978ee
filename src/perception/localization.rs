//! Localization module
//!
//! Runs the histogram filter: starting from a uniform belief, every timestep
//! applies the motion update and then the sensing update.

use crate::common::types::{Cell, Displacement};
use crate::config::FilterParams;
use crate::error::{LocalizationError, Result};
use crate::map::ColorMap;
use crate::perception::belief::Belief;
use crate::perception::filters::{sense, MotionModel};
use crate::perception::sensors::{ColorSensor, NoisyColorSensor};
use std::fmt::Display;
use tracing::{debug, warn};

/// A grid localizer for the robot
#[derive(Debug, Clone)]
pub struct Localizer<'m, C, S = NoisyColorSensor> {
    map: &'m ColorMap<C>,
    motion_model: MotionModel,
    sensor: S,
    belief: Belief,
    steps: usize,
}

impl<'m, C> Localizer<'m, C>
where
    C: PartialEq + Display,
{
    /// Create a localizer with the noisy color sensor described by `params`
    pub fn new(map: &'m ColorMap<C>, params: &FilterParams) -> Result<Self> {
        Ok(Localizer::with_sensor(
            map,
            MotionModel::new(params.p_move)?,
            NoisyColorSensor::new(params.sensor_right)?,
        ))
    }
}

impl<'m, C, S> Localizer<'m, C, S>
where
    C: PartialEq + Display,
    S: ColorSensor<C>,
{
    /// Create a localizer with a custom sensor model
    pub fn with_sensor(map: &'m ColorMap<C>, motion_model: MotionModel, sensor: S) -> Self {
        Localizer {
            map,
            motion_model,
            sensor,
            belief: Belief::uniform(map.rows(), map.cols()),
            steps: 0,
        }
    }

    /// Move, then sense. On error the belief and step count are left as they were.
    pub fn step(&mut self, motion: Displacement, measurement: &C) -> Result<&Belief> {
        let step = self.steps;
        let predicted = self.motion_model.predict(&self.belief, motion);
        let corrected =
            sense(&predicted, measurement, self.map, &self.sensor).map_err(|err| match err {
                LocalizationError::ZeroLikelihood { measurement } => {
                    warn!(step, %measurement, "belief collapsed to zero");
                    LocalizationError::DegenerateBelief { step, measurement }
                }
                other => other,
            })?;

        self.belief = corrected;
        self.steps += 1;

        let ((row, col), p) = self.belief.most_likely();
        debug!(
            step,
            dy = motion.dy,
            dx = motion.dx,
            %measurement,
            row,
            col,
            p,
            "localization step"
        );
        Ok(&self.belief)
    }

    /// Run paired measurement and motion sequences in order.
    ///
    /// The sequences must have equal length; this is checked before any step runs.
    pub fn run(&mut self, measurements: &[C], motions: &[Displacement]) -> Result<&Belief> {
        if measurements.len() != motions.len() {
            return Err(LocalizationError::SequenceLengthMismatch {
                measurements: measurements.len(),
                motions: motions.len(),
            });
        }

        for (measurement, &motion) in measurements.iter().zip(motions) {
            self.step(motion, measurement)?;
        }
        Ok(&self.belief)
    }

    /// Get the current belief
    pub fn belief(&self) -> &Belief {
        &self.belief
    }

    /// Consume the localizer, keeping its belief
    pub fn into_belief(self) -> Belief {
        self.belief
    }

    /// Number of completed timesteps
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Most likely cell and its probability
    pub fn estimate(&self) -> (Cell, f64) {
        self.belief.most_likely()
    }

    /// Back to the uniform prior
    pub fn reset(&mut self) {
        self.belief = Belief::uniform(self.map.rows(), self.map.cols());
        self.steps = 0;
    }
}

/// Posterior over the cells of `colors` after the given measurements and motions.
///
/// Parameters and sequence lengths are validated before any computation.
/// With no steps the uniform prior is returned.
pub fn localize<C>(
    colors: &ColorMap<C>,
    measurements: &[C],
    motions: &[Displacement],
    sensor_right: f64,
    p_move: f64,
) -> Result<Belief>
where
    C: PartialEq + Display,
{
    let params = FilterParams::new(sensor_right, p_move)?;
    let mut localizer = Localizer::new(colors, &params)?;
    localizer.run(measurements, motions)?;
    Ok(localizer.into_belief())
}
