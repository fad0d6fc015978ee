//! Sensor models for grid localization

use crate::error::{LocalizationError, Result};

/// Likelihood model for a sensor that reports the color of the cell it is on
pub trait ColorSensor<C> {
    /// Probability of reading `observed` while standing on a cell whose true color is `actual`
    fn likelihood(&self, observed: &C, actual: &C) -> f64;
}

/// A sensor that reads the true color with probability `sensor_right`
/// and anything else with probability `1 - sensor_right`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoisyColorSensor {
    sensor_right: f64,
}

impl NoisyColorSensor {
    /// Create a sensor model. `sensor_right` must lie in [0, 1].
    pub fn new(sensor_right: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&sensor_right) {
            return Err(LocalizationError::ParameterOutOfRange {
                name: "sensor_right",
                value: sensor_right,
            });
        }
        Ok(NoisyColorSensor { sensor_right })
    }

    /// Probability of reading the true color
    pub fn sensor_right(&self) -> f64 {
        self.sensor_right
    }
}

impl<C: PartialEq> ColorSensor<C> for NoisyColorSensor {
    fn likelihood(&self, observed: &C, actual: &C) -> f64 {
        if observed == actual {
            self.sensor_right
        } else {
            1.0 - self.sensor_right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Color;

    #[test]
    fn hit_and_miss_likelihoods() {
        let sensor = NoisyColorSensor::new(0.8).unwrap();
        assert_eq!(sensor.likelihood(&Color::Red, &Color::Red), 0.8);
        assert!((sensor.likelihood(&Color::Red, &Color::Green) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range_accuracy() {
        assert!(NoisyColorSensor::new(1.5).is_err());
        assert!(NoisyColorSensor::new(-0.1).is_err());
        assert!(NoisyColorSensor::new(f64::NAN).is_err());
        assert_eq!(NoisyColorSensor::new(0.0).unwrap().sensor_right(), 0.0);
    }
}
