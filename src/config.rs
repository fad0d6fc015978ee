//! Filter parameters and scenario documents
//!
//! A scenario bundles a color map, the measurement and motion sequences and
//! the noise parameters. Scenarios load from JSON:
//!
//! ```json
//! {
//!   "colors": [["G", "G", "G"], ["G", "R", "R"], ["G", "G", "G"]],
//!   "measurements": ["R", "R"],
//!   "motions": [[0, 0], [0, 1]],
//!   "sensor_right": 0.8,
//!   "p_move": 0.5
//! }
//! ```

use crate::common::types::Displacement;
use crate::error::{LocalizationError, Result, ScenarioError};
use crate::map::{Color, ColorMap};
use crate::perception::belief::Belief;
use crate::perception::localization::localize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Noise parameters of the histogram filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Probability a measurement reports the true cell color
    pub sensor_right: f64,
    /// Probability a motion command executes
    pub p_move: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams {
            sensor_right: 0.8,
            p_move: 1.0,
        }
    }
}

impl FilterParams {
    /// Create validated parameters
    pub fn new(sensor_right: f64, p_move: f64) -> Result<Self> {
        let params = FilterParams {
            sensor_right,
            p_move,
        };
        params.validate()?;
        Ok(params)
    }

    /// Both probabilities must lie in [0, 1]
    pub fn validate(&self) -> Result<()> {
        check_probability("sensor_right", self.sensor_right)?;
        check_probability("p_move", self.p_move)
    }

    /// Apply named overrides (`sensor_right`, `p_move`). Nothing changes if any value is invalid.
    pub fn configure(&mut self, params: &HashMap<String, f64>) -> Result<()> {
        let mut updated = *self;

        if let Some(&sensor_right) = params.get("sensor_right") {
            updated.sensor_right = sensor_right;
        }

        if let Some(&p_move) = params.get("p_move") {
            updated.p_move = p_move;
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LocalizationError::ParameterOutOfRange { name, value })
    }
}

/// A complete localization run, optionally with the grid it should produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub colors: Vec<Vec<Color>>,
    pub measurements: Vec<Color>,
    pub motions: Vec<Displacement>,
    #[serde(flatten)]
    pub params: FilterParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Vec<Vec<f64>>>,
}

impl Scenario {
    /// Load and validate a scenario from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> std::result::Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a scenario from JSON text
    pub fn from_json_str(text: &str) -> std::result::Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check shapes and parameters without running the filter
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        ColorMap::from_rows(self.colors.clone())?;
        if self.measurements.len() != self.motions.len() {
            return Err(LocalizationError::SequenceLengthMismatch {
                measurements: self.measurements.len(),
                motions: self.motions.len(),
            });
        }
        if let Some(expected) = &self.expected {
            Belief::from_rows(expected)?;
        }
        Ok(())
    }

    /// Build the scenario's color map
    pub fn color_map(&self) -> Result<ColorMap> {
        ColorMap::from_rows(self.colors.clone())
    }

    /// Run the filter over the whole scenario
    pub fn run(&self) -> Result<Belief> {
        localize(
            &self.color_map()?,
            &self.measurements,
            &self.motions,
            self.params.sensor_right,
            self.params.p_move,
        )
    }

    /// Largest cell error of `belief` against the expected grid.
    /// `None` when the scenario has no expectation or the shapes differ.
    pub fn check(&self, belief: &Belief) -> Option<f64> {
        let expected = Belief::from_rows(self.expected.as_ref()?).ok()?;
        belief.max_abs_diff(&expected)
    }

    /// The reference scenarios, by name
    pub fn builtin() -> Vec<(&'static str, Scenario)> {
        use crate::map::Color::{Green as G, Red as R};

        let single = vec![vec![G, G, G], vec![G, R, G], vec![G, G, G]];
        let stripe = vec![vec![G, G, G], vec![G, R, R], vec![G, G, G]];
        let stay = vec![Displacement::STAY];
        let stay_then_right = vec![Displacement::STAY, Displacement::new(0, 1)];
        let scenario = |colors: &Vec<Vec<Color>>,
                        measurements: Vec<Color>,
                        motions: &Vec<Displacement>,
                        sensor_right: f64,
                        p_move: f64,
                        expected: [[f64; 3]; 3]| Scenario {
            colors: colors.clone(),
            measurements,
            motions: motions.clone(),
            params: FilterParams {
                sensor_right,
                p_move,
            },
            expected: Some(expected.iter().map(|row| row.to_vec()).collect()),
        };

        let g = 1.0 / 15.0;
        let r = 4.0 / 15.0;
        let (a, b, c, d) = (2.0 / 69.0, 5.0 / 69.0, 20.0 / 69.0, 32.0 / 69.0);
        vec![
            (
                "single red cell, perfect sensor",
                scenario(&single, vec![R], &stay, 1.0, 1.0, [[0.0; 3], [0.0, 1.0, 0.0], [0.0; 3]]),
            ),
            (
                "red stripe, perfect sensor",
                scenario(&stripe, vec![R], &stay, 1.0, 1.0, [[0.0; 3], [0.0, 0.5, 0.5], [0.0; 3]]),
            ),
            (
                "red stripe, noisy sensor",
                scenario(&stripe, vec![R], &stay, 0.8, 1.0, [[g; 3], [g, r, r], [g; 3]]),
            ),
            (
                "two readings, noisy sensor",
                scenario(
                    &stripe,
                    vec![R, R],
                    &stay_then_right,
                    0.8,
                    1.0,
                    [
                        [1.0 / 30.0; 3],
                        [2.0 / 15.0, 2.0 / 15.0, 8.0 / 15.0],
                        [1.0 / 30.0; 3],
                    ],
                ),
            ),
            (
                "two readings, perfect sensor",
                scenario(
                    &stripe,
                    vec![R, R],
                    &stay_then_right,
                    1.0,
                    1.0,
                    [[0.0; 3], [0.0, 0.0, 1.0], [0.0; 3]],
                ),
            ),
            (
                "two readings, noisy sensor and motion",
                scenario(&stripe, vec![R, R], &stay_then_right, 0.8, 0.5, [[a; 3], [b, c, d], [a; 3]]),
            ),
            (
                "two readings, noisy motion",
                scenario(
                    &stripe,
                    vec![R, R],
                    &stay_then_right,
                    1.0,
                    0.5,
                    [[0.0; 3], [0.0, 1.0 / 3.0, 2.0 / 3.0], [0.0; 3]],
                ),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_applies_valid_overrides() {
        let mut params = FilterParams::default();
        let overrides = HashMap::from([
            ("sensor_right".to_string(), 0.9),
            ("p_move".to_string(), 0.7),
            ("unused".to_string(), 42.0),
        ]);
        params.configure(&overrides).unwrap();
        assert_eq!(params, FilterParams::new(0.9, 0.7).unwrap());
    }

    #[test]
    fn configure_is_all_or_nothing() {
        let mut params = FilterParams::default();
        let overrides = HashMap::from([
            ("sensor_right".to_string(), 0.6),
            ("p_move".to_string(), 2.0),
        ]);
        let err = params.configure(&overrides).unwrap_err();
        assert_eq!(
            err,
            LocalizationError::ParameterOutOfRange {
                name: "p_move",
                value: 2.0
            }
        );
        assert_eq!(params, FilterParams::default());
    }

    #[test]
    fn parses_scenario_json() {
        let scenario = Scenario::from_json_str(
            r#"{
                "colors": [["G", "G", "G"], ["G", "R", "R"], ["G", "G", "G"]],
                "measurements": ["R", "R"],
                "motions": [[0, 0], [0, 1]],
                "sensor_right": 0.8,
                "p_move": 0.5
            }"#,
        )
        .unwrap();
        assert_eq!(scenario.motions[1], Displacement::new(0, 1));
        assert_eq!(scenario.params, FilterParams::new(0.8, 0.5).unwrap());
        assert!(scenario.expected.is_none());
    }

    #[test]
    fn rejects_invalid_scenarios() {
        let mismatched = r#"{
            "colors": [["G"]], "measurements": ["R", "G"], "motions": [[0, 0]],
            "sensor_right": 0.8, "p_move": 0.5
        }"#;
        assert!(matches!(
            Scenario::from_json_str(mismatched),
            Err(ScenarioError::Invalid(LocalizationError::SequenceLengthMismatch { .. }))
        ));

        let ragged = r#"{
            "colors": [["G", "R"], ["G"]], "measurements": [], "motions": [],
            "sensor_right": 0.8, "p_move": 0.5
        }"#;
        assert!(matches!(
            Scenario::from_json_str(ragged),
            Err(ScenarioError::Invalid(LocalizationError::RaggedMap { .. }))
        ));

        assert!(matches!(
            Scenario::from_json_str("{ not json"),
            Err(ScenarioError::Parse(_))
        ));
    }

    #[test]
    fn builtin_scenarios_match_their_expectations() {
        for (name, scenario) in Scenario::builtin() {
            let belief = scenario.run().unwrap();
            let error = scenario.check(&belief).unwrap();
            assert!(error < 1e-9, "{name}: off by {error}");
        }
    }
}
