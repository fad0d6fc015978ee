//! Error types for grid localization

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building inputs or running the filter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocalizationError {
    #[error("color map must have at least one row and one column, got {rows}x{cols}")]
    EmptyMap { rows: usize, cols: usize },

    #[error("color map row {row} has {found} cells, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("received {measurements} measurements but {motions} motions")]
    SequenceLengthMismatch { measurements: usize, motions: usize },

    #[error("belief is {}x{} but the color map is {}x{}", .found.0, .found.1, .expected.0, .expected.1)]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("belief cell ({row}, {col}) holds {value}, expected a finite non-negative value")]
    InvalidProbability { row: usize, col: usize, value: f64 },

    #[error("{name} must lie in [0, 1], got {value}")]
    ParameterOutOfRange { name: &'static str, value: f64 },

    #[error("measurement {measurement} has zero likelihood under the current belief")]
    ZeroLikelihood { measurement: String },

    #[error("belief collapsed to zero at step {step} while sensing {measurement}")]
    DegenerateBelief { step: usize, measurement: String },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LocalizationError>;

/// Errors raised while loading a scenario document
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scenario: {0}")]
    Invalid(#[from] LocalizationError),
}
