//! Color map of the world
//!
//! The map is the ground truth the robot's color sensor is compared against.
//! It is fixed at construction and stored row-major, like a costmap.

use crate::common::types::Cell;
use crate::error::{LocalizationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color of a floor cell, as reported by the color sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "R", alias = "red")]
    Red,
    #[serde(rename = "G", alias = "green")]
    Green,
    #[serde(rename = "B", alias = "blue")]
    Blue,
    #[serde(rename = "Y", alias = "yellow")]
    Yellow,
}

impl Color {
    /// Single-letter code
    pub fn code(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Color::Red),
            "g" | "green" => Ok(Color::Green),
            "b" | "blue" => Ok(Color::Blue),
            "y" | "yellow" => Ok(Color::Yellow),
            other => Err(format!("unknown color `{}`", other)),
        }
    }
}

/// An immutable rectangular grid of colors
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap<C = Color> {
    rows: usize,
    cols: usize,
    data: Vec<C>,
}

impl<C> ColorMap<C> {
    /// Build a map from row vectors. Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<C>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LocalizationError::EmptyMap {
                rows: height,
                cols: width,
            });
        }

        let mut data = Vec::with_capacity(height * width);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(LocalizationError::RaggedMap {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            data.extend(cells);
        }

        Ok(ColorMap {
            rows: height,
            cols: width,
            data,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Color at a cell, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&C> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Iterate over `((row, col), color)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &C)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(index, color)| ((index / cols, index % cols), color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Color::{Green as G, Red as R};

    #[test]
    fn builds_row_major_map() {
        let map = ColorMap::from_rows(vec![vec![G, R, G], vec![R, R, G]]).unwrap();
        assert_eq!(map.shape(), (2, 3));
        assert_eq!(map.get(0, 1), Some(&R));
        assert_eq!(map.get(1, 2), Some(&G));
        assert_eq!(map.get(2, 0), None);
        assert_eq!(map.get(0, 3), None);

        let cells: Vec<_> = map.iter().filter(|(_, c)| **c == R).map(|(cell, _)| cell).collect();
        assert_eq!(cells, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn rejects_empty_maps() {
        assert_eq!(
            ColorMap::<Color>::from_rows(vec![]),
            Err(LocalizationError::EmptyMap { rows: 0, cols: 0 })
        );
        assert_eq!(
            ColorMap::<Color>::from_rows(vec![vec![]]),
            Err(LocalizationError::EmptyMap { rows: 1, cols: 0 })
        );
    }

    #[test]
    fn rejects_ragged_maps() {
        let err = ColorMap::from_rows(vec![vec![G, G], vec![G], vec![G, G]]).unwrap_err();
        assert_eq!(
            err,
            LocalizationError::RaggedMap {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn supports_any_alphabet() {
        let map = ColorMap::from_rows(vec![vec!['a', 'b'], vec!['c', 'd']]).unwrap();
        assert_eq!(map.get(1, 0), Some(&'c'));
    }

    #[test]
    fn parses_color_codes() {
        assert_eq!("R".parse::<Color>(), Ok(Color::Red));
        assert_eq!("green".parse::<Color>(), Ok(Color::Green));
        assert!("purple".parse::<Color>().is_err());

        let colors: Vec<Color> = serde_json::from_str(r#"["R", "G", "blue"]"#).unwrap();
        assert_eq!(colors, vec![Color::Red, Color::Green, Color::Blue]);
        assert_eq!(Color::Yellow.to_string(), "Y");
    }
}
