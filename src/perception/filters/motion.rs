//! Motion (prediction) update
//!
//! The commanded move either happens exactly or not at all, so each cell's new
//! mass mixes "stayed here" with "arrived from `(dy, dx)` behind". The grid is
//! treated as a torus: moving off an edge re-enters from the opposite one.
//! That wraparound is a simplification of the world, not a boundary model.

use crate::common::types::Displacement;
use crate::common::wrap_index;
use crate::error::{LocalizationError, Result};
use crate::perception::belief::Belief;
use nalgebra::DMatrix;
use tracing::trace;

/// Motion model with a fixed probability that a command executes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionModel {
    p_move: f64,
}

impl MotionModel {
    /// Create a motion model. `p_move` must lie in [0, 1].
    pub fn new(p_move: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p_move) {
            return Err(LocalizationError::ParameterOutOfRange {
                name: "p_move",
                value: p_move,
            });
        }
        Ok(MotionModel { p_move })
    }

    /// Probability that a command executes
    pub fn p_move(&self) -> f64 {
        self.p_move
    }

    /// Predict the belief after executing `motion`.
    ///
    /// `q[i][j] = (1 - p_move) * p[i][j] + p_move * p[(i - dy) mod R][(j - dx) mod C]`
    ///
    /// The result is not renormalized: it is a convex mix of the input and a
    /// permutation of it, so it keeps the input's total.
    pub fn predict(&self, belief: &Belief, motion: Displacement) -> Belief {
        if motion.is_stay() {
            return belief.clone();
        }

        let (rows, cols) = belief.shape();
        let p = belief.as_matrix();
        let p_stay = 1.0 - self.p_move;
        trace!(dy = motion.dy, dx = motion.dx, p_move = self.p_move, "motion update");

        let grid = DMatrix::from_fn(rows, cols, |i, j| {
            let from = (wrap_index(i, motion.dy, rows), wrap_index(j, motion.dx, cols));
            p_stay * p[(i, j)] + self.p_move * p[from]
        });
        Belief::from_matrix(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_belief() -> Belief {
        Belief::from_rows(&[vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 0.0]]).unwrap()
    }

    #[test]
    fn stay_is_a_pass_through() {
        let belief = Belief::from_rows(&[vec![0.1, 0.2, 0.3], vec![0.05, 0.15, 0.2]]).unwrap();
        for p_move in [0.0, 0.3, 1.0] {
            let model = MotionModel::new(p_move).unwrap();
            assert_eq!(model.predict(&belief, Displacement::STAY), belief);
        }
    }

    #[test]
    fn certain_move_shifts_mass() {
        let model = MotionModel::new(1.0).unwrap();
        let moved = model.predict(&corner_belief(), Displacement::new(1, 2));
        assert_eq!(moved.get(1, 2), Some(1.0));
        assert!((moved.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn moves_wrap_around_edges() {
        let model = MotionModel::new(1.0).unwrap();
        let up_left = model.predict(&corner_belief(), Displacement::new(-1, -1));
        assert_eq!(up_left.get(1, 2), Some(1.0));

        let far = model.predict(&corner_belief(), Displacement::new(5, 7));
        assert_eq!(far.get(1, 1), Some(1.0));
    }

    #[test]
    fn uncertain_move_splits_mass() {
        let model = MotionModel::new(0.25).unwrap();
        let moved = model.predict(&corner_belief(), Displacement::new(0, 1));
        assert_eq!(moved.get(0, 0), Some(0.75));
        assert_eq!(moved.get(0, 1), Some(0.25));
        assert_eq!(moved.get(0, 2), Some(0.0));
    }

    #[test]
    fn failed_moves_leave_belief_unchanged() {
        let model = MotionModel::new(0.0).unwrap();
        let belief = corner_belief();
        assert_eq!(model.predict(&belief, Displacement::new(1, 1)), belief);
    }

    #[test]
    fn rejects_out_of_range_probability() {
        assert_eq!(MotionModel::new(0.4).unwrap().p_move(), 0.4);
        assert!(MotionModel::new(1.01).is_err());
        assert!(MotionModel::new(f64::NAN).is_err());
    }
}
