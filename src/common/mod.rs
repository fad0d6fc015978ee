//! Common utilities and types for grid localization

/// Common types used across the codebase
pub mod types {
    use serde::{Deserialize, Serialize};

    /// A grid cell as (row, col)
    pub type Cell = (usize, usize);

    /// One motion command, in cells. Positive `dy` moves down, positive `dx` moves right.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(from = "[i64; 2]", into = "[i64; 2]")]
    pub struct Displacement {
        pub dy: i64,
        pub dx: i64,
    }

    impl Displacement {
        /// The "stay" command
        pub const STAY: Displacement = Displacement { dy: 0, dx: 0 };

        pub fn new(dy: i64, dx: i64) -> Self {
            Displacement { dy, dx }
        }

        pub fn is_stay(&self) -> bool {
            self.dy == 0 && self.dx == 0
        }
    }

    impl From<[i64; 2]> for Displacement {
        fn from([dy, dx]: [i64; 2]) -> Self {
            Displacement { dy, dx }
        }
    }

    impl From<(i64, i64)> for Displacement {
        fn from((dy, dx): (i64, i64)) -> Self {
            Displacement { dy, dx }
        }
    }

    impl From<Displacement> for [i64; 2] {
        fn from(d: Displacement) -> Self {
            [d.dy, d.dx]
        }
    }
}

/// Index reached by stepping `offset` cells back from `index` on a ring of `len` cells.
///
/// Uses Euclidean remainder so negative offsets (and offsets larger than the
/// ring) still land in `0..len`.
pub fn wrap_index(index: usize, offset: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    let len = len as i64;
    // Reduce first so the subtraction cannot overflow near i64::MIN.
    let offset = offset.rem_euclid(len);
    (index as i64 - offset).rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use super::types::Displacement;
    use super::*;

    #[test]
    fn wrap_index_handles_negative_offsets() {
        assert_eq!(wrap_index(0, 1, 3), 2);
        assert_eq!(wrap_index(0, -1, 3), 1);
        assert_eq!(wrap_index(2, -1, 3), 0);
    }

    #[test]
    fn wrap_index_handles_large_offsets() {
        assert_eq!(wrap_index(1, 7, 3), 0);
        assert_eq!(wrap_index(1, -8, 3), 0);
        assert_eq!(wrap_index(4, 0, 5), 4);
    }

    #[test]
    fn wrap_index_handles_extreme_offsets() {
        // 2^63 = 2 (mod 3) and 2^63 - 1 = 1 (mod 3)
        assert_eq!(wrap_index(0, i64::MIN, 3), 2);
        assert_eq!(wrap_index(0, i64::MAX, 3), 2);
        assert_eq!(wrap_index(2, i64::MIN, 3), 1);
        assert_eq!(wrap_index(0, i64::MIN, 1), 0);
    }

    #[test]
    fn displacement_reads_as_dy_dx_pair() {
        let d: Displacement = serde_json::from_str("[-1, 2]").unwrap();
        assert_eq!(d, Displacement::new(-1, 2));
        assert!(Displacement::STAY.is_stay());
        assert_eq!(serde_json::to_string(&d).unwrap(), "[-1,2]");
    }
}
