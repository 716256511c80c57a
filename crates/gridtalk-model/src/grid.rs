use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};

/// Grid dimensions shared by every page of a board.
///
/// A valid grid has positive rows and cols. Boards coming in from
/// deserialization are re-checked by [`crate::Board::check_invariants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
}

impl Grid {
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Returns true if `(row, col)` lies within `[0, rows) x [0, cols)`.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    /// Error describing why `(row, col)` does not fit this grid.
    pub fn out_of_bounds(&self, row: u32, col: u32) -> BoardError {
        BoardError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.rows > 0 && self.cols > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(
            Grid::new(0, 4),
            Err(BoardError::InvalidGrid { rows: 0, cols: 4 })
        ));
        assert!(matches!(Grid::new(3, 0), Err(BoardError::InvalidGrid { .. })));
    }

    #[test]
    fn contains_is_half_open() {
        let grid = Grid::new(3, 4).unwrap();
        assert!(grid.contains(0, 0));
        assert!(grid.contains(2, 3));
        assert!(!grid.contains(3, 0));
        assert!(!grid.contains(0, 4));
    }

    #[test]
    fn cell_count_does_not_overflow() {
        let grid = Grid::new(u32::MAX, u32::MAX).unwrap();
        assert_eq!(
            grid.cell_count(),
            u64::from(u32::MAX) * u64::from(u32::MAX)
        );
    }
}
