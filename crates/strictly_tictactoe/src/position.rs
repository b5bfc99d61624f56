//! Board coordinates.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::GameError;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// A validated `(row, col)` coordinate on the 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    /// Creates a coordinate, rejecting anything off the board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCellIndex`] if `row` or `col` is not in `0..3`.
    #[instrument]
    pub fn try_new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GameError::InvalidCellIndex { row, col });
        }
        Ok(Self { row, col })
    }

    /// Constant constructor for coordinates known to be on the board.
    const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row index (0-2).
    pub fn row(self) -> usize {
        self.row
    }

    /// Column index (0-2).
    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major index into the board (0-8).
    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Creates a coordinate from a row-major index.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < BOARD_SIZE * BOARD_SIZE).then(|| Self::at(index / BOARD_SIZE, index % BOARD_SIZE))
    }

    /// All 9 coordinates in row-major order.
    pub const ALL: [Coord; 9] = [
        Coord::at(0, 0),
        Coord::at(0, 1),
        Coord::at(0, 2),
        Coord::at(1, 0),
        Coord::at(1, 1),
        Coord::at(1, 2),
        Coord::at(2, 0),
        Coord::at(2, 1),
        Coord::at(2, 2),
    ];

    /// The 8 winning lines.
    pub const LINES: [[Coord; 3]; 8] = [
        // Rows
        [Coord::at(0, 0), Coord::at(0, 1), Coord::at(0, 2)],
        [Coord::at(1, 0), Coord::at(1, 1), Coord::at(1, 2)],
        [Coord::at(2, 0), Coord::at(2, 1), Coord::at(2, 2)],
        // Columns
        [Coord::at(0, 0), Coord::at(1, 0), Coord::at(2, 0)],
        [Coord::at(0, 1), Coord::at(1, 1), Coord::at(2, 1)],
        [Coord::at(0, 2), Coord::at(1, 2), Coord::at(2, 2)],
        // Diagonals
        [Coord::at(0, 0), Coord::at(1, 1), Coord::at(2, 2)],
        [Coord::at(0, 2), Coord::at(1, 1), Coord::at(2, 0)],
    ];
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert_eq!(
            Coord::try_new(3, 0),
            Err(GameError::InvalidCellIndex { row: 3, col: 0 })
        );
        assert_eq!(
            Coord::try_new(0, 7),
            Err(GameError::InvalidCellIndex { row: 0, col: 7 })
        );
    }

    #[test]
    fn test_index_round_trip() {
        for (i, coord) in Coord::ALL.iter().enumerate() {
            assert_eq!(coord.index(), i);
            assert_eq!(Coord::from_index(i), Some(*coord));
        }
        assert_eq!(Coord::from_index(9), None);
    }

    #[test]
    fn test_lines_cover_every_cell() {
        for coord in Coord::ALL {
            assert!(Coord::LINES.iter().any(|line| line.contains(&coord)));
        }
    }
}
