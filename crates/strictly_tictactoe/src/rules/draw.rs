//! Tie detection logic.

use crate::types::{Board, Cell};
use tracing::instrument;

/// Checks if every cell is marked.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}

/// A full board with no completed line.
#[instrument(skip(board))]
pub fn is_tie(board: &Board) -> bool {
    is_full(board) && super::winner(board).is_none()
}
