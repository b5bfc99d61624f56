//! Win detection logic.

use crate::position::Coord;
use crate::types::{Board, Cell, PlayerSlot};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Checks whether `player` has completed any row, column or diagonal.
///
/// A single completed line is enough.
#[instrument(skip(board))]
pub fn has_player_won(board: &Board, player: PlayerSlot) -> bool {
    let mark = Cell::MarkedBy(player);
    Coord::LINES
        .iter()
        .any(|line| line.iter().all(|&coord| board.get(coord) == mark))
}

/// Returns the slot that owns a completed line, if any.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<PlayerSlot> {
    PlayerSlot::iter().find(|&slot| has_player_won(board, slot))
}
