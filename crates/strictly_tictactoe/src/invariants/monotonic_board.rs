//! Monotonic board invariant: cells never change once marked.

use super::Invariant;
use crate::game::Game;
use crate::types::Board;

/// Invariant: the board is exactly the replay of the move history.
///
/// Replaying rejects any move onto an occupied cell, so a board that
/// matches its replay was never overwritten.
pub struct MonotonicBoardInvariant;

impl Invariant<Game> for MonotonicBoardInvariant {
    fn holds(game: &Game) -> bool {
        let replayed = game.history().iter().try_fold(Board::new(), |board, mv| {
            board.mark(mv.coord.row(), mv.coord.col(), mv.slot)
        });

        matches!(replayed, Ok(board) if board == *game.board())
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
