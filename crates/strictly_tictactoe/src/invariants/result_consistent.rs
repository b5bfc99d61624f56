//! Result consistency invariant: the recorded result matches the board.

use super::Invariant;
use crate::game::Game;
use crate::rules;
use crate::types::GameResult;

/// Invariant: `result` agrees with what the board shows.
///
/// - `Won(slot)`: `slot` owns a line and made the last move.
/// - `Tied`: the board is full with no line.
/// - `Unresolved` / `Expired`: no line and free cells remain.
pub struct ResultConsistentInvariant;

impl Invariant<Game> for ResultConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let board = game.board();
        match game.result() {
            GameResult::Won(slot) => {
                board.has_player_won(*slot)
                    && game.history().last().is_some_and(|mv| mv.slot == *slot)
            }
            GameResult::Tied => rules::is_tie(board),
            GameResult::Unresolved | GameResult::Expired => {
                rules::winner(board).is_none() && !board.is_full()
            }
        }
    }

    fn description() -> &'static str {
        "Result is consistent with the board"
    }
}
