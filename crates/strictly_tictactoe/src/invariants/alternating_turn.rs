//! Alternating turn invariant: seats move One, Two, One, ...

use super::Invariant;
use crate::game::Game;
use crate::types::{GameResult, PlayerSlot};

/// Invariant: moves alternate starting with seat One, and `current_turn`
/// names the right seat for the game's result.
///
/// While unresolved or expired, `current_turn` is the seat after the last
/// mover. After a win or tie it stays on the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();

        let alternates = history.iter().enumerate().all(|(i, mv)| {
            let expected = if i % 2 == 0 {
                PlayerSlot::One
            } else {
                PlayerSlot::Two
            };
            mv.slot == expected
        });
        if !alternates {
            return false;
        }

        let turn = *game.current_turn();
        match (game.result(), history.last()) {
            (GameResult::Won(_) | GameResult::Tied, Some(last)) => turn == last.slot,
            (GameResult::Won(_) | GameResult::Tied, None) => false,
            (GameResult::Unresolved | GameResult::Expired, Some(last)) => {
                turn == last.slot.opponent()
            }
            (GameResult::Unresolved | GameResult::Expired, None) => turn == PlayerSlot::One,
        }
    }

    fn description() -> &'static str {
        "Seats alternate turns (One, Two, One, ...)"
    }
}
