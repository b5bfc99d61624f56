//! Pure tic-tac-toe logic for staked games.
//!
//! - **Board**: 3x3 value type with append-only marking
//! - **Rules**: win and tie evaluation over a board snapshot
//! - **Game**: one game's lifecycle (`create`, `mark`, `expire`)
//! - **Invariants**: properties every reachable game satisfies
//!
//! Nothing here touches money, clocks or events. Callers pass `now` in and
//! act on the [`MarkOutcome`] / [`Forfeit`] a transition returns.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod error;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use action::Move;
pub use error::GameError;
pub use game::{Forfeit, Game, MarkOutcome, Marked, ROUND_WINDOW, START_WINDOW, TurnWindows};
pub use position::{BOARD_SIZE, Coord};
pub use types::{AccountId, Board, Cell, GameId, GameResult, PlayerSlot, Timestamp};
