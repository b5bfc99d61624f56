//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board snapshot. Rules are kept apart from board
//! storage so the game state machine and the invariants can share them.

pub mod draw;
pub mod win;

pub use draw::{is_full, is_tie};
pub use win::{has_player_won, winner};
