//! Errors raised by board and game rules.

use crate::types::AccountId;

/// Rejection of a game operation. No state is changed when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// Row or column outside `0..3`.
    #[display("Cell ({row}, {col}) is off the board")]
    InvalidCellIndex {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already carries a mark.
    #[display("Cell ({row}, {col}) is already marked")]
    CellAlreadyMarked {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Both seats were given the same account.
    #[display("Player one and player two must differ (both {account})")]
    DuplicatePlayers {
        /// The repeated account.
        account: AccountId,
    },

    /// The caller is not seated in the game.
    #[display("{account} is not a player in this game")]
    NotAPlayer {
        /// The caller.
        account: AccountId,
    },

    /// The game already reached a terminal result.
    #[display("Game is already resolved")]
    GameAlreadyResolved,

    /// The caller is seated but it is the opponent's turn.
    #[display("It is not {account}'s turn")]
    NotYourTurn {
        /// The caller.
        account: AccountId,
    },

    /// The mover's deadline has passed.
    #[display("Turn expired at {deadline} (now {now})")]
    TurnExpired {
        /// Deadline of the current turn.
        deadline: u64,
        /// Time of the rejected move.
        now: u64,
    },

    /// Release was requested before the deadline.
    #[display("Game is not expired until {deadline} (now {now})")]
    GameIsNotExpired {
        /// Deadline of the current turn.
        deadline: u64,
        /// Time of the rejected release.
        now: u64,
    },

    /// The stake was already paid out.
    #[display("Prize already claimed")]
    PrizeAlreadyClaimed,
}
