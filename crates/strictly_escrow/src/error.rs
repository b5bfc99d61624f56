//! Errors surfaced by the registry and its collaborators.

use derive_more::{Display, Error};
use strictly_tictactoe::{AccountId, GameError, GameId};

/// Failure reported by a [`Ledger`](crate::Ledger).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LedgerError {
    /// The paying account holds less than the transfer amount.
    #[display("{account} holds {balance}, needs {required}")]
    InsufficientFunds {
        /// Paying account.
        account: AccountId,
        /// Its balance at the time of the transfer.
        balance: u64,
        /// Requested amount.
        required: u64,
    },
    /// Crediting the receiving account would overflow its balance.
    #[display("{account} holds {balance}, cannot receive {amount}")]
    BalanceOverflow {
        /// Receiving account.
        account: AccountId,
        /// Its balance at the time of the transfer.
        balance: u64,
        /// Transfer amount.
        amount: u64,
    },
}

/// Broad category of a rejected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorClass {
    /// The request itself is malformed.
    Input,
    /// The request is well formed but not permitted in the game's current state.
    StateConflict,
    /// A collaborator could not supply a resource, such as funds.
    Resource,
}

/// Rejection of a registry operation. Nothing was mutated, transferred or
/// emitted when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EscrowError {
    /// No game with this id exists.
    #[display("No game with id {game_id}")]
    InvalidGameId {
        /// Requested id.
        game_id: GameId,
    },

    /// The ledger could not move the funds.
    #[display("Insufficient funds: {account} holds {balance}, needs {required}")]
    InsufficientFunds {
        /// Paying account.
        account: AccountId,
        /// Its balance.
        balance: u64,
        /// Requested amount.
        required: u64,
    },

    /// The receiving account cannot hold the transferred amount.
    #[display("Balance overflow: {account} holds {balance}, cannot receive {amount}")]
    BalanceOverflow {
        /// Receiving account.
        account: AccountId,
        /// Its balance.
        balance: u64,
        /// Transfer amount.
        amount: u64,
    },

    /// A game rule rejected the request.
    #[display("{_0}")]
    Game(GameError),
}

impl EscrowError {
    /// Classifies the error as input, state-conflict or resource.
    pub fn class(&self) -> ErrorClass {
        match self {
            EscrowError::InvalidGameId { .. } => ErrorClass::Input,
            EscrowError::InsufficientFunds { .. } | EscrowError::BalanceOverflow { .. } => {
                ErrorClass::Resource
            }
            EscrowError::Game(err) => match err {
                GameError::InvalidCellIndex { .. } | GameError::DuplicatePlayers { .. } => {
                    ErrorClass::Input
                }
                GameError::CellAlreadyMarked { .. }
                | GameError::NotAPlayer { .. }
                | GameError::GameAlreadyResolved
                | GameError::NotYourTurn { .. }
                | GameError::TurnExpired { .. }
                | GameError::GameIsNotExpired { .. }
                | GameError::PrizeAlreadyClaimed => ErrorClass::StateConflict,
            },
        }
    }

    /// Short machine-readable name of the error.
    pub fn kind(&self) -> &'static str {
        match self {
            EscrowError::InvalidGameId { .. } => "InvalidGameId",
            EscrowError::InsufficientFunds { .. } => "InsufficientFunds",
            EscrowError::BalanceOverflow { .. } => "BalanceOverflow",
            EscrowError::Game(err) => match err {
                GameError::InvalidCellIndex { .. } => "InvalidCellIndex",
                GameError::CellAlreadyMarked { .. } => "CellAlreadyMarked",
                GameError::DuplicatePlayers { .. } => "DuplicatePlayers",
                GameError::NotAPlayer { .. } => "NotAPlayer",
                GameError::GameAlreadyResolved => "GameAlreadyResolved",
                GameError::NotYourTurn { .. } => "NotYourTurn",
                GameError::TurnExpired { .. } => "TurnExpired",
                GameError::GameIsNotExpired { .. } => "GameIsNotExpired",
                GameError::PrizeAlreadyClaimed => "PrizeAlreadyClaimed",
            },
        }
    }
}

impl From<GameError> for EscrowError {
    fn from(err: GameError) -> Self {
        EscrowError::Game(err)
    }
}

impl From<LedgerError> for EscrowError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds {
                account,
                balance,
                required,
            } => EscrowError::InsufficientFunds {
                account,
                balance,
                required,
            },
            LedgerError::BalanceOverflow {
                account,
                balance,
                amount,
            } => EscrowError::BalanceOverflow {
                account,
                balance,
                amount,
            },
        }
    }
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
