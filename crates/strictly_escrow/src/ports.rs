//! Collaborator interfaces the registry calls out to.
//!
//! The registry never owns money, time or delivery itself. Hosts plug in a
//! [`Ledger`], a [`Clock`] and an [`EventSink`]; the `adapters` module has
//! in-memory and system implementations.

use strictly_tictactoe::{AccountId, Timestamp};

use crate::error::LedgerError;
use crate::events::GameEvent;

/// Balance store with an atomic, synchronous transfer primitive.
pub trait Ledger {
    /// Current balance of `account`; unknown accounts hold zero.
    fn balance_of(&self, account: &AccountId) -> u64;

    /// Moves `amount` from `from` to `to`, or nothing at all.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] if `from` holds less than `amount`,
    /// or [`LedgerError::BalanceOverflow`] if `to` cannot hold another `amount`.
    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: u64)
    -> Result<(), LedgerError>;
}

/// Source of the current time, in seconds.
pub trait Clock {
    /// Current timestamp. Must not go backwards.
    fn now(&self) -> Timestamp;
}

/// Fire-and-forget destination for lifecycle events.
pub trait EventSink {
    /// Publishes one event. Delivery guarantees are the sink's concern.
    fn emit(&mut self, event: GameEvent);
}
