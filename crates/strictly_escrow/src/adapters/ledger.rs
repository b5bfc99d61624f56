//! In-memory ledger.

use std::collections::BTreeMap;
use strictly_tictactoe::AccountId;
use tracing::{debug, instrument};

use crate::error::LedgerError;
use crate::ports::Ledger;

/// Balances kept in a map. Transfers are all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: BTreeMap<AccountId, u64>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger seeded with `balances`.
    pub fn with_balances(balances: impl IntoIterator<Item = (AccountId, u64)>) -> Self {
        let mut ledger = Self::new();
        for (account, amount) in balances {
            ledger.credit(&account, amount);
        }
        ledger
    }

    /// Adds `amount` to `account` out of thin air (funding, tests).
    pub fn credit(&mut self, account: &AccountId, amount: u64) {
        let balance = self.balances.entry(account.clone()).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// All non-default balances.
    pub fn balances(&self) -> &BTreeMap<AccountId, u64> {
        &self.balances
    }

    /// Sum of all balances, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.balances
            .values()
            .fold(0u64, |acc, balance| acc.saturating_add(*balance))
    }
}

impl Ledger for InMemoryLedger {
    fn balance_of(&self, account: &AccountId) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account: from.clone(),
                balance,
                required: amount,
            });
        }
        let debited = balance - amount;

        let to_balance = if from == to {
            debited
        } else {
            self.balance_of(to)
        };
        let credited = to_balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow {
                account: to.clone(),
                balance: to_balance,
                amount,
            })?;

        self.balances.insert(from.clone(), debited);
        self.balances.insert(to.clone(), credited);
        debug!(amount, "Transfer applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_moves_funds() {
        let alice = AccountId::from("alice");
        let bob = AccountId::from("bob");
        let mut ledger = InMemoryLedger::with_balances([(alice.clone(), 30)]);

        ledger.transfer(&alice, &bob, 12).unwrap();
        assert_eq!(ledger.balance_of(&alice), 18);
        assert_eq!(ledger.balance_of(&bob), 12);
        assert_eq!(ledger.total(), 30);
    }

    #[test]
    fn test_overdraft_changes_nothing() {
        let alice = AccountId::from("alice");
        let bob = AccountId::from("bob");
        let mut ledger = InMemoryLedger::with_balances([(alice.clone(), 5)]);
        let before = ledger.clone();

        let err = ledger.transfer(&alice, &bob, 6).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                account: alice,
                balance: 5,
                required: 6
            }
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_overflowing_credit_changes_nothing() {
        let escrow = AccountId::from("escrow");
        let bob = AccountId::from("bob");
        let mut ledger =
            InMemoryLedger::with_balances([(escrow.clone(), 10), (bob.clone(), u64::MAX - 3)]);
        let before = ledger.clone();

        let err = ledger.transfer(&escrow, &bob, 10).unwrap_err();
        assert_eq!(
            err,
            LedgerError::BalanceOverflow {
                account: bob,
                balance: u64::MAX - 3,
                amount: 10
            }
        );
        assert_eq!(ledger, before);
        assert_eq!(ledger.total(), u64::MAX);
    }

    #[test]
    fn test_self_transfer_keeps_balance() {
        let alice = AccountId::from("alice");
        let mut ledger = InMemoryLedger::with_balances([(alice.clone(), 5)]);
        ledger.transfer(&alice, &alice, 5).unwrap();
        assert_eq!(ledger.balance_of(&alice), 5);
    }
}
