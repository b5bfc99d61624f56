//! Scripted walkthrough on a manual clock.
//!
//! Plays one game to a win and lets a second one lapse, recording every
//! event and the closing balances.

use anyhow::Result;
use derive_getters::Getters;
use serde::Serialize;
use std::collections::BTreeMap;
use strictly_escrow::{GameEvent, InMemoryLedger, ManualClock, RecordingSink, Registry};
use strictly_tictactoe::AccountId;
use tracing::{info, instrument};

use crate::config::ServerConfig;

/// Opening balance given to each demo account when none are configured.
pub const DEMO_FUNDS: u64 = 100;

const HOUSE: &str = "house";
const ALICE: &str = "alice";
const BOB: &str = "bob";

/// What the walkthrough produced.
#[derive(Debug, Clone, Serialize, Getters)]
pub struct DemoReport {
    events: Vec<GameEvent>,
    balances: BTreeMap<AccountId, u64>,
}

/// Runs the walkthrough against the configured escrow rules.
///
/// # Errors
///
/// Returns an error if the escrow rules are invalid or the configured
/// balances cannot fund both stakes.
#[instrument(skip(config))]
pub fn run(config: &ServerConfig) -> Result<DemoReport> {
    let house = AccountId::from(HOUSE);
    let alice = AccountId::from(ALICE);
    let bob = AccountId::from(BOB);

    let ledger = if config.balances().is_empty() {
        InMemoryLedger::with_balances([&house, &alice, &bob].map(|a| (a.clone(), DEMO_FUNDS)))
    } else {
        config.ledger()
    };

    let clock = ManualClock::new(0);
    let mut registry = Registry::new(
        config.escrow().clone(),
        ledger,
        clock.clone(),
        RecordingSink::new(),
    )?;

    let won = registry.create_game(&house, alice.clone(), bob.clone())?;
    for (mover, row, col) in [
        (&alice, 1, 1),
        (&bob, 0, 0),
        (&alice, 0, 1),
        (&bob, 2, 2),
        (&alice, 2, 1),
    ] {
        clock.advance(1);
        registry.mark_space(mover, won, row, col)?;
    }
    info!(game_id = won, "Demo game won");

    let lapsed = registry.create_game(&house, alice, bob)?;
    clock.advance(*config.escrow().start_window());
    registry.release_funds_after_expiration(lapsed)?;
    info!(game_id = lapsed, "Demo game expired");

    Ok(DemoReport {
        events: registry.sink().events().to_vec(),
        balances: registry.ledger().balances().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_escrow::{EscrowError, GameEventKind};

    #[test]
    fn test_demo_with_defaults() {
        let report = run(&ServerConfig::default()).unwrap();

        let kinds: Vec<_> = report.events().iter().map(GameEvent::kind).collect();
        assert_eq!(kinds.first(), Some(&GameEventKind::GameCreated));
        assert_eq!(kinds.last(), Some(&GameEventKind::GameExpired));
        assert_eq!(
            kinds.iter().filter(|k| **k == GameEventKind::GameRound).count(),
            5
        );

        let balance = |name: &str| report.balances()[&AccountId::from(name)];
        assert_eq!(balance(HOUSE), DEMO_FUNDS - 20);
        assert_eq!(balance(ALICE), DEMO_FUNDS + 10);
        assert_eq!(balance(BOB), DEMO_FUNDS + 10);
        assert_eq!(report.balances().get(&AccountId::from("escrow")), Some(&0));
    }

    #[test]
    fn test_demo_unfunded_house_fails() {
        let config: ServerConfig = toml::from_str("[balances]\nalice = 5\n").unwrap();
        let err = run(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EscrowError>(),
            Some(EscrowError::InsufficientFunds { .. })
        ));
    }
}
