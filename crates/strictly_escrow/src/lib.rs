//! Escrowed game registry for staked tic-tac-toe.
//!
//! # Architecture
//!
//! - **Registry**: owns every game, allocates ids, moves stakes
//! - **Ports**: `Ledger`, `Clock` and `EventSink` traits the registry calls
//! - **Adapters**: in-memory and system implementations of the ports
//! - **Config**: stake amount, escrow account and turn windows
//!
//! # Example
//!
//! ```
//! use strictly_escrow::{EscrowConfig, InMemoryLedger, ManualClock, RecordingSink, Registry};
//! use strictly_tictactoe::AccountId;
//!
//! let alice = AccountId::from("alice");
//! let ledger = InMemoryLedger::with_balances([(alice.clone(), 100)]);
//! let mut registry = Registry::new(
//!     EscrowConfig::default(),
//!     ledger,
//!     ManualClock::new(0),
//!     RecordingSink::new(),
//! )
//! .expect("default config is valid");
//!
//! let id = registry
//!     .create_game(&alice, alice.clone(), AccountId::from("bob"))
//!     .expect("funded");
//! registry.mark_space(&alice, id, 1, 1).expect("alice moves first");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapters;
mod config;
mod error;
mod events;
mod ports;
mod registry;

pub use adapters::{InMemoryLedger, ManualClock, RecordingSink, SystemClock, TracingSink};
pub use config::EscrowConfig;
pub use error::{ConfigError, ErrorClass, EscrowError, LedgerError};
pub use events::{GameEvent, GameEventKind};
pub use ports::{Clock, EventSink, Ledger};
pub use registry::Registry;
