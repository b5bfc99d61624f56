//! Ready-made implementations of the collaborator ports.

mod clock;
mod ledger;
mod sink;

pub use clock::{ManualClock, SystemClock};
pub use ledger::InMemoryLedger;
pub use sink::{RecordingSink, TracingSink};
