//! Accepted moves, kept as first-class records for audit and replay.

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::position::Coord;
use crate::types::{PlayerSlot, Timestamp};

/// A mark that a game accepted: which seat marked which cell, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// The seat that marked.
    pub slot: PlayerSlot,
    /// The marked cell.
    pub coord: Coord,
    /// Host time the move was accepted.
    pub at: Timestamp,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} @ {}", self.slot, self.coord, self.at)
    }
}
