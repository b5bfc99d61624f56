//! Core domain types for staked tic-tac-toe.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::position::Coord;

/// Seconds on the host clock.
pub type Timestamp = u64;

/// Game identifier, dense and 1-based.
pub type GameId = u64;

/// Ledger account identity of a player, creator or the escrow itself.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an account id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A player's fixed seat within one game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum PlayerSlot {
    /// First mover.
    One,
    /// Second mover.
    Two,
}

impl PlayerSlot {
    /// Returns the other slot.
    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    fn symbol(self) -> char {
        match self {
            PlayerSlot::One => 'X',
            PlayerSlot::Two => 'O',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Not yet marked.
    Empty,
    /// Marked by a player. Never reverts to `Empty`.
    MarkedBy(PlayerSlot),
}

/// 3x3 board, cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Returns the cell at a coordinate.
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.index()]
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    #[cfg(test)]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell; 9] {
        &mut self.cells
    }

    /// Checks if the cell at a coordinate is empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord) == Cell::Empty
    }

    /// Returns a board identical to this one with `(row, col)` marked by `player`.
    ///
    /// # Errors
    ///
    /// - [`GameError::InvalidCellIndex`] if `row` or `col` is outside `0..3`.
    /// - [`GameError::CellAlreadyMarked`] if the cell is not empty.
    pub fn mark(&self, row: usize, col: usize, player: PlayerSlot) -> Result<Board, GameError> {
        let coord = Coord::try_new(row, col)?;
        if !self.is_empty(coord) {
            return Err(GameError::CellAlreadyMarked { row, col });
        }
        let mut next = self.clone();
        next.cells[coord.index()] = Cell::MarkedBy(player);
        Ok(next)
    }

    /// Checks whether any line is complete for `player`.
    pub fn has_player_won(&self, player: PlayerSlot) -> bool {
        crate::rules::has_player_won(self, player)
    }

    /// Checks whether every cell is marked.
    pub fn is_full(&self) -> bool {
        crate::rules::is_full(self)
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for (i, cell) in self.cells.iter().enumerate() {
            out.push(match cell {
                Cell::Empty => '.',
                Cell::MarkedBy(slot) => slot.symbol(),
            });
            if i % 3 < 2 {
                out.push('|');
            } else if i < 8 {
                out.push_str("\n-+-+-\n");
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolution state of a game. Terminal once not `Unresolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Still being played.
    Unresolved,
    /// A player completed a line.
    Won(PlayerSlot),
    /// Board filled with no completed line.
    Tied,
    /// The side due to move let its deadline lapse.
    Expired,
}

impl GameResult {
    /// Returns true for `Won`, `Tied` and `Expired`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::Unresolved)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Unresolved => write!(f, "unresolved"),
            GameResult::Won(slot) => write!(f, "won by player {}", slot),
            GameResult::Tied => write!(f, "tied"),
            GameResult::Expired => write!(f, "expired"),
        }
    }
}
