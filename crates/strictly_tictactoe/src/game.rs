//! Staked game state machine.
//!
//! A [`Game`] starts `Unresolved` and moves to exactly one of `Won`, `Tied`
//! or `Expired`. Every check runs before any field is touched, so a rejected
//! call leaves the game exactly as it was. Moving the stake is the caller's
//! job: the game only reports which transition happened and who is owed.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::action::Move;
use crate::error::GameError;
use crate::invariants::assert_invariants;
use crate::position::Coord;
use crate::types::{AccountId, Board, GameId, GameResult, PlayerSlot, Timestamp};

/// Time the first mover has after creation.
pub const START_WINDOW: u64 = 5000;

/// Time each later mover has after the previous move.
pub const ROUND_WINDOW: u64 = 2500;

/// Deadline windows applied to one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnWindows {
    /// Window for the opening move.
    pub start: u64,
    /// Window for every following move.
    pub round: u64,
}

impl Default for TurnWindows {
    fn default() -> Self {
        Self {
            start: START_WINDOW,
            round: ROUND_WINDOW,
        }
    }
}

/// What an accepted mark did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    /// Play passes to the other seat.
    Continued {
        /// Seat now due to move.
        next_turn: PlayerSlot,
        /// When that seat's window closes.
        deadline: Timestamp,
    },
    /// The mover completed a line.
    Won(PlayerSlot),
    /// The board filled with no completed line.
    Tied,
}

impl MarkOutcome {
    /// True when the mark resolved the game.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MarkOutcome::Continued { .. })
    }
}

/// An accepted mark together with its effect on the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marked {
    /// The move as recorded in the history.
    pub mv: Move,
    /// What the move did.
    pub outcome: MarkOutcome,
}

/// Who lost and who won by a lapsed deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forfeit {
    /// Seat that was due to move and did not.
    pub forfeited_by: PlayerSlot,
    /// Opponent of the forfeiting seat.
    pub awarded_to: PlayerSlot,
}

/// One staked game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Game {
    id: GameId,
    creator: AccountId,
    player_one: AccountId,
    player_two: AccountId,
    pub(crate) current_turn: PlayerSlot,
    deadline: Timestamp,
    pub(crate) board: Board,
    pub(crate) result: GameResult,
    windows: TurnWindows,
    pub(crate) history: Vec<Move>,
}

impl Game {
    /// Creates a game with an empty board, seat One to move.
    ///
    /// The stake deposit is not part of this call; the caller performs it
    /// and only keeps the game if the deposit succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DuplicatePlayers`] if both seats name one account.
    #[instrument(skip(creator, player_one, player_two, windows), fields(creator = %creator, player_one = %player_one, player_two = %player_two))]
    pub fn create(
        id: GameId,
        creator: AccountId,
        player_one: AccountId,
        player_two: AccountId,
        now: Timestamp,
        windows: TurnWindows,
    ) -> Result<Self, GameError> {
        if player_one == player_two {
            warn!("Rejecting game with duplicate players");
            return Err(GameError::DuplicatePlayers {
                account: player_one,
            });
        }

        let deadline = now.saturating_add(windows.start);
        debug!(deadline, "Game constructed");
        Ok(Self {
            id,
            creator,
            player_one,
            player_two,
            current_turn: PlayerSlot::One,
            deadline,
            board: Board::new(),
            result: GameResult::Unresolved,
            windows,
            history: Vec::new(),
        })
    }

    /// Returns the seat held by `account`, if any.
    pub fn slot_of(&self, account: &AccountId) -> Option<PlayerSlot> {
        if *account == self.player_one {
            Some(PlayerSlot::One)
        } else if *account == self.player_two {
            Some(PlayerSlot::Two)
        } else {
            None
        }
    }

    /// Returns the account seated at `slot`.
    pub fn account_of(&self, slot: PlayerSlot) -> &AccountId {
        match slot {
            PlayerSlot::One => &self.player_one,
            PlayerSlot::Two => &self.player_two,
        }
    }

    /// Account owed the stake, once the game is resolved.
    ///
    /// Winner for `Won`, creator for `Tied`, the opponent of the seat that
    /// let its deadline lapse for `Expired`.
    pub fn prize_recipient(&self) -> Option<&AccountId> {
        match self.result {
            GameResult::Unresolved => None,
            GameResult::Won(slot) => Some(self.account_of(slot)),
            GameResult::Tied => Some(&self.creator),
            GameResult::Expired => Some(self.account_of(self.current_turn.opponent())),
        }
    }

    /// Marks `(row, col)` for `actor` at time `now`.
    ///
    /// Checks run in order: seat, resolution, turn, deadline, cell. A winning
    /// mark leaves `current_turn` and `deadline` untouched.
    ///
    /// # Errors
    ///
    /// [`GameError::NotAPlayer`], [`GameError::GameAlreadyResolved`],
    /// [`GameError::NotYourTurn`], [`GameError::TurnExpired`],
    /// [`GameError::InvalidCellIndex`], [`GameError::CellAlreadyMarked`].
    #[instrument(skip(self, actor), fields(game_id = self.id, actor = %actor))]
    pub fn mark(
        &mut self,
        actor: &AccountId,
        row: usize,
        col: usize,
        now: Timestamp,
    ) -> Result<Marked, GameError> {
        let slot = self.slot_of(actor).ok_or_else(|| GameError::NotAPlayer {
            account: actor.clone(),
        })?;

        if self.result.is_terminal() {
            return Err(GameError::GameAlreadyResolved);
        }

        if slot != self.current_turn {
            return Err(GameError::NotYourTurn {
                account: actor.clone(),
            });
        }

        if now >= self.deadline {
            return Err(GameError::TurnExpired {
                deadline: self.deadline,
                now,
            });
        }

        let coord = Coord::try_new(row, col)?;
        let board = self.board.mark(row, col, slot)?;

        let mv = Move::new(slot, coord, now);
        self.board = board;
        self.history.push(mv);

        let outcome = if self.board.has_player_won(slot) {
            self.result = GameResult::Won(slot);
            info!(winner = %slot, "Game won");
            MarkOutcome::Won(slot)
        } else if self.board.is_full() {
            self.result = GameResult::Tied;
            info!("Game tied");
            MarkOutcome::Tied
        } else {
            self.current_turn = slot.opponent();
            self.deadline = now.saturating_add(self.windows.round);
            debug!(next_turn = %self.current_turn, deadline = self.deadline, "Turn passed");
            MarkOutcome::Continued {
                next_turn: self.current_turn,
                deadline: self.deadline,
            }
        };

        assert_invariants(self);
        Ok(Marked { mv, outcome })
    }

    /// Closes a game whose mover let the deadline pass.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameIsNotExpired`] if `now` is before the deadline.
    /// - [`GameError::PrizeAlreadyClaimed`] if the game is already resolved.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn expire(&mut self, now: Timestamp) -> Result<Forfeit, GameError> {
        if now < self.deadline {
            return Err(GameError::GameIsNotExpired {
                deadline: self.deadline,
                now,
            });
        }

        if self.result.is_terminal() {
            return Err(GameError::PrizeAlreadyClaimed);
        }

        self.result = GameResult::Expired;
        let forfeit = Forfeit {
            forfeited_by: self.current_turn,
            awarded_to: self.current_turn.opponent(),
        };
        info!(
            forfeited_by = %forfeit.forfeited_by,
            awarded_to = %forfeit.awarded_to,
            "Game expired"
        );
        Ok(forfeit)
    }

    /// Returns a status line for display.
    pub fn status_string(&self) -> String {
        match self.result {
            GameResult::Unresolved => format!(
                "In progress. Player {} ({}) to move before {}.",
                self.current_turn,
                self.account_of(self.current_turn),
                self.deadline
            ),
            GameResult::Won(slot) => {
                format!("Game over. Player {} ({}) wins!", slot, self.account_of(slot))
            }
            GameResult::Tied => "Game over. Tie!".to_string(),
            GameResult::Expired => format!(
                "Game over. Player {} ({}) ran out of time.",
                self.current_turn,
                self.account_of(self.current_turn)
            ),
        }
    }
}
