//! Lifecycle events emitted by the registry.

use serde::{Deserialize, Serialize};
use strictly_tictactoe::{AccountId, Coord, GameId, PlayerSlot, Timestamp};

/// Event kinds, one per [`GameEvent`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GameEventKind {
    /// A game was created and its stake deposited.
    GameCreated,
    /// A mark was accepted.
    GameRound,
    /// A mark completed a line.
    GameWon,
    /// A mark filled the board without a line.
    GameTied,
    /// A lapsed deadline was settled.
    GameExpired,
}

/// A lifecycle event with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GameEvent {
    /// Emitted once per successful `create_game`.
    GameCreated {
        /// New game id.
        game_id: GameId,
        /// Account that paid the stake.
        creator: AccountId,
        /// Seat One.
        player_one: AccountId,
        /// Seat Two.
        player_two: AccountId,
        /// Amount deposited into escrow.
        stake: u64,
        /// Deadline of the opening move.
        deadline: Timestamp,
    },
    /// Emitted for every accepted mark, terminal or not.
    GameRound {
        /// Game id.
        game_id: GameId,
        /// Account that marked.
        player: AccountId,
        /// Seat that marked.
        slot: PlayerSlot,
        /// Marked cell.
        coord: Coord,
        /// Seat due next, absent when the mark resolved the game.
        next_turn: Option<PlayerSlot>,
        /// Current deadline after the mark.
        deadline: Timestamp,
    },
    /// Emitted when a mark wins the game; the prize has been paid.
    GameWon {
        /// Game id.
        game_id: GameId,
        /// Winning account.
        winner: AccountId,
        /// Winning seat.
        slot: PlayerSlot,
        /// Amount paid out of escrow.
        prize: u64,
    },
    /// Emitted when a mark ties the game; the stake went back to the creator.
    GameTied {
        /// Game id.
        game_id: GameId,
        /// Account refunded.
        creator: AccountId,
        /// Amount paid out of escrow.
        prize: u64,
    },
    /// Emitted when an expired game is settled.
    GameExpired {
        /// Game id.
        game_id: GameId,
        /// Account that failed to move in time.
        forfeited_by: AccountId,
        /// Account paid the stake.
        awarded_to: AccountId,
        /// Amount paid out of escrow.
        prize: u64,
    },
}

impl GameEvent {
    /// Returns the event's kind.
    pub fn kind(&self) -> GameEventKind {
        match self {
            GameEvent::GameCreated { .. } => GameEventKind::GameCreated,
            GameEvent::GameRound { .. } => GameEventKind::GameRound,
            GameEvent::GameWon { .. } => GameEventKind::GameWon,
            GameEvent::GameTied { .. } => GameEventKind::GameTied,
            GameEvent::GameExpired { .. } => GameEventKind::GameExpired,
        }
    }

    /// Returns the id of the game the event belongs to.
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::GameCreated { game_id, .. }
            | GameEvent::GameRound { game_id, .. }
            | GameEvent::GameWon { game_id, .. }
            | GameEvent::GameTied { game_id, .. }
            | GameEvent::GameExpired { game_id, .. } => *game_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let event = GameEvent::GameTied {
            game_id: 3,
            creator: AccountId::from("house"),
            prize: 10,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "GameTied");
        assert_eq!(json["creator"], "house");
        assert_eq!(event.kind().to_string(), "GameTied");
        assert_eq!(event.game_id(), 3);
    }
}
