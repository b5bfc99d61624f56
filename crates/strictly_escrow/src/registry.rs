//! Registry of staked games.
//!
//! The registry owns every [`Game`] in an append-only arena indexed by
//! `id - 1` and is the only party that moves funds out of escrow. Each
//! operation reads the clock once, works on a copy of the affected game and
//! commits it only after any transfer has succeeded, so a rejected operation
//! leaves games, balances and the event stream untouched.

use strictly_tictactoe::{AccountId, Forfeit, Game, GameId, GameResult, MarkOutcome, Marked};
use tracing::{debug, info, instrument, warn};

use crate::config::EscrowConfig;
use crate::error::{ConfigError, EscrowError};
use crate::events::GameEvent;
use crate::ports::{Clock, EventSink, Ledger};

/// All games plus the escrow authority and the collaborators it calls.
#[derive(Debug)]
pub struct Registry<L, C, E> {
    config: EscrowConfig,
    ledger: L,
    clock: C,
    sink: E,
    games: Vec<Game>,
}

impl<L, C, E> Registry<L, C, E>
where
    L: Ledger,
    C: Clock,
    E: EventSink,
{
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` has a zero stake or a zero turn
    /// window.
    pub fn new(config: EscrowConfig, ledger: L, clock: C, sink: E) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ledger,
            clock,
            sink,
            games: Vec::new(),
        })
    }

    /// Creates a game funded by `creator` and returns its id.
    ///
    /// The stake moves from `creator` to escrow before the game is stored.
    ///
    /// # Errors
    ///
    /// - [`EscrowError::InsufficientFunds`] if `creator` cannot cover the stake.
    /// - [`EscrowError::Game`] with `DuplicatePlayers` if both seats match.
    #[instrument(skip(self, creator, player_one, player_two), fields(creator = %creator, player_one = %player_one, player_two = %player_two))]
    pub fn create_game(
        &mut self,
        creator: &AccountId,
        player_one: AccountId,
        player_two: AccountId,
    ) -> Result<GameId, EscrowError> {
        let now = self.clock.now();
        let game_id = self.next_id();
        let stake = *self.config.stake_amount();

        let balance = self.ledger.balance_of(creator);
        if balance < stake {
            warn!(balance, stake, "Creator cannot cover the stake");
            return Err(EscrowError::InsufficientFunds {
                account: creator.clone(),
                balance,
                required: stake,
            });
        }

        let game = Game::create(
            game_id,
            creator.clone(),
            player_one,
            player_two,
            now,
            self.config.windows(),
        )
        .inspect_err(|e| warn!(error = %e, "Game creation rejected"))?;

        self.ledger
            .transfer(creator, self.config.escrow_account(), stake)
            .inspect_err(|e| warn!(error = %e, "Stake deposit failed"))?;

        let event = GameEvent::GameCreated {
            game_id,
            creator: creator.clone(),
            player_one: game.player_one().clone(),
            player_two: game.player_two().clone(),
            stake,
            deadline: *game.deadline(),
        };
        self.games.push(game);
        self.sink.emit(event);

        info!(game_id, stake, "Game created");
        Ok(game_id)
    }

    /// Marks `(row, col)` in game `game_id` on behalf of `actor`.
    ///
    /// A winning or tying mark pays the stake out of escrow in the same
    /// operation.
    ///
    /// # Errors
    ///
    /// [`EscrowError::InvalidGameId`], or [`EscrowError::Game`] with any of
    /// `NotAPlayer`, `GameAlreadyResolved`, `NotYourTurn`, `TurnExpired`,
    /// `InvalidCellIndex`, `CellAlreadyMarked`.
    #[instrument(skip(self, actor), fields(actor = %actor))]
    pub fn mark_space(
        &mut self,
        actor: &AccountId,
        game_id: GameId,
        row: usize,
        col: usize,
    ) -> Result<Marked, EscrowError> {
        let now = self.clock.now();
        let index = self.index_of(game_id)?;

        let mut next = self.games[index].clone();
        let marked = next
            .mark(actor, row, col, now)
            .inspect_err(|e| warn!(error = %e, "Mark rejected"))?;

        let mut events = vec![round_event(&next, actor, marked)];
        match marked.outcome {
            MarkOutcome::Won(slot) => {
                let winner = next.account_of(slot).clone();
                let prize = self.disburse(&winner)?;
                events.push(GameEvent::GameWon {
                    game_id,
                    winner,
                    slot,
                    prize,
                });
            }
            MarkOutcome::Tied => {
                let creator = next.creator().clone();
                let prize = self.disburse(&creator)?;
                events.push(GameEvent::GameTied {
                    game_id,
                    creator,
                    prize,
                });
            }
            MarkOutcome::Continued { .. } => {}
        }

        self.games[index] = next;
        for event in events {
            self.sink.emit(event);
        }

        info!(game_id, outcome = ?marked.outcome, "Mark accepted");
        Ok(marked)
    }

    /// Settles a game whose mover let the deadline pass. Anyone may call it.
    ///
    /// The seat due to move forfeits; its opponent receives the stake.
    ///
    /// # Errors
    ///
    /// [`EscrowError::InvalidGameId`], or [`EscrowError::Game`] with
    /// `GameIsNotExpired` or `PrizeAlreadyClaimed`.
    #[instrument(skip(self))]
    pub fn release_funds_after_expiration(
        &mut self,
        game_id: GameId,
    ) -> Result<Forfeit, EscrowError> {
        let now = self.clock.now();
        let index = self.index_of(game_id)?;

        let mut next = self.games[index].clone();
        let forfeit = next
            .expire(now)
            .inspect_err(|e| warn!(error = %e, "Release rejected"))?;

        let forfeited_by = next.account_of(forfeit.forfeited_by).clone();
        let awarded_to = next.account_of(forfeit.awarded_to).clone();
        let prize = self.disburse(&awarded_to)?;

        self.games[index] = next;
        self.sink.emit(GameEvent::GameExpired {
            game_id,
            forfeited_by,
            awarded_to,
            prize,
        });

        info!(game_id, ?forfeit, "Expired game settled");
        Ok(forfeit)
    }

    /// Pays the full stake from escrow to `recipient`.
    fn disburse(&mut self, recipient: &AccountId) -> Result<u64, EscrowError> {
        let stake = *self.config.stake_amount();
        self.ledger
            .transfer(self.config.escrow_account(), recipient, stake)
            .inspect_err(|e| warn!(error = %e, "Escrow payout failed"))?;
        debug!(recipient = %recipient, stake, "Stake disbursed");
        Ok(stake)
    }
}

impl<L, C, E> Registry<L, C, E> {
    /// Returns the game with `game_id`.
    ///
    /// # Errors
    ///
    /// Returns [`EscrowError::InvalidGameId`] if no such game exists.
    pub fn game(&self, game_id: GameId) -> Result<&Game, EscrowError> {
        let index = self.index_of(game_id)?;
        Ok(&self.games[index])
    }

    /// Number of games ever created; also the highest valid id.
    pub fn game_count(&self) -> u64 {
        self.games.len() as u64
    }

    /// Number of games still unresolved.
    pub fn open_games(&self) -> usize {
        self.games
            .iter()
            .filter(|g| *g.result() == GameResult::Unresolved)
            .count()
    }

    /// Registry configuration.
    pub fn config(&self) -> &EscrowConfig {
        &self.config
    }

    /// Account holding the stakes.
    pub fn escrow_account(&self) -> &AccountId {
        self.config.escrow_account()
    }

    /// Stake per game.
    pub fn stake_amount(&self) -> u64 {
        *self.config.stake_amount()
    }

    /// The ledger collaborator, for balance queries.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The clock collaborator.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The event sink collaborator.
    pub fn sink(&self) -> &E {
        &self.sink
    }

    fn next_id(&self) -> GameId {
        self.game_count() + 1
    }

    /// Maps a 1-based id to its arena slot.
    fn index_of(&self, game_id: GameId) -> Result<usize, EscrowError> {
        if game_id == 0 || game_id > self.game_count() {
            debug!(game_id, count = self.game_count(), "Unknown game id");
            return Err(EscrowError::InvalidGameId { game_id });
        }
        Ok((game_id - 1) as usize)
    }
}

fn round_event(game: &Game, actor: &AccountId, marked: Marked) -> GameEvent {
    GameEvent::GameRound {
        game_id: *game.id(),
        player: actor.clone(),
        slot: marked.mv.slot,
        coord: marked.mv.coord,
        next_turn: match marked.outcome {
            MarkOutcome::Continued { next_turn, .. } => Some(next_turn),
            MarkOutcome::Won(_) | MarkOutcome::Tied => None,
        },
        deadline: *game.deadline(),
    }
}
