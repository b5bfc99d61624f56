//! Escrow configuration.

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_tictactoe::{AccountId, ROUND_WINDOW, START_WINDOW, TurnWindows};
use tracing::{debug, info, instrument};

use crate::error::ConfigError;

/// Stake and timing parameters for a registry.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct EscrowConfig {
    /// Account that holds stakes while games run.
    #[serde(default = "default_escrow_account")]
    escrow_account: AccountId,

    /// Amount every creator deposits per game.
    #[serde(default = "default_stake_amount")]
    stake_amount: u64,

    /// Window for the opening move.
    #[serde(default = "default_start_window")]
    start_window: u64,

    /// Window for each later move.
    #[serde(default = "default_round_window")]
    round_window: u64,
}

fn default_escrow_account() -> AccountId {
    AccountId::from("escrow")
}

fn default_stake_amount() -> u64 {
    10
}

fn default_start_window() -> u64 {
    START_WINDOW
}

fn default_round_window() -> u64 {
    ROUND_WINDOW
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            escrow_account: default_escrow_account(),
            stake_amount: default_stake_amount(),
            start_window: default_start_window(),
            round_window: default_round_window(),
        }
    }
}

impl EscrowConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading escrow config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or a zero stake.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            escrow = %config.escrow_account,
            stake = config.stake_amount,
            "Escrow config loaded"
        );
        Ok(config)
    }

    /// Rejects values no game could run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the stake or a window is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stake_amount == 0 {
            return Err(ConfigError::new("stake_amount must be positive"));
        }
        if self.start_window == 0 || self.round_window == 0 {
            return Err(ConfigError::new("turn windows must be positive"));
        }
        Ok(())
    }

    /// Deadline windows for new games.
    pub fn windows(&self) -> TurnWindows {
        TurnWindows {
            start: self.start_window,
            round: self.round_window,
        }
    }
}
