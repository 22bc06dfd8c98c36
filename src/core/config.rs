//! Game configuration types.
//!
//! Games configure the engine at startup by providing a `GameConfig`:
//! - the ordered choice set
//! - starting balance and the fixed stake per bet
//! - the distinct-position cap and payout multipliers
//! - the resolution delay and RNG seed
//!
//! The configuration is validated once, when an engine is built, and is
//! immutable for the lifetime of that engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::choice::ChoiceSet;

/// Configuration problems detected at construction time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("choice set must have an odd number of choices between 3 and 255 (got {0})")]
    ChoiceCount(usize),
    #[error("choice name at index {0} is empty")]
    EmptyChoiceName(usize),
    #[error("duplicate choice name {0:?}")]
    DuplicateChoice(String),
    #[error("bet amount must be positive")]
    ZeroBetAmount,
    #[error("max positions must be between 1 and {choices} (got {got})")]
    MaxPositions { got: usize, choices: usize },
    #[error("multiplier for {positions} staked position(s) must be positive")]
    ZeroMultiplier { positions: usize },
}

/// How a resolved round feeds the cumulative wins ledger.
///
/// Both policies only ever add, and only when the payout strictly exceeds
/// the round's total stake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinsLedger {
    /// Add `payout - staked`.
    #[default]
    Net,
    /// Add the whole payout. Pick this for hosts whose ledger records the
    /// full payout of a winning round (7000 for a 7000 payout on 500).
    Gross,
}

impl WinsLedger {
    /// Amount to add to the ledger for a round with the given payout and stake.
    #[must_use]
    pub fn credit(self, payout: u64, staked: u64) -> u64 {
        if payout <= staked {
            return 0;
        }
        match self {
            WinsLedger::Net => crate::rules::net_winnings(payout, staked),
            WinsLedger::Gross => payout,
        }
    }
}

/// Complete game configuration.
///
/// `Default` gives the classic table: 5000 starting balance, 500 per bet,
/// two positions, 14x single and 3x double payouts, a two second reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Ordered choice set; position in the list defines the beats relation.
    pub choices: ChoiceSet,

    /// Balance at engine construction.
    pub initial_balance: u64,

    /// Stake debited by every accepted bet.
    pub bet_amount: u64,

    /// Maximum distinct positions per round.
    pub max_positions: usize,

    /// Multiplier for a win when exactly one position is staked.
    pub single_bet_multiplier: u64,

    /// Multiplier per winning position when two positions are staked.
    pub double_bet_multiplier: u64,

    /// Multipliers for three or more staked positions, starting at three.
    ///
    /// Cardinalities without an entry fall back to `double_bet_multiplier`.
    pub extra_multipliers: Vec<u64>,

    /// Delay between the reveal and the payout.
    pub animation_duration: Duration,

    /// Seed for the opponent RNG.
    pub seed: u64,

    /// Cumulative wins bookkeeping.
    pub wins_ledger: WinsLedger,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            choices: ChoiceSet::standard(),
            initial_balance: 5000,
            bet_amount: 500,
            max_positions: 2,
            single_bet_multiplier: 14,
            double_bet_multiplier: 3,
            extra_multipliers: Vec::new(),
            animation_duration: Duration::from_millis(2000),
            seed: 42,
            wins_ledger: WinsLedger::Net,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the choice set.
    #[must_use]
    pub fn with_choices(mut self, choices: ChoiceSet) -> Self {
        self.choices = choices;
        self
    }

    /// Set the starting balance.
    #[must_use]
    pub fn with_initial_balance(mut self, balance: u64) -> Self {
        self.initial_balance = balance;
        self
    }

    /// Set the stake per bet.
    #[must_use]
    pub fn with_bet_amount(mut self, amount: u64) -> Self {
        self.bet_amount = amount;
        self
    }

    /// Set the distinct-position cap.
    #[must_use]
    pub fn with_max_positions(mut self, max: usize) -> Self {
        self.max_positions = max;
        self
    }

    /// Set the single and double position multipliers.
    #[must_use]
    pub fn with_multipliers(mut self, single: u64, double: u64) -> Self {
        self.single_bet_multiplier = single;
        self.double_bet_multiplier = double;
        self
    }

    /// Set multipliers for three or more positions.
    #[must_use]
    pub fn with_extra_multipliers(mut self, multipliers: Vec<u64>) -> Self {
        self.extra_multipliers = multipliers;
        self
    }

    /// Set the resolution delay.
    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the cumulative wins policy.
    #[must_use]
    pub fn with_wins_ledger(mut self, ledger: WinsLedger) -> Self {
        self.wins_ledger = ledger;
        self
    }

    /// Payout multiplier applied to winning positions when `positions`
    /// distinct positions are staked. Zero positions pay nothing.
    #[must_use]
    pub fn multiplier_for(&self, positions: usize) -> u64 {
        match positions {
            0 => 0,
            1 => self.single_bet_multiplier,
            2 => self.double_bet_multiplier,
            k => self
                .extra_multipliers
                .get(k - 3)
                .copied()
                .unwrap_or(self.double_bet_multiplier),
        }
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bet_amount == 0 {
            return Err(ConfigError::ZeroBetAmount);
        }
        if self.max_positions == 0 || self.max_positions > self.choices.len() {
            return Err(ConfigError::MaxPositions {
                got: self.max_positions,
                choices: self.choices.len(),
            });
        }
        if self.single_bet_multiplier == 0 {
            return Err(ConfigError::ZeroMultiplier { positions: 1 });
        }
        if self.double_bet_multiplier == 0 {
            return Err(ConfigError::ZeroMultiplier { positions: 2 });
        }
        if let Some(i) = self.extra_multipliers.iter().position(|&m| m == 0) {
            return Err(ConfigError::ZeroMultiplier { positions: i + 3 });
        }
        Ok(())
    }
}
