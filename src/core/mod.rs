//! Core value types: choices, configuration, RNG, state snapshots.
//!
//! This module contains the data the rules and the engine operate on.
//! Games configure it via `GameConfig` rather than modifying the core.

pub mod choice;
pub mod config;
pub mod rng;
pub mod state;

pub use choice::{Choice, ChoiceSet, Outcome, STANDARD_CHOICES};
pub use config::{ConfigError, GameConfig, WinsLedger};
pub use rng::{GameRng, GameRngState};
pub use state::{Bet, GameState, Phase, Player, Reveal, Round};
