//! # rust-rps
//!
//! Round engine for a single-player rock-paper-scissors betting game against
//! a randomized opponent.
//!
//! ## Design Principles
//!
//! 1. **Configuration Over Convention**: The choice set, stakes, position
//!    cap, multipliers and reveal delay all come from `GameConfig`.
//!
//! 2. **Immutable Snapshots**: Every accepted action produces a new
//!    `Arc<GameState>`. Listeners and callers can compare pointers to detect
//!    change and can never mutate engine state through a snapshot.
//!
//! 3. **Invalid Actions Are No-ops**: A rejected bet or completion leaves the
//!    state untouched. The returned `Rejection` only explains why.
//!
//! ## Modules
//!
//! - `core`: Choices, configuration, RNG, state snapshots
//! - `rules`: Pure outcome, selection and payout functions; opponent policies
//! - `engine`: `RoundEngine`, listeners, clocks
//!
//! ## Example
//!
//! ```
//! use rust_rps::{FixedOpponent, GameConfig, ManualClock, Phase, RoundEngine};
//!
//! let config = GameConfig::default();
//! let rock = config.choices.by_name("rock").unwrap();
//! let scissors = config.choices.by_name("scissors").unwrap();
//!
//! let mut engine = RoundEngine::builder(config)
//!     .opponent(FixedOpponent(scissors))
//!     .clock(ManualClock::new())
//!     .build()
//!     .unwrap();
//!
//! engine.place_bet(rock).unwrap();
//! engine.complete_betting().unwrap();
//! assert_eq!(engine.phase(), Phase::Resolving);
//!
//! engine.settle();
//! assert_eq!(engine.state().player.balance, 11_500);
//! ```

pub mod core;
pub mod engine;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Bet, Choice, ChoiceSet, ConfigError, GameConfig, GameRng, GameRngState, GameState, Outcome,
    Phase, Player, Reveal, Round, WinsLedger, STANDARD_CHOICES,
};

pub use crate::rules::{
    FixedOpponent, OpponentPolicy, RoundVerdict, ScriptedOpponent, Stake, UniformOpponent,
};

pub use crate::engine::{
    Clock, GameCore, ListenerId, ManualClock, Rejection, RoundEngine, RoundEngineBuilder,
    StateListener, Subscription, SystemClock,
};
