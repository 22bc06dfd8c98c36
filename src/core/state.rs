//! Game state snapshots.
//!
//! ## GameState
//!
//! The full externally observable state:
//! - Player balance and cumulative wins
//! - The current round's bets and, once revealed, its resolution choices
//! - Phase flags
//!
//! Every transition is a method taking `&self` and returning a new value.
//! Nothing here mutates a snapshot in place; the engine wraps each new value
//! in a fresh `Arc`, so comparing pointers is enough to detect a change.
//!
//! Bets live in an `im::Vector`, so deriving the next snapshot shares
//! structure with the previous one instead of copying the bet list.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::choice::Choice;
use crate::rules::stakes::{group_stakes, Stakes};

/// Round phase, derived from the two phase flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Accepting bets.
    Betting,
    /// Opponent choice revealed, payout pending.
    Resolving,
    /// Payout applied; waiting for a new round.
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Betting => write!(f, "betting"),
            Phase::Resolving => write!(f, "resolving"),
            Phase::Complete => write!(f, "complete"),
        }
    }
}

/// A single stake on one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bet {
    pub position: Choice,
    pub amount: u64,
}

impl Bet {
    /// Create a new bet.
    #[must_use]
    pub const fn new(position: Choice, amount: u64) -> Self {
        Self { position, amount }
    }
}

/// Choices fixed when betting completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    /// The opponent's sampled choice.
    pub computer_choice: Choice,
    /// The player's representative position.
    pub player_best_choice: Choice,
    /// The choice deemed to have won the round.
    pub winning_choice: Choice,
}

/// The current betting round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Bets in placement order.
    pub bets: Vector<Bet>,

    /// Set together with the other two fields when betting completes.
    pub computer_choice: Option<Choice>,

    pub player_best_choice: Option<Choice>,

    pub winning_choice: Option<Choice>,
}

impl Round {
    /// Create an empty round.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all bet amounts.
    #[must_use]
    pub fn total_staked(&self) -> u64 {
        self.bets.iter().fold(0u64, |sum, bet| sum.saturating_add(bet.amount))
    }

    /// Sum of bet amounts on one position.
    #[must_use]
    pub fn stake_on(&self, position: Choice) -> u64 {
        self.bets
            .iter()
            .filter(|bet| bet.position == position)
            .fold(0u64, |sum, bet| sum.saturating_add(bet.amount))
    }

    /// Check if a position already has a bet.
    #[must_use]
    pub fn is_staked(&self, position: Choice) -> bool {
        self.bets.iter().any(|bet| bet.position == position)
    }

    /// Stakes grouped by distinct position, in first-bet order.
    #[must_use]
    pub fn stakes(&self) -> Stakes {
        group_stakes(self.bets.iter())
    }

    /// Number of distinct staked positions.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.stakes().len()
    }

    /// The resolution choices, if betting has completed.
    #[must_use]
    pub fn reveal(&self) -> Option<Reveal> {
        Some(Reveal {
            computer_choice: self.computer_choice?,
            player_best_choice: self.player_best_choice?,
            winning_choice: self.winning_choice?,
        })
    }
}

/// Player balance, ledger and current round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub balance: u64,

    /// Only ever increases.
    pub cumulative_wins: u64,

    pub current_round: Round,
}

impl Player {
    /// Create a player with the given balance and an empty round.
    #[must_use]
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            cumulative_wins: 0,
            current_round: Round::new(),
        }
    }
}

/// Full observable game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub is_showing_animation: bool,
    pub is_round_complete: bool,
}

impl GameState {
    /// Initial state: betting phase, empty round.
    #[must_use]
    pub fn new(initial_balance: u64) -> Self {
        Self {
            player: Player::new(initial_balance),
            is_showing_animation: false,
            is_round_complete: false,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_showing_animation {
            Phase::Resolving
        } else if self.is_round_complete {
            Phase::Complete
        } else {
            Phase::Betting
        }
    }

    /// Shorthand for the current round.
    #[must_use]
    pub fn round(&self) -> &Round {
        &self.player.current_round
    }

    // === Transitions ===

    /// Next state with `bet` appended and its amount debited.
    ///
    /// Callers check the balance first; the debit saturates at zero.
    #[must_use]
    pub fn with_bet(&self, bet: Bet) -> Self {
        let mut next = self.clone();
        next.player.balance = next.player.balance.saturating_sub(bet.amount);
        next.player.current_round.bets.push_back(bet);
        next
    }

    /// Next state with the round's choices revealed and the animation running.
    #[must_use]
    pub fn revealed(&self, reveal: Reveal) -> Self {
        let mut next = self.clone();
        let round = &mut next.player.current_round;
        round.computer_choice = Some(reveal.computer_choice);
        round.player_best_choice = Some(reveal.player_best_choice);
        round.winning_choice = Some(reveal.winning_choice);
        next.is_showing_animation = true;
        next.is_round_complete = false;
        next
    }

    /// Next state with the payout credited and the round complete.
    ///
    /// `wins_credit` is added to the cumulative wins ledger.
    #[must_use]
    pub fn settled(&self, payout: u64, wins_credit: u64) -> Self {
        let mut next = self.clone();
        next.player.balance = next.player.balance.saturating_add(payout);
        next.player.cumulative_wins = next.player.cumulative_wins.saturating_add(wins_credit);
        next.is_showing_animation = false;
        next.is_round_complete = true;
        next
    }

    /// Next state with an empty round in the betting phase.
    ///
    /// Balance and cumulative wins carry over.
    #[must_use]
    pub fn new_round(&self) -> Self {
        let mut next = self.clone();
        next.player.current_round = Round::new();
        next.is_showing_animation = false;
        next.is_round_complete = false;
        next
    }
}
