//! Pure rules for a betting round.
//!
//! Everything here is side-effect free apart from the RNG handed to an
//! `OpponentPolicy`:
//! - Outcome of a choice pair and the headline verdict of a round
//! - Opponent sampling
//! - The player's best choice and the round's winning choice
//! - Payout over a bet set
//!
//! The engine calls into these functions but keeps no rules of its own.

pub mod eligibility;
pub mod opponent;
pub mod outcome;
pub mod payout;
pub mod selection;
pub mod stakes;

pub use eligibility::{can_bet_on, can_place_any_bet};
pub use opponent::{FixedOpponent, OpponentPolicy, ScriptedOpponent, UniformOpponent};
pub use outcome::{outcome, verdict, RoundVerdict};
pub use payout::{net_winnings, payout};
pub use selection::{player_best_choice, reveal, winning_choice};
pub use stakes::{group_stakes, Stake, Stakes};
