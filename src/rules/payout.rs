//! Payout computation over a round's bets.
//!
//! ## Rules
//!
//! With `k` distinct staked positions against the opponent's choice:
//! - `k == 1`: a win pays stake x single multiplier, a tie refunds the
//!   stake, a loss pays nothing.
//! - `k >= 2`: each winning position pays its stake x the multiplier for
//!   `k` positions. Ties pay nothing once more than one position is staked.
//!
//! Multipliers come from `GameConfig::multiplier_for`.

use crate::core::{Bet, Choice, GameConfig, Outcome};

use super::stakes::group_stakes;

/// Total amount credited for `bets` against `opponent`.
///
/// Returns 0 for an empty bet set. Arithmetic saturates.
pub fn payout<'a>(
    bets: impl IntoIterator<Item = &'a Bet>,
    opponent: Choice,
    config: &GameConfig,
) -> u64 {
    let stakes = group_stakes(bets);
    let multiplier = config.multiplier_for(stakes.len());

    if let [single] = stakes.as_slice() {
        return match config.choices.outcome(single.position, opponent) {
            Outcome::Win => single.amount.saturating_mul(multiplier),
            Outcome::Tie => single.amount,
            Outcome::Lose => 0,
        };
    }

    stakes
        .iter()
        .filter(|stake| config.choices.outcome(stake.position, opponent) == Outcome::Win)
        .fold(0u64, |total, stake| {
            total.saturating_add(stake.amount.saturating_mul(multiplier))
        })
}

/// Net gain of a round: `payout - staked`, floored at zero.
#[must_use]
pub fn net_winnings(payout: u64, staked: u64) -> u64 {
    payout.saturating_sub(staked)
}
