//! Grouping bets by position.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Bet, Choice};

/// Total staked on one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    pub position: Choice,
    pub amount: u64,
}

/// Stakes per distinct position, in first-bet order.
///
/// Inline for up to four positions; the default cap is two.
pub type Stakes = SmallVec<[Stake; 4]>;

/// Group bets by position, preserving the order in which each position was
/// first staked.
pub fn group_stakes<'a>(bets: impl IntoIterator<Item = &'a Bet>) -> Stakes {
    let mut stakes = Stakes::new();
    for bet in bets {
        match stakes.iter_mut().find(|s| s.position == bet.position) {
            Some(stake) => stake.amount = stake.amount.saturating_add(bet.amount),
            None => stakes.push(Stake {
                position: bet.position,
                amount: bet.amount,
            }),
        }
    }
    stakes
}
