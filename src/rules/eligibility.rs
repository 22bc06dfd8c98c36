//! Which positions can still take a bet.
//!
//! Presentation layers use these to decide which controls to enable. The
//! engine applies the same position-cap rule when it validates `place_bet`.

use crate::core::{Bet, Choice};

/// Check whether `choice` may take another bet under the position cap.
///
/// An already-staked position is always allowed; a new one only while fewer
/// than `max_positions` positions are staked.
pub fn can_bet_on<'a>(
    bets: impl IntoIterator<Item = &'a Bet>,
    choice: Choice,
    max_positions: usize,
) -> bool {
    let mut distinct: smallvec::SmallVec<[Choice; 4]> = smallvec::SmallVec::new();
    for bet in bets {
        if bet.position == choice {
            return true;
        }
        if !distinct.contains(&bet.position) {
            distinct.push(bet.position);
        }
    }
    distinct.len() < max_positions
}

/// Check whether any of `choices` may take another bet.
pub fn can_place_any_bet<'a, B>(
    bets: B,
    choices: impl IntoIterator<Item = Choice>,
    max_positions: usize,
) -> bool
where
    B: IntoIterator<Item = &'a Bet> + Clone,
{
    choices
        .into_iter()
        .any(|choice| can_bet_on(bets.clone(), choice, max_positions))
}
