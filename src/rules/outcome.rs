//! Outcomes for a choice pair and for a whole round.

use serde::{Deserialize, Serialize};

use crate::core::{Bet, Choice, ChoiceSet, Outcome};

use super::stakes::group_stakes;

/// Outcome of `ours` against `theirs` under the set's beats relation.
#[must_use]
pub fn outcome(choices: &ChoiceSet, ours: Choice, theirs: Choice) -> Outcome {
    choices.outcome(ours, theirs)
}

/// Headline result of a resolved round.
///
/// A single staked position reports its own outcome. With several positions
/// the round is a win if any position wins; ties count as losses there, as
/// they do in the payout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundVerdict {
    Win,
    Tie,
    Lose,
}

impl std::fmt::Display for RoundVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundVerdict::Win => write!(f, "YOU WIN"),
            RoundVerdict::Tie => write!(f, "TIE"),
            RoundVerdict::Lose => write!(f, "YOU LOSE"),
        }
    }
}

/// Verdict for `bets` against `opponent`, or `None` with no bets.
pub fn verdict<'a>(
    bets: impl IntoIterator<Item = &'a Bet>,
    opponent: Choice,
    choices: &ChoiceSet,
) -> Option<RoundVerdict> {
    let stakes = group_stakes(bets);
    let mut outcomes = stakes
        .iter()
        .map(|stake| choices.outcome(stake.position, opponent));

    if stakes.len() == 1 {
        return outcomes.next().map(|o| match o {
            Outcome::Win => RoundVerdict::Win,
            Outcome::Tie => RoundVerdict::Tie,
            Outcome::Lose => RoundVerdict::Lose,
        });
    }
    if stakes.is_empty() {
        return None;
    }
    if outcomes.any(|o| o == Outcome::Win) {
        Some(RoundVerdict::Win)
    } else {
        Some(RoundVerdict::Lose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROCK: Choice = Choice(0);
    const PAPER: Choice = Choice(1);
    const SCISSORS: Choice = Choice(2);

    #[test]
    fn test_outcome_pairs() {
        let set = ChoiceSet::standard();
        assert_eq!(outcome(&set, PAPER, ROCK), Outcome::Win);
        assert_eq!(outcome(&set, PAPER, PAPER), Outcome::Tie);
        assert_eq!(outcome(&set, PAPER, SCISSORS), Outcome::Lose);
    }

    #[test]
    fn test_single_position_verdicts() {
        let set = ChoiceSet::standard();
        let bets = [Bet::new(ROCK, 500)];
        assert_eq!(verdict(&bets, SCISSORS, &set), Some(RoundVerdict::Win));
        assert_eq!(verdict(&bets, ROCK, &set), Some(RoundVerdict::Tie));
        assert_eq!(verdict(&bets, PAPER, &set), Some(RoundVerdict::Lose));
    }

    #[test]
    fn test_multi_position_tie_is_loss() {
        let set = ChoiceSet::standard();
        let bets = [Bet::new(ROCK, 500), Bet::new(SCISSORS, 500)];
        assert_eq!(verdict(&bets, ROCK, &set), Some(RoundVerdict::Lose));
        assert_eq!(verdict(&bets, PAPER, &set), Some(RoundVerdict::Win));
    }

    #[test]
    fn test_no_bets() {
        let set = ChoiceSet::standard();
        assert_eq!(verdict(std::iter::empty::<&Bet>(), ROCK, &set), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RoundVerdict::Win.to_string(), "YOU WIN");
        assert_eq!(RoundVerdict::Tie.to_string(), "TIE");
        assert_eq!(RoundVerdict::Lose.to_string(), "YOU LOSE");
    }
}
