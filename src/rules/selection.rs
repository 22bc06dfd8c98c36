//! Choosing what a resolved round displays.
//!
//! `player_best_choice` picks the player's representative position for the
//! reveal. It does not affect the payout.

use crate::core::{Bet, Choice, ChoiceSet, Outcome, Reveal};

use super::stakes::group_stakes;

/// The player's representative position against `opponent`.
///
/// Among distinct staked positions in first-bet order, the first win is
/// preferred, then the first tie, then the first loss. Returns `None` only
/// for an empty bet set.
pub fn player_best_choice<'a>(
    bets: impl IntoIterator<Item = &'a Bet>,
    opponent: Choice,
    choices: &ChoiceSet,
) -> Option<Choice> {
    let stakes = group_stakes(bets);
    let first_with = |wanted: Outcome| {
        stakes
            .iter()
            .map(|stake| stake.position)
            .find(|&position| choices.outcome(position, opponent) == wanted)
    };

    first_with(Outcome::Win)
        .or_else(|| first_with(Outcome::Tie))
        .or_else(|| first_with(Outcome::Lose))
        .or_else(|| stakes.first().map(|stake| stake.position))
}

/// The choice deemed to win the round.
///
/// The player's best choice when it wins or ties, otherwise the opponent's.
#[must_use]
pub fn winning_choice(best: Choice, opponent: Choice, choices: &ChoiceSet) -> Choice {
    match choices.outcome(best, opponent) {
        Outcome::Win | Outcome::Tie => best,
        Outcome::Lose => opponent,
    }
}

/// Resolution choices for `bets` against `opponent`, or `None` with no bets.
pub fn reveal<'a>(
    bets: impl IntoIterator<Item = &'a Bet>,
    opponent: Choice,
    choices: &ChoiceSet,
) -> Option<Reveal> {
    let best = player_best_choice(bets, opponent, choices)?;
    Some(Reveal {
        computer_choice: opponent,
        player_best_choice: best,
        winning_choice: winning_choice(best, opponent, choices),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROCK: Choice = Choice(0);
    const PAPER: Choice = Choice(1);
    const SCISSORS: Choice = Choice(2);

    #[test]
    fn test_prefers_win_over_earlier_tie() {
        let set = ChoiceSet::standard();
        let bets = [Bet::new(ROCK, 500), Bet::new(PAPER, 500)];
        // Rock ties rock, paper beats rock
        assert_eq!(player_best_choice(&bets, ROCK, &set), Some(PAPER));
    }

    #[test]
    fn test_prefers_tie_over_loss() {
        let set = ChoiceSet::standard();
        let bets = [Bet::new(SCISSORS, 500), Bet::new(ROCK, 500)];
        // Scissors loses to rock, rock ties
        assert_eq!(player_best_choice(&bets, ROCK, &set), Some(ROCK));
    }

    #[test]
    fn test_falls_back_to_loss() {
        let set = ChoiceSet::standard();
        let bets = [Bet::new(SCISSORS, 500)];
        assert_eq!(player_best_choice(&bets, ROCK, &set), Some(SCISSORS));
    }

    #[test]
    fn test_empty_bets() {
        let set = ChoiceSet::standard();
        assert_eq!(player_best_choice(std::iter::empty::<&Bet>(), ROCK, &set), None);
        assert_eq!(reveal(std::iter::empty::<&Bet>(), ROCK, &set), None);
    }

    #[test]
    fn test_winning_choice() {
        let set = ChoiceSet::standard();
        assert_eq!(winning_choice(ROCK, SCISSORS, &set), ROCK);
        assert_eq!(winning_choice(ROCK, ROCK, &set), ROCK);
        assert_eq!(winning_choice(ROCK, PAPER, &set), PAPER);
    }

    #[test]
    fn test_reveal() {
        let set = ChoiceSet::standard();
        let bets = [Bet::new(SCISSORS, 500), Bet::new(PAPER, 500)];

        let r = reveal(&bets, SCISSORS, &set).unwrap();
        assert_eq!(r.computer_choice, SCISSORS);
        // Scissors ties, paper loses
        assert_eq!(r.player_best_choice, SCISSORS);
        assert_eq!(r.winning_choice, SCISSORS);

        let r = reveal(&bets, ROCK, &set).unwrap();
        // Paper beats rock
        assert_eq!(r.player_best_choice, PAPER);
        assert_eq!(r.winning_choice, PAPER);

        let r = reveal(&[Bet::new(SCISSORS, 500)], ROCK, &set).unwrap();
        assert_eq!(r.player_best_choice, SCISSORS);
        assert_eq!(r.winning_choice, ROCK);
    }
}
