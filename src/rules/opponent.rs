//! Opponent choice policies.
//!
//! - `UniformOpponent`: samples uniformly from the choice set (the default)
//! - `FixedOpponent`: always plays the same choice
//! - `ScriptedOpponent`: replays a fixed sequence, cycling

use crate::core::{Choice, ChoiceSet, GameRng};

/// Policy for the computer's choice when betting completes.
pub trait OpponentPolicy {
    /// Choose the opponent's choice for this round.
    ///
    /// Should return a member of `choices`; the engine samples uniformly
    /// instead when it does not.
    fn choose(&mut self, choices: &ChoiceSet, rng: &mut GameRng) -> Choice;
}

/// Uniform random opponent.
#[derive(Clone, Debug, Default)]
pub struct UniformOpponent;

impl OpponentPolicy for UniformOpponent {
    fn choose(&mut self, choices: &ChoiceSet, rng: &mut GameRng) -> Choice {
        Choice::new(rng.gen_index(choices.len()) as u8)
    }
}

/// Opponent that always plays one choice.
#[derive(Clone, Copy, Debug)]
pub struct FixedOpponent(pub Choice);

impl OpponentPolicy for FixedOpponent {
    fn choose(&mut self, _choices: &ChoiceSet, _rng: &mut GameRng) -> Choice {
        self.0
    }
}

/// Opponent that replays a script of choices, wrapping at the end.
///
/// An empty script falls back to uniform sampling.
#[derive(Clone, Debug, Default)]
pub struct ScriptedOpponent {
    script: Vec<Choice>,
    next: usize,
}

impl ScriptedOpponent {
    /// Create a scripted opponent.
    pub fn new(script: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            script: script.into_iter().collect(),
            next: 0,
        }
    }

    /// Number of choices played so far.
    #[must_use]
    pub fn played(&self) -> usize {
        self.next
    }
}

impl OpponentPolicy for ScriptedOpponent {
    fn choose(&mut self, choices: &ChoiceSet, rng: &mut GameRng) -> Choice {
        if self.script.is_empty() {
            return UniformOpponent.choose(choices, rng);
        }
        let choice = self.script[self.next % self.script.len()];
        self.next += 1;
        choice
    }
}
