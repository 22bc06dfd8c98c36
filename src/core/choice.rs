//! Choice tokens and the configured choice set.
//!
//! The engine never hardcodes "rock", "paper" or "scissors". A game supplies
//! an ordered list of names at startup; a `Choice` is an opaque index into
//! that list.
//!
//! ## Beats Relation
//!
//! The relation is derived from position in the list. For two indices `i`
//! and `j` in a set of `n` choices, let `d = (i - j) mod n`:
//! - `d == 0`: tie
//! - `d` odd: `i` beats `j`
//! - `d` even: `j` beats `i`
//!
//! With three choices this is "each choice beats its cyclic predecessor".
//! Any odd-length list yields a balanced relation (every choice beats exactly
//! `(n - 1) / 2` others).
//!
//! ```
//! use rust_rps::core::{ChoiceSet, Outcome};
//!
//! let set = ChoiceSet::standard();
//! let rock = set.by_name("rock").unwrap();
//! let scissors = set.by_name("scissors").unwrap();
//!
//! assert_eq!(set.outcome(rock, scissors), Outcome::Win);
//! assert_eq!(set.outcome(scissors, rock), Outcome::Lose);
//! assert_eq!(set.outcome(rock, rock), Outcome::Tie);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::ConfigError;

/// Names of the standard three-way choice set, in relation order.
pub const STANDARD_CHOICES: [&str; 3] = ["rock", "paper", "scissors"];

/// Opaque choice token: an index into a `ChoiceSet`.
///
/// Tokens are only meaningful relative to the set that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Choice(pub u8);

impl Choice {
    /// Create a new choice token.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Choice({})", self.0)
    }
}

/// Result of one choice against another, from the first choice's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Tie,
    Lose,
}

impl Outcome {
    /// Flip the perspective.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Tie => Outcome::Tie,
            Outcome::Lose => Outcome::Win,
        }
    }
}

/// Validated, ordered set of named choices.
///
/// Serializes as the plain list of names.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ChoiceSet {
    names: Vec<String>,
    lookup: FxHashMap<String, Choice>,
}

impl ChoiceSet {
    /// Build a choice set from names in relation order.
    ///
    /// Requires an odd number of at least three (and at most 255) unique,
    /// non-empty names.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.len() < 3 || names.len() % 2 == 0 || names.len() > u8::MAX as usize {
            return Err(ConfigError::ChoiceCount(names.len()));
        }

        let mut lookup = FxHashMap::default();
        for (index, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyChoiceName(index));
            }
            if lookup.insert(name.clone(), Choice(index as u8)).is_some() {
                return Err(ConfigError::DuplicateChoice(name.clone()));
            }
        }

        Ok(Self { names, lookup })
    }

    /// The standard rock, paper, scissors set.
    #[must_use]
    pub fn standard() -> Self {
        let names: Vec<String> = STANDARD_CHOICES.iter().map(|s| s.to_string()).collect();
        let lookup = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), Choice(i as u8)))
            .collect();
        Self { names, lookup }
    }

    /// Number of choices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a validated set; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check whether a token belongs to this set.
    #[must_use]
    pub fn contains(&self, choice: Choice) -> bool {
        choice.index() < self.names.len()
    }

    /// Look up a choice by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<Choice> {
        self.lookup.get(name).copied()
    }

    /// Get the name of a choice, if it belongs to this set.
    #[must_use]
    pub fn name(&self, choice: Choice) -> Option<&str> {
        self.names.get(choice.index()).map(String::as_str)
    }

    /// All choices in relation order.
    pub fn iter(&self) -> impl Iterator<Item = Choice> + '_ {
        (0..self.names.len() as u8).map(Choice)
    }

    /// Outcome of `ours` against `theirs`.
    ///
    /// Total over all tokens: indices outside the set wrap around.
    #[must_use]
    pub fn outcome(&self, ours: Choice, theirs: Choice) -> Outcome {
        let n = self.names.len() as i32;
        let d = (ours.0 as i32 - theirs.0 as i32).rem_euclid(n);
        if d == 0 {
            Outcome::Tie
        } else if d % 2 == 1 {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }

    /// Check whether `ours` beats `theirs`.
    #[must_use]
    pub fn beats(&self, ours: Choice, theirs: Choice) -> bool {
        self.outcome(ours, theirs) == Outcome::Win
    }
}

impl Default for ChoiceSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl PartialEq for ChoiceSet {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for ChoiceSet {}

impl TryFrom<Vec<String>> for ChoiceSet {
    type Error = ConfigError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<ChoiceSet> for Vec<String> {
    fn from(set: ChoiceSet) -> Self {
        set.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set() {
        let set = ChoiceSet::standard();
        assert_eq!(set.len(), 3);
        assert_eq!(set.by_name("rock"), Some(Choice(0)));
        assert_eq!(set.by_name("paper"), Some(Choice(1)));
        assert_eq!(set.by_name("scissors"), Some(Choice(2)));
        assert_eq!(set.by_name("lizard"), None);
        assert_eq!(set.name(Choice(2)), Some("scissors"));
        assert_eq!(set.name(Choice(3)), None);
    }

    #[test]
    fn test_classic_relation() {
        let set = ChoiceSet::standard();
        let (rock, paper, scissors) = (Choice(0), Choice(1), Choice(2));

        assert!(set.beats(rock, scissors));
        assert!(set.beats(paper, rock));
        assert!(set.beats(scissors, paper));

        assert_eq!(set.outcome(rock, paper), Outcome::Lose);
        assert_eq!(set.outcome(paper, scissors), Outcome::Lose);
        assert_eq!(set.outcome(scissors, rock), Outcome::Lose);

        for c in set.iter() {
            assert_eq!(set.outcome(c, c), Outcome::Tie);
        }
    }

    #[test]
    fn test_outcome_antisymmetric() {
        let set = ChoiceSet::new(["a", "b", "c", "d", "e"]).unwrap();
        for a in set.iter() {
            for b in set.iter() {
                assert_eq!(set.outcome(a, b), set.outcome(b, a).reverse());
            }
        }
    }

    #[test]
    fn test_five_way_set_is_balanced() {
        let set = ChoiceSet::new(["rock", "paper", "scissors", "spock", "lizard"]).unwrap();
        for a in set.iter() {
            let wins = set.iter().filter(|&b| set.beats(a, b)).count();
            assert_eq!(wins, 2, "{} should beat exactly two others", a);
        }
    }

    #[test]
    fn test_invalid_sets() {
        assert_eq!(
            ChoiceSet::new(["rock", "paper"]).unwrap_err(),
            ConfigError::ChoiceCount(2)
        );
        assert_eq!(
            ChoiceSet::new(["a", "b", "c", "d"]).unwrap_err(),
            ConfigError::ChoiceCount(4)
        );
        assert_eq!(
            ChoiceSet::new(["a", "b", "a"]).unwrap_err(),
            ConfigError::DuplicateChoice("a".to_string())
        );
        assert_eq!(
            ChoiceSet::new(["a", " ", "c"]).unwrap_err(),
            ConfigError::EmptyChoiceName(1)
        );
    }

    #[test]
    fn test_contains() {
        let set = ChoiceSet::standard();
        assert!(set.contains(Choice(2)));
        assert!(!set.contains(Choice(3)));
    }

    #[test]
    fn test_serialization() {
        let set = ChoiceSet::standard();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["rock","paper","scissors"]"#);

        let deserialized: ChoiceSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, deserialized);
        assert_eq!(deserialized.by_name("paper"), Some(Choice(1)));

        assert!(serde_json::from_str::<ChoiceSet>(r#"["rock","paper"]"#).is_err());
    }
}
