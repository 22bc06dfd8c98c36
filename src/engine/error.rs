//! Why an action was turned away.
//!
//! A rejected action never changes state and never notifies listeners. The
//! reason is returned for callers that want it and logged at debug level.

use thiserror::Error;

use crate::core::{Choice, Phase};

/// Reason an engine action was ignored.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("action not allowed in the {0} phase")]
    WrongPhase(Phase),
    #[error("balance {balance} is below the bet amount {required}")]
    InsufficientBalance { balance: u64, required: u64 },
    #[error("already staked on the maximum of {max} positions")]
    PositionLimit { max: usize },
    #[error("{0} is not in the configured choice set")]
    UnknownChoice(Choice),
    #[error("no bets placed")]
    NoBets,
}
