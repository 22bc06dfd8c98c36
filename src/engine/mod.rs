//! Round engine: state ownership, action validation, delayed payout,
//! listener notification.
//!
//! `GameCore` is the surface a presentation adapter programs against;
//! `RoundEngine` is its implementation.

pub mod clock;
pub mod error;
pub mod listeners;
pub mod round;

use std::sync::Arc;

use crate::core::{Choice, GameState};

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::Rejection;
pub use listeners::{ListenerId, StateListener, Subscription};
pub use round::{RoundEngine, RoundEngineBuilder};

/// Engine surface for presentation adapters.
///
/// Object safe, so an adapter can hold a `Box<dyn GameCore>`. Rejected
/// actions are no-ops; the `Err` only reports why.
pub trait GameCore {
    /// Current immutable snapshot.
    fn state(&self) -> Arc<GameState>;

    /// Register a listener called with every committed snapshot.
    fn subscribe(&self, listener: Box<dyn StateListener>) -> Subscription;

    fn place_bet(&mut self, position: Choice) -> Result<(), Rejection>;

    fn complete_betting(&mut self) -> Result<(), Rejection>;

    fn start_new_round(&mut self);

    /// Drive any pending delayed transition. Returns `true` if one fired.
    fn poll(&mut self) -> bool;
}
