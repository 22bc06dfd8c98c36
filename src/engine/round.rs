//! The round engine.
//!
//! Owns the canonical `GameState` and is the only thing that replaces it.
//!
//! ## Phases
//!
//! ```text
//! Betting --complete_betting--> Resolving --(delay, poll)--> Complete
//!    ^                                                          |
//!    +------------------------start_new_round-------------------+
//! ```
//!
//! `start_new_round` is accepted in every phase and cancels a pending
//! payout. Rejected actions leave the state untouched and notify nobody.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, trace, warn};

use crate::core::{
    Bet, Choice, ChoiceSet, ConfigError, GameConfig, GameRng, GameRngState, GameState, Phase,
};
use crate::rules::{self, OpponentPolicy, RoundVerdict, UniformOpponent};

use super::clock::{Clock, SystemClock};
use super::error::Rejection;
use super::listeners::{self, ListenerRegistry, SharedRegistry, StateListener, Subscription};
use super::GameCore;

/// A revealed round waiting for its payout.
#[derive(Clone, Copy, Debug)]
struct PendingResolution {
    due: Duration,
    computer_choice: Choice,
}

/// Authoritative state machine for betting rounds.
///
/// Not meant to be shared between threads; all actions take `&mut self`.
pub struct RoundEngine {
    config: GameConfig,
    state: Arc<GameState>,
    rng: GameRng,
    opponent: Box<dyn OpponentPolicy>,
    clock: Box<dyn Clock>,
    pending: Option<PendingResolution>,
    listeners: SharedRegistry,
}

/// Builder for a `RoundEngine` with a custom opponent or clock.
pub struct RoundEngineBuilder {
    config: GameConfig,
    opponent: Box<dyn OpponentPolicy>,
    clock: Box<dyn Clock>,
    rng_state: Option<GameRngState>,
}

impl RoundEngineBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            opponent: Box::new(UniformOpponent),
            clock: Box::new(SystemClock::new()),
            rng_state: None,
        }
    }

    /// Use a different opponent policy.
    pub fn opponent(mut self, opponent: impl OpponentPolicy + 'static) -> Self {
        self.opponent = Box::new(opponent);
        self
    }

    /// Use a different time source.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Resume the opponent RNG from a saved position instead of
    /// `config.seed`.
    pub fn rng_state(mut self, state: GameRngState) -> Self {
        self.rng_state = Some(state);
        self
    }

    /// Validate the configuration and build the engine.
    pub fn build(self) -> Result<RoundEngine, ConfigError> {
        self.config.validate()?;
        debug!(
            "new engine: balance {}, bet {}, {} choices, max {} positions",
            self.config.initial_balance,
            self.config.bet_amount,
            self.config.choices.len(),
            self.config.max_positions
        );
        let rng = match &self.rng_state {
            Some(state) => {
                debug!("resuming rng: seed {}, word {}", state.seed, state.word_pos);
                GameRng::from_state(state)
            }
            None => GameRng::new(self.config.seed),
        };
        Ok(RoundEngine {
            state: Arc::new(GameState::new(self.config.initial_balance)),
            rng,
            config: self.config,
            opponent: self.opponent,
            clock: self.clock,
            pending: None,
            listeners: Rc::new(RefCell::new(ListenerRegistry::new())),
        })
    }
}

impl RoundEngine {
    /// Engine with a uniform opponent and the system clock.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        RoundEngineBuilder::new(config).build()
    }

    /// Start building an engine.
    pub fn builder(config: GameConfig) -> RoundEngineBuilder {
        RoundEngineBuilder::new(config)
    }

    // === Queries ===

    /// Current snapshot. Cheap: clones an `Arc`.
    #[must_use]
    pub fn state(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn choices(&self) -> &ChoiceSet {
        &self.config.choices
    }

    /// Check whether `place_bet(choice)` would be accepted right now.
    #[must_use]
    pub fn can_place_bet(&self, choice: Choice) -> bool {
        self.check_bet(choice).is_ok()
    }

    /// Check whether any choice can take a bet right now.
    #[must_use]
    pub fn can_place_any_bet(&self) -> bool {
        self.phase() == Phase::Betting
            && self.state.player.balance >= self.config.bet_amount
            && rules::can_place_any_bet(
                &self.state.round().bets,
                self.choices().iter(),
                self.config.max_positions,
            )
    }

    /// Headline result of the current round, once the opponent is revealed.
    #[must_use]
    pub fn verdict(&self) -> Option<RoundVerdict> {
        let round = self.state.round();
        rules::verdict(round.bets.iter(), round.computer_choice?, self.choices())
    }

    /// Check whether a payout is waiting on the clock.
    #[must_use]
    pub fn is_resolution_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before `poll` applies the pending payout.
    #[must_use]
    pub fn time_until_resolution(&self) -> Option<Duration> {
        self.pending
            .map(|pending| pending.due.saturating_sub(self.clock.now()))
    }

    /// Position of the opponent RNG. Pass it to
    /// `RoundEngineBuilder::rng_state` to continue the same opponent
    /// sequence in a new engine.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Subscriptions ===

    /// Register a listener for every committed snapshot.
    pub fn subscribe<L>(&self, listener: L) -> Subscription
    where
        L: StateListener + 'static,
    {
        listeners::subscribe(&self.listeners, listener)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    // === Actions ===

    /// Stake `bet_amount` on `position`.
    pub fn place_bet(&mut self, position: Choice) -> Result<(), Rejection> {
        if let Err(rejection) = self.check_bet(position) {
            debug!("bet on {} rejected: {}", position, rejection);
            return Err(rejection);
        }

        let bet = Bet::new(position, self.config.bet_amount);
        let next = self.state.with_bet(bet);
        debug!(
            "bet {} on {}, balance {}",
            bet.amount,
            self.choices().name(position).unwrap_or("?"),
            next.player.balance
        );
        self.commit(next);
        Ok(())
    }

    /// Close betting: reveal the opponent now, pay out after the delay.
    ///
    /// The payout is applied by the first `poll` at or after the deadline,
    /// or immediately by `settle`.
    pub fn complete_betting(&mut self) -> Result<(), Rejection> {
        let phase = self.phase();
        if phase != Phase::Betting {
            debug!("complete_betting rejected: wrong phase {}", phase);
            return Err(Rejection::WrongPhase(phase));
        }
        if self.state.round().bets.is_empty() {
            debug!("complete_betting rejected: no bets");
            return Err(Rejection::NoBets);
        }

        let mut computer_choice = self.opponent.choose(&self.config.choices, &mut self.rng);
        if !self.config.choices.contains(computer_choice) {
            warn!("opponent played {} outside the choice set; sampling instead", computer_choice);
            computer_choice = UniformOpponent.choose(&self.config.choices, &mut self.rng);
        }

        let reveal = match rules::reveal(self.state.round().bets.iter(), computer_choice, self.choices()) {
            Some(reveal) => reveal,
            None => unreachable!("bet set checked non-empty before reveal"),
        };
        debug!(
            "opponent plays {}, player best {}, winning {}",
            self.choices().name(reveal.computer_choice).unwrap_or("?"),
            self.choices().name(reveal.player_best_choice).unwrap_or("?"),
            self.choices().name(reveal.winning_choice).unwrap_or("?")
        );

        self.pending = Some(PendingResolution {
            due: self.clock.now().saturating_add(self.config.animation_duration),
            computer_choice,
        });
        let next = self.state.revealed(reveal);
        self.commit(next);
        Ok(())
    }

    /// Clear the round and return to betting. Balance and wins carry over.
    pub fn start_new_round(&mut self) {
        if self.pending.take().is_some() {
            debug!("new round cancels pending payout; stake forfeited");
        }
        let next = self.state.new_round();
        self.commit(next);
    }

    /// Apply the pending payout if its deadline has passed.
    ///
    /// Returns `true` if a payout was applied.
    pub fn poll(&mut self) -> bool {
        match self.pending {
            Some(pending) if self.clock.now() >= pending.due => self.resolve(),
            _ => false,
        }
    }

    /// Apply the pending payout now, ignoring the deadline.
    ///
    /// Returns `true` if a payout was applied.
    pub fn settle(&mut self) -> bool {
        self.resolve()
    }

    // === Internals ===

    fn check_bet(&self, position: Choice) -> Result<(), Rejection> {
        let phase = self.phase();
        if phase != Phase::Betting {
            return Err(Rejection::WrongPhase(phase));
        }
        if !self.config.choices.contains(position) {
            return Err(Rejection::UnknownChoice(position));
        }
        let balance = self.state.player.balance;
        if balance < self.config.bet_amount {
            return Err(Rejection::InsufficientBalance {
                balance,
                required: self.config.bet_amount,
            });
        }
        if !rules::can_bet_on(self.state.round().bets.iter(), position, self.config.max_positions) {
            return Err(Rejection::PositionLimit {
                max: self.config.max_positions,
            });
        }
        Ok(())
    }

    fn resolve(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };

        let round = self.state.round();
        assert!(!round.bets.is_empty(), "resolving a round with no bets");

        let payout = rules::payout(round.bets.iter(), pending.computer_choice, &self.config);
        let staked = round.total_staked();
        let credit = self.config.wins_ledger.credit(payout, staked);
        let next = self.state.settled(payout, credit);
        info!(
            "round resolved: opponent {}, staked {}, payout {}, balance {}, cumulative wins {}",
            self.choices().name(pending.computer_choice).unwrap_or("?"),
            staked,
            payout,
            next.player.balance,
            next.player.cumulative_wins
        );

        self.commit(next);
        true
    }

    fn commit(&mut self, next: GameState) {
        self.state = Arc::new(next);
        let notified = listeners::notify(&self.listeners, &self.state);
        trace!("{} phase, notified {} listener(s)", self.state.phase(), notified);
    }
}

impl GameCore for RoundEngine {
    fn state(&self) -> Arc<GameState> {
        RoundEngine::state(self)
    }

    fn subscribe(&self, mut listener: Box<dyn StateListener>) -> Subscription {
        RoundEngine::subscribe(self, move |state: &Arc<GameState>| listener.on_state(state))
    }

    fn place_bet(&mut self, position: Choice) -> Result<(), Rejection> {
        RoundEngine::place_bet(self, position)
    }

    fn complete_betting(&mut self) -> Result<(), Rejection> {
        RoundEngine::complete_betting(self)
    }

    fn start_new_round(&mut self) {
        RoundEngine::start_new_round(self)
    }

    fn poll(&mut self) -> bool {
        RoundEngine::poll(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ManualClock;
    use crate::rules::{FixedOpponent, ScriptedOpponent};

    const ROCK: Choice = Choice(0);
    const PAPER: Choice = Choice(1);
    const SCISSORS: Choice = Choice(2);

    fn engine_against(opponent: Choice) -> (RoundEngine, ManualClock) {
        let clock = ManualClock::new();
        let engine = RoundEngine::builder(GameConfig::default())
            .opponent(FixedOpponent(opponent))
            .clock(clock.clone())
            .build()
            .unwrap();
        (engine, clock)
    }

    #[test]
    fn test_new_engine() {
        let engine = RoundEngine::new(GameConfig::default()).unwrap();
        let state = engine.state();
        assert_eq!(state.player.balance, 5000);
        assert_eq!(engine.phase(), Phase::Betting);
        assert!(!engine.is_resolution_pending());
        assert_eq!(engine.listener_count(), 0);
    }

    #[test]
    fn test_new_engine_rejects_bad_config() {
        let result = RoundEngine::new(GameConfig::default().with_bet_amount(0));
        assert!(matches!(result, Err(ConfigError::ZeroBetAmount)));
    }

    #[test]
    fn test_place_bet_debits_balance() {
        let (mut engine, _) = engine_against(SCISSORS);
        engine.place_bet(ROCK).unwrap();

        let state = engine.state();
        assert_eq!(state.player.balance, 4500);
        assert_eq!(state.round().bets.len(), 1);
        assert_eq!(state.round().stake_on(ROCK), 500);
    }

    #[test]
    fn test_place_bet_unknown_choice() {
        let (mut engine, _) = engine_against(SCISSORS);
        assert_eq!(engine.place_bet(Choice(7)), Err(Rejection::UnknownChoice(Choice(7))));
        assert_eq!(engine.state().player.balance, 5000);
    }

    #[test]
    fn test_delay_gates_payout() {
        let (mut engine, clock) = engine_against(SCISSORS);
        engine.place_bet(ROCK).unwrap();
        engine.complete_betting().unwrap();

        assert_eq!(engine.phase(), Phase::Resolving);
        assert_eq!(engine.time_until_resolution(), Some(Duration::from_secs(2)));

        clock.advance(Duration::from_millis(1999));
        assert!(!engine.poll());
        assert_eq!(engine.phase(), Phase::Resolving);
        assert_eq!(engine.state().player.balance, 4500);

        clock.advance(Duration::from_millis(1));
        assert!(engine.poll());
        assert_eq!(engine.phase(), Phase::Complete);
        assert_eq!(engine.state().player.balance, 11500);

        // Fires exactly once
        clock.advance(Duration::from_secs(10));
        assert!(!engine.poll());
        assert_eq!(engine.state().player.balance, 11500);
    }

    #[test]
    fn test_settle_ignores_deadline() {
        let (mut engine, _) = engine_against(ROCK);
        engine.place_bet(ROCK).unwrap();
        engine.complete_betting().unwrap();

        assert!(engine.settle());
        assert_eq!(engine.phase(), Phase::Complete);
        assert_eq!(engine.state().player.balance, 5000);
        assert!(!engine.settle());
    }

    #[test]
    fn test_new_round_cancels_pending_payout() {
        let (mut engine, clock) = engine_against(SCISSORS);
        engine.place_bet(ROCK).unwrap();
        engine.complete_betting().unwrap();

        engine.start_new_round();
        assert!(!engine.is_resolution_pending());
        assert_eq!(engine.phase(), Phase::Betting);

        clock.advance(Duration::from_secs(5));
        assert!(!engine.poll());
        assert_eq!(engine.state().player.balance, 4500);
        assert_eq!(engine.state().player.cumulative_wins, 0);
    }

    #[test]
    fn test_snapshots_are_fresh_per_transition() {
        let (mut engine, _) = engine_against(SCISSORS);
        let before = engine.state();

        engine.place_bet(ROCK).unwrap();
        let after = engine.state();
        assert!(!Arc::ptr_eq(&before, &after));

        // Rejections keep the same snapshot
        engine.place_bet(Choice(9)).unwrap_err();
        assert!(Arc::ptr_eq(&after, &engine.state()));
    }

    #[test]
    fn test_listener_sees_each_transition() {
        let (mut engine, _) = engine_against(SCISSORS);
        let phases = Rc::new(RefCell::new(Vec::new()));
        {
            let phases = Rc::clone(&phases);
            engine.subscribe(move |state: &Arc<GameState>| phases.borrow_mut().push(state.phase()));
        }

        engine.place_bet(ROCK).unwrap();
        engine.complete_betting().unwrap();
        engine.settle();
        engine.start_new_round();

        assert_eq!(
            *phases.borrow(),
            vec![Phase::Betting, Phase::Resolving, Phase::Complete, Phase::Betting]
        );
    }

    #[test]
    fn test_verdict_and_can_place() {
        let clock = ManualClock::new();
        let mut engine = RoundEngine::builder(GameConfig::default())
            .opponent(ScriptedOpponent::new([ROCK]))
            .clock(clock)
            .build()
            .unwrap();

        assert_eq!(engine.verdict(), None);
        engine.place_bet(ROCK).unwrap();
        engine.place_bet(SCISSORS).unwrap();
        assert!(!engine.can_place_bet(PAPER));
        assert!(engine.can_place_bet(ROCK));
        assert!(engine.can_place_any_bet());

        engine.complete_betting().unwrap();
        assert!(!engine.can_place_any_bet());
        // Rock ties, scissors loses: multi-position ties count as losses
        assert_eq!(engine.verdict(), Some(RoundVerdict::Lose));
    }

    /// Opponent sharing a counter with the host through `Rc`.
    struct CountingOpponent(Rc<std::cell::Cell<usize>>);

    impl OpponentPolicy for CountingOpponent {
        fn choose(&mut self, _choices: &ChoiceSet, _rng: &mut GameRng) -> Choice {
            self.0.set(self.0.get() + 1);
            PAPER
        }
    }

    #[test]
    fn test_opponent_with_shared_state() {
        let calls = Rc::new(std::cell::Cell::new(0));
        let mut engine = RoundEngine::builder(GameConfig::default())
            .opponent(CountingOpponent(Rc::clone(&calls)))
            .clock(ManualClock::new())
            .build()
            .unwrap();

        engine.place_bet(ROCK).unwrap();
        engine.complete_betting().unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(engine.state().round().computer_choice, Some(PAPER));
    }

    #[test]
    fn test_can_place_any_bet_gates() {
        let config = GameConfig::default()
            .with_initial_balance(1000)
            .with_max_positions(1);
        let mut engine = RoundEngine::builder(config)
            .opponent(FixedOpponent(SCISSORS))
            .clock(ManualClock::new())
            .build()
            .unwrap();

        assert!(engine.can_place_any_bet());
        engine.place_bet(ROCK).unwrap();
        // Cap reached, but rock can still be topped up
        assert!(engine.can_place_any_bet());
        engine.place_bet(ROCK).unwrap();
        // Balance exhausted
        assert!(!engine.can_place_any_bet());

        engine.complete_betting().unwrap();
        engine.settle();
        // Paid out, but the round is complete
        assert!(engine.state().player.balance >= 500);
        assert!(!engine.can_place_any_bet());

        engine.start_new_round();
        assert!(engine.can_place_any_bet());
    }

    #[test]
    fn test_dropping_engine_with_pending_payout() {
        let (mut engine, clock) = engine_against(SCISSORS);
        let seen = Rc::new(RefCell::new(0));
        let sub = {
            let seen = Rc::clone(&seen);
            engine.subscribe(move |_: &Arc<GameState>| *seen.borrow_mut() += 1)
        };

        engine.place_bet(ROCK).unwrap();
        engine.complete_betting().unwrap();
        drop(engine);

        clock.advance(Duration::from_secs(5));
        assert_eq!(*seen.borrow(), 2);
        assert!(!sub.cancel());
    }
}
