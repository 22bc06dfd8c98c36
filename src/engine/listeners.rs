//! Listener registry.
//!
//! The registry belongs to one engine and lives exactly as long as it does.
//! Listeners are called synchronously, in registration order, with each new
//! snapshot.
//!
//! ## Re-entrancy
//!
//! Listeners are handed `&Arc<GameState>` only and must not call engine
//! actions while being notified. A host holding the engine in a
//! `RefCell` would hit a `BorrowMutError` doing so. Cancelling a
//! subscription (its own or another's) from inside a callback is allowed
//! and takes effect from the next notification.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::core::GameState;

/// Receives every committed snapshot.
///
/// Implemented for any `FnMut(&Arc<GameState>)` closure.
pub trait StateListener {
    /// Called once per committed transition.
    ///
    /// Must not block and must not call back into engine actions; queue
    /// follow-up actions and run them after the action returns.
    fn on_state(&mut self, state: &Arc<GameState>);
}

impl<F> StateListener for F
where
    F: FnMut(&Arc<GameState>),
{
    fn on_state(&mut self, state: &Arc<GameState>) {
        self(state)
    }
}

/// Identifier of one registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

type SharedListener = Rc<RefCell<dyn StateListener>>;

struct Entry {
    id: ListenerId,
    listener: SharedListener,
}

/// Ordered set of listeners for one engine.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, listener: SharedListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, listener });
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Listeners to notify, detached from the registry borrow.
    fn current(&self) -> SmallVec<[SharedListener; 4]> {
        self.entries.iter().map(|e| Rc::clone(&e.listener)).collect()
    }
}

/// Shared handle the engine notifies through.
pub(crate) type SharedRegistry = Rc<RefCell<ListenerRegistry>>;

/// Register `listener` and return its handle.
pub(crate) fn subscribe<L>(registry: &SharedRegistry, listener: L) -> Subscription
where
    L: StateListener + 'static,
{
    let id = registry.borrow_mut().add(Rc::new(RefCell::new(listener)));
    Subscription {
        id,
        registry: Rc::downgrade(registry),
    }
}

/// Call every listener with `state`. Returns how many were called.
pub(crate) fn notify(registry: &SharedRegistry, state: &Arc<GameState>) -> usize {
    let listeners = registry.borrow().current();
    for listener in &listeners {
        listener.borrow_mut().on_state(state);
    }
    listeners.len()
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle does not unsubscribe; call `cancel`.
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<ListenerRegistry>>,
}

impl Subscription {
    /// Registration id.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove this listener.
    ///
    /// Returns `true` the first time; later calls, or calls after the engine
    /// is gone, do nothing and return `false`.
    pub fn cancel(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.borrow_mut().remove(self.id),
            None => false,
        }
    }

    /// Check whether the listener is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map(|registry| registry.borrow().entries.iter().any(|e| e.id == self.id))
            .unwrap_or(false)
    }
}
