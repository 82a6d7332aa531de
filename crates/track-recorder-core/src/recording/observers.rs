//! Subscriber bookkeeping with non-owning references.
//!
//! Each observation stores a `Weak` to the subscriber so a subscriber that is
//! dropped without unsubscribing simply stops receiving updates. Expired
//! entries are pruned lazily, at the start of every notification pass.

use crate::RecordingState;

use std::{
    any::Any,
    collections::HashMap,
    rc::{Rc, Weak},
};

use tracing::trace;

/// Callback invoked with every state write.
pub(crate) type StateHandler = Rc<dyn Fn(RecordingState)>;

/// Identity of a subscriber: the address of its `Rc` allocation.
///
/// The stored `Weak` keeps the allocation (not the value) alive, so an address
/// cannot be handed out to a new subscriber while its entry still exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ObserverKey(usize);

impl ObserverKey {
    pub(crate) fn of<T: Any>(identity: &Rc<T>) -> Self {
        Self(Rc::as_ptr(identity) as *const () as usize)
    }
}

struct Observation {
    observer: Weak<dyn Any>,
    handler: StateHandler,
}

impl Observation {
    fn is_live(&self) -> bool {
        self.observer.strong_count() > 0
    }
}

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    observations: HashMap<ObserverKey, Observation>,
}

impl ObserverRegistry {
    /// Store `handler` for `identity`, replacing any previous handler.
    ///
    /// Returns `true` if an existing observation was replaced.
    pub(crate) fn insert<T: Any>(&mut self, identity: &Rc<T>, handler: StateHandler) -> bool {
        let observer: Weak<T> = Rc::downgrade(identity);
        let observer: Weak<dyn Any> = observer;
        self.observations
            .insert(ObserverKey::of(identity), Observation { observer, handler })
            .is_some()
    }

    /// Remove the observation for `identity`. Returns `true` if one existed.
    pub(crate) fn remove<T: Any>(&mut self, identity: &Rc<T>) -> bool {
        self.observations.remove(&ObserverKey::of(identity)).is_some()
    }

    /// Drop expired observations and return the handlers that remain.
    pub(crate) fn live_handlers(&mut self) -> Vec<(ObserverKey, StateHandler)> {
        let before = self.observations.len();
        self.observations.retain(|_, observation| observation.is_live());

        let pruned = before - self.observations.len();
        if pruned > 0 {
            trace!(pruned, "Pruned expired observers");
        }

        self.observations
            .iter()
            .map(|(key, observation)| (*key, Rc::clone(&observation.handler)))
            .collect()
    }

    /// Whether `handler` is still the live handler registered under `key`.
    ///
    /// Lets a notification pass skip entries that were removed, replaced or
    /// expired by an earlier handler in the same pass.
    pub(crate) fn is_current(&self, key: ObserverKey, handler: &StateHandler) -> bool {
        self.observations.get(&key).is_some_and(|observation| {
            observation.is_live() && Rc::ptr_eq(&observation.handler, handler)
        })
    }

    /// Number of stored observations, including any not yet pruned.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.observations.len()
    }
}
