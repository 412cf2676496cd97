//! Shared listener sets.
//!
//! A [`Listeners`] value is a cheap handle: cloning it aliases the same
//! underlying set. This is what makes bound views live — a view created
//! before a registration still observes it, because the view holds handles,
//! not copies.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use trigga_core::{Listener, Payload, SharedListener};

/// Identifier assigned to a listener registration within one set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(u64);

struct Inner<P: Payload> {
    next_id: u64,
    entries: Vec<(ListenerId, SharedListener<P>)>,
}

/// A shared set of listeners, unique by identity.
///
/// Registrations are never removed; they live as long as the owning trigger.
/// Insertion order carries no dispatch-order guarantee.
pub struct Listeners<P: Payload> {
    inner: Arc<Mutex<Inner<P>>>,
}

impl<P: Payload> Listeners<P> {
    /// Create a new empty set.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a listener, returning its assigned id.
    pub fn add<L: Listener<P>>(&self, listener: L) -> ListenerId {
        self.add_shared(Arc::new(listener))
    }

    /// Register an already-shared listener, returning its assigned id.
    ///
    /// The same shared listener registered in two sets is recognized as one
    /// identity when the sets are unioned.
    pub fn add_shared(&self, listener: SharedListener<P>) -> ListenerId {
        let mut inner = self.lock();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push((id, listener));
        id
    }

    /// The number of registered listeners.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the set has no listeners.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Capture the current membership in one step.
    pub fn snapshot(&self) -> Vec<SharedListener<P>> {
        self.lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    /// Capture the union of this set and `other` in one step, deduplicating
    /// listeners shared between the two so each identity fires once.
    pub fn snapshot_union(&self, other: &Listeners<P>) -> Vec<SharedListener<P>> {
        let mut union = self.snapshot();
        for listener in other.snapshot() {
            if !union.iter().any(|own| same_listener(own, &listener)) {
                union.push(listener);
            }
        }
        union
    }

    fn lock(&self) -> MutexGuard<'_, Inner<P>> {
        // Listener registration cannot panic while holding the lock, but a
        // poisoned set must stay usable for the rest of the process.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn same_listener<P: Payload>(a: &SharedListener<P>, b: &SharedListener<P>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl<P: Payload> Clone for Listeners<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Payload> Default for Listeners<P> {
    fn default() -> Self {
        Self::new()
    }
}
