//! Subscriber registry used to fan notifications out to observers.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use crate::Event;

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

/// Receives notifications synchronously on the ticking thread.
///
/// Implementations must return quickly and must not try to reach back into
/// the simulation; any hand-off to another thread is their own concern.
pub trait Observer: Send + Sync {
    /// Handles a single notification.
    fn notify(&self, event: &Event);
}

impl<F> Observer for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn notify(&self, event: &Event) {
        self(event);
    }
}

/// Handle identifying a subscription inside an [`ObserverRegistry`].
///
/// Handles are unique for the lifetime of the process, so the same handle can
/// be used to attach one observer to several registries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Allocates a fresh, never reused handle.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed))
    }

    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Ordered collection of observers keyed by subscription handle.
///
/// Delivery follows handle order, which matches registration order because
/// handles are allocated monotonically.
#[derive(Clone, Default)]
pub struct ObserverRegistry {
    observers: BTreeMap<SubscriptionId, Arc<dyn Observer>>,
}

impl ObserverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer` under a freshly allocated handle.
    pub fn subscribe(&mut self, observer: Arc<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.attach(id, observer);
        id
    }

    /// Registers `observer` under an existing handle, replacing any observer
    /// previously stored under it.
    pub fn attach(&mut self, id: SubscriptionId, observer: Arc<dyn Observer>) {
        let _ = self.observers.insert(id, observer);
    }

    /// Removes the observer stored under `id`, returning whether one existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(&id).is_some()
    }

    /// Drops every registered observer.
    pub fn clear(&mut self) {
        self.observers.clear();
    }

    /// Delivers `event` to every observer in handle order.
    pub fn publish(&self, event: &Event) {
        for observer in self.observers.values() {
            observer.notify(event);
        }
    }

    /// Iterates over the registered observers in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = (SubscriptionId, &Arc<dyn Observer>)> {
        self.observers.iter().map(|(id, observer)| (*id, observer))
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Reports whether no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("subscriptions", &self.observers.keys().collect::<Vec<_>>())
            .finish()
    }
}
