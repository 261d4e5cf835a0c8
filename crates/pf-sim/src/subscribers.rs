//! Ordered snapshot subscribers.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::error;
use pf_core::SubscriberId;

use crate::MetricsSnapshot;
use crate::scheduler::panic_message;

type Callback = Arc<dyn Fn(&MetricsSnapshot) + Send + Sync>;

/// Callbacks notified after every tick, in registration order.
///
/// The list is copied before delivery, so a callback may subscribe or
/// unsubscribe (itself included) without deadlocking.  Changes apply from
/// the next notification.
pub struct SubscriberList {
    inner: Mutex<Inner>,
}

struct Inner {
    next_id:   SubscriberId,
    callbacks: Vec<(SubscriberId, Callback)>,
}

impl SubscriberList {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner { next_id: SubscriberId(0), callbacks: Vec::new() }),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn(&MetricsSnapshot) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id = id.next();
        inner.callbacks.push((id, Arc::new(callback)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut inner = self.lock();
        let before = inner.callbacks.len();
        inner.callbacks.retain(|(sid, _)| *sid != id);
        inner.callbacks.len() != before
    }

    pub fn len(&self) -> usize {
        self.lock().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `snapshot` to every subscriber.  A panicking subscriber is
    /// logged and does not stop delivery to the rest.
    pub fn notify(&self, snapshot: &MetricsSnapshot) {
        let callbacks: Vec<(SubscriberId, Callback)> = self.lock().callbacks.clone();
        for (id, callback) in callbacks {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(snapshot))) {
                error!("subscriber {id} panicked at {}: {}", snapshot.tick, panic_message(&*payload));
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SubscriberList {
    fn default() -> Self {
        Self::new()
    }
}
