//! Callback lists with handle-based unsubscription.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slots<T> {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(u64, Callback<T>)>>,
}

/// A set of subscribers notified with `&T`.
///
/// Cloning yields another handle to the same subscriber set.
pub struct Observers<T> {
    slots: Arc<Slots<T>>,
}

impl<T> Clone for Observers<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Observers<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Slots {
                next_id: AtomicU64::new(0),
                callbacks: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.callbacks.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Observers<T> {
    /// Register `callback`. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.slots.next_id.fetch_add(1, Ordering::Relaxed);
        self.slots.callbacks.lock().push((id, Arc::new(callback)));

        let weak: Weak<Slots<T>> = Arc::downgrade(&self.slots);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    slots.callbacks.lock().retain(|(slot, _)| *slot != id);
                }
            })),
        }
    }

    /// Call every subscriber with `value`.
    ///
    /// The lock is released before callbacks run, so a callback may
    /// subscribe or unsubscribe without deadlocking.
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = self
            .slots
            .callbacks
            .lock()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }
}

/// Handle returned by [`Observers::subscribe`].
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove the callback. Equivalent to dropping the handle.
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    /// Keep the callback registered for the lifetime of the subscriber set.
    pub fn detach(mut self) {
        self.remove = None;
    }

    fn cancel(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}
