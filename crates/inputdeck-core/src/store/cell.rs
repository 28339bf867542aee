// ── Observable single-value store ──
//
// Holds one value in a `watch` channel and fans every change out to
// synchronous callbacks in registration order.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;
use tracing::trace;

use super::stream::StoreStream;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;
type Registry<T> = Mutex<Vec<(u64, Callback<T>)>>;

/// An observable container for a single piece of UI state.
///
/// Every [`set`](Self::set) / [`update`](Self::update) swaps the value
/// atomically, then invokes each subscriber with the new value, in the
/// order they subscribed. Writes from different threads are delivered one
/// at a time, so a subscriber's last seen value is always the current one.
/// Async consumers can use [`watch`](Self::watch) instead of callbacks.
///
/// Callbacks may read the store but must not write to it.
pub struct Store<T: Send + Sync + 'static> {
    value: watch::Sender<Arc<T>>,
    subscribers: Arc<Registry<T>>,
    // Held across write + notify so deliveries follow write order.
    writer: Mutex<()>,
    next_id: AtomicU64,
}

impl<T: Send + Sync + 'static> Store<T> {
    pub fn new(initial: T) -> Self {
        let (value, _) = watch::channel(Arc::new(initial));
        Self {
            value,
            subscribers: Arc::new(Mutex::new(Vec::new())),
            writer: Mutex::new(()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Current value (cheap `Arc` clone).
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.value.borrow())
    }

    /// Register a callback. It runs once right away with the current
    /// value, then after every change until unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        {
            let _writer = lock(&self.writer);
            lock(&self.subscribers).push((id, Arc::clone(&callback)));
            let current = self.get();
            callback(&*current);
        }

        let registry: Weak<Registry<T>> = Arc::downgrade(&self.subscribers);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                lock(&registry).retain(|(sub_id, _)| *sub_id != id);
            }
        })
    }

    /// Replace the value wholesale and notify subscribers.
    pub fn set(&self, value: T) {
        let value = Arc::new(value);
        let _writer = lock(&self.writer);
        self.value.send_replace(Arc::clone(&value));
        self.notify(&value);
    }

    /// Replace the value with `transform(&previous)` and notify subscribers.
    ///
    /// The transform runs while the value is locked; it must not touch
    /// this store.
    pub fn update<F>(&self, transform: F)
    where
        F: FnOnce(&T) -> T,
    {
        let _writer = lock(&self.writer);
        let mut next = None;
        self.value.send_modify(|current| {
            let value = Arc::new(transform(&**current));
            *current = Arc::clone(&value);
            next = Some(value);
        });
        if let Some(value) = next {
            self.notify(&value);
        }
    }

    /// Async subscription handle over the same value.
    pub fn watch(&self) -> StoreStream<T> {
        StoreStream::new(self.value.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }

    // Callbacks are cloned out first so one may subscribe or read the
    // store without deadlocking on the registry.
    fn notify(&self, value: &T) {
        let callbacks: Vec<Callback<T>> = lock(&self.subscribers)
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        trace!(subscribers = callbacks.len(), "store changed");
        for callback in callbacks {
            callback(value);
        }
    }
}

impl<T: Default + Send + Sync + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug + Send + Sync + 'static> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping it leaves the callback registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
pub struct Subscription {
    cancel: Box<dyn FnOnce() + Send + Sync>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Box::new(cancel),
        }
    }

    /// Remove the callback from its store. No-op if the store is gone.
    pub fn unsubscribe(self) {
        (self.cancel)();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
