// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! [`NotificationCenter`] owns the store state, the subscriber registry, and
//! the per-notification removal timers. It is the only side-effecting layer;
//! state transitions themselves are delegated to the pure
//! [`reduce`](crate::reducer::reduce) function.
//!
//! A center is an explicitly constructed, cloneable handle. Independent
//! centers do not share state, so tests can each build their own without
//! cross-test leakage.
//!
//! Removal timers run on the ambient tokio runtime: dismissing a
//! notification spawns a one-shot task, so dismiss operations must be called
//! from within a runtime. Enqueue, update, remove, and subscribe have no
//! such requirement.

use crate::config::Config;
use crate::notification::{Notification, NotificationId, NotificationPatch};
use crate::reducer::{reduce, Action};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::sync::watch;

type SubscriberFn = dyn Fn(&[Notification]) + Send + Sync;

struct Inner {
    capacity: usize,
    removal_delay: Duration,
    state: Mutex<Vec<Notification>>,
    subscribers: Mutex<Vec<(u64, Arc<SubscriberFn>)>>,
    next_subscriber_key: AtomicU64,
    /// Ids with a pending removal timer. At most one timer exists per id;
    /// an entry is cleared only by its own timer firing.
    pending_removals: Mutex<HashSet<NotificationId>>,
    watch_tx: watch::Sender<Vec<Notification>>,
}

impl Inner {
    /// Applies an action to the store and fans the new state out to every
    /// subscriber before returning.
    ///
    /// Dismiss actions additionally schedule removal for the affected ids.
    /// Scheduling happens for the requested id even when no matching entry
    /// exists; the eventual `Remove` lands as a no-op.
    fn dispatch(inner: &Arc<Inner>, action: Action) {
        if let Action::Dismiss(target) = &action {
            let affected: Vec<NotificationId> = match target {
                Some(id) => vec![*id],
                None => {
                    let state = inner.state.lock().unwrap();
                    state.iter().map(Notification::id).collect()
                }
            };
            for id in affected {
                Inner::schedule_removal(inner, id);
            }
        }

        let snapshot = {
            let mut state = inner.state.lock().unwrap();
            let next = reduce(std::mem::take(&mut *state), action, inner.capacity);
            *state = next;
            state.clone()
        };
        log::debug!("dispatch settled with {} notification(s)", snapshot.len());

        // Callbacks run outside the locks so they may re-enter the center.
        let subscribers: Vec<Arc<SubscriberFn>> = {
            let registry = inner.subscribers.lock().unwrap();
            registry.iter().map(|(_, f)| Arc::clone(f)).collect()
        };
        log::trace!("notifying {} subscriber(s)", subscribers.len());
        for subscriber in &subscribers {
            subscriber(&snapshot);
        }
        inner.watch_tx.send_replace(snapshot);
    }

    /// Schedules the one-shot removal timer for `id`.
    ///
    /// Idempotent: an id with a pending timer is left alone, so re-dismissing
    /// never resets the clock. There is no explicit cancellation — a timer
    /// for an id that was already cleared fires into a harmless no-op.
    fn schedule_removal(inner: &Arc<Inner>, id: NotificationId) {
        {
            let mut pending = inner.pending_removals.lock().unwrap();
            if !pending.insert(id) {
                log::trace!("removal already pending for notification {id}");
                return;
            }
        }
        log::debug!(
            "scheduling removal of notification {id} in {:?}",
            inner.removal_delay
        );

        // The task holds only a weak reference: dropping the last center
        // handle lets the state go away even with timers outstanding.
        let delay = inner.removal_delay;
        let weak = Arc::downgrade(inner);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                log::debug!("removal timer fired for notification {id}");
                inner.pending_removals.lock().unwrap().remove(&id);
                Inner::dispatch(&inner, Action::Remove(Some(id)));
            }
        });
    }
}

/// The notification store, dispatcher, and timer coordinator.
///
/// Cloning a center is cheap and yields another handle to the same store.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl NotificationCenter {
    /// Creates a center with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let (watch_tx, _) = watch::channel(Vec::new());
        Self {
            inner: Arc::new(Inner {
                capacity: config.capacity,
                removal_delay: config.removal_delay(),
                state: Mutex::new(Vec::new()),
                subscribers: Mutex::new(Vec::new()),
                next_subscriber_key: AtomicU64::new(0),
                pending_removals: Mutex::new(HashSet::new()),
                watch_tx,
            }),
        }
    }

    /// Enqueues a notification at the head of the store.
    ///
    /// The notification is forced open, oldest entries beyond the configured
    /// capacity are evicted, and every subscriber sees the new state before
    /// this returns. The returned handle can update or dismiss the entry
    /// later without going through the center.
    pub fn enqueue(&self, mut notification: Notification) -> NotificationHandle {
        notification.set_open(true);
        let id = notification.id();
        Inner::dispatch(&self.inner, Action::Add(notification));
        NotificationHandle {
            id,
            center: self.clone(),
        }
    }

    /// Shallow-merges `patch` into the entry with the given id.
    ///
    /// An unknown id is a silent no-op.
    pub fn update(&self, id: NotificationId, patch: NotificationPatch) {
        Inner::dispatch(&self.inner, Action::Update(id, patch));
    }

    /// Dismisses one notification: flips its `open` flag and schedules its
    /// eventual removal. The entry stays in the store until the removal
    /// delay elapses.
    pub fn dismiss(&self, id: NotificationId) {
        Inner::dispatch(&self.inner, Action::Dismiss(Some(id)));
    }

    /// Dismisses every notification currently in the store.
    pub fn dismiss_all(&self) {
        Inner::dispatch(&self.inner, Action::Dismiss(None));
    }

    /// Deletes one notification immediately, without waiting for a timer.
    pub fn remove(&self, id: NotificationId) {
        Inner::dispatch(&self.inner, Action::Remove(Some(id)));
    }

    /// Clears the store immediately, regardless of `open` states.
    pub fn remove_all(&self) {
        Inner::dispatch(&self.inner, Action::Remove(None));
    }

    /// Registers a callback invoked with the full state snapshot on every
    /// future dispatch. Subscriptions are independent and additive.
    ///
    /// The callback stays registered until [`Subscription::unsubscribe`] is
    /// called; dropping the returned value does not unregister it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        let key = self.inner.next_subscriber_key.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .unwrap()
            .push((key, Arc::new(callback)));
        Subscription {
            key,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Returns a live view of the store as a watch channel.
    ///
    /// The receiver observes the same snapshots the callback subscribers do,
    /// but lazily: a slow reader only sees the most recent state.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.watch_tx.subscribe()
    }

    /// Returns a snapshot of the current notifications, newest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.inner.state.lock().unwrap().clone()
    }

    /// Returns the number of notifications currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.lock().unwrap().len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state.lock().unwrap().is_empty()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("capacity", &self.inner.capacity)
            .field("removal_delay", &self.inner.removal_delay)
            .field("len", &self.len())
            .finish()
    }
}

/// A handle to one enqueued notification.
#[derive(Debug, Clone)]
pub struct NotificationHandle {
    id: NotificationId,
    center: NotificationCenter,
}

impl NotificationHandle {
    /// Returns the id of the notification this handle controls.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Shallow-merges `patch` into this notification.
    pub fn update(&self, patch: NotificationPatch) {
        self.center.update(self.id, patch);
    }

    /// Dismisses this notification.
    pub fn dismiss(&self) {
        self.center.dismiss(self.id);
    }
}

/// A registered subscriber callback.
#[derive(Debug)]
pub struct Subscription {
    key: u64,
    inner: Weak<Inner>,
}

impl Subscription {
    /// Unregisters the callback. Dispatches after this call no longer
    /// invoke it.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut registry = inner.subscribers.lock().unwrap();
            registry.retain(|(key, _)| *key != self.key);
        }
    }
}
