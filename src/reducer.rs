// SPDX-License-Identifier: MPL-2.0
//! Pure state transitions for the notification store.
//!
//! The reducer maps (state, action) to a new state and does nothing else:
//! no timers, no I/O, no subscriber fan-out. Side effects (removal
//! scheduling, notification of observers) live in
//! [`crate::center::NotificationCenter`].
//!
//! Every action is total. Updating, dismissing, or removing an unknown id is
//! a silent no-op rather than an error: callers race against removal timers,
//! and a stale id must never panic.

use crate::notification::{Notification, NotificationId, NotificationPatch};

/// A state-transition request for the notification store.
///
/// `Dismiss` and `Remove` take an optional id; `None` targets every entry.
#[derive(Debug, Clone)]
pub enum Action {
    /// Prepend a notification, evicting the oldest entries beyond capacity.
    Add(Notification),
    /// Shallow-merge a patch into the entry with the given id.
    Update(NotificationId, NotificationPatch),
    /// Flip `open` to `false` on one entry, or on all entries if `None`.
    Dismiss(Option<NotificationId>),
    /// Delete one entry, or clear the store entirely if `None`.
    Remove(Option<NotificationId>),
}

/// Computes the next store state.
///
/// Insertion order is display order, most-recent-first. The returned
/// sequence never exceeds `capacity`; overflow is dropped from the tail
/// immediately on `Add`, not deferred to a timer.
#[must_use]
pub fn reduce(mut state: Vec<Notification>, action: Action, capacity: usize) -> Vec<Notification> {
    match action {
        Action::Add(notification) => {
            state.insert(0, notification);
            state.truncate(capacity);
        }
        Action::Update(id, patch) => {
            if let Some(notification) = state.iter_mut().find(|n| n.id() == id) {
                notification.apply(patch);
            }
        }
        Action::Dismiss(Some(id)) => {
            if let Some(notification) = state.iter_mut().find(|n| n.id() == id) {
                notification.set_open(false);
            }
        }
        Action::Dismiss(None) => {
            for notification in &mut state {
                notification.set_open(false);
            }
        }
        Action::Remove(Some(id)) => {
            state.retain(|n| n.id() != id);
        }
        Action::Remove(None) => {
            state.clear();
        }
    }
    state
}
