// SPDX-License-Identifier: MPL-2.0
//! `toast_center` is a framework-agnostic core for toast notifications.
//!
//! It keeps an in-memory, capacity-bounded store of notifications, drives it
//! through a pure reducer, fans every state change out to subscribers, and
//! schedules timer-based removal of dismissed entries. Rendering, styling,
//! accessibility markup, and animation are deliberately out of scope: a
//! presentation layer calls the operations here and draws whatever the
//! snapshots say.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct and `NotificationPatch`
//! - [`reducer`] - Pure `(state, action) -> state` transition function
//! - [`center`] - `NotificationCenter` dispatcher, timers, and subscriptions
//! - [`config`] - Capacity and removal-delay configuration
//!
//! # Usage
//!
//! ```
//! use toast_center::{Config, Notification, NotificationCenter, NotificationPatch};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let center = NotificationCenter::new(Config { capacity: 3, ..Config::default() });
//!
//! let subscription = center.subscribe(|state| {
//!     println!("{} notification(s) visible", state.len());
//! });
//!
//! let toast = center.enqueue(Notification::new().with_title("Image saved"));
//! toast.update(NotificationPatch::new().description("sunset.png"));
//! toast.dismiss();
//!
//! subscription.unsubscribe();
//! # }
//! ```
//!
//! # Design Considerations
//!
//! - Every operation is total: unknown ids are silent no-ops, so callers can
//!   race against removal timers without defensive checks.
//! - Dismissal is logical (`open = false`); the entry stays in the store
//!   until its removal timer fires or a global remove clears it.
//! - Removal scheduling is idempotent per id and never canceled early.

#![doc(html_root_url = "https://docs.rs/toast-center/0.1.0")]

pub mod center;
pub mod config;
pub mod error;
pub mod notification;
pub mod reducer;

pub use center::{NotificationCenter, NotificationHandle, Subscription};
pub use config::Config;
pub use error::{Error, Result};
pub use notification::{Notification, NotificationAction, NotificationId, NotificationPatch};
pub use reducer::{reduce, Action};
