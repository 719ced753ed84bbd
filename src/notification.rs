// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, its identifier type, and
//! the `NotificationPatch` used for in-place updates. The display payload
//! (title, description, action, variant, metadata) is opaque to the rest of
//! the crate: the store and reducer carry it through without interpreting it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique identifier for a notification.
///
/// Ids come from a process-wide incrementing counter. The counter wraps on
/// overflow, which is harmless for an in-memory store: an id may only be
/// reused long after the entry bearing it has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque action attachment carried by a notification.
///
/// The core never invokes or inspects actions; the presentation layer decides
/// what `key` and `label` mean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub key: String,
    pub label: String,
}

impl NotificationAction {
    /// Creates a new action with the given key and label.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// A single queued notification.
///
/// `open` is `true` while the notification is visible; it flips to `false` on
/// dismiss and the entry stays in the store until its removal timer fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<NotificationAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variant: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    metadata: HashMap<String, serde_json::Value>,
    open: bool,
}

impl Notification {
    /// Creates a new open notification with a fresh unique id.
    pub fn new() -> Self {
        Self {
            id: NotificationId::new(),
            title: None,
            description: None,
            action: None,
            variant: None,
            metadata: HashMap::new(),
            open: true,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches an action.
    #[must_use]
    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the variant. The core treats this as an opaque styling hint.
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Adds a metadata entry, passed through to subscribers uninterpreted.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the attached action, if any.
    #[must_use]
    pub fn action(&self) -> Option<&NotificationAction> {
        self.action.as_ref()
    }

    /// Returns the variant, if any.
    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Returns the metadata map.
    #[must_use]
    pub fn metadata(&self) -> &HashMap<String, serde_json::Value> {
        &self.metadata
    }

    /// Returns whether the notification is still open (not yet dismissed).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Shallow-merges a patch: `Some` fields overwrite, `None` fields are
    /// left untouched.
    pub(crate) fn apply(&mut self, patch: NotificationPatch) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(action) = patch.action {
            self.action = Some(action);
        }
        if let Some(variant) = patch.variant {
            self.variant = Some(variant);
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
    }
}

impl Default for Notification {
    fn default() -> Self {
        Self::new()
    }
}

/// A partial notification used for in-place updates.
///
/// Every field is optional; only the fields set to `Some` are written over
/// the matching entry. The id and `open` flag are not patchable — dismissal
/// goes through the dismiss operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<NotificationAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl NotificationPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title to write.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description to write.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the action to write.
    #[must_use]
    pub fn action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Sets the variant to write.
    #[must_use]
    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = Notification::new();
        let n2 = Notification::new();
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn new_notification_is_open() {
        assert!(Notification::new().is_open());
    }

    #[test]
    fn builder_pattern_sets_fields() {
        let notification = Notification::new()
            .with_title("Saved")
            .with_description("File written to disk")
            .with_variant("success")
            .with_action(NotificationAction::new("undo", "Undo"));

        assert_eq!(notification.title(), Some("Saved"));
        assert_eq!(notification.description(), Some("File written to disk"));
        assert_eq!(notification.variant(), Some("success"));
        assert_eq!(notification.action().unwrap().key, "undo");
    }

    #[test]
    fn patch_overwrites_only_set_fields() {
        let mut notification = Notification::new()
            .with_title("Before")
            .with_description("Unchanged");

        notification.apply(NotificationPatch::new().title("After"));

        assert_eq!(notification.title(), Some("After"));
        assert_eq!(notification.description(), Some("Unchanged"));
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut notification = Notification::new()
            .with_title("Title")
            .with_variant("info");
        let before = notification.clone();

        notification.apply(NotificationPatch::new());

        assert_eq!(notification, before);
    }

    #[test]
    fn patch_does_not_touch_open_flag() {
        let mut notification = Notification::new();
        notification.set_open(false);

        notification.apply(NotificationPatch::new().title("Still closed"));

        assert!(!notification.is_open());
    }

    #[test]
    fn notification_serde_round_trip() {
        let notification = Notification::new()
            .with_title("Hello")
            .with_metadata("source", serde_json::json!("editor"));
        let serialized = serde_json::to_string(&notification).unwrap();
        let deserialized: Notification = serde_json::from_str(&serialized).unwrap();
        assert_eq!(notification, deserialized);
    }

    #[test]
    fn empty_optional_fields_are_skipped_in_serde() {
        let notification = Notification::new();
        let serialized = serde_json::to_string(&notification).unwrap();
        assert!(!serialized.contains("\"title\""));
        assert!(!serialized.contains("\"metadata\""));
    }

    #[test]
    fn id_display_is_the_counter_value() {
        let id = NotificationId::new();
        let text = format!("{id}");
        assert!(text.parse::<u64>().is_ok());
    }
}
