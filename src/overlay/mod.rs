//! Stacked user notifications.
//!
//! Notifications stay visible until dismissed. Each one is stacked above
//! the ones registered before it; the vertical offset is derived from its
//! rank among the still-visible notifications, so dismissing one compacts
//! the stack.

use std::fmt;

use serde::Serialize;

/// Vertical gap, in pixels, between stacked notifications.
pub const STACK_GAP_PX: u32 = 72;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// An action completed.
    Success,
    /// Neutral information.
    Info,
    /// Something needs attention but nothing failed.
    Warning,
    /// An action failed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Identifier of a registered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NotificationId(u64);

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Identifier used to dismiss the notification.
    pub id: NotificationId,
    /// Visual weight.
    pub severity: Severity,
    /// Text shown to the user.
    pub message: String,
    /// Registration sequence number; later notifications stack higher.
    pub sequence: u64,
}

/// Registry of visible notifications.
#[derive(Debug, Default)]
pub struct OverlayManager {
    active: Vec<Notification>,
    next_sequence: u64,
}

impl OverlayManager {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a notification and returns its identifier.
    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) -> NotificationId {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        let id = NotificationId(sequence);
        let text = message.into();
        match severity {
            Severity::Error | Severity::Warning => tracing::warn!("{text}"),
            Severity::Success | Severity::Info => tracing::info!("{text}"),
        }
        self.active.push(Notification {
            id,
            severity,
            message: text,
            sequence,
        });
        id
    }

    /// Shortcut for a success notification.
    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.notify(Severity::Success, message)
    }

    /// Shortcut for an error notification.
    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.notify(Severity::Error, message)
    }

    /// Removes a notification; returns false when it was not visible.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.active.len();
        self.active.retain(|notification| notification.id != id);
        self.active.len() != before
    }

    /// Removes every notification.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Visible notifications, oldest first.
    #[must_use]
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Most recently registered visible notification.
    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.active.last()
    }

    /// Vertical offset of a visible notification in pixels.
    #[must_use]
    pub fn offset(&self, id: NotificationId) -> Option<u32> {
        let position = self
            .active
            .iter()
            .position(|notification| notification.id == id)?;
        let rank = u32::try_from(position).unwrap_or(u32::MAX);
        Some(rank.saturating_mul(STACK_GAP_PX))
    }

    /// Removes and returns every visible notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.active)
    }
}
