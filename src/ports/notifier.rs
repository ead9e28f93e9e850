//! Notification Port - User-facing Status Strings
//!
//! Fire-and-forget: the core emits, never waits on, and never fails
//! because of, delivery.

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
  Success,
  Error,
}

/// Sink for user-facing notifications.
pub trait NotificationSink: Send + Sync + 'static {
  fn notify(&self, level: NotificationLevel, message: &str);

  fn success(&self, message: &str) {
    self.notify(NotificationLevel::Success, message);
  }

  fn error(&self, message: &str) {
    self.notify(NotificationLevel::Error, message);
  }
}
