//! Notification Adapters - Tracing and Channel Sinks
//!
//! `TracingNotifier` writes notifications to the log. `ChannelNotifier`
//! forwards them to an unbounded channel for a UI or a test to drain;
//! a dropped receiver is ignored, never an error.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::ports::notifier::{NotificationLevel, NotificationSink};

/// Notification as delivered to channel consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Logs notifications through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Success => info!(target: "notify", "{message}"),
            NotificationLevel::Error => warn!(target: "notify", "{message}"),
        }
    }
}

/// Forwards notifications to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        // Fire-and-forget: a closed channel just drops the message.
        let _ = self.tx.send(Notification {
            level,
            message: message.to_string(),
        });
    }
}
