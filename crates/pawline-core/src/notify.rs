//! User-facing notification events.
//!
//! The core emits `(message, kind)` events; rendering them (toast, banner,
//! system notification) is the consumer's job.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// An action completed.
    Success,
    /// An action failed.
    Error,
    /// Neutral information.
    Info,
}

/// A user-facing notification event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text to show the user.
    pub message: String,
    /// Severity.
    pub kind: NotificationKind,
}

/// Emitter handle for notification events.
///
/// Cheap to clone; all clones feed the same receiver. Emitting after the
/// receiver is gone is a silent no-op — the core never depends on anyone
/// listening.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: UnboundedSender<Notification>,
}

impl Notifier {
    /// Create an emitter together with the receiving end.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Emit a success notification.
    pub fn success(&self, message: impl Into<String>) {
        self.emit(message, NotificationKind::Success);
    }

    /// Emit an error notification.
    pub fn error(&self, message: impl Into<String>) {
        self.emit(message, NotificationKind::Error);
    }

    /// Emit an informational notification.
    pub fn info(&self, message: impl Into<String>) {
        self.emit(message, NotificationKind::Info);
    }

    fn emit(&self, message: impl Into<String>, kind: NotificationKind) {
        let _ = self.tx.send(Notification {
            message: message.into(),
            kind,
        });
    }
}
