//! User notifications (toasts)
//!
//! The core never renders anything; it hands [`Notification`]s to a
//! [`Notifier`] supplied by the host.

use parking_lot::Mutex;
use shared::{AppError, ErrorCategory, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub code: ErrorCode,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            code: ErrorCode::Success,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            code: ErrorCode::Success,
            message: message.into(),
        }
    }

    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code.code())
    }
}

impl From<AppError> for Notification {
    fn from(err: AppError) -> Self {
        Self::error(err.code, err.message)
    }
}

/// Toast sink
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log; used by the CLI
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.level {
            NotificationLevel::Error => {
                tracing::error!(code = n.code.code(), category = n.category().name(), "{}", n.message)
            }
            NotificationLevel::Warning => {
                tracing::warn!(code = n.code.code(), category = n.category().name(), "{}", n.message)
            }
            NotificationLevel::Info | NotificationLevel::Success => {
                tracing::info!("{}", n.message)
            }
        }
    }
}

/// Keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().last().cloned()
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .iter()
            .filter(|n| n.is_error())
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.seen.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::info("Payment cancelled"));
        notifier.notify(Notification::error(
            ErrorCode::InsufficientBalance,
            "Insufficient wallet balance",
        ));

        assert_eq!(notifier.all().len(), 2);
        assert_eq!(notifier.errors().len(), 1);
        assert_eq!(
            notifier.last().map(|n| n.code),
            Some(ErrorCode::InsufficientBalance)
        );
    }

    #[test]
    fn test_from_app_error_keeps_code_and_category() {
        let n = Notification::from(AppError::with_message(
            ErrorCode::AddressNotDeliverable,
            "We don't deliver from that location yet",
        ));
        assert!(n.is_error());
        assert_eq!(n.category(), ErrorCategory::Address);
        assert!(n.category().is_user_correctable());
    }
}
