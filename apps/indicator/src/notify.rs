//! Notification dispatch.

use headsup_monitor::{Notification, Severity};

/// Presentation side of notifications.
///
/// The monitor only produces [`Notification`] values; a desktop shell
/// implements this to show real popups. The built-in [`LogNotifier`]
/// writes them to the log, which is what the headless binary ships with.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Notifier that reports through tracing, severity mapped to log level.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.severity {
            Severity::Critical => {
                tracing::error!(title = %notification.title, "{}", notification.message);
            }
            Severity::Warning => {
                tracing::warn!(title = %notification.title, "{}", notification.message);
            }
            Severity::Info => {
                tracing::info!(title = %notification.title, "{}", notification.message);
            }
        }
    }
}
