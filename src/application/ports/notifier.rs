//! Notification port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::{LifecycleEvent, NotificationContent, NotificationId};

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Desktop notifications are not supported on this platform")]
    Unsupported,

    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// A lifecycle event reported by the platform after a notification was shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierEvent {
    pub id: NotificationId,
    pub event: LifecycleEvent,
}

/// Port for platform desktop notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Whether the platform notification API is available
    fn is_supported(&self) -> bool;

    /// Display a notification.
    ///
    /// Returning `Ok` means the platform has shown it. Later clicks and
    /// dismissals are reported out of band.
    async fn show(
        &self,
        id: NotificationId,
        content: &NotificationContent,
    ) -> Result<(), NotificationError>;

    /// Whether clicks and dismissals are reported after `show`.
    ///
    /// When they are not, nothing would ever settle a shown record, so the
    /// orchestrator releases it right away.
    fn reports_outcome(&self) -> bool {
        true
    }

    /// Withdraw a displayed notification and drop any event it reports
    /// later. Unknown ids are ignored.
    fn close(&self, id: NotificationId);
}
