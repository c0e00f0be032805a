//! Notification-center suppression flag strategy

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::DoNotDisturb;

use super::probe::read_setting;

/// Reads the notification center `doNotDisturb` flag via `defaults`
pub struct NotificationCenterDnd;

impl NotificationCenterDnd {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NotificationCenterDnd {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DoNotDisturb for NotificationCenterDnd {
    async fn is_suppressed(&self) -> bool {
        let suppressed = read_setting(
            "defaults",
            &["-currentHost", "read", "com.apple.notificationcenterui", "doNotDisturb"],
        )
        .await
        .is_some_and(|out| flag_set(&out));
        debug!(suppressed, "Notification center probed");
        suppressed
    }
}

fn flag_set(output: &str) -> bool {
    matches!(output.trim(), "1" | "true" | "YES")
}
