//! Attention signal port interface

use async_trait::async_trait;

use crate::domain::platform::BounceStyle;

/// Port for drawing attention to the main window without new content
#[async_trait]
pub trait AttentionSignal: Send + Sync {
    /// Flash or bounce, depending on the platform strategy. Never fails.
    async fn trigger(&self);
}

/// Read-only user preferences consulted by the attention signal.
///
/// `None` means the preference is unavailable and is treated as disabled.
pub trait Preferences: Send + Sync {
    fn flash_window(&self) -> Option<bool>;
    fn bounce_icon(&self) -> Option<bool>;
    fn bounce_style(&self) -> Option<BounceStyle>;
}
