//! Attention signal strategies
//!
//! Frame flash and dock bounce are mutually exclusive; the platform
//! profile picks one at startup.

mod dock_bounce;
mod frame_flash;
mod noop;

pub use dock_bounce::DockBounceAttention;
pub use frame_flash::FrameFlashAttention;
pub use noop::NoOpAttention;

use std::sync::Arc;

use crate::application::ports::{AppShell, AttentionSignal, Preferences};
use crate::domain::platform::{AttentionStrategy, PlatformProfile};

/// Create the attention signal for the resolved profile
pub fn create_attention_signal(
    profile: &PlatformProfile,
    shell: Arc<dyn AppShell>,
    preferences: Arc<dyn Preferences>,
) -> Arc<dyn AttentionSignal> {
    match profile.attention {
        AttentionStrategy::FrameFlash => Arc::new(FrameFlashAttention::new(shell, preferences)),
        AttentionStrategy::DockBounce => Arc::new(DockBounceAttention::new(shell, preferences)),
        AttentionStrategy::None => Arc::new(NoOpAttention::new()),
    }
}
