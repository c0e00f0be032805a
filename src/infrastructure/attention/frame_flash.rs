//! Frame flash attention strategy

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::ports::{AppShell, AttentionSignal, Preferences};

/// Flashes the main window frame when the user enabled it
pub struct FrameFlashAttention {
    shell: Arc<dyn AppShell>,
    preferences: Arc<dyn Preferences>,
}

impl FrameFlashAttention {
    pub fn new(shell: Arc<dyn AppShell>, preferences: Arc<dyn Preferences>) -> Self {
        Self { shell, preferences }
    }
}

#[async_trait]
impl AttentionSignal for FrameFlashAttention {
    async fn trigger(&self) {
        if !self.preferences.flash_window().unwrap_or(false) {
            debug!("Frame flash disabled");
            return;
        }
        if let Err(e) = self.shell.flash_frame().await {
            warn!(error = %e, "Failed to flash window frame");
        }
    }
}
