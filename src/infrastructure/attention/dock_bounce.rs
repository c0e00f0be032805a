//! Dock bounce attention strategy

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::ports::{AppShell, AttentionSignal, Preferences};

/// Bounces the dock icon with the configured style when enabled
pub struct DockBounceAttention {
    shell: Arc<dyn AppShell>,
    preferences: Arc<dyn Preferences>,
}

impl DockBounceAttention {
    pub fn new(shell: Arc<dyn AppShell>, preferences: Arc<dyn Preferences>) -> Self {
        Self { shell, preferences }
    }
}

#[async_trait]
impl AttentionSignal for DockBounceAttention {
    async fn trigger(&self) {
        if !self.preferences.bounce_icon().unwrap_or(false) {
            debug!("Dock bounce disabled");
            return;
        }
        let style = self.preferences.bounce_style().unwrap_or_default();
        if let Err(e) = self.shell.bounce_dock(style).await {
            warn!(error = %e, %style, "Failed to bounce dock icon");
        }
    }
}
