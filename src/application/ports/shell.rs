//! Application shell port: focus, navigation and other outbound requests

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::view::{NavigationMessage, SourceId, ViewId};
use crate::domain::platform::BounceStyle;

/// Shell errors
#[derive(Debug, Clone, Error)]
pub enum ShellError {
    #[error("Application shell disconnected")]
    Disconnected,

    #[error("Shell request failed: {0}")]
    RequestFailed(String),
}

/// Port for requests the orchestration layer sends to the application
#[async_trait]
pub trait AppShell: Send + Sync {
    /// Bring the main window to the foreground
    async fn show_main_window(&self) -> Result<(), ShellError>;

    async fn flash_frame(&self) -> Result<(), ShellError>;

    async fn bounce_dock(&self, style: BounceStyle) -> Result<(), ShellError>;

    /// Switch the main window to a server view
    async fn show_view(&self, view: &ViewId) -> Result<(), ShellError>;

    /// Send a navigation message to a content source
    async fn navigate(
        &self,
        target: SourceId,
        message: &NavigationMessage,
    ) -> Result<(), ShellError>;

    /// Ask the main render surface to play a named sound
    async fn play_sound(&self, name: &str) -> Result<(), ShellError>;

    /// Reveal a file in the OS file browser
    async fn reveal_path(&self, path: &Path) -> Result<(), ShellError>;
}
