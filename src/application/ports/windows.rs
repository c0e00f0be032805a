//! Window host and display ports used by the call overlay

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::call::{BridgeMessage, Display, OverlayWindowSpec, Rect, WindowId};

/// Window errors
#[derive(Debug, Clone, Error)]
pub enum WindowError {
    #[error("Window host disconnected")]
    Disconnected,

    #[error("Failed to create window: {0}")]
    CreateFailed(String),

    #[error("Unknown window: {0}")]
    UnknownWindow(WindowId),
}

/// Port for top-level window operations
#[async_trait]
pub trait WindowHost: Send + Sync {
    /// Titles of all currently open top-level windows
    fn window_titles(&self) -> Vec<String>;

    /// Construct a window. It stays hidden until `show` is called.
    async fn create(&self, spec: &OverlayWindowSpec) -> Result<WindowId, WindowError>;

    async fn show(&self, window: WindowId) -> Result<(), WindowError>;

    async fn close(&self, window: WindowId) -> Result<(), WindowError>;

    /// Deliver a bridge message to the window's content context
    async fn post(&self, window: WindowId, message: &BridgeMessage) -> Result<(), WindowError>;
}

/// Port enumerating connected displays
pub trait DisplayProvider: Send + Sync {
    fn displays(&self) -> Vec<Display>;

    /// Current bounds of the main application window, if known
    fn main_window_bounds(&self) -> Option<Rect>;
}
