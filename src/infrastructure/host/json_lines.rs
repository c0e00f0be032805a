//! Host bridge speaking newline-delimited JSON
//!
//! Shell and window requests become [`HostCommand`] lines written to the
//! host process. Commands are queued on a channel so that synchronous
//! callers (acceptance callbacks) can emit them too.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::application::ports::{AppShell, ShellError, WindowError, WindowHost};
use crate::domain::call::{BridgeMessage, OverlayWindowSpec, WindowId};
use crate::domain::platform::BounceStyle;
use crate::domain::view::{NavigationMessage, SourceId, ViewId};

/// Outbound request to the host application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCommand {
    ShowMainWindow,
    FlashFrame,
    BounceDock {
        style: BounceStyle,
    },
    ShowView {
        view_id: ViewId,
    },
    Navigate {
        source: SourceId,
        #[serde(flatten)]
        message: NavigationMessage,
    },
    PlaySound {
        name: String,
    },
    RevealPath {
        path: PathBuf,
    },
    CreateWindow {
        window: WindowId,
        #[serde(flatten)]
        spec: OverlayWindowSpec,
    },
    ShowWindow {
        window: WindowId,
    },
    CloseWindow {
        window: WindowId,
    },
    BridgeMessage {
        window: WindowId,
        channel: String,
        payload: Value,
    },
    UpgradeRequested {
        version: String,
    },
    RestartRequested {
        version: String,
    },
}

/// Shell and window host implemented over a command queue
pub struct JsonLinesHost {
    commands: mpsc::UnboundedSender<HostCommand>,
    next_window: AtomicU64,
    open: Mutex<HashMap<WindowId, String>>,
}

impl JsonLinesHost {
    /// Create the host and the queue its commands are drained from
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HostCommand>) {
        let (commands, receiver) = mpsc::unbounded_channel();
        let host = Self {
            commands,
            next_window: AtomicU64::new(1),
            open: Mutex::new(HashMap::new()),
        };
        (host, receiver)
    }

    /// Queue a command for the host
    pub fn emit(&self, command: HostCommand) -> Result<(), ShellError> {
        self.commands
            .send(command)
            .map_err(|_| ShellError::Disconnected)
    }

    /// The host reported that a window is gone
    pub fn window_closed(&self, window: WindowId) -> bool {
        self.windows().remove(&window).is_some()
    }

    fn windows(&self) -> MutexGuard<'_, HashMap<WindowId, String>> {
        self.open
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit_window(&self, command: HostCommand) -> Result<(), WindowError> {
        self.commands
            .send(command)
            .map_err(|_| WindowError::Disconnected)
    }

    fn ensure_open(&self, window: WindowId) -> Result<(), WindowError> {
        if self.windows().contains_key(&window) {
            Ok(())
        } else {
            Err(WindowError::UnknownWindow(window))
        }
    }
}

#[async_trait]
impl AppShell for JsonLinesHost {
    async fn show_main_window(&self) -> Result<(), ShellError> {
        self.emit(HostCommand::ShowMainWindow)
    }

    async fn flash_frame(&self) -> Result<(), ShellError> {
        self.emit(HostCommand::FlashFrame)
    }

    async fn bounce_dock(&self, style: BounceStyle) -> Result<(), ShellError> {
        self.emit(HostCommand::BounceDock { style })
    }

    async fn show_view(&self, view: &ViewId) -> Result<(), ShellError> {
        self.emit(HostCommand::ShowView {
            view_id: view.clone(),
        })
    }

    async fn navigate(
        &self,
        target: SourceId,
        message: &NavigationMessage,
    ) -> Result<(), ShellError> {
        self.emit(HostCommand::Navigate {
            source: target,
            message: message.clone(),
        })
    }

    async fn play_sound(&self, name: &str) -> Result<(), ShellError> {
        self.emit(HostCommand::PlaySound {
            name: name.to_string(),
        })
    }

    async fn reveal_path(&self, path: &Path) -> Result<(), ShellError> {
        self.emit(HostCommand::RevealPath {
            path: path.to_path_buf(),
        })
    }
}

#[async_trait]
impl WindowHost for JsonLinesHost {
    fn window_titles(&self) -> Vec<String> {
        self.windows().values().cloned().collect()
    }

    async fn create(&self, spec: &OverlayWindowSpec) -> Result<WindowId, WindowError> {
        let window = WindowId(self.next_window.fetch_add(1, Ordering::SeqCst));
        self.emit_window(HostCommand::CreateWindow {
            window,
            spec: spec.clone(),
        })?;
        self.windows().insert(window, spec.title.clone());
        Ok(window)
    }

    async fn show(&self, window: WindowId) -> Result<(), WindowError> {
        self.ensure_open(window)?;
        self.emit_window(HostCommand::ShowWindow { window })
    }

    async fn close(&self, window: WindowId) -> Result<(), WindowError> {
        if !self.window_closed(window) {
            return Err(WindowError::UnknownWindow(window));
        }
        self.emit_window(HostCommand::CloseWindow { window })
    }

    async fn post(&self, window: WindowId, message: &BridgeMessage) -> Result<(), WindowError> {
        self.ensure_open(window)?;
        self.emit_window(HostCommand::BridgeMessage {
            window,
            channel: message.channel.clone(),
            payload: message.payload.clone(),
        })
    }
}

/// Drain queued commands into `writer`, one JSON object per line.
///
/// Returns once every sender is dropped.
pub async fn write_commands<W>(
    mut commands: mpsc::UnboundedReceiver<HostCommand>,
    mut writer: W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(command) = commands.recv().await {
        let mut line = match serde_json::to_string(&command) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Dropping unserializable host command");
                continue;
            }
        };
        debug!(command = %line, "Host command");
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}
