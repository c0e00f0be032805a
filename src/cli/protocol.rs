//! Inbound host events for the `run` mode

use std::path::PathBuf;

use serde::Deserialize;

use crate::application::MentionRequest;
use crate::domain::call::{ChatMessage, Display, Rect, WindowId};
use crate::domain::view::{SourceId, ViewId, ViewInfo};

fn enabled() -> bool {
    true
}

/// One line of host input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    ViewRegistered {
        source: SourceId,
        view_id: ViewId,
        server_name: String,
        server_url: String,
        #[serde(default = "enabled")]
        notifications_enabled: bool,
    },
    ViewRemoved {
        source: SourceId,
    },
    DisplaysChanged {
        displays: Vec<Display>,
    },
    MainWindowMoved {
        bounds: Option<Rect>,
    },
    Mention {
        source: SourceId,
        title: String,
        body: String,
        channel_id: String,
        team_id: String,
        url: String,
        #[serde(default)]
        silent: bool,
        #[serde(default)]
        sound: Option<String>,
    },
    DownloadComplete {
        file_name: String,
        path: PathBuf,
        server_name: String,
    },
    UpgradeAvailable {
        version: String,
    },
    RestartRequired {
        version: String,
    },
    ChatMessage(ChatMessage),
    WindowLoaded {
        window: WindowId,
    },
    WindowClosed {
        window: WindowId,
    },
    Shutdown,
}

impl InboundEvent {
    /// Parse one line of input
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// View registration payload, if this is one
    pub fn view_info(&self) -> Option<(SourceId, ViewInfo)> {
        match self {
            Self::ViewRegistered {
                source,
                view_id,
                server_name,
                server_url,
                notifications_enabled,
            } => Some((
                *source,
                ViewInfo {
                    view_id: view_id.clone(),
                    server_name: server_name.clone(),
                    server_url: server_url.clone(),
                    notifications_enabled: *notifications_enabled,
                },
            )),
            _ => None,
        }
    }

    /// Mention request, if this is one
    pub fn mention_request(&self) -> Option<MentionRequest> {
        match self {
            Self::Mention {
                source,
                title,
                body,
                channel_id,
                team_id,
                url,
                silent,
                sound,
            } => Some(MentionRequest {
                title: title.clone(),
                body: body.clone(),
                channel_id: channel_id.clone(),
                team_id: team_id.clone(),
                url: url.clone(),
                silent: *silent,
                source: *source,
                sound: sound.clone(),
            }),
            _ => None,
        }
    }
}
