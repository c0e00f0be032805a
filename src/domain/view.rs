//! Views, content sources and navigation messages

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a content source (the rendering context that raised an event)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub u64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// Identity of a server view inside the main window
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the view directory knows about a content source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewInfo {
    pub view_id: ViewId,
    pub server_name: String,
    pub server_url: String,
    /// Whether this view currently permits notifications
    pub notifications_enabled: bool,
}

/// Navigation request sent back to a content source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationMessage {
    pub channel_id: String,
    pub team_id: String,
    pub url: String,
}

/// A conversation inside a server, plus the source that owns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub source: SourceId,
    pub channel_id: String,
    pub team_id: String,
    pub url: String,
}

impl Conversation {
    /// Navigation message that brings the user back to this conversation
    pub fn navigation(&self) -> NavigationMessage {
        NavigationMessage {
            channel_id: self.channel_id.clone(),
            team_id: self.team_id.clone(),
            url: self.url.clone(),
        }
    }
}
