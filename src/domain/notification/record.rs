//! Notification record entity and its lifecycle state machine

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::key::{ConversationKey, DedupKey};
use crate::domain::view::{NavigationMessage, SourceId, ViewId};

/// Process-unique notification identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notification variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Mention,
    DownloadComplete,
    UpgradeAvailable,
    RestartToUpgrade,
}

impl NotificationKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mention => "mention",
            Self::DownloadComplete => "download-complete",
            Self::UpgradeAvailable => "upgrade-available",
            Self::RestartToUpgrade => "restart-to-upgrade",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle states
///
/// ```text
/// Created -> Shown -> Clicked
/// Created -> Shown -> Closed | Failed
/// Created -> Closed | Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NotificationState {
    #[default]
    Created,
    Shown,
    Clicked,
    Closed,
    Failed,
}

impl NotificationState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Shown => "shown",
            Self::Clicked => "clicked",
            Self::Closed => "closed",
            Self::Failed => "failed",
        }
    }

    /// Terminal states accept no further events
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Clicked | Self::Closed | Self::Failed)
    }
}

impl fmt::Display for NotificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events reported by the platform for a displayed notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    Shown,
    Clicked,
    Closed,
    Failed,
}

impl LifecycleEvent {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shown => "shown",
            Self::Clicked => "clicked",
            Self::Closed => "closed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an event arrives in a state that does not accept it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid notification transition: {event} while {current} ({id})")]
pub struct InvalidTransition {
    pub id: NotificationId,
    pub current: NotificationState,
    pub event: LifecycleEvent,
}

/// Text shown by the platform notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub silent: bool,
    pub sound: Option<String>,
}

impl NotificationContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            silent: false,
            sound: None,
        }
    }

    /// Mention text is prefixed with the server it came from
    pub fn mention(
        server_name: &str,
        title: &str,
        body: &str,
        silent: bool,
        sound: Option<String>,
    ) -> Self {
        Self {
            title: format!("{}: {}", server_name, title),
            body: body.to_string(),
            silent,
            sound,
        }
    }

    pub fn download_complete(file_name: &str, server_name: &str) -> Self {
        Self::new("Download Complete", format!("{} ({})", file_name, server_name))
    }

    pub fn upgrade_available() -> Self {
        Self::new(
            "New desktop version available",
            "A new version is available for you to download now.",
        )
    }

    pub fn restart_to_upgrade() -> Self {
        Self::new(
            "Click to restart and install update",
            "A new desktop version is ready to install now.",
        )
    }

    /// Sound the application should play itself, if any.
    ///
    /// Silent notifications never play one, and "None" is the chat
    /// client's name for the disabled choice.
    pub fn custom_sound(&self) -> Option<&str> {
        if self.silent {
            return None;
        }
        self.sound
            .as_deref()
            .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case("none"))
    }
}

/// Where a mention came from and where a click should lead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionTarget {
    pub source: SourceId,
    pub view_id: ViewId,
    pub channel_id: String,
    pub team_id: String,
    pub url: String,
}

impl MentionTarget {
    pub fn conversation_key(&self) -> ConversationKey {
        ConversationKey::new(&self.team_id, &self.channel_id)
    }

    pub fn navigation(&self) -> NavigationMessage {
        NavigationMessage {
            channel_id: self.channel_id.clone(),
            team_id: self.team_id.clone(),
            url: self.url.clone(),
        }
    }
}

/// Variant-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationVariant {
    Mention(MentionTarget),
    DownloadComplete { file_name: String, path: PathBuf },
    UpgradeAvailable { version: String },
    RestartToUpgrade { version: String },
}

impl NotificationVariant {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Mention(_) => NotificationKind::Mention,
            Self::DownloadComplete { .. } => NotificationKind::DownloadComplete,
            Self::UpgradeAvailable { .. } => NotificationKind::UpgradeAvailable,
            Self::RestartToUpgrade { .. } => NotificationKind::RestartToUpgrade,
        }
    }
}

/// Behaviour switches resolved from the platform profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecyclePolicy {
    /// Keep only the latest mention per conversation
    pub dedup_mentions: bool,
}

/// Side-effect commands produced by a transition, executed in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Close the record currently holding this slot and take it over
    SupersedeCurrent(DedupKey),
    SignalAttention,
    PlaySound(String),
    /// Remove the record from every registry
    Evict,
    FocusMainWindow,
    ShowView(ViewId),
    Navigate {
        target: SourceId,
        message: NavigationMessage,
    },
    RevealPath(PathBuf),
    /// Run the acceptance callback registered with the notification
    Accept,
}

/// Result of applying an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: NotificationState,
    pub effects: Vec<Effect>,
}

/// A single displayed notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    id: NotificationId,
    content: NotificationContent,
    variant: NotificationVariant,
    state: NotificationState,
}

impl NotificationRecord {
    /// Create a record in the `Created` state with a fresh identity
    pub fn new(content: NotificationContent, variant: NotificationVariant) -> Self {
        Self {
            id: NotificationId::new(),
            content,
            variant,
            state: NotificationState::Created,
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn content(&self) -> &NotificationContent {
        &self.content
    }

    pub fn variant(&self) -> &NotificationVariant {
        &self.variant
    }

    pub fn kind(&self) -> NotificationKind {
        self.variant.kind()
    }

    pub fn state(&self) -> NotificationState {
        self.state
    }

    /// Slot this record occupies in the "current" map, if any.
    ///
    /// Mentions only occupy a slot when the policy collapses them.
    pub fn dedup_key(&self, policy: LifecyclePolicy) -> Option<DedupKey> {
        match &self.variant {
            NotificationVariant::Mention(target) if policy.dedup_mentions => {
                Some(DedupKey::Conversation(target.conversation_key()))
            }
            NotificationVariant::Mention(_) | NotificationVariant::DownloadComplete { .. } => None,
            NotificationVariant::UpgradeAvailable { .. } => Some(DedupKey::UpgradeAvailable),
            NotificationVariant::RestartToUpgrade { .. } => Some(DedupKey::RestartToUpgrade),
        }
    }

    /// Apply a lifecycle event and return the effects to run.
    ///
    /// The state is left untouched when the event is rejected.
    pub fn apply(
        &mut self,
        event: LifecycleEvent,
        policy: LifecyclePolicy,
    ) -> Result<Transition, InvalidTransition> {
        use NotificationState as S;

        let next = match (self.state, event) {
            (S::Created, LifecycleEvent::Shown) => S::Shown,
            (S::Shown, LifecycleEvent::Clicked) => S::Clicked,
            (S::Created | S::Shown, LifecycleEvent::Closed) => S::Closed,
            (S::Created | S::Shown, LifecycleEvent::Failed) => S::Failed,
            (current, event) => {
                return Err(InvalidTransition {
                    id: self.id,
                    current,
                    event,
                })
            }
        };

        self.state = next;
        Ok(Transition {
            state: next,
            effects: self.effects_for(event, policy),
        })
    }

    fn effects_for(&self, event: LifecycleEvent, policy: LifecyclePolicy) -> Vec<Effect> {
        match event {
            LifecycleEvent::Shown => self.shown_effects(policy),
            LifecycleEvent::Clicked => self.clicked_effects(),
            LifecycleEvent::Closed | LifecycleEvent::Failed => vec![Effect::Evict],
        }
    }

    fn shown_effects(&self, policy: LifecyclePolicy) -> Vec<Effect> {
        match &self.variant {
            NotificationVariant::Mention(_) => {
                let mut effects = Vec::with_capacity(3);
                if let Some(key) = self.dedup_key(policy) {
                    effects.push(Effect::SupersedeCurrent(key));
                }
                effects.push(Effect::SignalAttention);
                if let Some(sound) = self.content.custom_sound() {
                    effects.push(Effect::PlaySound(sound.to_string()));
                }
                effects
            }
            NotificationVariant::DownloadComplete { .. } => vec![Effect::SignalAttention],
            NotificationVariant::UpgradeAvailable { .. }
            | NotificationVariant::RestartToUpgrade { .. } => Vec::new(),
        }
    }

    fn clicked_effects(&self) -> Vec<Effect> {
        match &self.variant {
            NotificationVariant::Mention(target) => vec![
                Effect::Evict,
                Effect::FocusMainWindow,
                Effect::ShowView(target.view_id.clone()),
                Effect::Navigate {
                    target: target.source,
                    message: target.navigation(),
                },
            ],
            NotificationVariant::DownloadComplete { path, .. } => {
                vec![Effect::Evict, Effect::RevealPath(path.clone())]
            }
            NotificationVariant::UpgradeAvailable { .. }
            | NotificationVariant::RestartToUpgrade { .. } => vec![Effect::Evict, Effect::Accept],
        }
    }
}
