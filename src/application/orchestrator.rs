//! Notification orchestrator use case
//!
//! Validates preconditions, creates notification records, runs the
//! effects each lifecycle transition produces and routes clicks back
//! into the application.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::domain::notification::{
    DedupKey, Effect, LifecycleEvent, LifecyclePolicy, MentionTarget, NotificationContent,
    NotificationId, NotificationRecord, NotificationState, NotificationVariant, Transition,
};
use crate::domain::view::SourceId;

use super::ports::{
    AppShell, AttentionSignal, Capability, DoNotDisturb, Notifier, PermissionGate, ViewResolver,
};
use super::registry::ActiveNotificationRegistry;

/// Callback run when the user accepts an upgrade notification
pub type AcceptHandler = Box<dyn FnOnce() + Send>;

/// Why a notification was not shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Unsupported,
    Suppressed,
    MissingContext,
    ViewMuted,
    PermissionDenied,
}

impl SkipReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unsupported => "notifications unsupported",
            Self::Suppressed => "do not disturb active",
            Self::MissingContext => "originating view no longer exists",
            Self::ViewMuted => "view does not permit notifications",
            Self::PermissionDenied => "notification permission denied",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a `notify_*` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The platform displayed the notification
    Shown(NotificationId),
    /// A record was created but the platform failed to display it
    Failed(NotificationId),
    /// A precondition failed, nothing was created
    Skipped(SkipReason),
}

impl Delivery {
    pub fn id(&self) -> Option<NotificationId> {
        match self {
            Self::Shown(id) | Self::Failed(id) => Some(*id),
            Self::Skipped(_) => None,
        }
    }
}

/// Input for a mention notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionRequest {
    pub title: String,
    pub body: String,
    pub channel_id: String,
    pub team_id: String,
    pub url: String,
    pub silent: bool,
    pub source: SourceId,
    pub sound: Option<String>,
}

/// Collaborators the orchestrator drives
pub struct OrchestratorPorts {
    pub notifier: Arc<dyn Notifier>,
    pub dnd: Arc<dyn DoNotDisturb>,
    pub views: Arc<dyn ViewResolver>,
    pub permissions: Arc<dyn PermissionGate>,
    pub attention: Arc<dyn AttentionSignal>,
    pub shell: Arc<dyn AppShell>,
}

/// Façade over notification display, dedup and click routing
pub struct NotificationOrchestrator {
    ports: OrchestratorPorts,
    policy: LifecyclePolicy,
    registry: ActiveNotificationRegistry,
    accept_handlers: Mutex<HashMap<NotificationId, AcceptHandler>>,
}

impl NotificationOrchestrator {
    pub fn new(ports: OrchestratorPorts, policy: LifecyclePolicy) -> Self {
        Self {
            ports,
            policy,
            registry: ActiveNotificationRegistry::new(),
            accept_handlers: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> LifecyclePolicy {
        self.policy
    }

    /// Show a mention notification for a chat message
    pub async fn notify_mention(&self, request: MentionRequest) -> Delivery {
        if let Some(reason) = self.check_platform().await {
            return skipped("mention", reason);
        }

        let Some(view) = self.ports.views.resolve(request.source) else {
            return skipped("mention", SkipReason::MissingContext);
        };
        if !view.notifications_enabled {
            return skipped("mention", SkipReason::ViewMuted);
        }

        let granted = self
            .ports
            .permissions
            .is_granted(request.source, Capability::Notifications, &view.server_url)
            .await;
        if !granted {
            return skipped("mention", SkipReason::PermissionDenied);
        }

        let content = NotificationContent::mention(
            &view.server_name,
            &request.title,
            &request.body,
            request.silent,
            request.sound,
        );
        let variant = NotificationVariant::Mention(MentionTarget {
            source: request.source,
            view_id: view.view_id,
            channel_id: request.channel_id,
            team_id: request.team_id,
            url: request.url,
        });

        self.deliver(NotificationRecord::new(content, variant), None)
            .await
    }

    /// Tell the user a download finished; clicking reveals the file
    pub async fn notify_download_complete(
        &self,
        file_name: &str,
        path: PathBuf,
        server_name: &str,
    ) -> Delivery {
        if let Some(reason) = self.check_platform().await {
            return skipped("download-complete", reason);
        }

        let record = NotificationRecord::new(
            NotificationContent::download_complete(file_name, server_name),
            NotificationVariant::DownloadComplete {
                file_name: file_name.to_string(),
                path,
            },
        );
        self.deliver(record, None).await
    }

    /// Offer a new version; replaces any outstanding upgrade notification
    pub async fn notify_upgrade_available(
        &self,
        version: &str,
        on_accept: AcceptHandler,
    ) -> Delivery {
        if let Some(reason) = self.check_platform().await {
            return skipped("upgrade-available", reason);
        }

        let record = NotificationRecord::new(
            NotificationContent::upgrade_available(),
            NotificationVariant::UpgradeAvailable {
                version: version.to_string(),
            },
        );
        self.deliver(record, Some(on_accept)).await
    }

    /// Ask for a restart to install a downloaded version
    pub async fn notify_restart_required(
        &self,
        version: &str,
        on_accept: AcceptHandler,
    ) -> Delivery {
        if let Some(reason) = self.check_platform().await {
            return skipped("restart-to-upgrade", reason);
        }

        let record = NotificationRecord::new(
            NotificationContent::restart_to_upgrade(),
            NotificationVariant::RestartToUpgrade {
                version: version.to_string(),
            },
        );
        self.deliver(record, Some(on_accept)).await
    }

    /// Feed a platform lifecycle event for `id`.
    ///
    /// Returns the new state, or `None` when the event was ignored.
    pub async fn handle_event(
        &self,
        id: NotificationId,
        event: LifecycleEvent,
    ) -> Option<NotificationState> {
        let transition = self.transition(id, event)?;
        let state = transition.state;
        self.run_effects(id, transition).await;
        Some(state)
    }

    /// Close a notification and evict it at once.
    ///
    /// Safe for records that are still being shown or already gone.
    pub fn close(&self, id: NotificationId) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        self.ports.notifier.close(id);

        let Some(transition) = self.transition(id, LifecycleEvent::Closed) else {
            return false;
        };
        // Closed only ever evicts
        for effect in transition.effects {
            if effect == Effect::Evict {
                self.evict(id);
            }
        }
        true
    }

    pub fn active_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_active(&self, id: NotificationId) -> bool {
        self.registry.contains(id)
    }

    pub fn current_for(&self, key: &DedupKey) -> Option<NotificationId> {
        self.registry.current(key)
    }

    pub fn state_of(&self, id: NotificationId) -> Option<NotificationState> {
        self.registry.state_of(id)
    }

    async fn check_platform(&self) -> Option<SkipReason> {
        if !self.ports.notifier.is_supported() {
            return Some(SkipReason::Unsupported);
        }
        if self.ports.dnd.is_suppressed().await {
            return Some(SkipReason::Suppressed);
        }
        None
    }

    async fn deliver(
        &self,
        record: NotificationRecord,
        on_accept: Option<AcceptHandler>,
    ) -> Delivery {
        let id = record.id();
        let kind = record.kind();
        let content = record.content().clone();

        // Upgrade slots are claimed before showing; mention slots on Shown.
        let slot = match record.variant() {
            NotificationVariant::UpgradeAvailable { .. }
            | NotificationVariant::RestartToUpgrade { .. } => record.dedup_key(self.policy),
            _ => None,
        };

        self.registry.insert(record);
        if let Some(handler) = on_accept {
            self.handlers().insert(id, handler);
        }
        if let Some(key) = slot {
            self.occupy_slot(key, id);
        }

        match self.ports.notifier.show(id, &content).await {
            Ok(()) => {
                info!(%id, %kind, "Notification shown");
                self.handle_event(id, LifecycleEvent::Shown).await;
                if !self.ports.notifier.reports_outcome() {
                    debug!(%id, "Platform reports no outcome, releasing notification");
                    self.evict(id);
                }
                Delivery::Shown(id)
            }
            Err(e) => {
                warn!(%id, %kind, error = %e, "Notification failed");
                self.handle_event(id, LifecycleEvent::Failed).await;
                Delivery::Failed(id)
            }
        }
    }

    fn transition(&self, id: NotificationId, event: LifecycleEvent) -> Option<Transition> {
        match self.registry.apply(id, event, self.policy) {
            Some(Ok(transition)) => {
                debug!(%id, %event, state = %transition.state, "Notification transition");
                Some(transition)
            }
            Some(Err(e)) => {
                debug!(error = %e, "Ignoring lifecycle event");
                None
            }
            None => {
                debug!(%id, %event, "Ignoring event for inactive notification");
                None
            }
        }
    }

    async fn run_effects(&self, id: NotificationId, transition: Transition) {
        let mut on_accept = if transition.state.is_terminal() {
            self.handlers().remove(&id)
        } else {
            None
        };

        for effect in transition.effects {
            match effect {
                Effect::SupersedeCurrent(key) => self.occupy_slot(key, id),
                Effect::SignalAttention => self.ports.attention.trigger().await,
                Effect::PlaySound(name) => {
                    if let Err(e) = self.ports.shell.play_sound(&name).await {
                        warn!(error = %e, sound = %name, "Failed to play notification sound");
                    }
                }
                Effect::Evict => self.evict(id),
                Effect::FocusMainWindow => {
                    if let Err(e) = self.ports.shell.show_main_window().await {
                        warn!(error = %e, "Failed to focus main window");
                    }
                }
                Effect::ShowView(view) => {
                    if let Err(e) = self.ports.shell.show_view(&view).await {
                        warn!(error = %e, %view, "Failed to switch view");
                    }
                }
                Effect::Navigate { target, message } => {
                    if let Err(e) = self.ports.shell.navigate(target, &message).await {
                        warn!(error = %e, %target, "Failed to send navigation message");
                    }
                }
                Effect::RevealPath(path) => {
                    if let Err(e) = self.ports.shell.reveal_path(&path).await {
                        warn!(error = %e, path = %path.display(), "Failed to reveal download");
                    }
                }
                Effect::Accept => match on_accept.take() {
                    Some(handler) => handler(),
                    None => debug!(%id, "No acceptance handler registered"),
                },
            }
        }
    }

    /// Record `id` as current for `key`, then close whatever it replaced.
    /// The swap is one registry update.
    fn occupy_slot(&self, key: DedupKey, id: NotificationId) {
        let Some(previous) = self.registry.set_current(key.clone(), id) else {
            return;
        };
        info!(%key, superseded = %previous, by = %id, "Closing superseded notification");
        self.close(previous);
    }

    fn evict(&self, id: NotificationId) {
        self.registry.evict(id);
        self.handlers().remove(&id);
    }

    fn handlers(&self) -> std::sync::MutexGuard<'_, HashMap<NotificationId, AcceptHandler>> {
        self.accept_handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn skipped(kind: &str, reason: SkipReason) -> Delivery {
    info!(kind, %reason, "Notification skipped");
    Delivery::Skipped(reason)
}
