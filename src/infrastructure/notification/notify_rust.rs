//! Cross-platform notification adapter using notify-rust
//!
//! The freedesktop backend reports clicks and dismissals and can withdraw
//! a notification. Windows toasts report both but stay in the action
//! center once shown. macOS notifications report nothing.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::application::ports::{NotificationError, Notifier, NotifierEvent};
use crate::domain::notification::{LifecycleEvent, NotificationContent, NotificationId};

/// Platform handle that can take a notification back off screen
#[cfg(all(unix, not(target_os = "macos")))]
type Withdrawable = notify_rust::NotificationHandle;

#[cfg(not(all(unix, not(target_os = "macos"))))]
type Withdrawable = std::convert::Infallible;

struct Tracked<H> {
    handles: HashMap<NotificationId, H>,
    /// Ids closed by us; their late platform events are dropped
    closed: HashSet<NotificationId>,
}

/// Notifications still on screen, keyed by our id
struct LiveNotifications<H> {
    tracked: Mutex<Tracked<H>>,
}

impl<H> LiveNotifications<H> {
    fn new() -> Self {
        Self {
            tracked: Mutex::new(Tracked {
                handles: HashMap::new(),
                closed: HashSet::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tracked<H>> {
        self.tracked
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Keep `handle` for a later withdraw.
    ///
    /// Hands it straight back when `id` was closed while still being shown.
    #[cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]
    fn track(&self, id: NotificationId, handle: H) -> Option<H> {
        let mut tracked = self.lock();
        if tracked.closed.contains(&id) {
            return Some(handle);
        }
        tracked.handles.insert(id, handle);
        None
    }

    /// Mark `id` as closed by us and take its handle, if one is held
    fn withdraw(&self, id: NotificationId) -> Option<H> {
        let mut tracked = self.lock();
        tracked.closed.insert(id);
        tracked.handles.remove(&id)
    }

    /// Forget `id` once the platform reported its outcome.
    ///
    /// Returns whether the outcome should be passed on.
    fn settle(&self, id: NotificationId) -> bool {
        let mut tracked = self.lock();
        tracked.handles.remove(&id);
        !tracked.closed.remove(&id)
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        let tracked = self.lock();
        tracked.handles.is_empty() && tracked.closed.is_empty()
    }
}

/// Notifier backed by the platform notification service
pub struct NotifyRustNotifier {
    app_name: String,
    events: mpsc::UnboundedSender<NotifierEvent>,
    live: Arc<LiveNotifications<Withdrawable>>,
}

impl NotifyRustNotifier {
    /// Create the notifier and the receiver its lifecycle events arrive on
    pub fn new(app_name: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<NotifierEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let notifier = Self {
            app_name: app_name.into(),
            events,
            live: Arc::new(LiveNotifications::new()),
        };
        (notifier, receiver)
    }

    fn build(&self, content: &NotificationContent) -> notify_rust::Notification {
        let mut notification = notify_rust::Notification::new();
        notification
            .appname(&self.app_name)
            .summary(&content.title)
            .body(&content.body);
        #[cfg(all(unix, not(target_os = "macos")))]
        notification.action("default", "Open");
        notification
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    fn is_supported(&self) -> bool {
        cfg!(any(
            target_os = "linux",
            target_os = "macos",
            target_os = "windows",
            target_os = "freebsd"
        ))
    }

    fn reports_outcome(&self) -> bool {
        !cfg!(target_os = "macos")
    }

    async fn show(
        &self,
        id: NotificationId,
        content: &NotificationContent,
    ) -> Result<(), NotificationError> {
        if !self.is_supported() {
            return Err(NotificationError::Unsupported);
        }

        let notification = self.build(content);
        let events = self.events.clone();
        let live = Arc::clone(&self.live);
        let (shown_tx, shown_rx) = oneshot::channel();

        // notify-rust blocks, and waiting for the outcome blocks again
        // until the user acts on the notification.
        tokio::task::spawn_blocking(move || {
            let handle = match notification.show() {
                Ok(handle) => handle,
                Err(e) => {
                    let _ = shown_tx.send(Err(NotificationError::SendFailed(e.to_string())));
                    return;
                }
            };
            follow(id, handle, shown_tx, &live, &events);
        });

        shown_rx.await.map_err(|e| {
            NotificationError::SendFailed(format!("Notification task ended: {}", e))
        })?
    }

    fn close(&self, id: NotificationId) {
        if !self.reports_outcome() {
            debug!(%id, "Platform cannot withdraw notifications");
            return;
        }
        match self.live.withdraw(id) {
            Some(handle) => {
                tokio::task::spawn_blocking(move || withdraw(id, handle));
            }
            None => debug!(%id, "Notification cannot be withdrawn, dropping its late events"),
        }
    }
}

/// Pass a platform outcome on unless we closed the notification ourselves
fn report<H>(
    id: NotificationId,
    event: LifecycleEvent,
    live: &LiveNotifications<H>,
    events: &mpsc::UnboundedSender<NotifierEvent>,
) {
    if !live.settle(id) {
        debug!(%id, %event, "Dropping event for closed notification");
        return;
    }
    let _ = events.send(NotifierEvent { id, event });
}

#[cfg(all(unix, not(target_os = "macos")))]
fn follow(
    id: NotificationId,
    handle: notify_rust::NotificationHandle,
    shown: oneshot::Sender<Result<(), NotificationError>>,
    live: &LiveNotifications<Withdrawable>,
    events: &mpsc::UnboundedSender<NotifierEvent>,
) {
    let server_id = handle.id();
    if let Some(handle) = live.track(id, handle) {
        let _ = shown.send(Ok(()));
        withdraw(id, handle);
        live.settle(id);
        return;
    }
    let _ = shown.send(Ok(()));

    // Listening by server id leaves the handle free for `close`.
    let mut event = LifecycleEvent::Closed;
    let listened = notify_rust::handle_action(server_id, |response| {
        if let notify_rust::ActionResponse::Custom(_) = response {
            event = LifecycleEvent::Clicked;
        }
    });
    if let Err(e) = listened {
        tracing::warn!(%id, error = %e, "Lost track of notification");
    }
    report(id, event, live, events);
}

#[cfg(target_os = "windows")]
fn follow(
    id: NotificationId,
    handle: notify_rust::NotificationHandle,
    shown: oneshot::Sender<Result<(), NotificationError>>,
    live: &LiveNotifications<Withdrawable>,
    events: &mpsc::UnboundedSender<NotifierEvent>,
) {
    let _ = shown.send(Ok(()));

    let mut event = LifecycleEvent::Closed;
    let waited = handle.wait_for_response(|response: &notify_rust::NotificationResponse| {
        if !matches!(response, notify_rust::NotificationResponse::Closed(_)) {
            event = LifecycleEvent::Clicked;
        }
    });
    if let Err(e) = waited {
        debug!(%id, error = %e, "Toast ended without a response");
    }
    report(id, event, live, events);
}

#[cfg(target_os = "macos")]
fn follow(
    id: NotificationId,
    handle: notify_rust::NotificationHandle,
    shown: oneshot::Sender<Result<(), NotificationError>>,
    _live: &LiveNotifications<Withdrawable>,
    _events: &mpsc::UnboundedSender<NotifierEvent>,
) {
    // Dropping the handle delivers the notification.
    drop(handle);
    let _ = shown.send(Ok(()));
    debug!(%id, "Platform does not report notification actions");
}

#[cfg(all(unix, not(target_os = "macos")))]
fn withdraw(id: NotificationId, handle: Withdrawable) {
    handle.close();
    debug!(%id, "Notification withdrawn");
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn withdraw(_id: NotificationId, handle: Withdrawable) {
    match handle {}
}
