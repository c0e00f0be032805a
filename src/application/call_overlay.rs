//! Call overlay coordinator use case
//!
//! Turns a chat message carrying the call trigger into one primary
//! overlay window plus a backdrop on every other display, shows them
//! together once the primary has loaded, and tears them down when the
//! primary closes.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::call::{
    CallTrigger, ChatMessage, ContentBridge, Envelope, FanOut, OverlayLayout, OverlaySession,
    OverlayWindowSpec, Placement, SenderMeta, WindowId, WindowRole, CALL_OVERLAY_TITLE,
    CALL_PAYLOAD_CHANNEL,
};

use super::ports::{AppShell, DisplayProvider, DoNotDisturb, WindowHost};

/// Behaviour switches for the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOverlaySettings {
    pub trigger: CallTrigger,
    pub placement: Placement,
    pub fan_out: FanOut,
    /// Skip the overlay while Do-Not-Disturb is active
    pub respect_dnd: bool,
}

impl Default for CallOverlaySettings {
    fn default() -> Self {
        Self {
            trigger: CallTrigger::default(),
            placement: Placement::PrimaryDisplay,
            fan_out: FanOut::AllDisplays,
            respect_dnd: true,
        }
    }
}

/// Result of feeding a chat message to the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The message does not carry the trigger
    NotTriggered,
    /// An overlay is already open
    AlreadyOpen,
    /// Do-Not-Disturb is active
    Suppressed,
    /// No display is connected
    NoDisplays,
    /// The primary window could not be created
    Failed,
    Opened {
        primary: WindowId,
        secondaries: Vec<WindowId>,
    },
}

/// Window lifecycle notifications from the window host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// Content finished loading
    Loaded(WindowId),
    Closed(WindowId),
}

/// Collaborators the coordinator drives
pub struct CallOverlayPorts {
    pub windows: Arc<dyn WindowHost>,
    pub displays: Arc<dyn DisplayProvider>,
    pub dnd: Arc<dyn DoNotDisturb>,
    pub shell: Arc<dyn AppShell>,
}

/// Owns the singleton overlay session
pub struct CallOverlayCoordinator {
    ports: CallOverlayPorts,
    settings: CallOverlaySettings,
    bridge: ContentBridge,
    session: Mutex<Option<OverlaySession>>,
}

impl CallOverlayCoordinator {
    pub fn new(ports: CallOverlayPorts, settings: CallOverlaySettings) -> Self {
        Self {
            ports,
            settings,
            bridge: ContentBridge::call_overlay(),
            session: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &CallOverlaySettings {
        &self.settings
    }

    /// Whether an overlay session is currently open
    pub async fn is_active(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Inspect a chat message and open the overlay if it carries the trigger
    pub async fn on_chat_message(&self, message: &ChatMessage) -> TriggerOutcome {
        let Some(payload) = self.settings.trigger.payload_for(message) else {
            return TriggerOutcome::NotTriggered;
        };

        // Held until the windows exist, so a second trigger waits and then
        // sees the open session.
        let mut session = self.session.lock().await;

        let titled_open = self
            .ports
            .windows
            .window_titles()
            .iter()
            .any(|title| title == CALL_OVERLAY_TITLE);
        if session.is_some() || titled_open {
            info!(caller = %payload.name, "Call overlay already open, ignoring trigger");
            return TriggerOutcome::AlreadyOpen;
        }

        if self.settings.respect_dnd && self.ports.dnd.is_suppressed().await {
            info!(caller = %payload.name, "Do not disturb active, skipping call overlay");
            return TriggerOutcome::Suppressed;
        }

        let displays = self.ports.displays.displays();
        let Some(layout) = OverlayLayout::compute(
            &displays,
            self.settings.placement,
            self.ports.displays.main_window_bounds(),
            self.settings.fan_out,
        ) else {
            warn!("No display connected, skipping call overlay");
            return TriggerOutcome::NoDisplays;
        };

        let primary = match self
            .ports
            .windows
            .create(&OverlayWindowSpec::primary(layout.primary))
            .await
        {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Failed to create call overlay");
                return TriggerOutcome::Failed;
            }
        };

        let mut secondaries = Vec::with_capacity(layout.secondaries.len());
        for (display_id, bounds) in &layout.secondaries {
            match self
                .ports
                .windows
                .create(&OverlayWindowSpec::secondary(*bounds))
                .await
            {
                Ok(id) => secondaries.push(id),
                Err(e) => warn!(
                    error = %e,
                    display = *display_id,
                    "Failed to create call overlay backdrop"
                ),
            }
        }

        info!(
            caller = %payload.name,
            display = layout.primary_display,
            windows = 1 + secondaries.len(),
            "Call overlay opened"
        );
        *session = Some(OverlaySession::new(
            primary,
            secondaries.clone(),
            payload,
            message.origin.clone(),
        ));

        TriggerOutcome::Opened {
            primary,
            secondaries,
        }
    }

    /// Feed a window lifecycle event. Events for other windows are ignored.
    pub async fn handle_window_event(&self, event: WindowEvent) {
        match event {
            WindowEvent::Loaded(window) => self.primary_loaded(window).await,
            WindowEvent::Closed(window) => self.window_closed(window).await,
        }
    }

    async fn primary_loaded(&self, window: WindowId) {
        let plan = {
            let mut guard = self.session.lock().await;
            let Some(session) = guard.as_mut() else {
                return;
            };
            if session.role_of(window) != Some(WindowRole::Primary) {
                return;
            }
            match session.primary_loaded() {
                Ok(plan) => plan,
                Err(e) => {
                    debug!(error = %e, %window, "Ignoring load event");
                    return;
                }
            }
        };

        let sender = SenderMeta {
            process: "main".to_string(),
            frame_id: None,
        };
        let delivered = Envelope::new(sender, CALL_PAYLOAD_CHANNEL, &plan.payload)
            .and_then(|envelope| self.bridge.deliver(envelope));
        match delivered {
            Ok(message) => {
                if let Err(e) = self.ports.windows.post(plan.primary, &message).await {
                    warn!(error = %e, "Failed to deliver call payload");
                }
            }
            Err(e) => warn!(error = %e, "Failed to prepare call payload"),
        }

        for id in std::iter::once(plan.primary).chain(plan.secondaries) {
            if let Err(e) = self.ports.windows.show(id).await {
                warn!(error = %e, window = %id, "Failed to show call overlay window");
            }
        }
    }

    async fn window_closed(&self, window: WindowId) {
        let plan = {
            let mut guard = self.session.lock().await;
            let Some(session) = guard.as_mut() else {
                return;
            };
            match session.role_of(window) {
                Some(WindowRole::Primary) => {}
                Some(WindowRole::Secondary) => {
                    session.secondary_closed(window);
                    return;
                }
                None => return,
            }
            let plan = session.dismiss();
            *guard = None;
            match plan {
                Ok(plan) => plan,
                Err(e) => {
                    debug!(error = %e, "Ignoring close event");
                    return;
                }
            }
        };

        for id in &plan.close {
            if let Err(e) = self.ports.windows.close(*id).await {
                warn!(error = %e, window = %id, "Failed to close call overlay backdrop");
            }
        }

        info!(
            channel = %plan.navigation.channel_id,
            team = %plan.navigation.team_id,
            "Call overlay dismissed"
        );
        if let Err(e) = self.ports.shell.navigate(plan.target, &plan.navigation).await {
            warn!(error = %e, "Failed to return to calling conversation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ShellError, WindowError};
    use crate::domain::call::{BridgeMessage, CallSender, Display, Rect};
    use crate::domain::platform::BounceStyle;
    use crate::domain::view::{Conversation, NavigationMessage, SourceId, ViewId};
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Mutex as StdMutex;

    type Log = Arc<StdMutex<Vec<String>>>;

    fn push(log: &Log, entry: impl Into<String>) {
        log.lock().unwrap().push(entry.into());
    }

    #[derive(Default)]
    struct MockWindows {
        log: Log,
        next: AtomicU64,
        titles: StdMutex<Vec<String>>,
        specs: StdMutex<Vec<OverlayWindowSpec>>,
        posted: StdMutex<Vec<BridgeMessage>>,
        /// Creations past this count fail
        fail_after: Option<u64>,
    }

    #[async_trait]
    impl WindowHost for MockWindows {
        fn window_titles(&self) -> Vec<String> {
            self.titles.lock().unwrap().clone()
        }

        async fn create(&self, spec: &OverlayWindowSpec) -> Result<WindowId, WindowError> {
            let created = self.next.fetch_add(1, Ordering::SeqCst);
            if self.fail_after.is_some_and(|limit| created >= limit) {
                return Err(WindowError::CreateFailed("display unplugged".to_string()));
            }
            let id = WindowId(created + 1);
            self.specs.lock().unwrap().push(spec.clone());
            self.titles.lock().unwrap().push(spec.title.clone());
            push(&self.log, format!("create {}", id.0));
            Ok(id)
        }

        async fn show(&self, window: WindowId) -> Result<(), WindowError> {
            push(&self.log, format!("show {}", window.0));
            Ok(())
        }

        async fn close(&self, window: WindowId) -> Result<(), WindowError> {
            push(&self.log, format!("close {}", window.0));
            Ok(())
        }

        async fn post(&self, window: WindowId, message: &BridgeMessage) -> Result<(), WindowError> {
            push(&self.log, format!("post {}", window.0));
            self.posted.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    struct MockDisplays(Vec<Display>);

    impl DisplayProvider for MockDisplays {
        fn displays(&self) -> Vec<Display> {
            self.0.clone()
        }

        fn main_window_bounds(&self) -> Option<Rect> {
            None
        }
    }

    struct MockDnd(AtomicBool);

    #[async_trait]
    impl DoNotDisturb for MockDnd {
        async fn is_suppressed(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    struct MockShell(Log);

    #[async_trait]
    impl AppShell for MockShell {
        async fn show_main_window(&self) -> Result<(), ShellError> {
            Ok(())
        }
        async fn flash_frame(&self) -> Result<(), ShellError> {
            Ok(())
        }
        async fn bounce_dock(&self, _: BounceStyle) -> Result<(), ShellError> {
            Ok(())
        }
        async fn show_view(&self, _: &ViewId) -> Result<(), ShellError> {
            Ok(())
        }
        async fn navigate(
            &self,
            target: SourceId,
            message: &NavigationMessage,
        ) -> Result<(), ShellError> {
            push(
                &self.0,
                format!("navigate {} {}/{}", target.0, message.team_id, message.channel_id),
            );
            Ok(())
        }
        async fn play_sound(&self, _: &str) -> Result<(), ShellError> {
            Ok(())
        }
        async fn reveal_path(&self, _: &Path) -> Result<(), ShellError> {
            Ok(())
        }
    }

    fn display(id: u32, x: i32, primary: bool) -> Display {
        Display {
            id,
            bounds: Rect::new(x, 0, 1920, 1080),
            work_area: Rect::new(x, 0, 1920, 1040),
            is_primary: primary,
        }
    }

    struct Fixture {
        coordinator: CallOverlayCoordinator,
        windows: Arc<MockWindows>,
        log: Log,
    }

    fn fixture(displays: Vec<Display>, fan_out: FanOut, dnd: bool) -> Fixture {
        fixture_with_windows(displays, fan_out, dnd, None)
    }

    fn fixture_with_windows(
        displays: Vec<Display>,
        fan_out: FanOut,
        dnd: bool,
        fail_after: Option<u64>,
    ) -> Fixture {
        let log: Log = Arc::new(StdMutex::new(Vec::new()));
        let windows = Arc::new(MockWindows {
            log: log.clone(),
            fail_after,
            ..Default::default()
        });
        let coordinator = CallOverlayCoordinator::new(
            CallOverlayPorts {
                windows: windows.clone(),
                displays: Arc::new(MockDisplays(displays)),
                dnd: Arc::new(MockDnd(AtomicBool::new(dnd))),
                shell: Arc::new(MockShell(log.clone())),
            },
            CallOverlaySettings {
                fan_out,
                ..Default::default()
            },
        );
        Fixture {
            coordinator,
            windows,
            log,
        }
    }

    fn three_displays() -> Vec<Display> {
        vec![
            display(1, 0, true),
            display(2, 1920, false),
            display(3, -1920, false),
        ]
    }

    fn message(text: &str) -> ChatMessage {
        ChatMessage {
            sender: CallSender {
                name: "Bob".to_string(),
                avatar_url: "https://chat.test/bob.png".to_string(),
            },
            text: text.to_string(),
            origin: Conversation {
                source: SourceId(4),
                channel_id: "c9".to_string(),
                team_id: "t2".to_string(),
                url: "https://chat.test/t2/channels/c9".to_string(),
            },
        }
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn non_trigger_messages_do_nothing() {
        let f = fixture(three_displays(), FanOut::AllDisplays, false);
        for text in ["", "   ", "hello", "please !call me", "!cal"] {
            assert_eq!(
                f.coordinator.on_chat_message(&message(text)).await,
                TriggerOutcome::NotTriggered
            );
        }
        assert!(entries(&f.log).is_empty());
        assert!(!f.coordinator.is_active().await);
    }

    #[tokio::test]
    async fn one_primary_and_a_backdrop_per_other_display() {
        let f = fixture(three_displays(), FanOut::AllDisplays, false);
        let outcome = f.coordinator.on_chat_message(&message("  !call room 4  ")).await;

        let TriggerOutcome::Opened { primary, secondaries } = outcome else {
            panic!("expected overlay to open");
        };
        assert_eq!(primary, WindowId(1));
        assert_eq!(secondaries.len(), 2);

        let specs = f.windows.specs.lock().unwrap().clone();
        assert_eq!(specs[0].role, WindowRole::Primary);
        assert_eq!(specs[0].bounds, Rect::new(0, 0, 1920, 1040));
        assert_eq!(specs[1].bounds, display(2, 1920, false).bounds);
        assert_eq!(specs[2].bounds, display(3, -1920, false).bounds);
        assert!(specs.iter().all(|s| !s.visible));
    }

    #[tokio::test]
    async fn primary_only_fan_out() {
        let f = fixture(three_displays(), FanOut::PrimaryOnly, false);
        let outcome = f.coordinator.on_chat_message(&message("!call")).await;
        assert_eq!(
            outcome,
            TriggerOutcome::Opened {
                primary: WindowId(1),
                secondaries: vec![]
            }
        );
    }

    #[tokio::test]
    async fn failed_backdrop_is_skipped() {
        let f = fixture_with_windows(three_displays(), FanOut::AllDisplays, false, Some(2));
        let outcome = f.coordinator.on_chat_message(&message("!call")).await;
        assert_eq!(
            outcome,
            TriggerOutcome::Opened {
                primary: WindowId(1),
                secondaries: vec![WindowId(2)]
            }
        );
        assert!(f.coordinator.is_active().await);

        f.log.lock().unwrap().clear();
        f.coordinator
            .handle_window_event(WindowEvent::Loaded(WindowId(1)))
            .await;
        assert_eq!(entries(&f.log), vec!["post 1", "show 1", "show 2"]);
    }

    #[tokio::test]
    async fn primary_creation_failure_leaves_no_session() {
        let f = fixture_with_windows(three_displays(), FanOut::AllDisplays, false, Some(0));
        assert_eq!(
            f.coordinator.on_chat_message(&message("!call")).await,
            TriggerOutcome::Failed
        );
        assert!(!f.coordinator.is_active().await);
    }

    #[tokio::test]
    async fn second_trigger_is_ignored() {
        let f = fixture(three_displays(), FanOut::AllDisplays, false);
        f.coordinator.on_chat_message(&message("!call")).await;
        assert_eq!(
            f.coordinator.on_chat_message(&message("!call again")).await,
            TriggerOutcome::AlreadyOpen
        );
        assert_eq!(f.windows.specs.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn foreign_overlay_window_blocks_trigger() {
        let f = fixture(three_displays(), FanOut::AllDisplays, false);
        f.windows
            .titles
            .lock()
            .unwrap()
            .push(CALL_OVERLAY_TITLE.to_string());
        assert_eq!(
            f.coordinator.on_chat_message(&message("!call")).await,
            TriggerOutcome::AlreadyOpen
        );
        assert!(entries(&f.log).is_empty());
    }

    #[tokio::test]
    async fn dnd_suppresses_overlay() {
        let f = fixture(three_displays(), FanOut::AllDisplays, true);
        assert_eq!(
            f.coordinator.on_chat_message(&message("!call")).await,
            TriggerOutcome::Suppressed
        );
        assert!(entries(&f.log).is_empty());
    }

    #[tokio::test]
    async fn no_displays() {
        let f = fixture(Vec::new(), FanOut::AllDisplays, false);
        assert_eq!(
            f.coordinator.on_chat_message(&message("!call")).await,
            TriggerOutcome::NoDisplays
        );
    }

    #[tokio::test]
    async fn load_posts_payload_then_shows_all() {
        let f = fixture(three_displays(), FanOut::AllDisplays, false);
        f.coordinator.on_chat_message(&message("!call room 4")).await;
        f.log.lock().unwrap().clear();

        f.coordinator
            .handle_window_event(WindowEvent::Loaded(WindowId(1)))
            .await;
        assert_eq!(entries(&f.log), vec!["post 1", "show 1", "show 2", "show 3"]);

        let posted = f.windows.posted.lock().unwrap().clone();
        assert_eq!(posted[0].channel, CALL_PAYLOAD_CHANNEL);
        assert_eq!(posted[0].payload["content"], "room 4");
        assert_eq!(posted[0].payload["name"], "Bob");
    }

    #[tokio::test]
    async fn secondary_load_does_not_show_anything() {
        let f = fixture(three_displays(), FanOut::AllDisplays, false);
        f.coordinator.on_chat_message(&message("!call")).await;
        f.log.lock().unwrap().clear();

        f.coordinator
            .handle_window_event(WindowEvent::Loaded(WindowId(2)))
            .await;
        assert!(entries(&f.log).is_empty());
    }

    #[tokio::test]
    async fn closing_primary_closes_backdrops_and_navigates_once() {
        let f = fixture(three_displays(), FanOut::AllDisplays, false);
        f.coordinator.on_chat_message(&message("!call")).await;
        f.coordinator
            .handle_window_event(WindowEvent::Loaded(WindowId(1)))
            .await;
        f.log.lock().unwrap().clear();

        f.coordinator
            .handle_window_event(WindowEvent::Closed(WindowId(1)))
            .await;
        f.coordinator
            .handle_window_event(WindowEvent::Closed(WindowId(1)))
            .await;
        f.coordinator
            .handle_window_event(WindowEvent::Closed(WindowId(2)))
            .await;

        assert_eq!(entries(&f.log), vec!["close 2", "close 3", "navigate 4 t2/c9"]);
        assert!(!f.coordinator.is_active().await);
    }

    #[tokio::test]
    async fn dismiss_before_load_still_navigates() {
        let f = fixture(three_displays(), FanOut::AllDisplays, false);
        f.coordinator.on_chat_message(&message("!call")).await;
        f.log.lock().unwrap().clear();

        f.coordinator
            .handle_window_event(WindowEvent::Closed(WindowId(1)))
            .await;
        f.coordinator
            .handle_window_event(WindowEvent::Loaded(WindowId(1)))
            .await;

        assert_eq!(entries(&f.log), vec!["close 2", "close 3", "navigate 4 t2/c9"]);
    }

    #[tokio::test]
    async fn backdrop_closed_early_is_not_closed_again() {
        let f = fixture(three_displays(), FanOut::AllDisplays, false);
        f.coordinator.on_chat_message(&message("!call")).await;
        f.coordinator
            .handle_window_event(WindowEvent::Closed(WindowId(3)))
            .await;
        f.log.lock().unwrap().clear();

        f.coordinator
            .handle_window_event(WindowEvent::Closed(WindowId(1)))
            .await;
        assert_eq!(entries(&f.log), vec!["close 2", "navigate 4 t2/c9"]);
    }
}
