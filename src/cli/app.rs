//! Host runner for the `run` mode
//!
//! Wires adapters for the current platform, then serves inbound host
//! events and notifier lifecycle events from a single loop.

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::ports::{ConfigStore, NotifierEvent};
use crate::application::{
    CallOverlayCoordinator, CallOverlayPorts, CallOverlaySettings, NotificationOrchestrator,
    OrchestratorPorts, WindowEvent,
};
use crate::domain::config::AppConfig;
use crate::domain::notification::LifecyclePolicy;
use crate::domain::platform::{HostPlatform, PlatformProfile};
use crate::infrastructure::attention::create_attention_signal;
use crate::infrastructure::dnd::create_do_not_disturb;
use crate::infrastructure::host::{
    write_commands, DisplayDirectory, HostCommand, JsonLinesHost, OriginAllowList, ViewDirectory,
};
use crate::infrastructure::{ConfigPreferences, NotifyRustNotifier, XdgConfigStore};

use super::protocol::InboundEvent;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Load and merge configuration: defaults < file < CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let file_config = XdgConfigStore::new().load_layer().await;
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Everything the loop drives
struct Runtime {
    host: Arc<JsonLinesHost>,
    views: Arc<ViewDirectory>,
    displays: Arc<DisplayDirectory>,
    orchestrator: NotificationOrchestrator,
    coordinator: CallOverlayCoordinator,
}

enum Flow {
    Continue,
    Stop,
}

impl Runtime {
    fn new(
        config: &AppConfig,
        profile: &PlatformProfile,
    ) -> (
        Self,
        mpsc::UnboundedReceiver<HostCommand>,
        mpsc::UnboundedReceiver<NotifierEvent>,
    ) {
        let (host, commands) = JsonLinesHost::new();
        let host = Arc::new(host);
        let (notifier, notifier_events) = NotifyRustNotifier::new(config.app_name_or_default());

        let views = Arc::new(ViewDirectory::new());
        let displays = Arc::new(DisplayDirectory::new());
        let dnd = create_do_not_disturb(profile);
        let attention = create_attention_signal(
            profile,
            host.clone(),
            Arc::new(ConfigPreferences::new(config.clone())),
        );

        let orchestrator = NotificationOrchestrator::new(
            OrchestratorPorts {
                notifier: Arc::new(notifier),
                dnd: dnd.clone(),
                views: views.clone(),
                permissions: Arc::new(OriginAllowList::new(config.notification_origins())),
                attention,
                shell: host.clone(),
            },
            LifecyclePolicy {
                dedup_mentions: profile.dedup_mentions,
            },
        );

        let coordinator = CallOverlayCoordinator::new(
            CallOverlayPorts {
                windows: host.clone(),
                displays: displays.clone(),
                dnd,
                shell: host.clone(),
            },
            CallOverlaySettings {
                trigger: config.call_trigger_or_default(),
                placement: profile.placement,
                fan_out: profile.fan_out,
                respect_dnd: config.respect_dnd_or_default(),
            },
        );

        let runtime = Self {
            host,
            views,
            displays,
            orchestrator,
            coordinator,
        };
        (runtime, commands, notifier_events)
    }

    async fn dispatch(&self, event: InboundEvent) -> Flow {
        if let Some((source, view)) = event.view_info() {
            self.views.register(source, view);
            return Flow::Continue;
        }
        if let Some(request) = event.mention_request() {
            self.orchestrator.notify_mention(request).await;
            return Flow::Continue;
        }

        match event {
            InboundEvent::ViewRemoved { source } => {
                self.views.remove(source);
            }
            InboundEvent::DisplaysChanged { displays } => self.displays.set_displays(displays),
            InboundEvent::MainWindowMoved { bounds } => self.displays.set_main_window(bounds),
            InboundEvent::DownloadComplete {
                file_name,
                path,
                server_name,
            } => {
                self.orchestrator
                    .notify_download_complete(&file_name, path, &server_name)
                    .await;
            }
            InboundEvent::UpgradeAvailable { version } => {
                let host = self.host.clone();
                let requested = version.clone();
                self.orchestrator
                    .notify_upgrade_available(
                        &version,
                        Box::new(move || {
                            if let Err(e) = host.emit(HostCommand::UpgradeRequested {
                                version: requested,
                            }) {
                                warn!(error = %e, "Failed to request upgrade");
                            }
                        }),
                    )
                    .await;
            }
            InboundEvent::RestartRequired { version } => {
                let host = self.host.clone();
                let requested = version.clone();
                self.orchestrator
                    .notify_restart_required(
                        &version,
                        Box::new(move || {
                            if let Err(e) = host.emit(HostCommand::RestartRequested {
                                version: requested,
                            }) {
                                warn!(error = %e, "Failed to request restart");
                            }
                        }),
                    )
                    .await;
            }
            InboundEvent::ChatMessage(message) => {
                let outcome = self.coordinator.on_chat_message(&message).await;
                debug!(?outcome, "Chat message handled");
            }
            InboundEvent::WindowLoaded { window } => {
                self.coordinator
                    .handle_window_event(WindowEvent::Loaded(window))
                    .await;
            }
            InboundEvent::WindowClosed { window } => {
                self.host.window_closed(window);
                self.coordinator
                    .handle_window_event(WindowEvent::Closed(window))
                    .await;
            }
            InboundEvent::Shutdown => return Flow::Stop,
            InboundEvent::ViewRegistered { .. } | InboundEvent::Mention { .. } => {}
        }
        Flow::Continue
    }

    async fn serve(&self, mut notifier_events: mpsc::UnboundedReceiver<NotifierEvent>) {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match InboundEvent::parse(line) {
                            Ok(event) => {
                                if let Flow::Stop = self.dispatch(event).await {
                                    info!("Shutdown requested");
                                    break;
                                }
                            }
                            Err(e) => warn!(error = %e, "Ignoring malformed host event"),
                        }
                    }
                    Ok(None) => {
                        info!("Host input closed");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read host input");
                        break;
                    }
                },
                Some(NotifierEvent { id, event }) = notifier_events.recv() => {
                    self.orchestrator.handle_event(id, event).await;
                }
                _ = &mut ctrl_c => {
                    info!("Interrupted");
                    break;
                }
            }
        }
    }
}

/// Run the host loop until input ends, `shutdown` arrives or Ctrl-C
pub async fn run_host(config: AppConfig) -> ExitCode {
    let profile = PlatformProfile::resolve(HostPlatform::current(), &config);
    info!(
        platform = %profile.platform,
        dedup_mentions = profile.dedup_mentions,
        fan_out = %profile.fan_out,
        "Starting chat-notify"
    );

    let (runtime, commands, notifier_events) = Runtime::new(&config, &profile);
    let writer = tokio::spawn(write_commands(commands, tokio::io::stdout()));

    runtime.serve(notifier_events).await;
    // Dropping every host handle closes the command queue.
    drop(runtime);

    match writer.await {
        Ok(Ok(())) => ExitCode::from(EXIT_SUCCESS),
        Ok(Err(e)) => {
            warn!(error = %e, "Failed to write host commands");
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            warn!(error = %e, "Host writer task failed");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
