//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::call::FanOut;
use crate::domain::config::{
    AppConfig, CallConfig, DedupSetting, NotificationsConfig, PermissionsConfig,
    PlacementPreference,
};

/// chat-notify - desktop notification and call overlay orchestration
#[derive(Parser, Debug)]
#[command(name = "chat-notify")]
#[command(version)]
#[command(
    about = "Desktop notification and call overlay orchestration for a multi-server chat client"
)]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve host events from stdin, write host commands to stdout
    Run(RunArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Overrides for the `run` mode
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Chat command token that opens the call overlay
    #[arg(long, value_name = "TOKEN")]
    pub trigger: Option<String>,

    /// Which displays get an overlay window
    #[arg(long, value_name = "POLICY")]
    pub fan_out: Option<FanOutArg>,

    /// Display that hosts the interactive overlay
    #[arg(long, value_name = "PLACEMENT")]
    pub placement: Option<PlacementArg>,

    /// Collapse repeated mentions per conversation
    #[arg(long, value_name = "MODE")]
    pub dedup_mentions: Option<DedupArg>,

    /// Open the call overlay even while Do-Not-Disturb is active
    #[arg(long)]
    pub ignore_dnd: bool,

    /// Origin allowed to show notifications (repeatable, `*` for any)
    #[arg(long = "allow-origin", value_name = "ORIGIN")]
    pub allow_origins: Vec<String>,

    /// Log filter, e.g. `debug` or `chat_notify=trace`
    #[arg(long, value_name = "FILTER", env = "CHAT_NOTIFY_LOG")]
    pub log_level: Option<String>,
}

impl RunArgs {
    /// Config layer built from the flags that were given
    pub fn to_config(&self) -> AppConfig {
        let call = CallConfig {
            trigger: self.trigger.clone(),
            fan_out: self.fan_out.map(|f| FanOut::from(f).to_string()),
            placement: self.placement.map(|p| PlacementPreference::from(p).to_string()),
            respect_dnd: self.ignore_dnd.then_some(false),
        };
        let notifications = NotificationsConfig {
            dedup_mentions: self.dedup_mentions.map(|d| DedupSetting::from(d).to_string()),
            ..Default::default()
        };

        AppConfig {
            log_level: self.log_level.clone(),
            notifications: (notifications != NotificationsConfig::default())
                .then_some(notifications),
            call: (call != CallConfig::default()).then_some(call),
            permissions: (!self.allow_origins.is_empty()).then(|| PermissionsConfig {
                notifications: Some(self.allow_origins.clone()),
            }),
            ..Default::default()
        }
    }
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FanOutArg {
    AllDisplays,
    PrimaryOnly,
}

impl From<FanOutArg> for FanOut {
    fn from(arg: FanOutArg) -> Self {
        match arg {
            FanOutArg::AllDisplays => FanOut::AllDisplays,
            FanOutArg::PrimaryOnly => FanOut::PrimaryOnly,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlacementArg {
    Auto,
    PrimaryDisplay,
    NearestMainWindow,
}

impl From<PlacementArg> for PlacementPreference {
    fn from(arg: PlacementArg) -> Self {
        match arg {
            PlacementArg::Auto => PlacementPreference::Auto,
            PlacementArg::PrimaryDisplay => PlacementPreference::PrimaryDisplay,
            PlacementArg::NearestMainWindow => PlacementPreference::NearestMainWindow,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DedupArg {
    Auto,
    True,
    False,
}

impl From<DedupArg> for DedupSetting {
    fn from(arg: DedupArg) -> Self {
        match arg {
            DedupArg::Auto => DedupSetting::Auto,
            DedupArg::True => DedupSetting::On,
            DedupArg::False => DedupSetting::Off,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "app_name",
    "log_level",
    "notifications.flash_window",
    "notifications.bounce_icon",
    "notifications.bounce_style",
    "notifications.dedup_mentions",
    "call.trigger",
    "call.fan_out",
    "call.placement",
    "call.respect_dnd",
    "permissions.notifications",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
