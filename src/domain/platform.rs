//! Host platform detection and the per-platform strategy profile
//!
//! Platform differences (which Do-Not-Disturb query to run, how to draw
//! attention, whether mention notifications collapse per conversation,
//! where the call overlay lands) are resolved once here. Everything
//! downstream receives the chosen strategies and never inspects the OS.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::call::{FanOut, Placement};
use super::config::{AppConfig, DedupSetting, PlacementPreference};
use super::error::ParseSettingError;

/// Operating system family the process runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostPlatform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl HostPlatform {
    /// Detect the platform of the running process
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform family
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Other,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dock bounce style used by the macOS attention signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BounceStyle {
    /// Bounce once
    #[default]
    Informational,
    /// Bounce until the application is activated
    Critical,
}

impl BounceStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for BounceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BounceStyle {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "informational" => Ok(Self::Informational),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseSettingError::new(
                "bounce style",
                s,
                "informational, critical",
            )),
        }
    }
}

/// Which Do-Not-Disturb query to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DndStrategy {
    /// Read the OS focus-assist / banner setting directly
    NativeSetting,
    /// Read the notification-center suppression flag
    NotificationCenter,
    /// No known API, never suppressed
    None,
}

/// How to draw attention to the main window when a notification shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttentionStrategy {
    FrameFlash,
    DockBounce,
    None,
}

/// Strategies selected for the running platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    pub platform: HostPlatform,
    pub dnd: DndStrategy,
    pub attention: AttentionStrategy,
    pub dedup_mentions: bool,
    pub placement: Placement,
    pub fan_out: FanOut,
}

impl PlatformProfile {
    /// Resolve the profile for `platform`, applying configured overrides
    pub fn resolve(platform: HostPlatform, config: &AppConfig) -> Self {
        let dnd = match platform {
            HostPlatform::Windows | HostPlatform::Linux => DndStrategy::NativeSetting,
            HostPlatform::MacOs => DndStrategy::NotificationCenter,
            HostPlatform::Other => DndStrategy::None,
        };

        let attention = match platform {
            HostPlatform::Windows | HostPlatform::Linux => AttentionStrategy::FrameFlash,
            HostPlatform::MacOs => AttentionStrategy::DockBounce,
            HostPlatform::Other => AttentionStrategy::None,
        };

        // Windows keeps every toast in the action center, so repeated
        // mentions for one conversation pile up unless closed manually.
        let dedup_mentions = match config.dedup_mentions_or_default() {
            DedupSetting::Auto => platform == HostPlatform::Windows,
            DedupSetting::On => true,
            DedupSetting::Off => false,
        };

        // On macOS new windows open on the space that owns app focus.
        let placement = match config.placement_or_default() {
            PlacementPreference::Auto if platform == HostPlatform::MacOs => {
                Placement::NearestMainWindow
            }
            PlacementPreference::Auto | PlacementPreference::PrimaryDisplay => {
                Placement::PrimaryDisplay
            }
            PlacementPreference::NearestMainWindow => Placement::NearestMainWindow,
        };

        Self {
            platform,
            dnd,
            attention,
            dedup_mentions,
            placement,
            fan_out: config.fan_out_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{CallConfig, NotificationsConfig};

    #[test]
    fn from_os_maps_known_families() {
        assert_eq!(HostPlatform::from_os("windows"), HostPlatform::Windows);
        assert_eq!(HostPlatform::from_os("macos"), HostPlatform::MacOs);
        assert_eq!(HostPlatform::from_os("linux"), HostPlatform::Linux);
        assert_eq!(HostPlatform::from_os("freebsd"), HostPlatform::Other);
    }

    #[test]
    fn each_platform_gets_exactly_one_dnd_strategy() {
        let config = AppConfig::empty();
        let cases = [
            (HostPlatform::Windows, DndStrategy::NativeSetting),
            (HostPlatform::Linux, DndStrategy::NativeSetting),
            (HostPlatform::MacOs, DndStrategy::NotificationCenter),
            (HostPlatform::Other, DndStrategy::None),
        ];
        for (platform, expected) in cases {
            assert_eq!(PlatformProfile::resolve(platform, &config).dnd, expected);
        }
    }

    #[test]
    fn attention_strategy_by_platform() {
        let config = AppConfig::empty();
        assert_eq!(
            PlatformProfile::resolve(HostPlatform::Windows, &config).attention,
            AttentionStrategy::FrameFlash
        );
        assert_eq!(
            PlatformProfile::resolve(HostPlatform::MacOs, &config).attention,
            AttentionStrategy::DockBounce
        );
        assert_eq!(
            PlatformProfile::resolve(HostPlatform::Other, &config).attention,
            AttentionStrategy::None
        );
    }

    #[test]
    fn dedup_defaults_to_windows_only() {
        let config = AppConfig::empty();
        assert!(PlatformProfile::resolve(HostPlatform::Windows, &config).dedup_mentions);
        assert!(!PlatformProfile::resolve(HostPlatform::Linux, &config).dedup_mentions);
        assert!(!PlatformProfile::resolve(HostPlatform::MacOs, &config).dedup_mentions);
    }

    #[test]
    fn dedup_override_applies_everywhere() {
        let config = AppConfig {
            notifications: Some(NotificationsConfig {
                dedup_mentions: Some("true".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(PlatformProfile::resolve(HostPlatform::Linux, &config).dedup_mentions);
    }

    #[test]
    fn auto_placement_follows_app_focus_on_macos() {
        let config = AppConfig::empty();
        assert_eq!(
            PlatformProfile::resolve(HostPlatform::MacOs, &config).placement,
            Placement::NearestMainWindow
        );
        assert_eq!(
            PlatformProfile::resolve(HostPlatform::Windows, &config).placement,
            Placement::PrimaryDisplay
        );
    }

    #[test]
    fn fan_out_comes_from_config() {
        let config = AppConfig {
            call: Some(CallConfig {
                fan_out: Some("primary-only".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            PlatformProfile::resolve(HostPlatform::Windows, &config).fan_out,
            FanOut::PrimaryOnly
        );
    }

    #[test]
    fn bounce_style_parses_case_insensitively() {
        assert_eq!("Critical".parse::<BounceStyle>().unwrap(), BounceStyle::Critical);
        assert!("loud".parse::<BounceStyle>().is_err());
    }
}
