//! Application configuration value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::call::{CallTrigger, FanOut, DEFAULT_CALL_TRIGGER};
use crate::domain::error::ParseSettingError;
use crate::domain::platform::BounceStyle;

/// Whether mention notifications collapse per conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupSetting {
    /// Platform decides
    #[default]
    Auto,
    On,
    Off,
}

impl FromStr for DedupSetting {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "true" | "on" | "yes" => Ok(Self::On),
            "false" | "off" | "no" => Ok(Self::Off),
            _ => Err(ParseSettingError::new(
                "dedup setting",
                s,
                "auto, true, false",
            )),
        }
    }
}

impl fmt::Display for DedupSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::On => write!(f, "true"),
            Self::Off => write!(f, "false"),
        }
    }
}

/// Configured choice of display for the primary overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementPreference {
    #[default]
    Auto,
    PrimaryDisplay,
    NearestMainWindow,
}

impl FromStr for PlacementPreference {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "primary-display" => Ok(Self::PrimaryDisplay),
            "nearest-main-window" => Ok(Self::NearestMainWindow),
            _ => Err(ParseSettingError::new(
                "placement",
                s,
                "auto, primary-display, nearest-main-window",
            )),
        }
    }
}

impl fmt::Display for PlacementPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::PrimaryDisplay => write!(f, "primary-display"),
            Self::NearestMainWindow => write!(f, "nearest-main-window"),
        }
    }
}

/// Notification preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    pub flash_window: Option<bool>,
    pub bounce_icon: Option<bool>,
    pub bounce_style: Option<String>,
    pub dedup_mentions: Option<String>,
}

/// Call overlay settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallConfig {
    pub trigger: Option<String>,
    pub fan_out: Option<String>,
    pub placement: Option<String>,
    pub respect_dnd: Option<bool>,
}

/// Capability grants per origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// Origins allowed to raise notifications; `*` allows every origin
    pub notifications: Option<Vec<String>>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub app_name: Option<String>,
    pub log_level: Option<String>,
    pub notifications: Option<NotificationsConfig>,
    pub call: Option<CallConfig>,
    pub permissions: Option<PermissionsConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            app_name: Some("ChatNotify".to_string()),
            log_level: Some("info".to_string()),
            notifications: Some(NotificationsConfig {
                flash_window: Some(true),
                bounce_icon: Some(true),
                bounce_style: Some(BounceStyle::Informational.to_string()),
                dedup_mentions: Some(DedupSetting::Auto.to_string()),
            }),
            call: Some(CallConfig {
                trigger: Some(DEFAULT_CALL_TRIGGER.to_string()),
                fan_out: Some(FanOut::AllDisplays.to_string()),
                placement: Some(PlacementPreference::Auto.to_string()),
                respect_dnd: Some(true),
            }),
            permissions: Some(PermissionsConfig {
                notifications: Some(Vec::new()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            app_name: other.app_name.or(self.app_name),
            log_level: other.log_level.or(self.log_level),
            notifications: merge_section(self.notifications, other.notifications, |b, o| {
                NotificationsConfig {
                    flash_window: o.flash_window.or(b.flash_window),
                    bounce_icon: o.bounce_icon.or(b.bounce_icon),
                    bounce_style: o.bounce_style.or(b.bounce_style),
                    dedup_mentions: o.dedup_mentions.or(b.dedup_mentions),
                }
            }),
            call: merge_section(self.call, other.call, |b, o| CallConfig {
                trigger: o.trigger.or(b.trigger),
                fan_out: o.fan_out.or(b.fan_out),
                placement: o.placement.or(b.placement),
                respect_dnd: o.respect_dnd.or(b.respect_dnd),
            }),
            permissions: merge_section(self.permissions, other.permissions, |b, o| {
                PermissionsConfig {
                    notifications: o.notifications.or(b.notifications),
                }
            }),
        }
    }

    /// Get app name, or "ChatNotify" if not set
    pub fn app_name_or_default(&self) -> &str {
        self.app_name.as_deref().unwrap_or("ChatNotify")
    }

    /// Get log level filter, or "info" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Frame flash preference; unset means disabled
    pub fn flash_window(&self) -> Option<bool> {
        self.notifications.as_ref().and_then(|n| n.flash_window)
    }

    /// Dock bounce preference; unset means disabled
    pub fn bounce_icon(&self) -> Option<bool> {
        self.notifications.as_ref().and_then(|n| n.bounce_icon)
    }

    /// Dock bounce style, `None` when unset or invalid
    pub fn bounce_style(&self) -> Option<BounceStyle> {
        self.notifications
            .as_ref()
            .and_then(|n| n.bounce_style.as_deref())
            .and_then(|s| s.parse().ok())
    }

    pub fn dedup_mentions_or_default(&self) -> DedupSetting {
        self.notifications
            .as_ref()
            .and_then(|n| n.dedup_mentions.as_deref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn call_trigger_or_default(&self) -> CallTrigger {
        self.call
            .as_ref()
            .and_then(|c| c.trigger.as_deref())
            .filter(|t| !t.trim().is_empty())
            .map(CallTrigger::new)
            .unwrap_or_default()
    }

    pub fn fan_out_or_default(&self) -> FanOut {
        self.call
            .as_ref()
            .and_then(|c| c.fan_out.as_deref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn placement_or_default(&self) -> PlacementPreference {
        self.call
            .as_ref()
            .and_then(|c| c.placement.as_deref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get call DND setting, or true if not set
    pub fn respect_dnd_or_default(&self) -> bool {
        self.call.as_ref().and_then(|c| c.respect_dnd).unwrap_or(true)
    }

    /// Origins granted the notification capability
    pub fn notification_origins(&self) -> &[String] {
        self.permissions
            .as_ref()
            .and_then(|p| p.notifications.as_deref())
            .unwrap_or(&[])
    }
}

fn merge_section<T>(base: Option<T>, other: Option<T>, merge: impl FnOnce(T, T) -> T) -> Option<T> {
    match (base, other) {
        (None, None) => None,
        (Some(b), None) => Some(b),
        (None, Some(o)) => Some(o),
        (Some(b), Some(o)) => Some(merge(b, o)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.app_name_or_default(), "ChatNotify");
        assert_eq!(config.log_level_or_default(), "info");
        assert_eq!(config.flash_window(), Some(true));
        assert_eq!(config.bounce_icon(), Some(true));
        assert_eq!(config.bounce_style(), Some(BounceStyle::Informational));
        assert_eq!(config.dedup_mentions_or_default(), DedupSetting::Auto);
        assert_eq!(config.call_trigger_or_default().token(), "!call");
        assert_eq!(config.fan_out_or_default(), FanOut::AllDisplays);
        assert_eq!(config.placement_or_default(), PlacementPreference::Auto);
        assert!(config.respect_dnd_or_default());
        assert!(config.notification_origins().is_empty());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.app_name.is_none());
        assert!(config.notifications.is_none());
        assert!(config.call.is_none());
        assert!(config.permissions.is_none());
    }

    #[test]
    fn preferences_default_to_disabled_when_unset() {
        let config = AppConfig::empty();
        assert_eq!(config.flash_window(), None);
        assert_eq!(config.bounce_icon(), None);
        assert_eq!(config.bounce_style(), None);
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            app_name: Some("Base".to_string()),
            call: Some(CallConfig {
                trigger: Some("!page".to_string()),
                fan_out: Some("all-displays".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let other = AppConfig {
            call: Some(CallConfig {
                fan_out: Some("primary-only".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.app_name_or_default(), "Base");
        assert_eq!(merged.call_trigger_or_default().token(), "!page");
        assert_eq!(merged.fan_out_or_default(), FanOut::PrimaryOnly);
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let merged = AppConfig::defaults().merge(AppConfig::empty());
        assert_eq!(merged, AppConfig::defaults());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig {
            notifications: Some(NotificationsConfig {
                bounce_style: Some("loud".to_string()),
                dedup_mentions: Some("sometimes".to_string()),
                ..Default::default()
            }),
            call: Some(CallConfig {
                trigger: Some("   ".to_string()),
                fan_out: Some("everywhere".to_string()),
                placement: Some("left".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.bounce_style(), None);
        assert_eq!(config.dedup_mentions_or_default(), DedupSetting::Auto);
        assert_eq!(config.call_trigger_or_default().token(), "!call");
        assert_eq!(config.fan_out_or_default(), FanOut::AllDisplays);
        assert_eq!(config.placement_or_default(), PlacementPreference::Auto);
    }

    #[test]
    fn dedup_setting_parses() {
        assert_eq!("auto".parse::<DedupSetting>().unwrap(), DedupSetting::Auto);
        assert_eq!("TRUE".parse::<DedupSetting>().unwrap(), DedupSetting::On);
        assert_eq!("off".parse::<DedupSetting>().unwrap(), DedupSetting::Off);
        assert!("maybe".parse::<DedupSetting>().is_err());
    }

    #[test]
    fn placement_preference_round_trips_display() {
        for p in [
            PlacementPreference::Auto,
            PlacementPreference::PrimaryDisplay,
            PlacementPreference::NearestMainWindow,
        ] {
            assert_eq!(p.to_string().parse::<PlacementPreference>().unwrap(), p);
        }
    }
}
