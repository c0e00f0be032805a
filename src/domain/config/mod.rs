//! Configuration value objects

mod app_config;

pub use app_config::{
    AppConfig, CallConfig, DedupSetting, NotificationsConfig, PermissionsConfig,
    PlacementPreference,
};
