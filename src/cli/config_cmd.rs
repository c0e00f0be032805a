//! Config command handler

use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::domain::call::FanOut;
use crate::domain::config::{
    AppConfig, CallConfig, DedupSetting, NotificationsConfig, PermissionsConfig,
    PlacementPreference,
};
use crate::domain::error::ConfigError;
use crate::domain::platform::BounceStyle;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    set_value(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(get_value(&config, key).as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, get_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "notifications.flash_window" | "notifications.bounce_icon" | "call.respect_dnd" => {
            parse_bool(key, value).map(|_| ())
        }
        "notifications.bounce_style" => value
            .parse::<BounceStyle>()
            .map(|_| ())
            .map_err(|e| invalid(key, e.to_string())),
        "notifications.dedup_mentions" => value
            .parse::<DedupSetting>()
            .map(|_| ())
            .map_err(|e| invalid(key, e.to_string())),
        "call.fan_out" => value
            .parse::<FanOut>()
            .map(|_| ())
            .map_err(|e| invalid(key, e.to_string())),
        "call.placement" => value
            .parse::<PlacementPreference>()
            .map(|_| ())
            .map_err(|e| invalid(key, e.to_string())),
        "call.trigger" => {
            let token = value.trim();
            if token.is_empty() || token.contains(char::is_whitespace) {
                Err(invalid(key, "Trigger must be a single non-empty word"))
            } else {
                Ok(())
            }
        }
        "log_level" => EnvFilter::try_new(value)
            .map(|_| ())
            .map_err(|e| invalid(key, e.to_string())),
        "permissions.notifications" => {
            if parse_list(value).is_empty() {
                Err(invalid(key, "Expected a comma-separated list of origins"))
            } else {
                Ok(())
            }
        }
        _ => Ok(()), // app_name accepts any string
    }
}

fn set_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let text = Some(value.trim().to_string());
    match key {
        "app_name" => config.app_name = text,
        "log_level" => config.log_level = text,
        "notifications.flash_window" => {
            notifications(config).flash_window = Some(parse_bool(key, value)?)
        }
        "notifications.bounce_icon" => {
            notifications(config).bounce_icon = Some(parse_bool(key, value)?)
        }
        "notifications.bounce_style" => notifications(config).bounce_style = text,
        "notifications.dedup_mentions" => notifications(config).dedup_mentions = text,
        "call.trigger" => call(config).trigger = text,
        "call.fan_out" => call(config).fan_out = text,
        "call.placement" => call(config).placement = text,
        "call.respect_dnd" => call(config).respect_dnd = Some(parse_bool(key, value)?),
        "permissions.notifications" => {
            config
                .permissions
                .get_or_insert_with(PermissionsConfig::default)
                .notifications = Some(parse_list(value))
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

fn get_value(config: &AppConfig, key: &str) -> Option<String> {
    let notifications = config.notifications.as_ref();
    let call = config.call.as_ref();
    match key {
        "app_name" => config.app_name.clone(),
        "log_level" => config.log_level.clone(),
        "notifications.flash_window" => config.flash_window().map(|b| b.to_string()),
        "notifications.bounce_icon" => config.bounce_icon().map(|b| b.to_string()),
        "notifications.bounce_style" => notifications.and_then(|n| n.bounce_style.clone()),
        "notifications.dedup_mentions" => notifications.and_then(|n| n.dedup_mentions.clone()),
        "call.trigger" => call.and_then(|c| c.trigger.clone()),
        "call.fan_out" => call.and_then(|c| c.fan_out.clone()),
        "call.placement" => call.and_then(|c| c.placement.clone()),
        "call.respect_dnd" => call.and_then(|c| c.respect_dnd).map(|b| b.to_string()),
        "permissions.notifications" => config
            .permissions
            .as_ref()
            .and_then(|p| p.notifications.as_ref())
            .map(|origins| origins.join(",")),
        _ => None,
    }
}

fn notifications(config: &mut AppConfig) -> &mut NotificationsConfig {
    config
        .notifications
        .get_or_insert_with(NotificationsConfig::default)
}

fn call(config: &mut AppConfig) -> &mut CallConfig {
    config.call.get_or_insert_with(CallConfig::default)
}

/// Parse a boolean value
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, "Value must be 'true' or 'false'")),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_values() {
        assert!(parse_bool("k", "true").unwrap());
        assert!(!parse_bool("k", "no").unwrap());
        assert!(parse_bool("k", "1").unwrap());
        assert!(parse_bool("k", "maybe").is_err());
    }

    #[test]
    fn validate_enumerated_values() {
        assert!(validate_config_value("call.fan_out", "primary-only").is_ok());
        assert!(validate_config_value("call.fan_out", "sideways").is_err());
        assert!(validate_config_value("call.placement", "nearest-main-window").is_ok());
        assert!(validate_config_value("notifications.bounce_style", "critical").is_ok());
        assert!(validate_config_value("notifications.bounce_style", "loud").is_err());
        assert!(validate_config_value("notifications.dedup_mentions", "auto").is_ok());
    }

    #[test]
    fn validate_trigger() {
        assert!(validate_config_value("call.trigger", "!page").is_ok());
        assert!(validate_config_value("call.trigger", "  ").is_err());
        assert!(validate_config_value("call.trigger", "! call").is_err());
    }

    #[test]
    fn validate_log_filter() {
        assert!(validate_config_value("log_level", "debug").is_ok());
        assert!(validate_config_value("log_level", "chat_notify=trace").is_ok());
    }

    #[test]
    fn set_then_get_nested_keys() {
        let mut config = AppConfig::empty();
        set_value(&mut config, "call.respect_dnd", "false").unwrap();
        set_value(&mut config, "notifications.bounce_style", "critical").unwrap();
        set_value(
            &mut config,
            "permissions.notifications",
            "https://a.test, https://b.test,",
        )
        .unwrap();

        assert_eq!(get_value(&config, "call.respect_dnd").as_deref(), Some("false"));
        assert_eq!(
            get_value(&config, "notifications.bounce_style").as_deref(),
            Some("critical")
        );
        assert_eq!(
            get_value(&config, "permissions.notifications").as_deref(),
            Some("https://a.test,https://b.test")
        );
        assert_eq!(get_value(&config, "call.trigger"), None);
    }

    #[test]
    fn every_key_is_settable() {
        let samples = [
            ("app_name", "Chat"),
            ("log_level", "info"),
            ("notifications.flash_window", "true"),
            ("notifications.bounce_icon", "false"),
            ("notifications.bounce_style", "informational"),
            ("notifications.dedup_mentions", "auto"),
            ("call.trigger", "!call"),
            ("call.fan_out", "all-displays"),
            ("call.placement", "auto"),
            ("call.respect_dnd", "true"),
            ("permissions.notifications", "*"),
        ];
        assert_eq!(samples.len(), VALID_CONFIG_KEYS.len());

        let mut config = AppConfig::empty();
        for (key, value) in samples {
            validate_config_value(key, value).unwrap();
            set_value(&mut config, key, value).unwrap();
            assert!(get_value(&config, key).is_some(), "{} not stored", key);
        }
    }
}
