//! Preference store backed by the loaded configuration

use crate::application::ports::Preferences;
use crate::domain::config::AppConfig;
use crate::domain::platform::BounceStyle;

/// Read-only view over [`AppConfig`] for the attention signal
pub struct ConfigPreferences {
    config: AppConfig,
}

impl ConfigPreferences {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

impl Preferences for ConfigPreferences {
    fn flash_window(&self) -> Option<bool> {
        self.config.flash_window()
    }

    fn bounce_icon(&self) -> Option<bool> {
        self.config.bounce_icon()
    }

    fn bounce_style(&self) -> Option<BounceStyle> {
        self.config.bounce_style()
    }
}
