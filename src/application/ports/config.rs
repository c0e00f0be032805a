//! Configuration storage port

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted configuration file
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored layer. A missing file loads as an empty config.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist `config`, replacing the stored layer
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the defaults. Fails if the file already exists.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Load the stored layer for merging; an unreadable file counts as empty
    async fn load_layer(&self) -> AppConfig {
        match self.load().await {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, path = %self.path().display(), "Ignoring unreadable config file");
                AppConfig::empty()
            }
        }
    }
}
