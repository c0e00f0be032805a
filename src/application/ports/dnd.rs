//! Do-Not-Disturb port interface

use async_trait::async_trait;

/// Port answering whether the OS currently suppresses notifications
#[async_trait]
pub trait DoNotDisturb: Send + Sync {
    /// Query the current state. Never cached, never fails: a probe that
    /// cannot answer reports `false`.
    async fn is_suppressed(&self) -> bool;
}
