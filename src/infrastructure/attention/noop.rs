//! No-op attention strategy

use async_trait::async_trait;

use crate::application::ports::AttentionSignal;

/// For platforms without a taskbar or dock
pub struct NoOpAttention;

impl NoOpAttention {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpAttention {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttentionSignal for NoOpAttention {
    async fn trigger(&self) {}
}
