//! No-op Do-Not-Disturb strategy

use async_trait::async_trait;

use crate::application::ports::DoNotDisturb;

/// Used on platforms without a known Do-Not-Disturb API
pub struct NoOpDnd;

impl NoOpDnd {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpDnd {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DoNotDisturb for NoOpDnd {
    async fn is_suppressed(&self) -> bool {
        false
    }
}
