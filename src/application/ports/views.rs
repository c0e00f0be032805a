//! View lookup and permission ports

use std::fmt;

use async_trait::async_trait;

use crate::domain::view::{SourceId, ViewInfo};

/// Port resolving a content source to the server view that hosts it
pub trait ViewResolver: Send + Sync {
    /// `None` when the view no longer exists
    fn resolve(&self, source: SourceId) -> Option<ViewInfo>;
}

/// Capabilities a server origin may be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Notifications,
}

impl Capability {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Port deciding whether an origin holds a capability
#[async_trait]
pub trait PermissionGate: Send + Sync {
    async fn is_granted(&self, source: SourceId, capability: Capability, origin: &str) -> bool;
}
