//! Domain layer - Core business logic
//!
//! Contains value objects, state machines, and domain errors.
//! This layer has no dependencies on external systems.

pub mod call;
pub mod config;
pub mod error;
pub mod notification;
pub mod platform;
pub mod view;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use notification::{NotificationId, NotificationRecord, NotificationState};
pub use platform::{HostPlatform, PlatformProfile};
pub use view::{Conversation, NavigationMessage, SourceId, ViewId, ViewInfo};
