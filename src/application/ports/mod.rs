//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod attention;
pub mod config;
pub mod dnd;
pub mod notifier;
pub mod shell;
pub mod views;
pub mod windows;

// Re-export common types
pub use attention::{AttentionSignal, Preferences};
pub use config::ConfigStore;
pub use dnd::DoNotDisturb;
pub use notifier::{NotificationError, Notifier, NotifierEvent};
pub use shell::{AppShell, ShellError};
pub use views::{Capability, PermissionGate, ViewResolver};
pub use windows::{DisplayProvider, WindowError, WindowHost};
