//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with OS notification services, platform settings
//! and the host process.

pub mod attention;
pub mod config;
pub mod dnd;
pub mod host;
pub mod notification;

// Re-export adapters
pub use attention::create_attention_signal;
pub use config::{ConfigPreferences, XdgConfigStore};
pub use dnd::create_do_not_disturb;
pub use host::{DisplayDirectory, JsonLinesHost, OriginAllowList, ViewDirectory};
pub use notification::NotifyRustNotifier;
