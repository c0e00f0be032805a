//! Notification infrastructure module

mod notify_rust;

pub use self::notify_rust::NotifyRustNotifier;
