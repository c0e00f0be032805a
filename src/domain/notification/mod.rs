//! Notification domain: record identity, variants and the lifecycle machine

mod key;
mod record;

pub use key::{ConversationKey, DedupKey};
pub use record::{
    Effect, InvalidTransition, LifecycleEvent, LifecyclePolicy, MentionTarget,
    NotificationContent, NotificationId, NotificationKind, NotificationRecord, NotificationState,
    NotificationVariant, Transition,
};
