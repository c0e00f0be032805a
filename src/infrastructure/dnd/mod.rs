//! Do-Not-Disturb strategies
//!
//! Exactly one strategy is selected at startup from the platform profile.
//! Every probe fails open.

mod focus_assist;
mod noop;
mod notification_center;
mod probe;

pub use focus_assist::FocusAssistDnd;
pub use noop::NoOpDnd;
pub use notification_center::NotificationCenterDnd;

use std::sync::Arc;

use crate::application::ports::DoNotDisturb;
use crate::domain::platform::{DndStrategy, PlatformProfile};

/// Create the Do-Not-Disturb provider for the resolved profile
pub fn create_do_not_disturb(profile: &PlatformProfile) -> Arc<dyn DoNotDisturb> {
    match profile.dnd {
        DndStrategy::NativeSetting => Arc::new(FocusAssistDnd::new(profile.platform)),
        DndStrategy::NotificationCenter => Arc::new(NotificationCenterDnd::new()),
        DndStrategy::None => Arc::new(NoOpDnd::new()),
    }
}
