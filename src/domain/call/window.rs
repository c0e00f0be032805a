//! Overlay window identities and construction options

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Title reserved for the interactive call overlay window
pub const CALL_OVERLAY_TITLE: &str = "Call Overlay";
/// Title used by the visual-only windows on other displays
pub const CALL_BACKDROP_TITLE: &str = "Call Overlay Backdrop";
/// Page loaded into the primary window
pub const CALL_OVERLAY_PAGE: &str = "call-user.html";
/// Page loaded into the secondary windows
pub const CALL_BACKDROP_PAGE: &str = "call-backdrop.html";

/// Handle of a top-level window owned by the window host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Role of an overlay window inside a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowRole {
    /// Interactive, receives the payload, dismissable
    Primary,
    /// Visual-only cover for another display
    Secondary,
}

/// Everything the window host needs to construct an overlay window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayWindowSpec {
    pub role: WindowRole,
    pub title: String,
    pub page: String,
    pub bounds: Rect,
    pub resizable: bool,
    pub always_on_top: bool,
    pub fullscreen: bool,
    pub background_color: String,
    pub transparent: bool,
    pub frame: bool,
    pub skip_taskbar: bool,
    pub focusable: bool,
    pub ignore_mouse_events: bool,
    pub parent_is_main_window: bool,
    pub modal: bool,
    pub visible: bool,
}

impl OverlayWindowSpec {
    fn base(role: WindowRole, title: &str, page: &str, bounds: Rect) -> Self {
        Self {
            role,
            title: title.to_string(),
            page: page.to_string(),
            bounds,
            resizable: false,
            always_on_top: true,
            fullscreen: true,
            background_color: "#ffffff".to_string(),
            transparent: true,
            frame: false,
            skip_taskbar: true,
            focusable: false,
            ignore_mouse_events: false,
            parent_is_main_window: true,
            modal: true,
            visible: false,
        }
    }

    /// The interactive window; accepts the close action only
    pub fn primary(bounds: Rect) -> Self {
        Self::base(
            WindowRole::Primary,
            CALL_OVERLAY_TITLE,
            CALL_OVERLAY_PAGE,
            bounds,
        )
    }

    /// A non-focusable, click-through cover for another display
    pub fn secondary(bounds: Rect) -> Self {
        Self {
            ignore_mouse_events: true,
            ..Self::base(
                WindowRole::Secondary,
                CALL_BACKDROP_TITLE,
                CALL_BACKDROP_PAGE,
                bounds,
            )
        }
    }
}
