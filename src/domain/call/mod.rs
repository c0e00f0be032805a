//! Call overlay domain: trigger convention, geometry, windows, session, bridge

mod bridge;
mod geometry;
mod session;
mod trigger;
mod window;

pub use bridge::{
    BridgeError, BridgeMessage, ContentBridge, Envelope, SenderMeta, CALL_PAYLOAD_CHANNEL,
};
pub use geometry::{Display, FanOut, OverlayLayout, Placement, Rect};
pub use session::{DismissPlan, InvalidOverlayTransition, OverlaySession, OverlayState, ShowPlan};
pub use trigger::{CallPayload, CallSender, CallTrigger, ChatMessage, DEFAULT_CALL_TRIGGER};
pub use window::{
    OverlayWindowSpec, WindowId, WindowRole, CALL_BACKDROP_PAGE, CALL_BACKDROP_TITLE,
    CALL_OVERLAY_PAGE, CALL_OVERLAY_TITLE,
};
