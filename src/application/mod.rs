//! Application layer - Use cases and port interfaces
//!
//! Contains the core orchestration operations and trait definitions
//! for external system interactions.

pub mod call_overlay;
pub mod orchestrator;
pub mod ports;
pub mod registry;

// Re-export use cases
pub use call_overlay::{
    CallOverlayCoordinator, CallOverlayPorts, CallOverlaySettings, TriggerOutcome, WindowEvent,
};
pub use orchestrator::{
    AcceptHandler, Delivery, MentionRequest, NotificationOrchestrator, OrchestratorPorts,
    SkipReason,
};
pub use registry::ActiveNotificationRegistry;
