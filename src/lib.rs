//! ChatNotify - desktop notification and call overlay orchestration
//!
//! This crate turns chat events from a multi-server chat client into
//! native desktop notifications and a full-screen incoming call overlay.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Notification lifecycle, call overlay geometry and sessions, config
//! - **Application**: Orchestrator, call overlay coordinator and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (notify-rust, DND probes, host bridge)
//! - **CLI**: Argument parsing, config management and the JSON-lines host loop

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
