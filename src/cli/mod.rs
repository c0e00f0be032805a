//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, the host protocol
//! and the `run` loop.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod protocol;

// Re-export commonly used types
pub use app::{load_merged_config, run_host, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands, ConfigAction, RunArgs};
pub use presenter::Presenter;
pub use protocol::InboundEvent;
