//! Host-facing adapters for the `run` mode

mod directory;
mod json_lines;
mod permissions;

pub use directory::{DisplayDirectory, ViewDirectory};
pub use json_lines::{write_commands, HostCommand, JsonLinesHost};
pub use permissions::OriginAllowList;
