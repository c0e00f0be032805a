//! Configuration adapters

mod preferences;
mod xdg;

pub use preferences::ConfigPreferences;
pub use xdg::XdgConfigStore;
