//! Configuration file management and API key lookup.

mod manager;

pub use manager::{BabelfishConfig, ConfigFile, ConfigManager, resolve_api_key};
