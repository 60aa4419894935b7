//! Path utilities for configuration and side files.
//!
//! The config directory follows XDG Base Directory conventions on every
//! platform; the API key file lives next to the executable.

use std::path::PathBuf;

/// Name used for the config directory and the key file.
pub const APP_NAME: &str = "babelfish";

/// Returns the configuration directory for babelfish.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/babelfish` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/babelfish` otherwise
/// 3. `./.config/babelfish` if the home directory cannot be determined
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| home_dir().join(".config").join(APP_NAME),
        |xdg| PathBuf::from(xdg).join(APP_NAME),
    )
}

/// Returns the path of `babelfish.apikey` next to the running executable.
pub fn api_key_file() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(format!("{APP_NAME}.apikey")))
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
