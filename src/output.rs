//! Global output configuration and utilities.
//!
//! - Translations printed to the console go to stdout (for piping)
//! - Progress, prompts and errors go to stderr
//! - Quiet mode suppresses progress and status messages
//! - Colors can be disabled via the `NO_COLOR` environment variable

use std::io::{self, Write};
use std::sync::OnceLock;

use crate::ui::Style;

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // https://no-color.org/
            no_color: std::env::var("NO_COLOR").is_ok(),
        }
    }
}

/// Initialize the global output configuration.
///
/// Called once at startup with the CLI flags; later calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status message to stderr (respects quiet mode).
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Flush stderr.
pub fn flush_stderr() {
    let _ = io::stderr().flush();
}

/// Reports a failed run on stderr: the message (if any), then `hint`.
///
/// Shown even in quiet mode.
pub fn report_failure(message: &str, hint: &str) {
    let message = (!message.trim().is_empty()).then(|| Style::error(message));
    let _ = write_failure(&mut io::stderr().lock(), message.as_deref(), &Style::hint(hint));
    flush_stderr();
}

fn write_failure<W: Write>(out: &mut W, message: Option<&str>, hint: &str) -> io::Result<()> {
    if let Some(message) = message {
        writeln!(out, "{message}")?;
    }
    writeln!(out, "{hint}")
}
