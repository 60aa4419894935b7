//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Command implementations.
pub mod commands;

pub use args::Args;

/// Printed after every failure.
pub const HELP_HINT: &str = "Try 'babelfish --help' for more information.";
