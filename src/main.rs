use anyhow::{Result, anyhow, bail};
use clap::error::ErrorKind;

use babelfish::cli::commands::translate;
use babelfish::cli::{Args, HELP_HINT};
use babelfish::output::{self, OutputConfig};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        report(&err);
    }
}

async fn run() -> Result<()> {
    if std::env::args_os().len() <= 1 {
        bail!("");
    }

    let args = match Args::try_parse_lenient(std::env::args_os()) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(());
        }
        Err(err) => {
            let message = err.to_string();
            let first_line = message.lines().next().unwrap_or_default();
            return Err(anyhow!(first_line.trim_start_matches("error: ").to_string()));
        }
    };

    output::init(OutputConfig {
        quiet: args.quiet,
        ..OutputConfig::default()
    });

    translate::run_translate(args.into()).await
}

/// Prints a failure the same way regardless of its kind.
fn report(err: &anyhow::Error) {
    output::report_failure(&format!("{err:#}"), HELP_HINT);
}
