use anyhow::{Context, Result};
use inquire::{Confirm, InquireError};
use std::io::{self, BufRead, IsTerminal, Write};

mod progress;
mod style;

pub use progress::{Progress, progress_line};
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive yes/no prompt, treating cancellation (Ctrl+C or Escape) as "no".
///
/// A newline is printed after cancellation to clean up the terminal.
pub fn handle_prompt_cancellation<F>(f: F) -> Result<bool>
where
    F: FnOnce() -> Result<bool>,
{
    match f() {
        Ok(answer) => Ok(answer),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            eprintln!();
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Interprets an answer to a `[Y/n]` question: only `n` declines.
pub fn accepts(answer: &str) -> bool {
    !answer.trim().eq_ignore_ascii_case("n")
}

/// Asks whether an existing `file_name` may be replaced. Defaults to yes.
///
/// Uses an interactive prompt on a terminal and reads a single line otherwise.
pub fn confirm_overwrite(file_name: &str) -> Result<bool> {
    let question = format!("{file_name} already exists. Do you want to replace it?");

    if io::stdin().is_terminal() {
        handle_prompt_cancellation(|| {
            Ok(Confirm::new(&question)
                .with_default(true)
                .with_parser(&|answer| Ok(accepts(answer)))
                .prompt()?)
        })
    } else {
        let mut stderr = io::stderr();
        write!(stderr, "{} [Y/n]", Style::warning(&question))?;
        stderr.flush()?;
        read_confirmation(&mut io::stdin().lock())
    }
}

/// Reads one answer line; end of input counts as the default (yes).
pub fn read_confirmation<R: BufRead>(reader: &mut R) -> Result<bool> {
    let mut answer = String::new();
    reader
        .read_line(&mut answer)
        .context("Failed to read answer from stdin")?;
    Ok(accepts(&answer))
}
