use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Number of character slots in the progress bar.
const BAR_WIDTH: usize = 50;

/// Formats the progress line after `done` of `total` resources.
///
/// The bar fills in 2% steps: `(100 * done / total) / 2` hashes, padded with dots.
pub fn progress_line(done: usize, total: usize) -> String {
    let percent = if total == 0 { 100 } else { 100 * done / total };
    let filled = (percent / 2).min(BAR_WIDTH);
    let width = total.to_string().len();

    format!(
        "Translating: {done:>width$}/{total} [{}{}]",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    )
}

/// A single-line progress indicator redrawn in place on stderr.
pub struct Progress {
    progress_bar: ProgressBar,
    total: usize,
}

impl Progress {
    /// Creates a visible progress line for `total` resources.
    #[allow(clippy::unwrap_used)]
    pub fn new(total: usize) -> Self {
        let progress_bar =
            ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        // unwrap is safe: template string is a compile-time constant
        progress_bar.set_style(ProgressStyle::with_template("{msg}").unwrap());
        progress_bar.set_message(progress_line(0, total));

        Self {
            progress_bar,
            total,
        }
    }

    /// Creates a progress line that never draws anything.
    pub fn hidden() -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
            total: 0,
        }
    }

    /// Redraws the line after `done` resources.
    pub fn set(&self, done: usize) {
        self.progress_bar.set_position(done as u64);
        self.progress_bar.set_message(progress_line(done, self.total));
    }

    /// Leaves the final line on screen and moves to the next line.
    pub fn finish(&self) {
        self.progress_bar.finish();
    }
}
