//! Iteration progress display with running spanning counts

use crate::algorithm::simulation::IterationSummary;
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_UPDATE_INTERVAL};
use crate::spatial::lattice::{Color, PerColor};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_template_error| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the iterations of one session
///
/// Position updates are batched because a small grid can finish thousands of
/// iterations per second.
pub struct IterationProgress {
    bar: ProgressBar,
    spans: PerColor<u64>,
}

impl IterationProgress {
    /// Create a visible progress bar for `total` iterations
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(PROGRESS_STYLE.clone());
        Self {
            bar,
            spans: PerColor::default(),
        }
    }

    /// Create a progress tracker that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            spans: PerColor::default(),
        }
    }

    /// Spanning events seen so far
    pub const fn spans(&self) -> PerColor<u64> {
        self.spans
    }

    /// Record a finished iteration
    pub fn update(&mut self, iteration: u64, summary: &IterationSummary) {
        for color in Color::ALL {
            if summary.spanning[color].is_some() {
                self.spans[color] += 1;
            }
        }

        if iteration % PROGRESS_UPDATE_INTERVAL == 0 {
            self.bar.set_position(iteration);
            self.bar.set_message(format!(
                "spans: {} white, {} black",
                self.spans.white, self.spans.black
            ));
        }
    }

    /// Clear the bar once the run is complete
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
