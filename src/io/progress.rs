//! Iteration progress display for sampler runs

use crate::algorithm::executor::SamplerStats;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Redraw at most this many times over a run
const REFRESH_STEPS: usize = 200;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the iterations of one sampler run
///
/// Updates are throttled so that the bar does not dominate short iterations.
pub struct ProgressManager {
    bar: ProgressBar,
    stride: usize,
}

impl ProgressManager {
    /// Create a progress bar for `iterations` steps
    pub fn new(iterations: usize) -> Self {
        let bar = ProgressBar::new(iterations as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self {
            bar,
            stride: (iterations / REFRESH_STEPS).max(1),
        }
    }

    /// Number of iterations between redraws
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Report the completed iteration and the running totals
    pub fn update(&self, iteration: usize, stats: &SamplerStats) {
        if iteration % self.stride != 0 {
            return;
        }
        self.bar.set_position(iteration as u64);
        self.bar.set_message(format!(
            "flips {} (net volume {:+})",
            stats.flips(),
            stats.net_volume()
        ));
    }

    /// Current bar position
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Complete the bar and clear it from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
