//! Multi-cloud progress tracking with automatic batching for large runs

use crate::algorithm::executor::LayoutObserver;
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use crate::spatial::{ItemId, Placement};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>12} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Clouds: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for a batch of clouds
///
/// Small batches get one bar per cloud showing items placed in the current
/// attempt. Larger batches switch to a single bar counting finished clouds.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    cloud_bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager drawing to the terminal
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            cloud_bars: Vec::new(),
        }
    }

    /// Create a progress manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            batch_bar: None,
            cloud_bars: Vec::new(),
        }
    }

    /// Create bars for `cloud_count` clouds of `item_count` items each
    pub fn initialize(&mut self, cloud_count: usize, item_count: usize) {
        // Switch to batch mode for large runs to avoid terminal spam
        if cloud_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(cloud_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
            return;
        }

        for index in 0..cloud_count {
            let bar = ProgressBar::new(item_count as u64);
            bar.set_style(PROGRESS_STYLE.clone());
            bar.set_prefix(format!("cloud {index}"));
            self.cloud_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Number of per-cloud bars in use
    pub fn cloud_bar_count(&self) -> usize {
        self.cloud_bars.len()
    }

    /// Whether the manager is counting clouds on a single batch bar
    pub const fn is_batched(&self) -> bool {
        self.batch_bar.is_some()
    }

    /// Observer feeding the bar of cloud `index`
    pub fn observer(&self, index: usize) -> CloudProgress {
        CloudProgress {
            bar: self.cloud_bars.get(index).cloned(),
        }
    }

    /// Mark cloud `index` as done
    pub fn complete_cloud(&self, index: usize, succeeded: bool) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(bar) = self.cloud_bars.get(index) {
            let message = if succeeded { "✓" } else { "✗ infeasible" };
            bar.finish_with_message(message);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All clouds processed");
        }
        let _ = self.multi_progress.clear();
    }
}

/// Layout observer updating one cloud's bar
///
/// Cheap to clone and safe to move to a worker thread.
#[derive(Clone, Debug, Default)]
pub struct CloudProgress {
    bar: Option<ProgressBar>,
}

impl CloudProgress {
    /// Items placed in the current attempt, as shown on the bar
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }
}

impl LayoutObserver for CloudProgress {
    fn attempt_started(&mut self, attempt: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_position(0);
            bar.set_message(format!("attempt {attempt}"));
        }
    }

    fn item_placed(&mut self, _id: ItemId, _placement: Placement, placed: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_position(placed as u64);
        }
    }
}
