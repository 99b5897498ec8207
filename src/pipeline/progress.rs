// file: src/pipeline/progress.rs
// description: corpus loading progress bar and load counters
// reference: https://docs.rs/indicatif

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::cell::Cell;
use std::time::Instant;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    pub files_loaded: usize,
    pub files_failed: usize,
    pub total_bytes: u64,
    pub duration_ms: u64,
}

impl LoadStats {
    pub fn files_per_second(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.files_loaded as f64 * 1000.0 / self.duration_ms as f64
    }

    /// Percentage of attempted files that became documents.
    pub fn success_rate(&self) -> f64 {
        let attempted = self.files_loaded + self.files_failed;
        if attempted == 0 {
            return 0.0;
        }
        self.files_loaded as f64 * 100.0 / attempted as f64
    }
}

/// One bar over the scanned files; the prefix shows the failure count.
pub struct ProgressTracker {
    bar: ProgressBar,
    stats: Cell<LoadStats>,
    start: Instant,
}

impl ProgressTracker {
    /// Follows the global `colored` override set by the logger.
    pub fn new(total_files: usize) -> Self {
        Self::with_color(total_files, colored::control::SHOULD_COLORIZE.should_colorize())
    }

    pub fn with_color(total_files: usize, colored: bool) -> Self {
        let template = if colored {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {prefix:.red} {msg}"
        } else {
            "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {prefix} {msg}"
        };
        let bar = ProgressBar::new(total_files as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            bar.set_style(style.progress_chars("=>-"));
        }
        Self::from_bar(bar)
    }

    /// Counts without drawing, for machine-readable output.
    pub fn hidden(total_files: usize) -> Self {
        Self::from_bar(ProgressBar::with_draw_target(
            Some(total_files as u64),
            ProgressDrawTarget::hidden(),
        ))
    }

    fn from_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            stats: Cell::new(LoadStats::default()),
            start: Instant::now(),
        }
    }

    pub fn inc_files_loaded(&self, bytes: u64) {
        let mut stats = self.stats.take();
        stats.files_loaded += 1;
        stats.total_bytes += bytes;
        self.stats.set(stats);
        self.bar.inc(1);
    }

    pub fn inc_files_failed(&self) {
        let mut stats = self.stats.take();
        stats.files_failed += 1;
        self.bar.set_prefix(format!("({} failed)", stats.files_failed));
        self.stats.set(stats);
        self.bar.inc(1);
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> LoadStats {
        let stats = self.stats.take();
        self.stats.set(stats.clone());
        LoadStats {
            duration_ms: self.start.elapsed().as_millis() as u64,
            ..stats
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_stats_rates() {
        let stats = LoadStats {
            files_loaded: 90,
            files_failed: 10,
            total_bytes: 0,
            duration_ms: 3_000,
        };
        assert_eq!(stats.files_per_second(), 30.0);
        assert_eq!(stats.success_rate(), 90.0);
    }

    #[test]
    fn test_empty_stats() {
        let stats = LoadStats::default();
        assert_eq!(stats.files_per_second(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_tracker_counts_loaded_and_failed() {
        let tracker = ProgressTracker::hidden(3);

        tracker.inc_files_loaded(1024);
        tracker.inc_files_loaded(16);
        tracker.inc_files_failed();

        let stats = tracker.get_stats();
        assert_eq!(stats.files_loaded, 2);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.total_bytes, 1040);
        assert_eq!(tracker.get_stats().files_loaded, 2);
    }
}
