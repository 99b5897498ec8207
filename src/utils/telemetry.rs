// file: src/utils/telemetry.rs
// description: timing of index rebuilds and corpus loads with throughput reporting

use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Times one named operation; logs when it starts and when it is finished.
pub struct OperationTimer {
    operation: &'static str,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &'static str) -> Self {
        debug!("{} started", operation);
        Self {
            operation,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// `unit` names what was counted, e.g. "passages" or "documents".
    pub fn finish_with_count(self, count: usize, unit: &'static str) -> PerformanceMetrics {
        let metrics = PerformanceMetrics::new(self.operation, count, unit, self.elapsed());
        info!("{}", metrics);
        metrics
    }

    pub fn warn_if_slow(&self, threshold: Duration) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "{} is slow: {:.2}s so far (threshold {:.2}s)",
                self.operation,
                elapsed.as_secs_f64(),
                threshold.as_secs_f64()
            );
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    pub operation: &'static str,
    pub count: usize,
    pub unit: &'static str,
    pub duration_ms: u64,
    pub per_second: f64,
}

impl PerformanceMetrics {
    pub fn new(operation: &'static str, count: usize, unit: &'static str, duration: Duration) -> Self {
        let secs = duration.as_secs_f64();
        Self {
            operation,
            count,
            unit,
            duration_ms: duration.as_millis() as u64,
            per_second: if secs > 0.0 { count as f64 / secs } else { 0.0 },
        }
    }
}

impl std::fmt::Display for PerformanceMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} finished: {} {} in {}ms ({:.1} {}/s)",
            self.operation, self.count, self.unit, self.duration_ms, self.per_second, self.unit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_throughput() {
        let metrics = PerformanceMetrics::new("index rebuild", 120, "passages", Duration::from_secs(4));
        assert_eq!(metrics.per_second, 30.0);
        assert_eq!(metrics.duration_ms, 4000);
        assert_eq!(
            metrics.to_string(),
            "index rebuild finished: 120 passages in 4000ms (30.0 passages/s)"
        );
    }

    #[test]
    fn test_zero_duration() {
        let metrics = PerformanceMetrics::new("corpus load", 3, "documents", Duration::ZERO);
        assert_eq!(metrics.per_second, 0.0);
    }

    #[test]
    fn test_timer_counts_elapsed_time() {
        let timer = OperationTimer::new("index rebuild");
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed() >= Duration::from_millis(10));

        let metrics = timer.finish_with_count(2, "passages");
        assert_eq!(metrics.count, 2);
        assert!(metrics.duration_ms >= 10);
    }
}
