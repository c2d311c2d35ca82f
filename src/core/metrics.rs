//! Registry metrics for observability
//!
//! Counts what happened to each stream delivery during fan-out: lines written,
//! lines filtered out by a stream's gate, and sink failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Delivery counters kept by a [`StreamRegistry`](super::StreamRegistry)
///
/// # Example
///
/// ```
/// use multistream_logger::RegistryMetrics;
///
/// let metrics = RegistryMetrics::new();
/// metrics.record_written();
/// metrics.record_failed();
///
/// assert_eq!(metrics.lines_written(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct RegistryMetrics {
    /// Lines handed to a sink successfully
    lines_written: AtomicU64,

    /// Deliveries skipped by a stream's level or disabled flag
    lines_filtered: AtomicU64,

    /// Deliveries whose sink returned an error or panicked
    write_failures: AtomicU64,
}

impl RegistryMetrics {
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            lines_filtered: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn lines_filtered(&self) -> u64 {
        self.lines_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.lines_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.lines_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failure rate as a percentage of attempted writes (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let attempted = failed + self.lines_written() as f64;
        if attempted == 0.0 {
            0.0
        } else {
            failed / attempted * 100.0
        }
    }

    pub fn reset(&self) {
        self.lines_written.store(0, Ordering::Relaxed);
        self.lines_filtered.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for RegistryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let metrics = RegistryMetrics::new();
        assert_eq!(metrics.lines_written(), 0);
        assert_eq!(metrics.lines_filtered(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.failure_rate(), 0.0);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = RegistryMetrics::new();
        for _ in 0..3 {
            metrics.record_written();
        }
        metrics.record_failed();
        metrics.record_filtered();

        assert!((metrics.failure_rate() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let metrics = RegistryMetrics::new();
        metrics.record_written();
        metrics.record_filtered();
        metrics.reset();
        assert_eq!(metrics.lines_written(), 0);
        assert_eq!(metrics.lines_filtered(), 0);
    }
}
