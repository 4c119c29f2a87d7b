//! Delivery telemetry
//!
//! A thin counter layer, not a time-series store. All updates happen on
//! the consumer side, after every sink has been attempted for a record;
//! producers never touch these counters.

use super::level::{self, Level};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const LEVEL_SLOTS: usize = 256;

/// Per-level delivery counts plus an enqueue-to-delivery latency aggregate.
pub struct PerformanceMonitor {
    delivered_by_level: [AtomicU64; LEVEL_SLOTS],
    delivered_total: AtomicU64,
    sink_failures: AtomicU64,
    latency_count: AtomicU64,
    latency_sum_nanos: AtomicU64,
    latency_min_nanos: AtomicU64,
    latency_max_nanos: AtomicU64,
}

impl PerformanceMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delivered_by_level: [const { AtomicU64::new(0) }; LEVEL_SLOTS],
            delivered_total: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            latency_count: AtomicU64::new(0),
            latency_sum_nanos: AtomicU64::new(0),
            latency_min_nanos: AtomicU64::new(u64::MAX),
            latency_max_nanos: AtomicU64::new(0),
        }
    }

    /// Record one delivered record (all sinks attempted, success or not).
    pub fn record_delivery(&self, level: Level, latency: Duration, failed_sinks: u64) {
        self.delivered_by_level[level.value() as usize].fetch_add(1, Ordering::Relaxed);
        self.delivered_total.fetch_add(1, Ordering::Relaxed);
        if failed_sinks > 0 {
            self.sink_failures.fetch_add(failed_sinks, Ordering::Relaxed);
        }
        let nanos = latency.as_nanos().min(u64::MAX as u128) as u64;
        self.latency_count.fetch_add(1, Ordering::Relaxed);
        self.latency_sum_nanos.fetch_add(nanos, Ordering::Relaxed);
        self.latency_min_nanos.fetch_min(nanos, Ordering::Relaxed);
        self.latency_max_nanos.fetch_max(nanos, Ordering::Relaxed);
    }

    #[inline]
    pub fn delivered_total(&self) -> u64 {
        self.delivered_total.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    pub fn delivered_for(&self, level: Level) -> u64 {
        self.delivered_by_level[level.value() as usize].load(Ordering::Relaxed)
    }

    /// Point-in-time copy of all counters.
    #[must_use]
    pub fn snapshot(&self) -> PerfSnapshot {
        let mut by_level = Vec::new();
        for value in 0..LEVEL_SLOTS {
            let count = self.delivered_by_level[value].load(Ordering::Relaxed);
            if count > 0 {
                let name = level::resolve_value(value as u8)
                    .map(|l| l.name().to_string())
                    .unwrap_or_else(|_| format!("LEVEL({})", value));
                by_level.push((name, count));
            }
        }
        let count = self.latency_count.load(Ordering::Relaxed);
        PerfSnapshot {
            delivered_total: self.delivered_total(),
            sink_failures: self.sink_failures(),
            by_level,
            latency: LatencyStats {
                count,
                sum: Duration::from_nanos(self.latency_sum_nanos.load(Ordering::Relaxed)),
                min: if count == 0 {
                    Duration::ZERO
                } else {
                    Duration::from_nanos(self.latency_min_nanos.load(Ordering::Relaxed))
                },
                max: Duration::from_nanos(self.latency_max_nanos.load(Ordering::Relaxed)),
            },
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        for slot in &self.delivered_by_level {
            slot.store(0, Ordering::Relaxed);
        }
        self.delivered_total.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.latency_count.store(0, Ordering::Relaxed);
        self.latency_sum_nanos.store(0, Ordering::Relaxed);
        self.latency_min_nanos.store(u64::MAX, Ordering::Relaxed);
        self.latency_max_nanos.store(0, Ordering::Relaxed);
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Running latency aggregate (count, sum, min, max).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyStats {
    pub count: u64,
    pub sum: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl LatencyStats {
    #[must_use]
    pub fn mean(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.sum / self.count as u32
        }
    }
}

/// Point-in-time view of the monitor.
#[derive(Debug, Clone)]
pub struct PerfSnapshot {
    pub delivered_total: u64,
    pub sink_failures: u64,
    /// (level name, delivered count), ascending by level value
    pub by_level: Vec<(String, u64)>,
    pub latency: LatencyStats,
}
