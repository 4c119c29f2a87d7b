//! Bounded dispatch queue between producers and the consumer loop
//!
//! Sequence numbers are stamped under the queue lock from a single shared
//! atomic counter, so queue order and sequence order always coincide.
//! Producers only ever touch this queue; sinks live on the consumer side.

use super::error::{LoggerError, Result};
use super::record::LogRecord;
use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Behavior when the dispatch queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Producer waits for space; backpressure into the application
    Block,
    /// Evict the oldest queued record to make room
    DropOldest,
    /// Discard the incoming record, keep what is queued
    #[default]
    DropNewest,
    /// Surface `QueueFull` to the producer (checked API only)
    Raise,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Block => write!(f, "block"),
            OverflowPolicy::DropOldest => write!(f, "drop_oldest"),
            OverflowPolicy::DropNewest => write!(f, "drop_newest"),
            OverflowPolicy::Raise => write!(f, "raise"),
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "block" => Ok(OverflowPolicy::Block),
            "drop_oldest" | "drop-oldest" => Ok(OverflowPolicy::DropOldest),
            "drop_newest" | "drop-newest" => Ok(OverflowPolicy::DropNewest),
            "raise" => Ok(OverflowPolicy::Raise),
            other => Err(LoggerError::config(
                "overflow_policy",
                format!("unknown policy '{}'", other),
            )),
        }
    }
}

/// Outcome of a non-failing enqueue attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Enqueued {
    Queued(u64),
    /// Discarded under DropNewest; no sequence number was consumed
    Dropped,
}

struct Inner {
    buf: VecDeque<LogRecord>,
    closed: bool,
    /// Highest sequence number fully delivered by the consumer
    delivered_seq: u64,
}

pub(crate) struct DispatchQueue {
    inner: Mutex<Inner>,
    not_empty: Condvar,
    not_full: Condvar,
    drained: Condvar,
    capacity: usize,
    sequence: AtomicU64,
    dropped: AtomicU64,
    queue_full_events: AtomicU64,
}

impl DispatchQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                buf: VecDeque::with_capacity(capacity),
                closed: false,
                delivered_seq: 0,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            drained: Condvar::new(),
            capacity,
            sequence: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
        }
    }

    /// Enqueue one record, applying `policy` if the queue is full.
    pub(crate) fn enqueue(
        &self,
        mut record: LogRecord,
        policy: OverflowPolicy,
    ) -> Result<Enqueued> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(LoggerError::LoggerClosed);
        }
        if inner.buf.len() >= self.capacity {
            self.queue_full_events.fetch_add(1, Ordering::Relaxed);
            match policy {
                OverflowPolicy::Block => {
                    while inner.buf.len() >= self.capacity && !inner.closed {
                        self.not_full.wait(&mut inner);
                    }
                    if inner.closed {
                        return Err(LoggerError::LoggerClosed);
                    }
                }
                OverflowPolicy::DropOldest => {
                    inner.buf.pop_front();
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                }
                OverflowPolicy::DropNewest => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    return Ok(Enqueued::Dropped);
                }
                OverflowPolicy::Raise => {
                    return Err(LoggerError::QueueFull {
                        capacity: self.capacity,
                    });
                }
            }
        }
        // stamp under the lock: queue order == sequence order
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        record.sequence = seq;
        record.enqueued_at = Instant::now();
        inner.buf.push_back(record);
        drop(inner);
        self.not_empty.notify_one();
        Ok(Enqueued::Queued(seq))
    }

    /// Blocking dequeue. Returns `None` once the queue is closed and empty.
    pub(crate) fn dequeue(&self) -> Option<LogRecord> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(record) = inner.buf.pop_front() {
                drop(inner);
                self.not_full.notify_one();
                return Some(record);
            }
            if inner.closed {
                return None;
            }
            self.not_empty.wait(&mut inner);
        }
    }

    /// Consumer-side: mark everything up to `seq` as delivered.
    pub(crate) fn record_delivered(&self, seq: u64) {
        let mut inner = self.inner.lock();
        if seq > inner.delivered_seq {
            inner.delivered_seq = seq;
        }
        drop(inner);
        self.drained.notify_all();
    }

    /// Wait until every record stamped at or before `target` has been
    /// delivered (or evicted in favor of a later one). Returns false on
    /// timeout.
    pub(crate) fn wait_delivered(&self, target: u64, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut inner = self.inner.lock();
        while inner.delivered_seq < target {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            self.drained.wait_for(&mut inner, deadline - now);
        }
        true
    }

    /// Stop accepting records and wake all waiters.
    pub(crate) fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        drop(inner);
        self.not_empty.notify_all();
        self.not_full.notify_all();
        self.drained.notify_all();
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().buf.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.lock().buf.is_empty()
    }

    /// Highest sequence number handed out so far.
    pub(crate) fn last_sequence(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    pub(crate) fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub(crate) fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    pub(crate) fn note_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed) + 1
    }
}
