//! Logger and consumer loop
//!
//! Producers render, mask, and enqueue; a single background thread per
//! logger owns the sinks, drains the queue in sequence order, and feeds
//! the performance monitor. Failures inside the pipeline never propagate
//! into the instrumented application; the checked API is the one opt-in
//! exception for the Raise overflow policy and closed-logger errors.

use super::config::{ClosedPolicy, LoggerConfig, SinkConfig};
use super::context::{self, FieldMap, FieldValue, ScopeGuard};
use super::dispatch::{DispatchQueue, Enqueued, OverflowPolicy};
use super::error::{LoggerError, Result};
use super::level::{self, Level};
use super::masking::{MaskConfig, MaskingEngine};
use super::monitor::{PerfSnapshot, PerformanceMonitor};
use super::record::{self, ExceptionInfo, LogRecord, MessageSource};
use crate::sinks::{build_sink, Sink};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default bound on the drain wait when a logger is dropped without an
/// explicit `close()`.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Immutable snapshot of the runtime-changeable configuration. Changes
/// build a new snapshot and swap the `Arc` wholesale.
pub(crate) struct ActiveConfig {
    pub version: u64,
    pub min_level: Level,
    pub overflow_policy: OverflowPolicy,
    pub closed_policy: ClosedPolicy,
    pub mask: Arc<MaskingEngine>,
}

pub struct Logger {
    name: Arc<str>,
    active: RwLock<Arc<ActiveConfig>>,
    queue: Arc<DispatchQueue>,
    monitor: Arc<PerformanceMonitor>,
    consumer: Mutex<Option<thread::JoinHandle<()>>>,
    closed: AtomicBool,
    warned_closed: AtomicBool,
    shutdown_timeout: Duration,
}

impl Logger {
    /// Create a builder for a standalone logger.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    /// Build a logger straight from a configuration (sinks compiled from
    /// `config.sinks`).
    pub fn from_config(name: impl Into<String>, config: LoggerConfig) -> Result<Self> {
        LoggerBuilder::new(name).config(config).build()
    }

    fn start(
        name: String,
        config: LoggerConfig,
        mut sinks: Vec<Box<dyn Sink>>,
    ) -> Result<Self> {
        config.validate()?;
        let mask = Arc::new(MaskingEngine::from_config(&config.mask)?);
        for sink_config in &config.sinks {
            sinks.push(build_sink(sink_config)?);
        }

        // the first logger freezes the level registry
        level::seal();

        let name: Arc<str> = Arc::from(name);
        let queue = Arc::new(DispatchQueue::new(config.queue_capacity));
        let monitor = Arc::new(PerformanceMonitor::new());

        let consumer = {
            let queue = Arc::clone(&queue);
            let monitor = Arc::clone(&monitor);
            let write_timeout = config.sink_write_timeout;
            thread::Builder::new()
                .name(format!("logpipe-{}", name))
                .spawn(move || consumer_loop(&queue, &mut sinks, &monitor, write_timeout))?
        };

        Ok(Self {
            name,
            active: RwLock::new(Arc::new(ActiveConfig {
                version: 1,
                min_level: config.min_level,
                overflow_policy: config.overflow_policy,
                closed_policy: config.closed_policy,
                mask,
            })),
            queue,
            monitor,
            consumer: Mutex::new(Some(consumer)),
            closed: AtomicBool::new(false),
            warned_closed: AtomicBool::new(false),
            shutdown_timeout: config.shutdown_timeout,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if a record at `level` would pass the current threshold.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        level.is_enabled(self.active.read().min_level)
    }

    /// Log a pre-rendered message. Never fails; pipeline errors are
    /// counted and surfaced on the meta channel.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        self.swallow(self.submit(
            level,
            MessageSource::Rendered(message.into()),
            FieldMap::new(),
            None,
        ));
    }

    /// Log a positional `{}` template with deferred arguments. A template
    /// mismatch produces a diagnostic record instead of an error.
    pub fn log_args(&self, level: Level, template: impl Into<String>, args: Vec<FieldValue>) {
        self.swallow(self.submit(
            level,
            MessageSource::Template(template.into(), args),
            FieldMap::new(),
            None,
        ));
    }

    /// Log with call-site fields merged over the active scopes.
    pub fn log_with(&self, level: Level, message: impl Into<String>, fields: FieldMap) {
        self.swallow(self.submit(
            level,
            MessageSource::Rendered(message.into()),
            fields,
            None,
        ));
    }

    /// Checked variant: surfaces `QueueFull` (Raise policy) and
    /// `LoggerClosed` (Error policy) to the producer.
    pub fn checked_log(&self, level: Level, message: impl Into<String>) -> Result<()> {
        self.submit(
            level,
            MessageSource::Rendered(message.into()),
            FieldMap::new(),
            None,
        )
    }

    /// Log an error-level message with a captured failure chain.
    pub fn error_with<E: std::error::Error>(&self, message: impl Into<String>, error: &E) {
        self.swallow(self.submit(
            Level::ERROR,
            MessageSource::Rendered(message.into()),
            FieldMap::new(),
            Some(ExceptionInfo::from_error(error)),
        ));
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::TRACE, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::DEBUG, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::INFO, message);
    }

    #[inline]
    pub fn success(&self, message: impl Into<String>) {
        self.log(Level::SUCCESS, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::WARNING, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::ERROR, message);
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::CRITICAL, message);
    }

    /// Acquire a context scope for the duration of the returned guard.
    /// Fields bound here appear on every record logged from this thread
    /// until the guard drops.
    #[must_use]
    pub fn bind(&self, fields: FieldMap) -> ScopeGuard {
        context::scope(fields)
    }

    fn submit(
        &self,
        level: Level,
        message: MessageSource,
        fields: FieldMap,
        exception: Option<ExceptionInfo>,
    ) -> Result<()> {
        let active = Arc::clone(&self.active.read());
        // cheapest possible exit: no snapshot, no masking, no sequence
        if !level.is_enabled(active.min_level) {
            return Ok(());
        }
        if self.closed.load(Ordering::Acquire) {
            return self.refuse_closed(&active);
        }

        let record = record::build(&self.name, level, message, fields, exception, &active.mask);
        match self.queue.enqueue(record, active.overflow_policy) {
            Ok(Enqueued::Queued(_)) => Ok(()),
            Ok(Enqueued::Dropped) => {
                self.alert_dropped();
                Ok(())
            }
            Err(err @ LoggerError::QueueFull { .. }) => Err(err),
            Err(LoggerError::LoggerClosed) => self.refuse_closed(&active),
            Err(other) => Err(other),
        }
    }

    /// Infallible entry points route checked errors here: count, warn on
    /// the meta channel, and move on.
    fn swallow(&self, outcome: Result<()>) {
        match outcome {
            Ok(()) => {}
            Err(LoggerError::QueueFull { .. }) => {
                self.queue.note_dropped();
                self.alert_dropped();
            }
            Err(LoggerError::LoggerClosed) => {
                // refuse_closed already warned
            }
            Err(err) => {
                eprintln!("[LOGPIPE ERROR] logger '{}': {}", self.name, err);
            }
        }
    }

    fn refuse_closed(&self, active: &ActiveConfig) -> Result<()> {
        match active.closed_policy {
            ClosedPolicy::Error => {
                if !self.warned_closed.swap(true, Ordering::Relaxed) {
                    eprintln!(
                        "[LOGPIPE WARNING] logger '{}' received records after close; dropping",
                        self.name
                    );
                }
                Err(LoggerError::LoggerClosed)
            }
            ClosedPolicy::Discard => Ok(()),
        }
    }

    fn alert_dropped(&self) {
        let dropped = self.queue.dropped_count();
        // alert on the first drop and every 1000th thereafter
        if dropped == 1 || dropped.is_multiple_of(1000) {
            eprintln!(
                "[LOGPIPE WARNING] logger '{}': queue full, {} records dropped so far. \
                 Consider a larger queue or a different overflow policy.",
                self.name, dropped
            );
        }
    }

    /// Wait until everything enqueued before this call has been delivered
    /// to every sink. Returns false if the timeout elapsed first.
    pub fn flush(&self, timeout: Duration) -> bool {
        self.queue.wait_delivered(self.queue.last_sequence(), timeout)
    }

    /// Stop intake, drain queued records through the sinks, and release
    /// sink resources. Returns the number of records left undelivered
    /// (zero on a clean shutdown). Idempotent.
    pub fn close(&self, timeout: Duration) -> usize {
        self.closed.store(true, Ordering::Release);
        self.queue.close();

        let handle = self.consumer.lock().take();
        if let Some(handle) = handle {
            let start = Instant::now();
            loop {
                if handle.is_finished() {
                    if handle.join().is_err() {
                        eprintln!(
                            "[LOGPIPE ERROR] logger '{}': consumer thread panicked during shutdown",
                            self.name
                        );
                    }
                    break;
                }
                if start.elapsed() >= timeout {
                    let remaining = self.queue.len();
                    eprintln!(
                        "[LOGPIPE WARNING] logger '{}': shutdown timed out with {} records undelivered",
                        self.name, remaining
                    );
                    return remaining;
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
        0
    }

    /// Delivery telemetry snapshot.
    #[must_use]
    pub fn monitor(&self) -> PerfSnapshot {
        self.monitor.snapshot()
    }

    /// Records dropped by the overflow policy so far.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.queue.dropped_count()
    }

    /// Times the queue has been found full.
    #[must_use]
    pub fn queue_full_count(&self) -> u64 {
        self.queue.queue_full_events()
    }

    /// Monotonically increasing version of the active configuration.
    #[must_use]
    pub fn config_version(&self) -> u64 {
        self.active.read().version
    }

    /// Swap the level threshold (atomic whole-config replacement).
    pub fn set_min_level(&self, min_level: Level) {
        let mut active = self.active.write();
        *active = Arc::new(ActiveConfig {
            version: active.version + 1,
            min_level,
            overflow_policy: active.overflow_policy,
            closed_policy: active.closed_policy,
            mask: Arc::clone(&active.mask),
        });
    }

    /// Swap the overflow policy.
    pub fn set_overflow_policy(&self, policy: OverflowPolicy) {
        let mut active = self.active.write();
        *active = Arc::new(ActiveConfig {
            version: active.version + 1,
            min_level: active.min_level,
            overflow_policy: policy,
            closed_policy: active.closed_policy,
            mask: Arc::clone(&active.mask),
        });
    }

    /// Recompile and swap the masking configuration.
    pub fn set_mask_config(&self, config: &MaskConfig) -> Result<()> {
        let mask = Arc::new(MaskingEngine::from_config(config)?);
        let mut active = self.active.write();
        *active = Arc::new(ActiveConfig {
            version: active.version + 1,
            min_level: active.min_level,
            overflow_policy: active.overflow_policy,
            closed_policy: active.closed_policy,
            mask,
        });
        Ok(())
    }
}

/// Deliver one record to every sink in registration order, isolating each
/// sink's failure, then feed the monitor.
fn deliver(
    sinks: &mut [Box<dyn Sink>],
    record: &LogRecord,
    monitor: &PerformanceMonitor,
    write_timeout: Duration,
) {
    let mut failed = 0u64;
    for sink in sinks.iter_mut() {
        let started = Instant::now();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sink.write(record)
        }));
        match outcome {
            Ok(Ok(())) => {
                if started.elapsed() > write_timeout {
                    // the write finished but exceeded the timeout; count
                    // it as failed and never retry
                    eprintln!(
                        "[LOGPIPE WARNING] sink '{}' exceeded its write timeout ({:?})",
                        sink.name(),
                        write_timeout
                    );
                    failed += 1;
                }
            }
            Ok(Err(err)) => {
                eprintln!("[LOGPIPE ERROR] sink '{}' failed: {}", sink.name(), err);
                failed += 1;
            }
            Err(panic_info) => {
                let message = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                eprintln!(
                    "[LOGPIPE CRITICAL] sink '{}' panicked: {}. Other sinks continue.",
                    sink.name(),
                    message
                );
                failed += 1;
            }
        }
    }
    monitor.record_delivery(record.level, record.latency(), failed);
}

fn flush_sinks(sinks: &mut [Box<dyn Sink>]) {
    for sink in sinks.iter_mut() {
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.flush()));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                eprintln!("[LOGPIPE ERROR] sink '{}' flush failed: {}", sink.name(), err);
            }
            Err(_) => {
                eprintln!(
                    "[LOGPIPE CRITICAL] sink '{}' panicked during flush. Other sinks continue.",
                    sink.name()
                );
            }
        }
    }
}

fn consumer_loop(
    queue: &DispatchQueue,
    sinks: &mut Vec<Box<dyn Sink>>,
    monitor: &PerformanceMonitor,
    write_timeout: Duration,
) {
    while let Some(record) = queue.dequeue() {
        let sequence = record.sequence();
        deliver(sinks, &record, monitor, write_timeout);
        queue.record_delivered(sequence);
        if queue.is_empty() {
            flush_sinks(sinks);
        }
    }
    // closed and drained: final flush before sinks are dropped
    flush_sinks(sinks);
}

impl Drop for Logger {
    fn drop(&mut self) {
        if !self.closed.load(Ordering::Acquire) {
            let remaining = self.close(self.shutdown_timeout);
            if remaining > 0 {
                eprintln!(
                    "[LOGPIPE WARNING] logger '{}' dropped with {} records undelivered",
                    self.name, remaining
                );
            }
        }
    }
}

/// Builder for constructing a standalone `Logger` with a fluent API.
pub struct LoggerBuilder {
    name: String,
    config: LoggerConfig,
    sinks: Vec<Box<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: LoggerConfig::default(),
            sinks: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.config.min_level = level;
        self
    }

    #[must_use]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    #[must_use]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    #[must_use]
    pub fn closed_policy(mut self, policy: ClosedPolicy) -> Self {
        self.config.closed_policy = policy;
        self
    }

    #[must_use]
    pub fn mask(mut self, mask: MaskConfig) -> Self {
        self.config.mask = mask;
        self
    }

    #[must_use]
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.config.shutdown_timeout = timeout;
        self
    }

    #[must_use]
    pub fn sink_write_timeout(mut self, timeout: Duration) -> Self {
        self.config.sink_write_timeout = timeout;
        self
    }

    /// Add a concrete sink instance.
    #[must_use]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Add a declarative sink compiled at build time.
    #[must_use]
    pub fn sink_config(mut self, sink: SinkConfig) -> Self {
        self.config.sinks.push(sink);
        self
    }

    pub fn build(self) -> Result<Logger> {
        Logger::start(self.name, self.config, self.sinks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    /// Collects delivered (sequence, message) pairs for assertions.
    struct MemorySink {
        records: Arc<Mutex<Vec<(u64, String)>>>,
    }

    impl MemorySink {
        fn new() -> (Self, Arc<Mutex<Vec<(u64, String)>>>) {
            let records = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    records: Arc::clone(&records),
                },
                records,
            )
        }
    }

    impl Sink for MemorySink {
        fn write(&mut self, record: &LogRecord) -> Result<()> {
            self.records
                .lock()
                .push((record.sequence(), record.message.clone()));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    struct FailingSink {
        attempts: Arc<AtomicUsize>,
    }

    impl Sink for FailingSink {
        fn write(&mut self, _record: &LogRecord) -> Result<()> {
            self.attempts.fetch_add(1, Ordering::Relaxed);
            Err(LoggerError::sink_write("failing", "simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_basic_delivery() {
        let (sink, records) = MemorySink::new();
        let logger = Logger::builder("t").sink(sink).build().unwrap();

        logger.info("first");
        logger.success("second");
        assert!(logger.flush(Duration::from_secs(1)));

        let records = records.lock();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].1, "first");
        assert_eq!(records[1].1, "second");
    }

    #[test]
    fn test_below_threshold_is_free() {
        let (sink, records) = MemorySink::new();
        let logger = Logger::builder("t")
            .min_level(Level::INFO)
            .sink(sink)
            .build()
            .unwrap();

        logger.debug("filtered");
        logger.trace("filtered");
        logger.info("kept");
        assert!(logger.flush(Duration::from_secs(1)));

        let records = records.lock();
        assert_eq!(records.len(), 1);
        // filtered calls consumed no sequence numbers
        assert_eq!(records[0].0, 1);
        let snapshot = logger.monitor();
        assert_eq!(snapshot.delivered_total, 1);
        assert!(snapshot.by_level.iter().all(|(name, _)| name == "INFO"));
    }

    #[test]
    fn test_failing_sink_does_not_starve_healthy_sink() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let (healthy, records) = MemorySink::new();
        let logger = Logger::builder("t")
            .sink(FailingSink {
                attempts: Arc::clone(&attempts),
            })
            .sink(healthy)
            .build()
            .unwrap();

        for i in 0..10 {
            logger.info(format!("m{}", i));
        }
        assert!(logger.flush(Duration::from_secs(1)));

        assert_eq!(records.lock().len(), 10);
        assert_eq!(attempts.load(Ordering::Relaxed), 10);
        assert_eq!(logger.monitor().sink_failures, 10);
    }

    #[test]
    fn test_close_drains_everything() {
        let (sink, records) = MemorySink::new();
        let logger = Logger::builder("t")
            .queue_capacity(256)
            .sink(sink)
            .build()
            .unwrap();

        for i in 0..100 {
            logger.info(format!("m{}", i));
        }
        let remaining = logger.close(Duration::from_secs(5));
        assert_eq!(remaining, 0);
        assert_eq!(records.lock().len(), 100);
    }

    #[test]
    fn test_checked_log_after_close() {
        let (sink, _records) = MemorySink::new();
        let logger = Logger::builder("t").sink(sink).build().unwrap();
        logger.close(Duration::from_secs(1));

        let err = logger.checked_log(Level::INFO, "late").unwrap_err();
        assert!(matches!(err, LoggerError::LoggerClosed));
    }

    #[test]
    fn test_discard_policy_swallows_after_close() {
        let (sink, records) = MemorySink::new();
        let logger = Logger::builder("t")
            .closed_policy(ClosedPolicy::Discard)
            .sink(sink)
            .build()
            .unwrap();
        logger.info("kept");
        logger.flush(Duration::from_secs(1));
        logger.close(Duration::from_secs(1));

        assert!(logger.checked_log(Level::INFO, "late").is_ok());
        assert_eq!(records.lock().len(), 1);
    }

    #[test]
    fn test_raise_policy_surfaces_queue_full() {
        // a sink that parks until released, so the queue stays full
        struct GateSink {
            release: Arc<(Mutex<bool>, parking_lot::Condvar)>,
        }
        impl Sink for GateSink {
            fn write(&mut self, _record: &LogRecord) -> Result<()> {
                let (lock, cvar) = &*self.release;
                let mut open = lock.lock();
                while !*open {
                    cvar.wait(&mut open);
                }
                Ok(())
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
            fn name(&self) -> &str {
                "gate"
            }
        }

        let release = Arc::new((Mutex::new(false), parking_lot::Condvar::new()));
        let logger = Logger::builder("t")
            .queue_capacity(1)
            .overflow_policy(OverflowPolicy::Raise)
            .sink(GateSink {
                release: Arc::clone(&release),
            })
            .build()
            .unwrap();

        // saturate: one record in flight at the gate, one queued
        logger.checked_log(Level::INFO, "in-flight").unwrap();
        std::thread::sleep(Duration::from_millis(50));
        logger.checked_log(Level::INFO, "queued").unwrap();

        let err = logger.checked_log(Level::INFO, "overflow").unwrap_err();
        assert!(matches!(err, LoggerError::QueueFull { .. }));

        let (lock, cvar) = &*release;
        *lock.lock() = true;
        cvar.notify_all();
        logger.close(Duration::from_secs(5));
    }

    #[test]
    fn test_config_version_increments_on_swap() {
        let (sink, _records) = MemorySink::new();
        let logger = Logger::builder("t").sink(sink).build().unwrap();
        assert_eq!(logger.config_version(), 1);
        logger.set_min_level(Level::DEBUG);
        assert_eq!(logger.config_version(), 2);
        logger.set_overflow_policy(OverflowPolicy::Block);
        assert_eq!(logger.config_version(), 3);
        assert!(logger.is_enabled(Level::DEBUG));
    }

    #[test]
    fn test_bound_fields_reach_records() {
        let (sink, _records) = MemorySink::new();
        let logger = Logger::builder("t").sink(sink).build().unwrap();

        struct ContextSink {
            seen: Arc<Mutex<Vec<Option<FieldValue>>>>,
        }
        impl Sink for ContextSink {
            fn write(&mut self, record: &LogRecord) -> Result<()> {
                self.seen.lock().push(record.context.get("request_id").cloned());
                Ok(())
            }
            fn flush(&mut self) -> Result<()> {
                Ok(())
            }
            fn name(&self) -> &str {
                "context"
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let logger2 = Logger::builder("t2")
            .sink(ContextSink {
                seen: Arc::clone(&seen),
            })
            .build()
            .unwrap();

        {
            let _guard = logger2.bind(
                [("request_id".to_string(), FieldValue::from("req-7"))]
                    .into_iter()
                    .collect(),
            );
            logger2.info("inside");
        }
        logger2.info("outside");
        assert!(logger2.flush(Duration::from_secs(1)));

        let seen = seen.lock();
        assert_eq!(seen[0], Some(FieldValue::String("req-7".into())));
        assert_eq!(seen[1], None);
        drop(seen);
        drop(logger);
    }
}
