//! # logpipe
//!
//! An asynchronous, structured logging pipeline: drop-in severity-level
//! logging with non-blocking delivery, scoped context propagation,
//! automatic masking of sensitive data, custom levels, and delivery
//! telemetry.
//!
//! ## Features
//!
//! - **Asynchronous delivery**: producers only touch a bounded queue;
//!   one consumer thread per logger performs all formatting and I/O
//! - **Total ordering**: every record carries a sequence number; sinks
//!   observe records in sequence order even under concurrent producers
//! - **Scoped context**: per-thread nested scopes merged into every
//!   record, with an explicit fork handle for spawned work
//! - **Masking**: sensitive keys and value patterns are redacted before
//!   a record ever reaches the queue
//! - **Custom levels**: SUCCESS and TRACE built in, more at registration
//!   time
//!
//! ## Example
//!
//! ```
//! use logpipe::prelude::*;
//! use logpipe::fields;
//!
//! let logger = Logger::builder("app")
//!     .min_level(Level::DEBUG)
//!     .build()
//!     .unwrap();
//!
//! let _scope = logger.bind(fields! { "request_id" => "req-42" });
//! logger.info("handling request");
//! logger.success("request complete");
//! logger.close(std::time::Duration::from_secs(1));
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        configure, get_logger, shutdown_all, ClosedPolicy, ContextState, ExceptionInfo,
        FieldMap, FieldValue, Formatter, JsonFormatter, LatencyStats, Level, LevelRegistry,
        LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerRegistry,
        MaskConfig, MaskingEngine, OverflowPolicy, PerfSnapshot, PerformanceMonitor, Result,
        ScopeGuard, SinkConfig, TextFormatter, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, FileSink, JsonSink, Sink};
}

pub use crate::core::{
    configure, get_logger, shutdown_all, ClosedPolicy, ContextState, ExceptionInfo, FieldMap,
    FieldValue, Formatter, JsonFormatter, LatencyStats, Level, LevelRegistry, LogRecord,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerRegistry, MaskConfig,
    MaskingEngine, OverflowPolicy, PerfSnapshot, PerformanceMonitor, Result, ScopeGuard,
    ScopeToken, SinkConfig, TextFormatter, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::sinks::{ConsoleSink, FileSink, JsonSink, Sink};
