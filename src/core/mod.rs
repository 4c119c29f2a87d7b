//! Core pipeline types and traits

pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod masking;
pub mod monitor;
pub mod record;
pub mod registry;

pub use config::{ClosedPolicy, LoggerConfig, SinkConfig};
pub use context::{
    correlation_id, new_correlation_id, pop_scope, push_scope, scope, set_correlation_id,
    snapshot, ContextState, FieldMap, FieldValue, ScopeGuard, ScopeToken,
};
pub use dispatch::OverflowPolicy;
pub use error::{LoggerError, Result};
pub use format::{Formatter, JsonFormatter, TextFormatter, TimestampFormat};
pub use level::{Level, LevelRegistry};
pub use logger::{Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use masking::{MaskConfig, MaskingEngine};
pub use monitor::{LatencyStats, PerfSnapshot, PerformanceMonitor};
pub use record::{ExceptionInfo, LogRecord};
pub use registry::{configure, get_logger, shutdown_all, LoggerRegistry};
