//! Logger configuration
//!
//! Everything the pipeline treats as an input lives here: queue capacity,
//! overflow and closed-logger policies, the level threshold, masking
//! lists, and sink selection. A `LoggerConfig` is validated and compiled
//! once when a logger is built; runtime changes swap a whole immutable
//! snapshot so readers never observe a half-applied configuration.

use super::dispatch::OverflowPolicy;
use super::error::{LoggerError, Result};
use super::format::TimestampFormat;
use super::level::{self, Level};
use super::masking::MaskConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Behavior for records submitted after `close()` has begun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosedPolicy {
    /// Surface `LoggerClosed` through the checked API (infallible calls
    /// drop the record and warn once on the meta channel)
    #[default]
    Error,
    /// Silently discard
    Discard,
}

/// Declarative sink selection; compiled into concrete sinks at build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkConfig {
    Console {
        #[serde(default = "default_true")]
        colors: bool,
    },
    File {
        path: PathBuf,
        #[serde(default)]
        timestamp_format: TimestampFormat,
    },
    Json {
        path: PathBuf,
        #[serde(default)]
        timestamp_format: TimestampFormat,
    },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub min_level: Level,
    pub queue_capacity: usize,
    pub overflow_policy: OverflowPolicy,
    pub closed_policy: ClosedPolicy,
    pub mask: MaskConfig,
    pub sinks: Vec<SinkConfig>,
    /// Bound on the drain wait when the logger shuts down
    #[serde(with = "duration_ms")]
    pub shutdown_timeout: Duration,
    /// Sink writes slower than this are counted as failures
    #[serde(with = "duration_ms")]
    pub sink_write_timeout: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: Level::INFO,
            queue_capacity: 1024,
            overflow_policy: OverflowPolicy::default(),
            closed_policy: ClosedPolicy::default(),
            mask: MaskConfig::default(),
            sinks: Vec::new(),
            shutdown_timeout: Duration::from_secs(5),
            sink_write_timeout: Duration::from_secs(1),
        }
    }
}

impl LoggerConfig {
    /// Fail early on values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(LoggerError::config(
                "queue",
                "capacity must be at least 1",
            ));
        }
        Ok(())
    }

    /// Overlay environment variables onto this configuration. Recognized
    /// (for prefix `APP`): `APP_LOG_LEVEL`, `APP_LOG_QUEUE_CAPACITY`,
    /// `APP_LOG_OVERFLOW_POLICY`, and `APP_LOG_MASK_KEYS` (comma-separated,
    /// appended to the configured key list). Unparseable values are
    /// configuration errors.
    pub fn from_env(mut self, prefix: &str) -> Result<Self> {
        if let Ok(raw) = std::env::var(format!("{}_LOG_LEVEL", prefix)) {
            self.min_level = level::resolve(&raw)?;
        }
        if let Ok(raw) = std::env::var(format!("{}_LOG_QUEUE_CAPACITY", prefix)) {
            self.queue_capacity = raw.parse().map_err(|_| {
                LoggerError::config("queue", format!("bad capacity '{}'", raw))
            })?;
        }
        if let Ok(raw) = std::env::var(format!("{}_LOG_OVERFLOW_POLICY", prefix)) {
            self.overflow_policy = raw.parse()?;
        }
        if let Ok(raw) = std::env::var(format!("{}_LOG_MASK_KEYS", prefix)) {
            for key in raw.split(',') {
                let key = key.trim();
                if !key.is_empty() {
                    self.mask.sensitive_keys.push(key.to_string());
                }
            }
        }
        Ok(self)
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        duration: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
