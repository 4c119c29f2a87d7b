//! Process-wide named loggers
//!
//! `get_logger(name)` hands out one shared instance per name, created
//! lazily and torn down at explicit shutdown. The registry is an ordinary
//! struct so tests can run against private instances; the process-wide
//! one is a single lazily-initialized `LoggerRegistry`.

use super::config::{LoggerConfig, SinkConfig};
use super::error::Result;
use super::logger::Logger;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
        }
    }

    /// Configuration used for loggers created implicitly by name lookup.
    fn default_config() -> LoggerConfig {
        LoggerConfig {
            sinks: vec![SinkConfig::Console { colors: true }],
            ..LoggerConfig::default()
        }
    }

    /// Return the logger registered under `name`, creating it with the
    /// default configuration on first request.
    pub fn get_or_create(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return Arc::clone(logger);
        }
        let mut loggers = self.loggers.write();
        // double-check: another thread may have won the race
        if let Some(logger) = loggers.get(name) {
            return Arc::clone(logger);
        }
        let logger = Logger::from_config(name, Self::default_config())
            .expect("default logger configuration is valid");
        let logger = Arc::new(logger);
        loggers.insert(name.to_string(), Arc::clone(&logger));
        logger
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(name).map(Arc::clone)
    }

    /// (Re)build the logger registered under `name` from `config`. A
    /// previously registered instance is closed; callers still holding it
    /// see `LoggerClosed` behavior per its closed policy.
    pub fn configure(&self, name: &str, config: LoggerConfig) -> Result<Arc<Logger>> {
        let shutdown = config.shutdown_timeout;
        let logger = Arc::new(Logger::from_config(name, config)?);
        let previous = self
            .loggers
            .write()
            .insert(name.to_string(), Arc::clone(&logger));
        if let Some(previous) = previous {
            previous.close(shutdown);
        }
        Ok(logger)
    }

    /// Close every registered logger, draining with the given bound per
    /// logger. Returns the total count of undelivered records.
    pub fn shutdown_all(&self, timeout: Duration) -> usize {
        let drained: Vec<Arc<Logger>> = self.loggers.write().drain().map(|(_, l)| l).collect();
        drained.iter().map(|logger| logger.close(timeout)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::new);

/// Process-wide logger lookup: repeated calls with the same name return
/// the same instance.
pub fn get_logger(name: &str) -> Arc<Logger> {
    REGISTRY.get_or_create(name)
}

/// (Re)configure the process-wide logger registered under `name`.
pub fn configure(name: &str, config: LoggerConfig) -> Result<Arc<Logger>> {
    REGISTRY.configure(name, config)
}

/// Tear down every process-wide logger; returns undelivered record count.
pub fn shutdown_all(timeout: Duration) -> usize {
    REGISTRY.shutdown_all(timeout)
}
