//! Logging macros for ergonomic message formatting.
//!
//! These macros render with `format!` semantics and hand the finished
//! string to the logger, plus a `fields!` helper for building context
//! mappings.
//!
//! # Examples
//!
//! ```
//! use logpipe::prelude::*;
//! use logpipe::{fields, info, success};
//!
//! let logger = Logger::builder("example").build().unwrap();
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port);
//! success!(logger, "startup complete");
//!
//! let _scope = logger.bind(fields! { "component" => "boot" });
//! info!(logger, "configured");
//! ```

/// Log a message at an explicit level with automatic formatting.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::TRACE, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::INFO, $($arg)+)
    };
}

/// Log a success-level message.
#[macro_export]
macro_rules! success {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::SUCCESS, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::WARNING, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::ERROR, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::CRITICAL, $($arg)+)
    };
}

/// Build a [`FieldMap`](crate::FieldMap) from `key => value` pairs.
#[macro_export]
macro_rules! fields {
    () => { $crate::FieldMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::FieldMap::new();
        $(map.insert($key.to_string(), $crate::FieldValue::from($value));)+
        map
    }};
}
