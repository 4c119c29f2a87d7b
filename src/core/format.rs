//! Record formatters
//!
//! A formatter is a pure `record -> String` function owned by a sink and
//! chosen when the sink is constructed. Two renderings are provided:
//! human-oriented text (optionally colorized) and line-delimited JSON
//! with a fixed key set.

use super::record::LogRecord;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Timestamp rendering used by the formatters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,
    /// ISO 8601 with microseconds
    Iso8601Micros,
    /// RFC 3339 with timezone offset
    Rfc3339,
    /// Unix timestamp in seconds
    Unix,
    /// Unix timestamp in milliseconds
    UnixMillis,
    /// strftime-compatible format string
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => {
                datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
            }
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// True for formats that render as a bare number (kept numeric in JSON).
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }

    fn to_json_value(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::Unix => serde_json::Value::from(datetime.timestamp()),
            TimestampFormat::UnixMillis => serde_json::Value::from(datetime.timestamp_millis()),
            other => serde_json::Value::String(other.format(datetime)),
        }
    }
}

/// Pure record renderer. Implementations must not mutate shared state;
/// the same record must always produce the same text.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;
}

/// Human-oriented single-line text rendering.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    pub timestamp_format: TimestampFormat,
    pub colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            colors: false,
        }
    }

    #[must_use]
    pub fn colored() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            colors: true,
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let level_str = if self.colors {
            format!("{:8}", record.level.name())
                .color(record.level.color_code())
                .to_string()
        } else {
            format!("{:8}", record.level.name())
        };

        let mut line = format!(
            "[{}] [{}] {} - {}",
            self.timestamp_format.format(&record.timestamp),
            level_str,
            record.logger,
            record.message
        );

        if !record.context.is_empty() {
            // sorted for a stable rendering of the unordered mapping
            let mut keys: Vec<&String> = record.context.keys().collect();
            keys.sort();
            for key in keys {
                line.push_str(&format!(" {}={}", key, record.context[key]));
            }
        }
        if let Some(ref correlation) = record.correlation_id {
            line.push_str(&format!(" correlation_id={}", correlation));
        }
        if let Some(ref exception) = record.exception {
            line.push_str(&format!(
                " exception={}: {}",
                exception.type_name, exception.message
            ));
            for frame in &exception.frames {
                line.push_str(&format!(" <- {}", frame));
            }
        }
        line
    }
}

/// Machine-oriented rendering: one JSON object per record with the fixed
/// key set `timestamp, level, logger, message, context, correlation_id,
/// exception`. Every key is always present; `exception` is null when
/// absent.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub timestamp_format: TimestampFormat,
}

impl JsonFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let context: serde_json::Map<String, serde_json::Value> = record
            .context
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json_value()))
            .collect();

        let mut object = serde_json::Map::new();
        object.insert(
            "timestamp".to_string(),
            self.timestamp_format.to_json_value(&record.timestamp),
        );
        object.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.name().to_string()),
        );
        object.insert(
            "logger".to_string(),
            serde_json::Value::String(record.logger.to_string()),
        );
        object.insert(
            "message".to_string(),
            serde_json::Value::String(record.message.clone()),
        );
        object.insert("context".to_string(), serde_json::Value::Object(context));
        object.insert(
            "correlation_id".to_string(),
            record
                .correlation_id
                .as_ref()
                .map(|c| serde_json::Value::String(c.clone()))
                .unwrap_or(serde_json::Value::Null),
        );
        object.insert(
            "exception".to_string(),
            record
                .exception
                .as_ref()
                .map(|e| e.to_json_value())
                .unwrap_or(serde_json::Value::Null),
        );
        serde_json::Value::Object(object).to_string()
    }
}
