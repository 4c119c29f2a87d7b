//! Log record assembly
//!
//! A record is built once per log call on the producer side: context is
//! snapshotted, the message is rendered and masked, and the result is
//! immutable from the queue onwards. The sequence number is stamped by
//! the dispatch queue at enqueue time.

use super::context::{self, FieldMap, FieldValue};
use super::error::LoggerError;
use super::level::Level;
use super::masking::MaskingEngine;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Captured failure information attached to a record.
#[derive(Debug, Clone)]
pub struct ExceptionInfo {
    pub type_name: String,
    pub message: String,
    /// Cause chain, outermost first
    pub frames: Vec<String>,
}

impl ExceptionInfo {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            frames: Vec::new(),
        }
    }

    /// Capture an error and its `source()` chain.
    pub fn from_error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        let mut frames = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            frames.push(cause.to_string());
            source = cause.source();
        }
        Self {
            type_name: std::any::type_name::<E>().to_string(),
            message: error.to_string(),
            frames,
        }
    }

    pub(crate) fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "type": self.type_name,
            "message": self.message,
            "frames": self.frames,
        })
    }
}

/// One structured unit of log output. Immutable once built; sinks receive
/// it by shared reference and must not mutate it.
#[derive(Debug)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    /// Monotonic half of the timestamp; latency base for the monitor
    pub(crate) enqueued_at: Instant,
    pub level: Level,
    pub logger: Arc<str>,
    /// Rendered, masked, injection-sanitized message
    pub message: String,
    /// Original arguments, masked, kept for deferred formatting
    pub raw_args: Vec<FieldValue>,
    /// Flattened scope snapshot plus call-site fields, masked
    pub context: FieldMap,
    pub correlation_id: Option<String>,
    pub exception: Option<ExceptionInfo>,
    pub(crate) sequence: u64,
}

impl LogRecord {
    /// Total-order position assigned at enqueue time.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Time since this record entered the dispatch queue.
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.enqueued_at.elapsed()
    }
}

/// How the message text arrives at the builder.
#[derive(Debug)]
pub(crate) enum MessageSource {
    /// Already rendered by the caller (e.g. the logging macros)
    Rendered(String),
    /// Positional `{}` template plus arguments, rendered here
    Template(String, Vec<FieldValue>),
}

/// Render a positional template. `{}` consumes the next argument;
/// `{{`/`}}` escape literal braces. Surplus arguments are ignored.
pub(crate) fn render_template(
    template: &str,
    args: &[FieldValue],
) -> Result<String, LoggerError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.chars().peekable();
    let mut next_arg = 0usize;
    while let Some(c) = chars.next() {
        match c {
            '{' => match chars.peek() {
                Some('{') => {
                    chars.next();
                    out.push('{');
                }
                Some('}') => {
                    chars.next();
                    let value = args.get(next_arg).ok_or_else(|| {
                        LoggerError::formatting(
                            template,
                            format!("missing argument {}", next_arg),
                        )
                    })?;
                    out.push_str(&value.to_string());
                    next_arg += 1;
                }
                _ => {
                    return Err(LoggerError::formatting(
                        template,
                        "only positional '{}' placeholders are supported",
                    ))
                }
            },
            '}' => match chars.peek() {
                Some('}') => {
                    chars.next();
                    out.push('}');
                }
                _ => return Err(LoggerError::formatting(template, "unmatched '}'")),
            },
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Escape line breaks and tabs so a message cannot forge additional
/// log lines in text sinks.
fn sanitize(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Assemble a record. The caller has already checked the level threshold;
/// everything here (snapshot, masking, rendering) only runs for records
/// that will actually be enqueued.
pub(crate) fn build(
    logger: &Arc<str>,
    level: Level,
    message: MessageSource,
    call_fields: FieldMap,
    exception: Option<ExceptionInfo>,
    mask: &MaskingEngine,
) -> LogRecord {
    let (rendered, mut raw_args) = match message {
        MessageSource::Rendered(text) => (text, Vec::new()),
        MessageSource::Template(template, args) => {
            // a bad template never reaches the caller; the record carries
            // a diagnostic naming the template instead
            let rendered = match render_template(&template, &args) {
                Ok(text) => text,
                Err(failure) => failure.to_string(),
            };
            (rendered, args)
        }
    };

    let message = sanitize(&mask.mask_text(&rendered));
    mask.mask_args(&mut raw_args);

    let mut context = context::snapshot();
    for (key, value) in call_fields {
        context.insert(key, value);
    }
    mask.mask_fields(&mut context);

    LogRecord {
        timestamp: Utc::now(),
        enqueued_at: Instant::now(),
        level,
        logger: Arc::clone(logger),
        message,
        raw_args,
        context,
        correlation_id: context::correlation_id(),
        exception,
        sequence: 0,
    }
}
