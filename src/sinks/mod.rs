//! Sink implementations
//!
//! A sink pairs a formatter with a write target. Sinks are owned
//! exclusively by the consumer loop; producers never touch them.

pub mod console;
pub mod file;
pub mod json;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use json::JsonSink;

use crate::core::config::SinkConfig;
use crate::core::error::Result;
use crate::core::format::{JsonFormatter, TextFormatter};
use crate::core::record::LogRecord;

pub trait Sink: Send {
    fn write(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Compile a declarative sink selection into a concrete sink. Failures
/// here (e.g. an unwritable path) surface at configure time.
pub fn build_sink(config: &SinkConfig) -> Result<Box<dyn Sink>> {
    match config {
        SinkConfig::Console { colors } => Ok(Box::new(ConsoleSink::new(TextFormatter {
            timestamp_format: Default::default(),
            colors: *colors,
        }))),
        SinkConfig::File {
            path,
            timestamp_format,
        } => Ok(Box::new(FileSink::new(
            path,
            TextFormatter::new().with_timestamp_format(timestamp_format.clone()),
        )?)),
        SinkConfig::Json {
            path,
            timestamp_format,
        } => Ok(Box::new(JsonSink::new(
            path,
            JsonFormatter::new().with_timestamp_format(timestamp_format.clone()),
        )?)),
    }
}
