//! JSON sink
//!
//! Writes each record as a single-line JSON object (JSONL), compatible
//! with log aggregation tooling.

use super::Sink;
use crate::core::error::Result;
use crate::core::format::{Formatter, JsonFormatter};
use crate::core::record::LogRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct JsonSink {
    writer: BufWriter<File>,
    formatter: JsonFormatter,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>, formatter: JsonFormatter) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.into())?;
        Ok(Self {
            writer: BufWriter::new(file),
            formatter,
        })
    }
}

impl Sink for JsonSink {
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.formatter.format(record);
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}

impl Drop for JsonSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
