//! File sink

use super::Sink;
use crate::core::error::Result;
use crate::core::format::{Formatter, TextFormatter};
use crate::core::record::LogRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Buffered append to a single file. Rotation is out of scope.
pub struct FileSink {
    writer: BufWriter<File>,
    formatter: Box<dyn Formatter>,
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, formatter: TextFormatter) -> Result<Self> {
        Self::with_formatter(path, Box::new(formatter))
    }

    pub fn with_formatter(
        path: impl Into<PathBuf>,
        formatter: Box<dyn Formatter>,
    ) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            formatter,
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Sink for FileSink {
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
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
