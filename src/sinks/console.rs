//! Console sink

use super::Sink;
use crate::core::error::Result;
use crate::core::format::{Formatter, TextFormatter};
use crate::core::level::Level;
use crate::core::record::LogRecord;
use std::io::Write;

/// Human-oriented console output. ERROR and above go to stderr, the rest
/// to stdout.
pub struct ConsoleSink {
    formatter: Box<dyn Formatter>,
    stderr_from: Level,
}

impl ConsoleSink {
    pub fn new(formatter: TextFormatter) -> Self {
        Self {
            formatter: Box::new(formatter),
            stderr_from: Level::ERROR,
        }
    }

    /// Use an arbitrary formatter instead of the default text one.
    pub fn with_formatter(formatter: Box<dyn Formatter>) -> Self {
        Self {
            formatter,
            stderr_from: Level::ERROR,
        }
    }

    #[must_use]
    pub fn stderr_from(mut self, level: Level) -> Self {
        self.stderr_from = level;
        self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(TextFormatter::colored())
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.formatter.format(record);
        if record.level >= self.stderr_from {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
