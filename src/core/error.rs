//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A level name or numeric value is already registered
    #[error("level '{name}' ({value}) is already registered")]
    DuplicateLevel { name: String, value: u8 },

    /// Level lookup by name or value failed
    #[error("unknown log level: '{0}'")]
    UnknownLevel(String),

    /// The level registry no longer accepts registrations
    #[error("level registry is sealed; register levels before the first logger is built")]
    RegistryClosed,

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A scope token was popped out of LIFO order
    #[error("scope token does not match the innermost scope")]
    ScopeMismatch,

    /// Dispatch queue full under the Raise overflow policy
    #[error("dispatch queue full: {capacity} records buffered")]
    QueueFull { capacity: usize },

    /// The logger has begun shutting down
    #[error("logger is closed")]
    LoggerClosed,

    /// A sink failed to write a record; isolated per sink
    #[error("sink '{sink}' write failed: {message}")]
    SinkWrite { sink: String, message: String },

    /// A message template could not be rendered against its arguments
    #[error("message template {template:?} could not be rendered: {reason}")]
    Formatting { template: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a template formatting error
    pub fn formatting(template: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::Formatting {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// True for errors that must surface at configure time rather than
    /// being swallowed by the pipeline.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LoggerError::DuplicateLevel { .. }
                | LoggerError::UnknownLevel(_)
                | LoggerError::RegistryClosed
                | LoggerError::InvalidConfiguration { .. }
        )
    }
}
