use thiserror::Error;

/// Result type alias using AppLoggerError
pub type Result<T> = std::result::Result<T, AppLoggerError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Configuration
    MissingDestinationKey,
    InvalidDestinationKey,
    InvalidLogLevel,
    InvalidBoolean,
    ConfigParse,

    // Emission
    SinkUnavailable,
    Serialization,
    Rejected,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingDestinationKey => "ERR_MISSING_DESTINATION_KEY",
            ErrorKind::InvalidDestinationKey => "ERR_INVALID_DESTINATION_KEY",
            ErrorKind::InvalidLogLevel => "ERR_INVALID_LOG_LEVEL",
            ErrorKind::InvalidBoolean => "ERR_INVALID_BOOLEAN",
            ErrorKind::ConfigParse => "ERR_CONFIG_PARSE",
            ErrorKind::SinkUnavailable => "ERR_SINK_UNAVAILABLE",
            ErrorKind::Serialization => "ERR_SERIALIZATION",
            ErrorKind::Rejected => "ERR_REJECTED",
        }
    }

    /// True for kinds raised while building a factory
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ErrorKind::MissingDestinationKey
                | ErrorKind::InvalidDestinationKey
                | ErrorKind::InvalidLogLevel
                | ErrorKind::InvalidBoolean
                | ErrorKind::ConfigParse
        )
    }
}

/// Configuration failures
///
/// Raised synchronously while building a gate or factory and never after.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppLoggerError {
    /// Logging is enabled but no key was found in config or fallback store
    #[error("missing destination key")]
    MissingDestinationKey,

    /// A key was found but does not look like an instrumentation key or
    /// connection string
    #[error("invalid destination key: {reason}")]
    InvalidDestinationKey { reason: String },

    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },

    #[error("invalid boolean for {key}: {value} (expected \"true\" or \"false\")")]
    InvalidBoolean { key: String, value: String },

    #[error("configuration parse error: {message}")]
    ConfigParse { message: String },
}

impl AppLoggerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppLoggerError::MissingDestinationKey => ErrorKind::MissingDestinationKey,
            AppLoggerError::InvalidDestinationKey { .. } => ErrorKind::InvalidDestinationKey,
            AppLoggerError::InvalidLogLevel { .. } => ErrorKind::InvalidLogLevel,
            AppLoggerError::InvalidBoolean { .. } => ErrorKind::InvalidBoolean,
            AppLoggerError::ConfigParse { .. } => ErrorKind::ConfigParse,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

impl From<toml::de::Error> for AppLoggerError {
    fn from(err: toml::de::Error) -> Self {
        AppLoggerError::ConfigParse {
            message: err.to_string(),
        }
    }
}

/// Failures reported by a sink while delivering a record
///
/// These never reach the instrumented application: the emitter logs them
/// and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmissionError {
    #[error("telemetry sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("failed to serialize record: {0}")]
    Serialization(String),

    #[error("record rejected by sink: {0}")]
    Rejected(String),
}

impl EmissionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmissionError::SinkUnavailable(_) => ErrorKind::SinkUnavailable,
            EmissionError::Serialization(_) => ErrorKind::Serialization,
            EmissionError::Rejected(_) => ErrorKind::Rejected,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

impl From<serde_json::Error> for EmissionError {
    fn from(err: serde_json::Error) -> Self {
        EmissionError::Serialization(err.to_string())
    }
}
