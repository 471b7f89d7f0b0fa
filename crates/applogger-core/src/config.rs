//! Configuration surface
//!
//! A `Configuration` is built from a string mapping with the recognized keys
//! `log_level`, `logging_enabled` and `destination_key`, or from a TOML
//! table with the same keys. When the destination key is not configured,
//! the gate consults a [`ConfigSource`] for one of the well-known fallback
//! variables in [`FALLBACK_KEY_VARS`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use applogger_core_types::Sensitive;
use serde::{Deserialize, Serialize};

use crate::errors::{AppLoggerError, Result};

pub const KEY_LOG_LEVEL: &str = "log_level";
pub const KEY_LOGGING_ENABLED: &str = "logging_enabled";
pub const KEY_DESTINATION_KEY: &str = "destination_key";
pub const KEY_INSTRUMENTATION_KEY: &str = "instrumentation_key";

/// Process-wide variables consulted, in order, when the configuration
/// carries no destination key
pub const FALLBACK_KEY_VARS: [&str; 2] = [
    "APPINSIGHTS_INSTRUMENTATIONKEY",
    "APPLICATIONINSIGHTS_CONNECTION_STRING",
];

/// Record severity, ordered `Debug < Info < Warn < Error < Critical`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = AppLoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            _ => Err(AppLoggerError::InvalidLogLevel {
                value: s.to_string(),
            }),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AppLoggerError::InvalidBoolean {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Immutable logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    log_level: LogLevel,
    logging_enabled: bool,
    destination_key: Option<Sensitive<String>>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            logging_enabled: true,
            destination_key: None,
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_logging_enabled(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    pub fn with_destination_key(mut self, key: impl Into<String>) -> Self {
        self.destination_key = Some(Sensitive::new(key.into()));
        self
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    pub fn destination_key(&self) -> Option<&str> {
        self.destination_key.as_ref().map(|k| k.expose().as_str())
    }

    /// Build from a string mapping
    ///
    /// Unknown keys are ignored. `instrumentation_key` is accepted in place
    /// of `destination_key`; when both are present `destination_key` wins.
    ///
    /// # Errors
    ///
    /// Fails on an unrecognized log level or a `logging_enabled` value other
    /// than `"true"`/`"false"`.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let raw = RawConfiguration {
            log_level: map.get(KEY_LOG_LEVEL).cloned(),
            logging_enabled: map
                .get(KEY_LOGGING_ENABLED)
                .cloned()
                .map(BoolOrString::Text),
            destination_key: map.get(KEY_DESTINATION_KEY).cloned(),
            instrumentation_key: map.get(KEY_INSTRUMENTATION_KEY).cloned(),
        };
        raw.into_configuration()
    }

    /// Build from a TOML document with the same keys as [`Self::from_map`]
    ///
    /// `logging_enabled` may be written either as a TOML boolean or as the
    /// string `"true"`/`"false"`.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or on the value errors of [`Self::from_map`].
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let raw: RawConfiguration = toml::from_str(s)?;
        raw.into_configuration()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawConfiguration {
    log_level: Option<String>,
    logging_enabled: Option<BoolOrString>,
    destination_key: Option<String>,
    instrumentation_key: Option<String>,
}

impl RawConfiguration {
    fn into_configuration(self) -> Result<Configuration> {
        let mut config = Configuration::default();

        if let Some(level) = self.log_level {
            config.log_level = level.parse()?;
        }

        config.logging_enabled = match self.logging_enabled {
            Some(BoolOrString::Bool(b)) => b,
            Some(BoolOrString::Text(s)) => parse_bool(KEY_LOGGING_ENABLED, &s)?,
            None => true,
        };

        config.destination_key = self
            .destination_key
            .or(self.instrumentation_key)
            .map(Sensitive::new);

        Ok(config)
    }
}

/// Process-wide named-variable store consulted for the fallback key
pub trait ConfigSource: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// In-memory store, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    vars: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl ConfigSource for MapSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Store with no variables
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySource;

impl ConfigSource for EmptySource {
    fn get(&self, _name: &str) -> Option<String> {
        None
    }
}
