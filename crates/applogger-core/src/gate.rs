//! Telemetry gate
//!
//! The gate decides once, at construction, whether anything reaches the
//! sink, and holds the destination key records are attributed with.

use tracing::{debug, warn};

use crate::config::{ConfigSource, Configuration, FALLBACK_KEY_VARS};
use crate::destination::DestinationKey;
use crate::errors::{AppLoggerError, Result};

/// Where the destination key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Configuration,
    /// Name of the fallback variable that supplied the key
    Fallback(&'static str),
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Configuration => f.write_str("configuration"),
            KeySource::Fallback(var) => write!(f, "fallback variable {}", var),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryGate {
    enabled: bool,
    destination_key: Option<DestinationKey>,
    key_source: Option<KeySource>,
}

impl TelemetryGate {
    /// Resolve the gate from configuration and the fallback store
    ///
    /// With no configuration at all the gate behaves as if logging were
    /// enabled. When logging is enabled the key is taken from configuration
    /// first, then from the first non-empty variable of
    /// [`FALLBACK_KEY_VARS`] in `source`. When logging is disabled the
    /// fallback store is never consulted and a malformed configured key is
    /// dropped with a warning.
    ///
    /// # Errors
    ///
    /// `MissingDestinationKey` when logging is enabled and no key can be
    /// found; `InvalidDestinationKey` when the key found is malformed.
    pub fn resolve(config: Option<&Configuration>, source: &dyn ConfigSource) -> Result<Self> {
        let default_config = Configuration::default();
        let config = config.unwrap_or(&default_config);

        if !config.logging_enabled() {
            let destination_key = match config.destination_key().map(DestinationKey::parse) {
                Some(Ok(key)) => Some(key),
                Some(Err(err)) => {
                    warn!(err.code = err.code(), "ignoring malformed destination key: {}", err);
                    None
                }
                None => None,
            };
            let key_source = destination_key.as_ref().map(|_| KeySource::Configuration);
            debug!(enabled = false, "telemetry gate resolved");
            return Ok(Self {
                enabled: false,
                destination_key,
                key_source,
            });
        }

        let (raw, key_source) = match config.destination_key() {
            Some(key) => (key.to_string(), KeySource::Configuration),
            None => Self::lookup_fallback(source).ok_or(AppLoggerError::MissingDestinationKey)?,
        };

        let destination_key = DestinationKey::parse(&raw)?;
        debug!(enabled = true, key_source = %key_source, "telemetry gate resolved");

        Ok(Self {
            enabled: true,
            destination_key: Some(destination_key),
            key_source: Some(key_source),
        })
    }

    fn lookup_fallback(source: &dyn ConfigSource) -> Option<(String, KeySource)> {
        FALLBACK_KEY_VARS.iter().find_map(|var| {
            source
                .get(var)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (value, KeySource::Fallback(*var)))
        })
    }

    /// A gate that never emits and needs no key
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            destination_key: None,
            key_source: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn destination_key(&self) -> Option<&DestinationKey> {
        self.destination_key.as_ref()
    }

    pub fn key_source(&self) -> Option<KeySource> {
        self.key_source
    }
}
