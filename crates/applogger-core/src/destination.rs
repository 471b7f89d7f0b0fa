//! Destination key validation
//!
//! A destination key is opaque to this crate: its meaning belongs to the
//! telemetry backend. Two shapes are recognized. A bare key (usually an
//! instrumentation key GUID) is any non-empty token without whitespace or
//! control characters. A connection string such as
//! `InstrumentationKey=<key>;IngestionEndpoint=https://...` is a list of
//! `;`-separated `Name=Value` pairs that must include a non-empty
//! `InstrumentationKey`.

use std::fmt;

use applogger_core_types::Sensitive;

use crate::errors::{AppLoggerError, Result};

const INSTRUMENTATION_KEY_FIELD: &str = "InstrumentationKey";

fn invalid(reason: &str) -> AppLoggerError {
    AppLoggerError::InvalidDestinationKey {
        reason: reason.to_string(),
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// A validated destination key
#[derive(Clone, PartialEq, Eq)]
pub struct DestinationKey {
    raw: Sensitive<String>,
    instrumentation_key: Sensitive<String>,
}

impl DestinationKey {
    /// Validate a key taken from configuration or the fallback store
    ///
    /// # Errors
    ///
    /// Returns `InvalidDestinationKey` when the value is empty, contains
    /// whitespace or control characters, or is a connection string with a
    /// malformed segment or no `InstrumentationKey`.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(invalid("key is empty"));
        }

        let instrumentation_key = if trimmed.contains('=') {
            Self::key_from_connection_string(trimmed)?
        } else if is_token(trimmed) {
            trimmed.to_string()
        } else {
            return Err(invalid("key contains whitespace or control characters"));
        };

        Ok(Self {
            raw: Sensitive::new(trimmed.to_string()),
            instrumentation_key: Sensitive::new(instrumentation_key),
        })
    }

    fn key_from_connection_string(value: &str) -> Result<String> {
        let mut found = None;
        for segment in value.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (name, field) = segment
                .split_once('=')
                .ok_or_else(|| invalid("connection string segment is not Name=Value"))?;
            if name.trim().eq_ignore_ascii_case(INSTRUMENTATION_KEY_FIELD) {
                found = Some(field.trim());
            }
        }

        match found {
            Some(field) if is_token(field) => Ok(field.to_string()),
            Some(_) => Err(invalid("InstrumentationKey is empty or malformed")),
            None => Err(invalid("connection string has no InstrumentationKey")),
        }
    }

    /// The key as it was configured, trimmed
    pub fn expose(&self) -> &str {
        self.raw.expose()
    }

    /// The instrumentation key, extracted from a connection string if needed
    pub fn instrumentation_key(&self) -> &str {
        self.instrumentation_key.expose()
    }

    pub fn is_connection_string(&self) -> bool {
        self.raw.expose().contains('=')
    }
}

impl fmt::Debug for DestinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationKey")
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUID: &str = "0d6e7a34-5f0f-4b1e-9b43-1f2f6a0c2b11";

    #[test]
    fn test_bare_key() {
        let key = DestinationKey::parse(GUID).unwrap();
        assert_eq!(key.instrumentation_key(), GUID);
        assert!(!key.is_connection_string());

        let key = DestinationKey::parse("  K1 ").unwrap();
        assert_eq!(key.expose(), "K1");
    }

    #[test]
    fn test_connection_string() {
        let conn = format!(
            "InstrumentationKey={};IngestionEndpoint=https://example.invalid/;",
            GUID
        );
        let key = DestinationKey::parse(&conn).unwrap();
        assert_eq!(key.instrumentation_key(), GUID);
        assert!(key.is_connection_string());
        assert_eq!(key.expose(), conn);
    }

    #[test]
    fn test_connection_string_field_name_is_case_insensitive() {
        let key = DestinationKey::parse(&format!("instrumentationkey = {}", GUID)).unwrap();
        assert_eq!(key.instrumentation_key(), GUID);
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert!(DestinationKey::parse("").is_err());
        assert!(DestinationKey::parse("   ").is_err());
        assert!(DestinationKey::parse("two words").is_err());
        assert!(DestinationKey::parse("tab\tkey").is_err());
    }

    #[test]
    fn test_rejects_bad_connection_strings() {
        let err = DestinationKey::parse("IngestionEndpoint=https://example.invalid/").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidDestinationKey);
        assert!(DestinationKey::parse("InstrumentationKey=").is_err());
        assert!(DestinationKey::parse(&format!("InstrumentationKey={};junk", GUID)).is_err());
    }

    #[test]
    fn test_error_does_not_leak_key() {
        let err = DestinationKey::parse("InstrumentationKey=secret value").unwrap_err();
        assert!(!err.to_string().contains("secret"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = DestinationKey::parse(GUID).unwrap();
        assert!(!format!("{:?}", key).contains(GUID));
    }
}
