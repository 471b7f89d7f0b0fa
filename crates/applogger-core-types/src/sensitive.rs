//! Sensitive data marker for automatic redaction
//!
//! Destination keys identify a telemetry backend and must never end up in
//! the very logs they configure. `Sensitive<T>` keeps them out of `Debug`
//! and `Display` output.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// A value that formats as `***REDACTED***`
///
/// # Example
///
/// ```
/// use applogger_core_types::Sensitive;
///
/// let key = Sensitive::new("00000000-0000-0000-0000-000000000000");
/// assert_eq!(format!("{:?}", key), "***REDACTED***");
/// assert_eq!(key.expose(), &"00000000-0000-0000-0000-000000000000");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// The wrapped value; never pass it to a formatter
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}
