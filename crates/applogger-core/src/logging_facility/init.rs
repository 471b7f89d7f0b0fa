//! Logging initialization module
//!
//! Provides a single initialization point for the process subscriber.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Subscriber profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Bare registry; tests install a capture layer instead
    Test,
}

impl Profile {
    fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "applogger=debug,applogger::telemetry=trace",
            Profile::Production => "applogger=info,applogger::telemetry=trace",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the subscriber
///
/// Only the first call has any effect. `RUST_LOG` overrides the profile's
/// default filter. Telemetry records pass at every level; the factory's
/// configured log level is their only severity filter.
///
/// # Profiles
///
/// - **Development**: Human-readable output at debug level
/// - **Production**: JSON output at info level
/// - **Test**: No output; see [`super::init_test_capture`]
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = || {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()))
        };
        let result = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter())
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_current_span(false)
                .with_env_filter(filter())
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        // Another subscriber (e.g. a test capture) may already be installed.
        let _ = result;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Configuration, EmptySource, LogLevel};
    use crate::logger::Dimensions;
    use crate::logging_facility::test_capture::CaptureLayer;
    use crate::sink::TracingSink;
    use crate::AppLogger;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_init_idempotent() {
        // Multiple calls should not panic
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Production);
    }

    #[test]
    fn test_profile_directives() {
        assert!(Profile::Development
            .default_directive()
            .starts_with("applogger=debug"));
        assert!(Profile::Production
            .default_directive()
            .starts_with("applogger=info"));
        assert_ne!(Profile::Development, Profile::Production);
    }

    #[test]
    fn test_profile_filters_pass_debug_telemetry() {
        for profile in [Profile::Development, Profile::Production] {
            let (layer, capture) = CaptureLayer::new();
            let subscriber = tracing_subscriber::registry()
                .with(EnvFilter::new(profile.default_directive()))
                .with(layer);

            let component = format!("profile_filter_{:?}", profile);
            tracing::subscriber::with_default(subscriber, || {
                let app = AppLogger::builder()
                    .config(
                        Configuration::new()
                            .with_log_level(LogLevel::Debug)
                            .with_destination_key("K1"),
                    )
                    .config_source(EmptySource)
                    .sink(TracingSink)
                    .build()
                    .unwrap();
                let logger = app.get_logger(component.as_str(), Dimensions::new());
                assert!(logger.is_enabled_for(LogLevel::Debug));
                logger.debug("cache warmed");
            });

            let records = capture.telemetry_for(&component);
            assert_eq!(records.len(), 1, "{:?} dropped a debug record", profile);
            assert_eq!(records[0].level, tracing::Level::DEBUG);
            assert_eq!(records[0].message(), Some("cache warmed"));
        }
    }
}
