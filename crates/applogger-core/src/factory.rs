//! AppLogger factory
//!
//! The factory resolves the telemetry gate once and hands out loggers and
//! tracers that share it.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use applogger_core_types::schema::DEFAULT_COMPONENT_NAME;
use applogger_core_types::CorrelationContext;

use crate::config::{ConfigSource, Configuration, EnvSource, LogLevel};
use crate::emitter::Emitter;
use crate::errors::Result;
use crate::gate::TelemetryGate;
use crate::logger::{Dimensions, Logger};
use crate::sink::{NoopSink, TelemetrySink, TracingSink};
use crate::tracer::Tracer;
use crate::{log_op_end, log_op_error, log_op_start};

const OP_CREATE: &str = "create_app_logger";

/// Entry point: builds loggers and tracers from one configuration
///
/// Cloning is cheap; clones share the gate and the sink.
#[derive(Clone)]
pub struct AppLogger {
    emitter: Arc<Emitter>,
}

impl AppLogger {
    /// Build from `config`, falling back to the process environment for the
    /// destination key and writing records through [`TracingSink`]
    ///
    /// # Errors
    ///
    /// Fails when logging is enabled (including when `config` is `None`) and
    /// no valid destination key can be resolved.
    pub fn create(config: Option<Configuration>) -> Result<Self> {
        let builder = Self::builder();
        match config {
            Some(config) => builder.config(config).build(),
            None => builder.build(),
        }
    }

    pub fn builder() -> AppLoggerBuilder {
        AppLoggerBuilder::default()
    }

    /// A factory that never emits and never looks for a key
    pub fn disabled() -> Self {
        Self {
            emitter: Arc::new(Emitter::new(
                TelemetryGate::disabled(),
                LogLevel::default(),
                Arc::new(NoopSink),
            )),
        }
    }

    /// Logger for `component_name` with fixed custom dimensions
    pub fn get_logger(&self, component_name: impl Into<String>, custom_dimensions: Dimensions) -> Logger {
        Logger::new(component_name, custom_dimensions, self.emitter.clone())
    }

    /// Logger named `AppLogger` with no custom dimensions
    pub fn default_logger(&self) -> Logger {
        self.get_logger(DEFAULT_COMPONENT_NAME, Dimensions::new())
    }

    /// Tracer for `component_name`
    ///
    /// Without a parent the tracer starts a new correlation tree. With a
    /// parent the tracer's context is a child of it.
    pub fn get_tracer(
        &self,
        component_name: impl Into<String>,
        parent_context: Option<&CorrelationContext>,
    ) -> Tracer {
        let context = match parent_context {
            Some(parent) => parent.derive_child(),
            None => CorrelationContext::new_root(),
        };
        Tracer::new(component_name, context, self.emitter.clone())
    }

    pub fn is_enabled(&self) -> bool {
        self.emitter.is_enabled()
    }

    pub fn gate(&self) -> &TelemetryGate {
        self.emitter.gate()
    }

    pub fn log_level(&self) -> LogLevel {
        self.emitter.min_level()
    }

    /// Best-effort flush; sink failures are logged, never returned
    pub fn flush(&self) {
        self.emitter.flush();
    }
}

impl Default for AppLogger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for AppLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppLogger")
            .field("emitter", &self.emitter)
            .finish()
    }
}

/// Builder for [`AppLogger`] with injectable fallback store and sink
pub struct AppLoggerBuilder {
    config: Option<Configuration>,
    source: Arc<dyn ConfigSource>,
    sink: Arc<dyn TelemetrySink>,
}

impl Default for AppLoggerBuilder {
    fn default() -> Self {
        Self {
            config: None,
            source: Arc::new(EnvSource),
            sink: Arc::new(TracingSink),
        }
    }
}

impl AppLoggerBuilder {
    pub fn config(mut self, config: Configuration) -> Self {
        self.config = Some(config);
        self
    }

    /// Store consulted for the fallback destination key
    pub fn config_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.source = Arc::new(source);
        self
    }

    pub fn sink(mut self, sink: impl TelemetrySink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Resolve the gate and build the factory
    ///
    /// # Errors
    ///
    /// See [`TelemetryGate::resolve`].
    pub fn build(self) -> Result<AppLogger> {
        let started = Instant::now();
        log_op_start!(OP_CREATE);

        let gate = match TelemetryGate::resolve(self.config.as_ref(), self.source.as_ref()) {
            Ok(gate) => gate,
            Err(err) => {
                log_op_error!(OP_CREATE, err, duration_ms = started.elapsed().as_millis() as u64);
                return Err(err);
            }
        };

        let min_level = self
            .config
            .as_ref()
            .map(Configuration::log_level)
            .unwrap_or_default();
        log_op_end!(
            OP_CREATE,
            duration_ms = started.elapsed().as_millis() as u64,
            enabled = gate.is_enabled(),
            log_level = min_level.as_str()
        );

        Ok(AppLogger {
            emitter: Arc::new(Emitter::new(gate, min_level, self.sink)),
        })
    }
}

impl fmt::Debug for AppLoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppLoggerBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmptySource, MapSource, FALLBACK_KEY_VARS};
    use crate::errors::AppLoggerError;
    use crate::sink::MemorySink;

    #[test]
    fn test_disabled_factory() {
        let app = AppLogger::disabled();
        assert!(!app.is_enabled());
        app.default_logger().critical("nothing happens");
        app.get_tracer("main", None).span("noop").close();
        app.flush();
    }

    #[test]
    fn test_default_is_disabled() {
        assert!(!AppLogger::default().is_enabled());
    }

    #[test]
    fn test_builder_uses_injected_source() {
        let sink = MemorySink::new();
        let app = AppLogger::builder()
            .config_source(MapSource::new().with(FALLBACK_KEY_VARS[0], "K9"))
            .sink(sink.clone())
            .build()
            .unwrap();

        assert!(app.is_enabled());
        assert_eq!(app.gate().destination_key().unwrap().expose(), "K9");
        assert_eq!(app.log_level(), LogLevel::Info);
    }

    #[test]
    fn test_builder_fails_without_key() {
        let err = AppLogger::builder()
            .config_source(EmptySource)
            .sink(MemorySink::new())
            .build()
            .unwrap_err();
        assert_eq!(err, AppLoggerError::MissingDestinationKey);
    }

    #[test]
    fn test_tracer_root_and_child() {
        let app = AppLogger::disabled();
        let a = app.get_tracer("main", None);
        let b = app.get_tracer("package1", Some(a.context()));

        assert!(a.context().is_root());
        assert_eq!(b.context().trace_id(), a.context().trace_id());
        assert_eq!(b.context().parent_span_id(), Some(a.context().span_id()));
        assert_eq!(b.component_name(), "package1");
    }

    #[test]
    fn test_default_logger_name() {
        let app = AppLogger::disabled();
        let logger = app.default_logger();
        assert_eq!(logger.component_name(), "AppLogger");
        assert!(logger.custom_dimensions().is_empty());
    }
}
