//! AppLogger Core - configuration wrapper around a telemetry sink
//!
//! This crate centralizes the bootstrap logic services would otherwise
//! duplicate:
//! - Configuration parsing with an injectable fallback store for the
//!   destination key
//! - A telemetry gate that switches emission on or off
//! - Loggers bound to a component (cloud role) name and custom dimensions
//! - Tracers and span scopes that build a correlation tree across calls
//! - Pluggable sinks, including an in-memory sink for tests
//!
//! # Usage
//!
//! ```
//! use applogger_core::{AppLogger, Dimensions};
//!
//! let app = AppLogger::disabled();
//! let logger = app.get_logger("main", Dimensions::new());
//! logger.info("starting");
//!
//! let tracer = app.get_tracer("main", None);
//! tracer.in_span("work", |_span| {
//!     logger.with_context(tracer.context()).info("working");
//! });
//! ```

pub mod config;
pub mod destination;
pub mod emitter;
pub mod errors;
pub mod factory;
pub mod gate;
pub mod logger;
pub mod logging_facility;
pub mod record;
pub mod sink;
pub mod span;
pub mod tracer;

// Re-export commonly used types
pub use applogger_core_types::{schema, CorrelationContext, SpanId, TraceId};
pub use config::{ConfigSource, Configuration, EmptySource, EnvSource, LogLevel, MapSource};
pub use destination::DestinationKey;
pub use errors::{AppLoggerError, EmissionError, ErrorKind, Result};
pub use factory::{AppLogger, AppLoggerBuilder};
pub use gate::TelemetryGate;
pub use logger::{Dimensions, Logger};
pub use record::{DependencyRecord, Envelope, LogRecord, TelemetryRecord};
pub use sink::{MemorySink, NoopSink, TelemetrySink, TracingSink};
pub use span::SpanScope;
pub use tracer::Tracer;
