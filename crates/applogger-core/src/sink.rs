//! Telemetry sinks
//!
//! A sink is the boundary to the telemetry transport. Batching, retry and
//! network delivery belong behind this trait; the logger and tracer only
//! hand it well-formed, independent envelopes.

use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::config::LogLevel;
use crate::errors::EmissionError;
use crate::record::{DependencyRecord, Envelope, LogRecord, TelemetryRecord};

/// Target of the events written by [`TracingSink`]
pub const TELEMETRY_TARGET: &str = "applogger::telemetry";

/// Receiver of emitted records
///
/// Implementations must be safe to call from many threads at once.
pub trait TelemetrySink: Send + Sync {
    /// Hand one envelope to the transport
    ///
    /// # Errors
    ///
    /// Any delivery failure. Callers never propagate it to application code.
    fn send(&self, envelope: Envelope) -> Result<(), EmissionError>;

    /// Push out anything buffered
    ///
    /// # Errors
    ///
    /// Any delivery failure.
    fn flush(&self) -> Result<(), EmissionError> {
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl TelemetrySink for NoopSink {
    fn send(&self, _envelope: Envelope) -> Result<(), EmissionError> {
        Ok(())
    }
}

/// Writes every envelope as a structured `tracing` event
///
/// Whatever subscriber the process installs (see
/// [`crate::logging_facility::init`]) becomes the transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

macro_rules! log_event {
    ($level:expr, $record:expr, $dims:expr, $critical:expr) => {
        tracing::event!(
            target: TELEMETRY_TARGET,
            $level,
            record_type = applogger_core_types::schema::RECORD_LOG,
            severity = $record.severity.as_str(),
            cloud_role_name = $record.component_name.as_str(),
            custom_dimensions = $dims.as_str(),
            trace_id = $record.trace_id.as_ref().map(|id| id.as_str()),
            span_id = $record.span_id.as_ref().map(|id| id.as_str()),
            parent_span_id = $record.parent_span_id.as_ref().map(|id| id.as_str()),
            critical = $critical,
            "{}",
            $record.message
        )
    };
}

impl TracingSink {
    fn write_log(record: &LogRecord) -> Result<(), EmissionError> {
        let dims = serde_json::to_string(&record.custom_dimensions)?;
        match record.severity {
            LogLevel::Debug => log_event!(Level::DEBUG, record, dims, false),
            LogLevel::Info => log_event!(Level::INFO, record, dims, false),
            LogLevel::Warn => log_event!(Level::WARN, record, dims, false),
            LogLevel::Error => log_event!(Level::ERROR, record, dims, false),
            LogLevel::Critical => log_event!(Level::ERROR, record, dims, true),
        }
        Ok(())
    }

    fn write_dependency(record: &DependencyRecord) {
        tracing::info!(
            target: TELEMETRY_TARGET,
            record_type = applogger_core_types::schema::RECORD_DEPENDENCY,
            name = record.name.as_str(),
            cloud_role_name = record.component_name.as_str(),
            trace_id = record.trace_id.as_str(),
            span_id = record.span_id.as_str(),
            parent_span_id = record.parent_span_id.as_ref().map(|id| id.as_str()),
            duration_ms = record.duration_ms,
            success = record.success,
        );
    }
}

impl TelemetrySink for TracingSink {
    fn send(&self, envelope: Envelope) -> Result<(), EmissionError> {
        match &envelope.record {
            TelemetryRecord::Log(record) => Self::write_log(record),
            TelemetryRecord::Dependency(record) => {
                Self::write_dependency(record);
                Ok(())
            }
        }
    }
}

/// Keeps envelopes in memory
///
/// Clones share the same buffer, so a test can hand one clone to a factory
/// and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    envelopes: Arc<Mutex<Vec<Envelope>>>,
    failure: Arc<Mutex<Option<EmissionError>>>,
    flushes: Arc<Mutex<usize>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `send` and `flush` fail with `error`, or
    /// succeed again with `None`
    pub fn fail_with(&self, error: Option<EmissionError>) {
        self.failure.lock().map(|mut f| *f = error).ok();
    }

    pub fn envelopes(&self) -> Vec<Envelope> {
        self.envelopes.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn records(&self) -> Vec<TelemetryRecord> {
        self.envelopes().into_iter().map(|e| e.record).collect()
    }

    pub fn logs(&self) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                TelemetryRecord::Log(log) => Some(log),
                TelemetryRecord::Dependency(_) => None,
            })
            .collect()
    }

    pub fn dependencies(&self) -> Vec<DependencyRecord> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                TelemetryRecord::Dependency(dep) => Some(dep),
                TelemetryRecord::Log(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.envelopes.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.lock().map(|f| *f).unwrap_or_default()
    }

    pub fn clear(&self) {
        self.envelopes.lock().map(|mut e| e.clear()).ok();
    }

    fn current_failure(&self) -> Option<EmissionError> {
        self.failure.lock().ok().and_then(|f| f.clone())
    }
}

impl TelemetrySink for MemorySink {
    fn send(&self, envelope: Envelope) -> Result<(), EmissionError> {
        if let Some(err) = self.current_failure() {
            return Err(err);
        }
        self.envelopes
            .lock()
            .map(|mut e| e.push(envelope))
            .map_err(|_| EmissionError::SinkUnavailable("memory sink poisoned".to_string()))
    }

    fn flush(&self) -> Result<(), EmissionError> {
        if let Some(err) = self.current_failure() {
            return Err(err);
        }
        self.flushes.lock().map(|mut f| *f += 1).ok();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applogger_core_types::Sensitive;
    use std::collections::BTreeMap;

    fn envelope(message: &str) -> Envelope {
        Envelope {
            instrumentation_key: Sensitive::new("K1".to_string()),
            record: TelemetryRecord::Log(LogRecord::new(
                LogLevel::Info,
                message,
                "AppLogger",
                BTreeMap::new(),
            )),
        }
    }

    #[test]
    fn test_memory_sink_captures_and_clears() {
        let sink = MemorySink::new();
        sink.send(envelope("a")).unwrap();
        sink.send(envelope("b")).unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.logs()[1].message, "b");
        assert!(sink.dependencies().is_empty());

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_memory_sink_clones_share_buffer() {
        let sink = MemorySink::new();
        let view = sink.clone();
        sink.send(envelope("a")).unwrap();
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_memory_sink_failure_switch() {
        let sink = MemorySink::new();
        sink.fail_with(Some(EmissionError::SinkUnavailable("down".into())));
        assert!(sink.send(envelope("a")).is_err());
        assert!(sink.flush().is_err());
        assert!(sink.is_empty());

        sink.fail_with(None);
        sink.send(envelope("b")).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.flush_count(), 1);
    }

    #[test]
    fn test_noop_and_tracing_sinks_accept_records() {
        assert!(NoopSink.send(envelope("a")).is_ok());
        assert!(TracingSink.send(envelope("a")).is_ok());
        assert!(TracingSink.flush().is_ok());
    }
}
