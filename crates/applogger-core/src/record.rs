//! Records handed to the telemetry sink

use std::collections::BTreeMap;

use applogger_core_types::{CorrelationContext, Sensitive, SpanId, TraceId};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::LogLevel;

/// One log call that passed the gate and the level filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub severity: LogLevel,
    pub message: String,
    #[serde(rename = "cloud_role_name")]
    pub component_name: String,
    pub custom_dimensions: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<TraceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_id: Option<SpanId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<SpanId>,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(
        severity: LogLevel,
        message: impl Into<String>,
        component_name: impl Into<String>,
        custom_dimensions: BTreeMap<String, String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            component_name: component_name.into(),
            custom_dimensions,
            trace_id: None,
            span_id: None,
            parent_span_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the ids of a correlation node
    pub fn with_context(mut self, context: &CorrelationContext) -> Self {
        self.trace_id = Some(context.trace_id().clone());
        self.span_id = Some(context.span_id().clone());
        self.parent_span_id = context.parent_span_id().cloned();
        self
    }
}

/// One closed span, reported as a dependency call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyRecord {
    pub name: String,
    #[serde(rename = "cloud_role_name")]
    pub component_name: String,
    pub trace_id: TraceId,
    pub span_id: SpanId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<SpanId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_ms: f64,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record_type", rename_all = "snake_case")]
pub enum TelemetryRecord {
    Log(LogRecord),
    Dependency(DependencyRecord),
}

impl TelemetryRecord {
    pub fn as_log(&self) -> Option<&LogRecord> {
        match self {
            TelemetryRecord::Log(record) => Some(record),
            TelemetryRecord::Dependency(_) => None,
        }
    }

    pub fn as_dependency(&self) -> Option<&DependencyRecord> {
        match self {
            TelemetryRecord::Dependency(record) => Some(record),
            TelemetryRecord::Log(_) => None,
        }
    }
}

/// A record addressed to the backend named by a destination key
///
/// The key is carried as its instrumentation key and is never serialized
/// or printed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    #[serde(skip)]
    pub instrumentation_key: Sensitive<String>,
    #[serde(flatten)]
    pub record: TelemetryRecord,
}
