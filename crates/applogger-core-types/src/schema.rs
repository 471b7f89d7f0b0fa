//! Canonical schema constants for emitted telemetry and diagnostics
//!
//! These constants keep record field names consistent between the logger,
//! the tracer and the sinks that forward records downstream.

// Record fields
pub const FIELD_SEVERITY: &str = "severity";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_CLOUD_ROLE_NAME: &str = "cloud_role_name";
pub const FIELD_CUSTOM_DIMENSIONS: &str = "custom_dimensions";
pub const FIELD_TRACE_ID: &str = "trace_id";
pub const FIELD_SPAN_ID: &str = "span_id";
pub const FIELD_PARENT_SPAN_ID: &str = "parent_span_id";
pub const FIELD_DEPENDENCY_NAME: &str = "name";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_SUCCESS: &str = "success";
pub const FIELD_RECORD_TYPE: &str = "record_type";

// Diagnostic fields
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_ERR_CODE: &str = "err.code";

// Record types
pub const RECORD_LOG: &str = "log";
pub const RECORD_DEPENDENCY: &str = "dependency";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

/// Component name used when a caller does not supply one
pub const DEFAULT_COMPONENT_NAME: &str = "AppLogger";
