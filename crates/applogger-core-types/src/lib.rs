//! Core types shared across AppLogger facilities
//!
//! This crate provides foundational types used by the logger, the tracer
//! and the telemetry records they emit:
//!
//! - **Correlation types**: TraceId, SpanId, CorrelationContext
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys for emitted records

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{CorrelationContext, SpanId, TraceId};
pub use sensitive::Sensitive;
