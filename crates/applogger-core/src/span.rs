//! Timed unit of work
//!
//! A `SpanScope` is closed exactly once: explicitly through
//! [`SpanScope::close`] or implicitly when it is dropped. Dropping covers
//! early returns, `?` propagation and panics, so a span always reports its
//! duration when the gate is open.

use std::cell::Cell;
use std::sync::Arc;
use std::time::{Duration, Instant};

use applogger_core_types::CorrelationContext;
use chrono::{DateTime, Utc};

use crate::emitter::Emitter;
use crate::record::{DependencyRecord, TelemetryRecord};

#[derive(Debug)]
pub struct SpanScope {
    name: String,
    component_name: String,
    context: CorrelationContext,
    start_time: DateTime<Utc>,
    started: Instant,
    duration: Option<Duration>,
    failed: Cell<bool>,
    emitter: Arc<Emitter>,
}

impl SpanScope {
    /// Open a span for `context`, recording the start time
    pub fn open(
        name: impl Into<String>,
        context: CorrelationContext,
        component_name: impl Into<String>,
        emitter: Arc<Emitter>,
    ) -> Self {
        Self {
            name: name.into(),
            component_name: component_name.into(),
            context,
            start_time: Utc::now(),
            started: Instant::now(),
            duration: None,
            failed: Cell::new(false),
            emitter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &CorrelationContext {
        &self.context
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Report the span as unsuccessful when it closes
    pub fn mark_failed(&self) {
        self.failed.set(true);
    }

    pub fn is_failed(&self) -> bool {
        self.failed.get()
    }

    /// Close the span and return its duration
    pub fn close(mut self) -> Duration {
        self.finish()
    }

    fn finish(&mut self) -> Duration {
        if let Some(duration) = self.duration {
            return duration;
        }

        let duration = self.started.elapsed();
        let end_time = Utc::now();
        self.duration = Some(duration);

        if std::thread::panicking() {
            self.failed.set(true);
        }

        self.emitter.emit(TelemetryRecord::Dependency(DependencyRecord {
            name: self.name.clone(),
            component_name: self.component_name.clone(),
            trace_id: self.context.trace_id().clone(),
            span_id: self.context.span_id().clone(),
            parent_span_id: self.context.parent_span_id().cloned(),
            start_time: self.start_time,
            end_time,
            duration_ms: duration.as_secs_f64() * 1000.0,
            success: !self.failed.get(),
        }));

        duration
    }
}

impl Drop for SpanScope {
    fn drop(&mut self) {
        self.finish();
    }
}
