//! Component tracer
//!
//! A tracer owns one node of the correlation tree. Work handed to another
//! component passes `tracer.context()` along; the receiver builds its own
//! tracer from it with [`crate::AppLogger::get_tracer`], which derives a
//! child node instead of sharing the caller's.

use std::sync::Arc;

use applogger_core_types::CorrelationContext;

use crate::emitter::Emitter;
use crate::span::SpanScope;

#[derive(Debug, Clone)]
pub struct Tracer {
    component_name: Arc<str>,
    context: CorrelationContext,
    emitter: Arc<Emitter>,
}

impl Tracer {
    pub(crate) fn new(
        component_name: impl Into<String>,
        context: CorrelationContext,
        emitter: Arc<Emitter>,
    ) -> Self {
        Self {
            component_name: Arc::from(component_name.into()),
            context,
            emitter,
        }
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    /// This tracer's node in the correlation tree
    pub fn context(&self) -> &CorrelationContext {
        &self.context
    }

    /// Open a span on a new child node of this tracer's context
    pub fn span(&self, name: impl Into<String>) -> SpanScope {
        SpanScope::open(
            name,
            self.context.derive_child(),
            self.component_name.as_ref(),
            self.emitter.clone(),
        )
    }

    /// Run `f` inside a span; the span closes however `f` exits
    pub fn in_span<T, F>(&self, name: impl Into<String>, f: F) -> T
    where
        F: FnOnce(&SpanScope) -> T,
    {
        let span = self.span(name);
        f(&span)
    }

    /// Like [`Self::in_span`], marking the span failed when `f` returns `Err`
    ///
    /// The result is returned unchanged.
    pub fn in_span_result<T, E, F>(&self, name: impl Into<String>, f: F) -> Result<T, E>
    where
        F: FnOnce(&SpanScope) -> Result<T, E>,
    {
        let span = self.span(name);
        let result = f(&span);
        if result.is_err() {
            span.mark_failed();
        }
        result
    }
}
