//! Component-bound logger facade

use std::collections::BTreeMap;
use std::sync::Arc;

use applogger_core_types::CorrelationContext;

use crate::config::LogLevel;
use crate::emitter::Emitter;
use crate::record::{LogRecord, TelemetryRecord};

/// Custom dimensions merged into every record a logger emits
pub type Dimensions = BTreeMap<String, String>;

/// Logger bound to a component name and a fixed set of dimensions
///
/// The component name is reported downstream as the cloud role name. When
/// the owning factory's gate is disabled every call is a silent no-op.
#[derive(Debug, Clone)]
pub struct Logger {
    component_name: Arc<str>,
    custom_dimensions: Arc<Dimensions>,
    context: Option<CorrelationContext>,
    emitter: Arc<Emitter>,
}

impl Logger {
    pub(crate) fn new(
        component_name: impl Into<String>,
        custom_dimensions: Dimensions,
        emitter: Arc<Emitter>,
    ) -> Self {
        Self {
            component_name: Arc::from(component_name.into()),
            custom_dimensions: Arc::new(custom_dimensions),
            context: None,
            emitter,
        }
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }

    pub fn custom_dimensions(&self) -> &Dimensions {
        &self.custom_dimensions
    }

    pub fn context(&self) -> Option<&CorrelationContext> {
        self.context.as_ref()
    }

    /// A logger whose records carry the ids of `context`
    pub fn with_context(&self, context: &CorrelationContext) -> Self {
        Self {
            context: Some(context.clone()),
            ..self.clone()
        }
    }

    /// A logger with one more dimension; `self` is left unchanged
    pub fn with_dimension(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut dims = (*self.custom_dimensions).clone();
        dims.insert(key.into(), value.into());
        Self {
            custom_dimensions: Arc::new(dims),
            ..self.clone()
        }
    }

    /// True when a record at `level` would reach the sink
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.emitter.accepts(level)
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.emitter.accepts(level) {
            return;
        }

        let mut record = LogRecord::new(
            level,
            message,
            self.component_name.as_ref(),
            (*self.custom_dimensions).clone(),
        );
        if let Some(context) = &self.context {
            record = record.with_context(context);
        }
        self.emitter.emit(TelemetryRecord::Log(record));
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, message);
    }
}
