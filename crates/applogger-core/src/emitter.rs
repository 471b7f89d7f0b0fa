//! Gate-aware dispatch to the sink
//!
//! Every logger and span created by one factory shares one `Emitter`.
//! Emission failures stop here: they are reported as local diagnostics and
//! never returned to the caller.

use std::fmt;
use std::sync::Arc;

use applogger_core_types::Sensitive;
use tracing::warn;

use crate::config::LogLevel;
use crate::gate::TelemetryGate;
use crate::record::{Envelope, TelemetryRecord};
use crate::sink::TelemetrySink;

pub const EMITTER_TARGET: &str = "applogger::emitter";

pub struct Emitter {
    gate: TelemetryGate,
    min_level: LogLevel,
    sink: Arc<dyn TelemetrySink>,
}

impl Emitter {
    pub fn new(gate: TelemetryGate, min_level: LogLevel, sink: Arc<dyn TelemetrySink>) -> Self {
        Self {
            gate,
            min_level,
            sink,
        }
    }

    pub fn gate(&self) -> &TelemetryGate {
        &self.gate
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// True when a log record at `level` would reach the sink
    pub fn accepts(&self, level: LogLevel) -> bool {
        self.gate.is_enabled() && level >= self.min_level
    }

    /// Send one record if the gate is open
    pub fn emit(&self, record: TelemetryRecord) {
        if !self.gate.is_enabled() {
            return;
        }
        let instrumentation_key = self
            .gate
            .destination_key()
            .map(|key| key.instrumentation_key().to_string())
            .unwrap_or_default();
        let envelope = Envelope {
            instrumentation_key: Sensitive::new(instrumentation_key),
            record,
        };

        if let Err(err) = self.sink.send(envelope) {
            warn!(
                target: EMITTER_TARGET,
                error_code = err.code(),
                "dropping telemetry record: {}",
                err
            );
        }
    }

    /// Best-effort flush of the sink
    pub fn flush(&self) {
        if !self.gate.is_enabled() {
            return;
        }
        if let Err(err) = self.sink.flush() {
            warn!(
                target: EMITTER_TARGET,
                error_code = err.code(),
                "telemetry flush failed: {}",
                err
            );
        }
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("gate", &self.gate)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}
