//! Correlation types for linking telemetry across call boundaries
//!
//! A correlation tree is a set of `CorrelationContext` nodes sharing one
//! `TraceId`. Every node has its own `SpanId`; every node except the root
//! points at its parent through `parent_span_id`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TRACE_ID_LEN: usize = 32;
const SPAN_ID_LEN: usize = 16;
const TRACEPARENT_VERSION: &str = "00";
const TRACEPARENT_SAMPLED: &str = "01";

fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Identifier shared by every node of one correlation tree
///
/// Rendered as 32 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceId(String);

impl TraceId {
    /// Generate a new random TraceId
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a 32 character hex trace id, rejecting the all-zero id
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.to_ascii_lowercase();
        if !is_lower_hex(&s, TRACE_ID_LEN) || s.bytes().all(|b| b == b'0') {
            return None;
        }
        Some(Self(s))
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a single node in a correlation tree
///
/// Rendered as 16 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanId(String);

impl SpanId {
    /// Generate a new random SpanId
    pub fn new() -> Self {
        let (_, random) = Uuid::new_v4().as_u64_pair();
        Self(format!("{:016x}", random))
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a 16 character hex span id, rejecting the all-zero id
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.to_ascii_lowercase();
        if !is_lower_hex(&s, SPAN_ID_LEN) || s.bytes().all(|b| b == b'0') {
            return None;
        }
        Some(Self(s))
    }
}

impl Default for SpanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SpanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One node of a correlation tree
///
/// Contexts are values: once created they never change. Work that crosses
/// into another component receives a reference to its caller's context and
/// calls [`CorrelationContext::derive_child`] to obtain its own node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationContext {
    trace_id: TraceId,
    span_id: SpanId,
    parent_span_id: Option<SpanId>,
}

impl CorrelationContext {
    /// Start a new tree
    pub fn new_root() -> Self {
        Self {
            trace_id: TraceId::new(),
            span_id: SpanId::new(),
            parent_span_id: None,
        }
    }

    /// Create a child node of `self`
    ///
    /// The child keeps the trace id, gets a fresh span id and records this
    /// node's span id as its parent.
    pub fn derive_child(&self) -> Self {
        Self {
            trace_id: self.trace_id.clone(),
            span_id: SpanId::new(),
            parent_span_id: Some(self.span_id.clone()),
        }
    }

    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    pub fn span_id(&self) -> &SpanId {
        &self.span_id
    }

    pub fn parent_span_id(&self) -> Option<&SpanId> {
        self.parent_span_id.as_ref()
    }

    /// True for the node that started the tree
    pub fn is_root(&self) -> bool {
        self.parent_span_id.is_none()
    }

    /// Render as a W3C `traceparent` header value
    pub fn traceparent(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            TRACEPARENT_VERSION, self.trace_id, self.span_id, TRACEPARENT_SAMPLED
        )
    }

    /// Rebuild the caller's node from a W3C `traceparent` header value
    ///
    /// The returned context has no parent link: the parent lives in another
    /// process. Callers derive a child from it before doing any work.
    pub fn from_traceparent(header: &str) -> Option<Self> {
        let parts: Vec<&str> = header.trim().split('-').collect();
        if parts.len() != 4 || parts[0] != TRACEPARENT_VERSION || !is_lower_hex(parts[3], 2) {
            return None;
        }

        Some(Self {
            trace_id: TraceId::parse(parts[1])?,
            span_id: SpanId::parse(parts[2])?,
            parent_span_id: None,
        })
    }
}
