//! Advisory diagnostics emitted during tree building.
//!
//! These never fail a parse. An unmapped production degrades to a fallback
//! node, a malformed literal degrades to an absent decoded value, and in
//! both cases the builder records a structured event here so callers can
//! see exactly which parts of the tree are degraded.
//!
//! The sink is an ordered, in-memory log threaded by reference through the
//! build. It is deliberately not a global: each parse call owns (or is lent)
//! its own sink, so concurrent parses never interleave events.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// What a single advisory event is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A grammar production with no registered constructor was encountered;
    /// a fallback node stands in for it.
    UnmappedProduction {
        /// Grammar-side production name, e.g. `return_statement`.
        production: String,
        /// Sentinel kind of the fallback node, e.g. `UnsupportedReturnStatement`.
        fallback_kind: String,
    },
    /// A literal's text failed semantic decoding; its raw text is preserved
    /// but the decoded value is absent.
    MalformedLiteral {
        /// Literal category, e.g. `number`, `regex`.
        literal_type: String,
        raw: String,
    },
}

/// One advisory event, with the span of the node it degrades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDiagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

impl BuildDiagnostic {
    /// Human-readable one-liner, for logs and test output.
    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::UnmappedProduction {
                production,
                fallback_kind,
            } => format!(
                "no constructor registered for `{}`; emitted {} at {}..{}",
                production, fallback_kind, self.span.start, self.span.end
            ),
            DiagnosticKind::MalformedLiteral { literal_type, raw } => format!(
                "could not decode {} literal {:?} at {}..{}; raw text kept",
                literal_type, raw, self.span.start, self.span.end
            ),
        }
    }
}

/// Ordered log of advisory events for one build.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    events: Vec<BuildDiagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn unmapped_production(&mut self, production: &str, fallback_kind: &str, span: Span) {
        self.events.push(BuildDiagnostic {
            kind: DiagnosticKind::UnmappedProduction {
                production: production.to_string(),
                fallback_kind: fallback_kind.to_string(),
            },
            span,
        });
    }

    pub(crate) fn malformed_literal(&mut self, literal_type: &str, raw: &str, span: Span) {
        self.events.push(BuildDiagnostic {
            kind: DiagnosticKind::MalformedLiteral {
                literal_type: literal_type.to_string(),
                raw: raw.to_string(),
            },
            span,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildDiagnostic> {
        self.events.iter()
    }

    pub fn into_events(self) -> Vec<BuildDiagnostic> {
        self.events
    }
}
