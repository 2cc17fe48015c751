//! Sylva error handling.
//!
//! Hard failures only: everything in [`ParseError`] aborts the call that
//! raised it. Advisory conditions (unmapped productions, malformed literals)
//! live in [`crate::diagnostics`] instead and never abort anything.

use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Named source text for error rendering.
///
/// Carries the source name and full content so miette can render a labeled
/// snippet for any span in a [`ParseError`].
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to a `NamedSource` for attachment to a [`ParseError`].
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

/// A failure that terminates the parse that raised it.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    /// The external PEG engine rejected the input outright. There is no
    /// partial structure to salvage; the whole call fails.
    #[error("syntax error: {message}")]
    #[diagnostic(code(sylva::external_parse))]
    ExternalParse {
        message: String,
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("input rejected here")]
        span: SourceSpan,
    },

    /// An inverted offset pair reached span construction. Defensive: should
    /// never trigger on well-formed engine output.
    #[error("invalid span: start {start} exceeds end {end}")]
    #[diagnostic(code(sylva::invalid_span))]
    InvalidSpan { start: usize, end: usize },

    /// A child production the enclosing construct cannot be built without
    /// failed to produce a usable node. Propagates upward; a parent is never
    /// emitted with a silently missing mandatory field.
    #[error("missing required `{element}` while building {parent}")]
    #[diagnostic(code(sylva::missing_required_child))]
    MissingRequiredChild {
        element: String,
        parent: String,
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("within this construct")]
        span: SourceSpan,
    },

    /// A terminal's text does not match any shape its rule permits.
    /// Defensive: the grammar should make this unreachable.
    #[error("malformed {construct}: {found:?}")]
    #[diagnostic(code(sylva::malformed_construct))]
    MalformedConstruct {
        construct: String,
        found: String,
        #[source_code]
        src: Arc<NamedSource<String>>,
        #[label("unexpected text")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub(crate) fn missing_child(
        ctx: &SourceContext,
        parent: &str,
        element: &str,
        span: crate::span::Span,
    ) -> Self {
        ParseError::MissingRequiredChild {
            element: element.to_string(),
            parent: parent.to_string(),
            src: ctx.to_named_source(),
            span: span.into(),
        }
    }

    pub(crate) fn malformed(
        ctx: &SourceContext,
        construct: &str,
        found: &str,
        span: crate::span::Span,
    ) -> Self {
        ParseError::MalformedConstruct {
            construct: construct.to_string(),
            found: found.to_string(),
            src: ctx.to_named_source(),
            span: span.into(),
        }
    }
}

/// Convert a pest error into [`ParseError::ExternalParse`], preserving the
/// engine's reported location as a labeled span.
pub(crate) fn convert_pest_error<R: pest::RuleType>(
    error: pest::error::Error<R>,
    ctx: &SourceContext,
) -> ParseError {
    let (start, end) = match error.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos),
        pest::error::InputLocation::Span((start, end)) => (start, end),
    };
    let message = error.variant.message().to_string();
    ParseError::ExternalParse {
        message,
        src: ctx.to_named_source(),
        span: SourceSpan::new(start.into(), end - start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_context_builds_named_source() {
        let ctx = SourceContext::new("test.src", "var a = 1;");
        let src = ctx.to_named_source();
        assert_eq!(src.name(), "test.src");
    }

    #[test]
    fn missing_child_reports_parent_and_element() {
        let ctx = SourceContext::new("test.src", "if (x)");
        let err = ParseError::missing_child(
            &ctx,
            "IfStatement",
            "consequent",
            crate::span::Span { start: 0, end: 6 },
        );
        assert!(err.to_string().contains("consequent"));
        assert!(err.to_string().contains("IfStatement"));
    }
}
