//! Sylva turns raw PEG parse results into strongly-typed, position-exact
//! syntax trees, uniformly across source grammars.
//!
//! Each grammar (markup, script) owns its typed node set and registry; all
//! trees satisfy the shared [`node::CstNode`] contract, so the generic
//! utilities in [`node`] work over any grammar's output. One call, one
//! independent immutable tree; advisory diagnostics go to a per-call
//! [`diagnostics::DiagnosticSink`] and never affect success.

pub use crate::diagnostics::{BuildDiagnostic, DiagnosticKind, DiagnosticSink};
pub use crate::errors::{ParseError, SourceContext};
pub use crate::literal::{LiteralValue, RegexLiteral};
pub use crate::node::CstNode;
pub use crate::span::Span;

pub mod diagnostics;
pub mod errors;
pub mod literal;
pub mod markup;
pub mod node;
pub mod script;
pub mod span;

/// Grammar selection for the uniform entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Markup,
    Script,
}

/// Root of a tree from either grammar, for callers that work through the
/// generic [`CstNode`] contract.
#[derive(Debug, Clone, PartialEq)]
pub enum RootNode {
    Markup(markup::Document),
    Script(script::Program),
}

impl CstNode for RootNode {
    fn kind(&self) -> &str {
        match self {
            Self::Markup(doc) => doc.kind(),
            Self::Script(program) => program.kind(),
        }
    }
    fn text(&self) -> &str {
        match self {
            Self::Markup(doc) => doc.text(),
            Self::Script(program) => program.text(),
        }
    }
    fn span(&self) -> Span {
        match self {
            Self::Markup(doc) => doc.span(),
            Self::Script(program) => program.span(),
        }
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        match self {
            Self::Markup(doc) => doc.children(),
            Self::Script(program) => program.children(),
        }
    }
}

/// Parse `source` with the selected grammar. Returns `None` for empty
/// input or when the engine rejects the input.
pub fn parse(source: &str, grammar: Grammar) -> Option<RootNode> {
    let mut sink = DiagnosticSink::new();
    parse_with_diagnostics(source, grammar, &mut sink)
}

/// Like [`parse`], but records advisory diagnostics into `sink`.
pub fn parse_with_diagnostics(
    source: &str,
    grammar: Grammar,
    sink: &mut DiagnosticSink,
) -> Option<RootNode> {
    match grammar {
        Grammar::Markup => markup::parse_with_diagnostics(source, sink).map(RootNode::Markup),
        Grammar::Script => script::parse_with_diagnostics(source, sink).map(RootNode::Script),
    }
}
