//! The markup grammar: a markdown-flavored document language.
//!
//! Trivia policy: spacing and markers are explicit tokens, so the children
//! of every block tile its span and leaf text concatenates back to the
//! covered source region. Newlines between blocks are the one exception;
//! they are consumed at document level and not represented.

mod ast;
mod builder;
mod registry;

pub use ast::{
    Block, CodeDelimiter, CodeSpan, CodeText, Document, Emphasis, EmphasisMarker, Heading,
    HeadingMarker, Inline, Paragraph, StrayMarker, Strong, Whitespace, Word,
};

use pest::Parser as _;
use pest_derive::Parser;

use crate::diagnostics::DiagnosticSink;
use crate::errors::{convert_pest_error, ParseError, SourceContext};

#[derive(Parser)]
#[grammar = "markup/grammar.pest"]
struct MarkupParser;

/// Parse markup source into a typed tree, discarding advisory diagnostics.
/// Returns `None` for empty input or when the engine rejects the input.
pub fn parse(source: &str) -> Option<Document> {
    let mut sink = DiagnosticSink::new();
    parse_with_diagnostics(source, &mut sink)
}

/// Like [`parse`], but records advisory diagnostics into `sink`.
pub fn parse_with_diagnostics(source: &str, sink: &mut DiagnosticSink) -> Option<Document> {
    try_parse(source, sink).ok()
}

/// Fallible variant for callers that want the rendered failure instead of
/// a bare `None`.
pub fn try_parse(source: &str, sink: &mut DiagnosticSink) -> Result<Document, ParseError> {
    let ctx = SourceContext::new("markup", source);
    if source.trim().is_empty() {
        return Err(ParseError::ExternalParse {
            message: "empty input".to_string(),
            src: ctx.to_named_source(),
            span: miette::SourceSpan::new(0.into(), 0),
        });
    }

    let mut pairs =
        MarkupParser::parse(Rule::document, source).map_err(|e| convert_pest_error(e, &ctx))?;
    let document = pairs.next().unwrap(); // pest guarantees the document rule exists

    builder::TreeBuilder::new(ctx, sink).build_document(document)
}
