//! The script grammar: an ECMAScript-flavored programming language.
//!
//! Trivia policy: whitespace and comments are skipped by the engine and not
//! represented in the tree, so rule-node children do not tile their parent.
//! Identifier and literal tokens are the leaves.

mod ast;
mod builder;
mod registry;

pub use ast::{
    BlockStatement, DeclarationKind, EmptyStatement, Expression, ExpressionStatement, Identifier,
    IfStatement, Literal, Program, Statement, VariableDeclaration, VariableDeclarator,
};

use pest::Parser as _;
use pest_derive::Parser;

use crate::diagnostics::DiagnosticSink;
use crate::errors::{convert_pest_error, ParseError, SourceContext};

#[derive(Parser)]
#[grammar = "script/grammar.pest"]
struct ScriptParser;

/// Parse script source into a typed tree, discarding advisory diagnostics.
/// Returns `None` for empty input or when the engine rejects the input.
pub fn parse(source: &str) -> Option<Program> {
    let mut sink = DiagnosticSink::new();
    parse_with_diagnostics(source, &mut sink)
}

/// Like [`parse`], but records advisory diagnostics (unmapped productions,
/// malformed literals) into `sink`. Advisory events never affect success.
pub fn parse_with_diagnostics(source: &str, sink: &mut DiagnosticSink) -> Option<Program> {
    try_parse(source, sink).ok()
}

/// Fallible variant for callers that want the rendered failure instead of
/// a bare `None`.
pub fn try_parse(source: &str, sink: &mut DiagnosticSink) -> Result<Program, ParseError> {
    let ctx = SourceContext::new("script", source);
    if source.trim().is_empty() {
        return Err(ParseError::ExternalParse {
            message: "empty input".to_string(),
            src: ctx.to_named_source(),
            span: miette::SourceSpan::new(0.into(), 0),
        });
    }

    let mut pairs =
        ScriptParser::parse(Rule::program, source).map_err(|e| convert_pest_error(e, &ctx))?;
    let program = pairs.next().unwrap(); // pest guarantees the program rule exists

    builder::TreeBuilder::new(ctx, sink).build_program(program)
}
