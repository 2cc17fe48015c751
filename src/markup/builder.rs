//! Tree builder for the markup grammar.
//!
//! Same engine shape as the script builder: depth-first over the pairs,
//! registry dispatch per production, fallback nodes for unmapped
//! productions, hard failure when a mandatory child cannot be built.
//! Marker and trivia tokens become explicit children so block spans tile.

use pest::iterators::Pair;

use super::ast::{
    Block, CodeDelimiter, CodeSpan, CodeText, Document, Emphasis, EmphasisMarker, Heading,
    HeadingMarker, Inline, Paragraph, StrayMarker, Strong, Whitespace, Word,
};
use super::registry;
use super::Rule;
use crate::diagnostics::DiagnosticSink;
use crate::errors::{ParseError, SourceContext};
use crate::node::{CstNode as _, UnsupportedNode};
use crate::span::Span;

pub(crate) struct TreeBuilder<'a> {
    pub(crate) ctx: SourceContext,
    pub(crate) sink: &'a mut DiagnosticSink,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(ctx: SourceContext, sink: &'a mut DiagnosticSink) -> Self {
        Self { ctx, sink }
    }

    pub(crate) fn build_document(&mut self, pair: Pair<'_, Rule>) -> Result<Document, ParseError> {
        let span = Span::from_pest(pair.as_span());
        let text = pair.as_str().to_string();
        let children = pair
            .into_inner()
            .filter(|p| p.as_rule() != Rule::EOI)
            .map(|p| build_block(self, p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Document {
            children,
            text,
            span,
        })
    }
}

pub(crate) fn build_block(
    builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Block, ParseError> {
    match registry::blocks().get(&pair.as_rule()) {
        Some(construct) => construct(builder, pair),
        None => Ok(Block::Unsupported(fallback(builder, pair))),
    }
}

pub(crate) fn build_inline(
    builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    match registry::inlines().get(&pair.as_rule()) {
        Some(construct) => construct(builder, pair),
        None => Ok(Inline::Unsupported(fallback(builder, pair))),
    }
}

fn fallback(builder: &mut TreeBuilder<'_>, pair: Pair<'_, Rule>) -> UnsupportedNode {
    let production = format!("{:?}", pair.as_rule());
    let span = Span::from_pest(pair.as_span());
    let node = UnsupportedNode::new(&production, pair.as_str(), span);
    builder
        .sink
        .unmapped_production(&production, node.kind(), span);
    node
}

// --- Block constructors ---

pub(crate) fn build_heading(
    builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Block, ParseError> {
    let span = Span::from_pest(pair.as_span());
    let text = pair.as_str().to_string();
    let mut inner = pair.into_inner();

    let marker_pair = inner
        .next()
        .ok_or_else(|| ParseError::missing_child(&builder.ctx, "Heading", "heading marker", span))?;
    if marker_pair.as_rule() != Rule::heading_marker {
        return Err(ParseError::malformed(
            &builder.ctx,
            "heading marker",
            marker_pair.as_str(),
            Span::from_pest(marker_pair.as_span()),
        ));
    }
    // Depth comes straight off the marker terminal; the grammar bounds it
    // to 1..=6 hash characters.
    let depth = marker_pair.as_str().len() as u8;

    let mut children = vec![build_inline(builder, marker_pair)?];
    for p in inner {
        children.push(build_inline(builder, p)?);
    }

    Ok(Block::Heading(Heading {
        depth,
        children,
        text,
        span,
    }))
}

pub(crate) fn build_paragraph(
    builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Block, ParseError> {
    let span = Span::from_pest(pair.as_span());
    let text = pair.as_str().to_string();
    let children = pair
        .into_inner()
        .map(|p| build_inline(builder, p))
        .collect::<Result<Vec<_>, _>>()?;
    if children.is_empty() {
        return Err(ParseError::missing_child(
            &builder.ctx,
            "Paragraph",
            "inline content",
            span,
        ));
    }
    Ok(Block::Paragraph(Paragraph {
        children,
        text,
        span,
    }))
}

// --- Inline constructors ---

pub(crate) fn build_strong(
    builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    let span = Span::from_pest(pair.as_span());
    let text = pair.as_str().to_string();
    let children = pair
        .into_inner()
        .map(|p| build_inline(builder, p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Inline::Strong(Strong {
        children,
        text,
        span,
    }))
}

pub(crate) fn build_star_emphasis(
    builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    emphasis_node(builder, pair, '*')
}

pub(crate) fn build_underscore_emphasis(
    builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    emphasis_node(builder, pair, '_')
}

fn emphasis_node(
    builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
    marker: char,
) -> Result<Inline, ParseError> {
    let span = Span::from_pest(pair.as_span());
    let text = pair.as_str().to_string();
    let children = pair
        .into_inner()
        .map(|p| build_inline(builder, p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Inline::Emphasis(Emphasis {
        marker,
        children,
        text,
        span,
    }))
}

pub(crate) fn build_code_span(
    builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    let span = Span::from_pest(pair.as_span());
    let text = pair.as_str().to_string();
    let children = pair
        .into_inner()
        .map(|p| build_inline(builder, p))
        .collect::<Result<Vec<_>, _>>()?;
    // A code span without its verbatim text is unusable; fail rather than
    // emit a hollow node.
    if !children.iter().any(|c| matches!(c, Inline::CodeText(_))) {
        return Err(ParseError::missing_child(
            &builder.ctx,
            "CodeSpan",
            "code text",
            span,
        ));
    }
    Ok(Inline::CodeSpan(CodeSpan {
        children,
        text,
        span,
    }))
}

// --- Token constructors ---
//
// Each reads text and span from the terminal pair itself; an enclosing
// production never widens a token's boundaries.

pub(crate) fn build_heading_marker(
    _builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    Ok(Inline::HeadingMarker(HeadingMarker {
        depth: pair.as_str().len() as u8,
        text: pair.as_str().to_string(),
        span: Span::from_pest(pair.as_span()),
    }))
}

pub(crate) fn build_emphasis_marker(
    _builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    Ok(Inline::EmphasisMarker(EmphasisMarker {
        text: pair.as_str().to_string(),
        span: Span::from_pest(pair.as_span()),
    }))
}

pub(crate) fn build_code_delimiter(
    _builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    Ok(Inline::CodeDelimiter(CodeDelimiter {
        text: pair.as_str().to_string(),
        span: Span::from_pest(pair.as_span()),
    }))
}

pub(crate) fn build_code_text(
    _builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    Ok(Inline::CodeText(CodeText {
        text: pair.as_str().to_string(),
        span: Span::from_pest(pair.as_span()),
    }))
}

pub(crate) fn build_word(
    _builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    Ok(Inline::Word(Word {
        text: pair.as_str().to_string(),
        span: Span::from_pest(pair.as_span()),
    }))
}

pub(crate) fn build_whitespace(
    _builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    Ok(Inline::Whitespace(Whitespace {
        text: pair.as_str().to_string(),
        span: Span::from_pest(pair.as_span()),
    }))
}

pub(crate) fn build_stray_marker(
    _builder: &mut TreeBuilder<'_>,
    pair: Pair<'_, Rule>,
) -> Result<Inline, ParseError> {
    Ok(Inline::StrayMarker(StrayMarker {
        text: pair.as_str().to_string(),
        span: Span::from_pest(pair.as_span()),
    }))
}
