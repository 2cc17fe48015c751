//! The base contract every Sylva tree satisfies, plus generic utilities
//! that work uniformly over any grammar's output.
//!
//! Typed node sets (markup blocks, script statements, ...) are never
//! structurally related across grammars. What they share is [`CstNode`]:
//! a kind tag, the exact source text spanned, a span, and an ordered child
//! view. That is enough for span lookup, text extraction, tree dumps, and
//! the structural invariant checks below.

use thiserror::Error;

use crate::span::Span;

/// Base contract for every node in a Sylva tree.
///
/// Token (leaf) nodes have no children and their `text` equals the source
/// substring at their span exactly. Rule nodes expose an ordered sequence
/// of children, each contained in the parent's span and mutually
/// non-overlapping. Whether children tile the parent with no gaps is a
/// per-grammar trivia policy, not part of this contract.
pub trait CstNode {
    /// The kind tag of this node (e.g. `Heading`, `VariableDeclaration`).
    /// Open set: fallback nodes carry `Unsupported`-prefixed kinds.
    fn kind(&self) -> &str;

    /// The exact source text covered by this node.
    fn text(&self) -> &str;

    fn span(&self) -> Span;

    /// Ordered child view for generic traversal. Empty for tokens.
    fn children(&self) -> Vec<&dyn CstNode> {
        Vec::new()
    }

    /// Whether this node is a leaf token, as opposed to a rule node that
    /// happens to have no children.
    fn is_token(&self) -> bool {
        false
    }
}

/// Fallback node standing in for a production with no registered
/// constructor. Carries the sentinel kind, the production's full raw text,
/// and its span, so the surrounding tree stays gap-free for structural
/// purposes while remaining visibly degraded.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnsupportedNode {
    kind: String,
    pub text: String,
    pub span: Span,
}

impl UnsupportedNode {
    pub(crate) fn new(production: &str, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind: sentinel_kind(production),
            text: text.into(),
            span,
        }
    }
}

impl CstNode for UnsupportedNode {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn span(&self) -> Span {
        self.span
    }
}

/// Sentinel kind for a fallback node: `Unsupported` plus the production
/// name in pascal case (`return_statement` -> `UnsupportedReturnStatement`).
pub fn sentinel_kind(production: &str) -> String {
    format!("Unsupported{}", pascal_case(production))
}

fn pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Indented one-node-per-line dump of a tree, for debugging and snapshots.
///
/// Rule nodes print `Kind @ start..end`; tokens also print their text.
pub fn dump(node: &dyn CstNode) -> String {
    let mut out = String::new();
    dump_into(node, 0, &mut out);
    out
}

fn dump_into(node: &dyn CstNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    let span = node.span();
    out.push_str(node.kind());
    out.push_str(&format!(" @ {}..{}", span.start, span.end));
    if node.is_token() {
        out.push_str(&format!(" {:?}", node.text()));
    }
    out.push('\n');
    for child in node.children() {
        dump_into(child, depth + 1, out);
    }
}

/// The deepest node whose span contains `offset`, or `None` if the offset
/// falls outside the root.
pub fn node_at_offset<'a>(node: &'a dyn CstNode, offset: usize) -> Option<&'a dyn CstNode> {
    if !node.span().contains(offset) {
        return None;
    }
    for child in node.children() {
        if let Some(deepest) = node_at_offset(child, offset) {
            return Some(deepest);
        }
    }
    Some(node)
}

/// A structural invariant violation found by [`check_invariants`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeViolation {
    #[error("{kind} span {start}..{end} escapes source of length {source_len}")]
    SpanOutOfBounds {
        kind: String,
        start: usize,
        end: usize,
        source_len: usize,
    },
    #[error("{child_kind} span {child_start}..{child_end} escapes parent {parent_kind} {parent_start}..{parent_end}")]
    ChildNotContained {
        parent_kind: String,
        parent_start: usize,
        parent_end: usize,
        child_kind: String,
        child_start: usize,
        child_end: usize,
    },
    #[error("children of {parent_kind} overlap or run backwards at offset {at}")]
    ChildrenOutOfOrder { parent_kind: String, at: usize },
    #[error("token {kind} text {actual:?} differs from source slice {expected:?}")]
    TokenTextMismatch {
        kind: String,
        actual: String,
        expected: String,
    },
}

/// Walk a tree and verify the structural guarantees every successfully
/// produced tree must satisfy: span bounds, child containment and ordering,
/// and exact token text. Returns the first violation found.
pub fn check_invariants(node: &dyn CstNode, source: &str) -> Result<(), TreeViolation> {
    let span = node.span();
    if span.start > span.end || span.end > source.len() {
        return Err(TreeViolation::SpanOutOfBounds {
            kind: node.kind().to_string(),
            start: span.start,
            end: span.end,
            source_len: source.len(),
        });
    }
    if node.is_token() && node.text() != &source[span.start..span.end] {
        return Err(TreeViolation::TokenTextMismatch {
            kind: node.kind().to_string(),
            actual: node.text().to_string(),
            expected: source[span.start..span.end].to_string(),
        });
    }

    let mut previous_end = span.start;
    for child in node.children() {
        let child_span = child.span();
        if !span.contains_span(child_span) {
            return Err(TreeViolation::ChildNotContained {
                parent_kind: node.kind().to_string(),
                parent_start: span.start,
                parent_end: span.end,
                child_kind: child.kind().to_string(),
                child_start: child_span.start,
                child_end: child_span.end,
            });
        }
        if child_span.start < previous_end {
            return Err(TreeViolation::ChildrenOutOfOrder {
                parent_kind: node.kind().to_string(),
                at: child_span.start,
            });
        }
        previous_end = child_span.end;
        check_invariants(child, source)?;
    }
    Ok(())
}
