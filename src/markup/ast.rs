//! Typed node set for the markup grammar.
//!
//! CST-flavored: marker and trivia tokens are explicit children, so the
//! ordered children of every block and inline span tile it with no gaps
//! and concatenating leaf text reconstructs the covered source region.

use serde::{Deserialize, Serialize};

use crate::node::{CstNode, UnsupportedNode};
use crate::span::Span;

/// Root of a markup tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub children: Vec<Block>,
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    Unsupported(UnsupportedNode),
}

/// A heading block: marker token, separating whitespace, inline content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Number of `#` characters in the marker, 1 through 6.
    pub depth: u8,
    pub children: Vec<Inline>,
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub children: Vec<Inline>,
    pub text: String,
    pub span: Span,
}

/// Inline content, including the marker and trivia tokens that appear as
/// explicit children of inline spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    Strong(Strong),
    Emphasis(Emphasis),
    CodeSpan(CodeSpan),
    HeadingMarker(HeadingMarker),
    EmphasisMarker(EmphasisMarker),
    CodeDelimiter(CodeDelimiter),
    CodeText(CodeText),
    Word(Word),
    Whitespace(Whitespace),
    StrayMarker(StrayMarker),
    Unsupported(UnsupportedNode),
}

/// A strong emphasis span: `**` markers plus inner content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strong {
    pub children: Vec<Inline>,
    pub text: String,
    pub span: Span,
}

/// An emphasis span delimited by `*` or `_`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    /// The delimiter character, from the opening marker token.
    pub marker: char,
    pub children: Vec<Inline>,
    pub text: String,
    pub span: Span,
}

/// An inline code span: backtick delimiters plus verbatim text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeSpan {
    pub children: Vec<Inline>,
    pub text: String,
    pub span: Span,
}

// --- Tokens ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingMarker {
    pub depth: u8,
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmphasisMarker {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeDelimiter {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeText {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Whitespace {
    pub text: String,
    pub span: Span,
}

/// A marker character (`*`, `_`, `` ` ``) in a position where it opens
/// nothing; kept as its own token rather than folded into a word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrayMarker {
    pub text: String,
    pub span: Span,
}

// --- Base contract ---

impl CstNode for Document {
    fn kind(&self) -> &str {
        "Document"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        self.children.iter().map(|b| b as &dyn CstNode).collect()
    }
}

impl CstNode for Block {
    fn kind(&self) -> &str {
        match self {
            Self::Heading(n) => n.kind(),
            Self::Paragraph(n) => n.kind(),
            Self::Unsupported(n) => n.kind(),
        }
    }
    fn text(&self) -> &str {
        match self {
            Self::Heading(n) => n.text(),
            Self::Paragraph(n) => n.text(),
            Self::Unsupported(n) => n.text(),
        }
    }
    fn span(&self) -> Span {
        match self {
            Self::Heading(n) => n.span(),
            Self::Paragraph(n) => n.span(),
            Self::Unsupported(n) => n.span(),
        }
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        match self {
            Self::Heading(n) => n.children(),
            Self::Paragraph(n) => n.children(),
            Self::Unsupported(n) => n.children(),
        }
    }
}

impl CstNode for Heading {
    fn kind(&self) -> &str {
        "Heading"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        self.children.iter().map(|i| i as &dyn CstNode).collect()
    }
}

impl CstNode for Paragraph {
    fn kind(&self) -> &str {
        "Paragraph"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        self.children.iter().map(|i| i as &dyn CstNode).collect()
    }
}

impl CstNode for Inline {
    fn kind(&self) -> &str {
        self.as_node().kind()
    }
    fn text(&self) -> &str {
        self.as_node().text()
    }
    fn span(&self) -> Span {
        self.as_node().span()
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        self.as_node().children()
    }
    fn is_token(&self) -> bool {
        self.as_node().is_token()
    }
}

impl Inline {
    fn as_node(&self) -> &dyn CstNode {
        match self {
            Self::Strong(n) => n,
            Self::Emphasis(n) => n,
            Self::CodeSpan(n) => n,
            Self::HeadingMarker(n) => n,
            Self::EmphasisMarker(n) => n,
            Self::CodeDelimiter(n) => n,
            Self::CodeText(n) => n,
            Self::Word(n) => n,
            Self::Whitespace(n) => n,
            Self::StrayMarker(n) => n,
            Self::Unsupported(n) => n,
        }
    }
}

impl CstNode for Strong {
    fn kind(&self) -> &str {
        "Strong"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        self.children.iter().map(|i| i as &dyn CstNode).collect()
    }
}

impl CstNode for Emphasis {
    fn kind(&self) -> &str {
        "Emphasis"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        self.children.iter().map(|i| i as &dyn CstNode).collect()
    }
}

impl CstNode for CodeSpan {
    fn kind(&self) -> &str {
        "CodeSpan"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        self.children.iter().map(|i| i as &dyn CstNode).collect()
    }
}

macro_rules! impl_token_node {
    ($($ty:ident => $kind:literal),+ $(,)?) => {
        $(
            impl CstNode for $ty {
                fn kind(&self) -> &str {
                    $kind
                }
                fn text(&self) -> &str {
                    &self.text
                }
                fn span(&self) -> Span {
                    self.span
                }
                fn is_token(&self) -> bool {
                    true
                }
            }
        )+
    };
}

impl_token_node! {
    HeadingMarker => "HeadingMarker",
    EmphasisMarker => "EmphasisMarker",
    CodeDelimiter => "CodeDelimiter",
    CodeText => "CodeText",
    Word => "Word",
    Whitespace => "Whitespace",
    StrayMarker => "StrayMarker",
}
