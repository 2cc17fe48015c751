//! Typed node set for the script grammar.
//!
//! Statements and expressions are closed sums extended additively: one
//! variant per modeled syntactic form plus a fallback arm for productions
//! the builder does not map yet. Field names use the conventional
//! shapes (`body`, `declarations`, `kind`, `id`, `init`, `test`,
//! `consequent`, `alternate`) so the tree reads familiarly.

use serde::{Deserialize, Serialize};

use crate::literal::LiteralValue;
use crate::node::{CstNode, UnsupportedNode};
use crate::span::Span;

/// Root of a script tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Statement>,
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Expression(ExpressionStatement),
    VariableDeclaration(VariableDeclaration),
    Block(BlockStatement),
    If(IfStatement),
    Empty(EmptyStatement),
    Unsupported(UnsupportedNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub kind: DeclarationKind,
    pub declarations: Vec<VariableDeclarator>,
    pub text: String,
    pub span: Span,
}

/// Which declaration keyword introduced a [`VariableDeclaration`].
///
/// Derived from the exact text of the grammar's `declaration_kind`
/// terminal; there is no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl DeclarationKind {
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "var" => Some(Self::Var),
            "let" => Some(Self::Let),
            "const" => Some(Self::Const),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub id: Identifier,
    pub init: Option<Expression>,
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    pub body: Vec<Statement>,
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyStatement {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Identifier(Identifier),
    Literal(Literal),
    Unsupported(UnsupportedNode),
}

/// Identifier token. Its text is the name itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// Literal token: always-preserved raw text plus the decoded value, which
/// is absent when decoding failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: Option<LiteralValue>,
    pub raw: String,
    pub span: Span,
}

// --- Base contract ---

impl CstNode for Program {
    fn kind(&self) -> &str {
        "Program"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        self.body.iter().map(|s| s as &dyn CstNode).collect()
    }
}

impl CstNode for Statement {
    fn kind(&self) -> &str {
        match self {
            Self::Expression(n) => n.kind(),
            Self::VariableDeclaration(n) => n.kind(),
            Self::Block(n) => n.kind(),
            Self::If(n) => n.kind(),
            Self::Empty(n) => n.kind(),
            Self::Unsupported(n) => n.kind(),
        }
    }
    fn text(&self) -> &str {
        match self {
            Self::Expression(n) => n.text(),
            Self::VariableDeclaration(n) => n.text(),
            Self::Block(n) => n.text(),
            Self::If(n) => n.text(),
            Self::Empty(n) => n.text(),
            Self::Unsupported(n) => n.text(),
        }
    }
    fn span(&self) -> Span {
        match self {
            Self::Expression(n) => n.span(),
            Self::VariableDeclaration(n) => n.span(),
            Self::Block(n) => n.span(),
            Self::If(n) => n.span(),
            Self::Empty(n) => n.span(),
            Self::Unsupported(n) => n.span(),
        }
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        match self {
            Self::Expression(n) => n.children(),
            Self::VariableDeclaration(n) => n.children(),
            Self::Block(n) => n.children(),
            Self::If(n) => n.children(),
            Self::Empty(n) => n.children(),
            Self::Unsupported(n) => n.children(),
        }
    }
}

impl CstNode for ExpressionStatement {
    fn kind(&self) -> &str {
        "ExpressionStatement"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        vec![&self.expression]
    }
}

impl CstNode for VariableDeclaration {
    fn kind(&self) -> &str {
        "VariableDeclaration"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        self.declarations.iter().map(|d| d as &dyn CstNode).collect()
    }
}

impl CstNode for VariableDeclarator {
    fn kind(&self) -> &str {
        "VariableDeclarator"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        let mut children: Vec<&dyn CstNode> = vec![&self.id];
        if let Some(init) = &self.init {
            children.push(init);
        }
        children
    }
}

impl CstNode for BlockStatement {
    fn kind(&self) -> &str {
        "BlockStatement"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        self.body.iter().map(|s| s as &dyn CstNode).collect()
    }
}

impl CstNode for IfStatement {
    fn kind(&self) -> &str {
        "IfStatement"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
    fn children(&self) -> Vec<&dyn CstNode> {
        let mut children: Vec<&dyn CstNode> = vec![&self.test, self.consequent.as_ref()];
        if let Some(alternate) = &self.alternate {
            children.push(alternate.as_ref());
        }
        children
    }
}

impl CstNode for EmptyStatement {
    fn kind(&self) -> &str {
        "EmptyStatement"
    }
    fn text(&self) -> &str {
        &self.text
    }
    fn span(&self) -> Span {
        self.span
    }
}

impl CstNode for Expression {
    fn kind(&self) -> &str {
        match self {
            Self::Identifier(n) => n.kind(),
            Self::Literal(n) => n.kind(),
            Self::Unsupported(n) => n.kind(),
        }
    }
    fn text(&self) -> &str {
        match self {
            Self::Identifier(n) => n.text(),
            Self::Literal(n) => n.text(),
            Self::Unsupported(n) => n.text(),
        }
    }
    fn span(&self) -> Span {
        match self {
            Self::Identifier(n) => n.span(),
            Self::Literal(n) => n.span(),
            Self::Unsupported(n) => n.span(),
        }
    }
    fn is_token(&self) -> bool {
        match self {
            Self::Identifier(n) => n.is_token(),
            Self::Literal(n) => n.is_token(),
            Self::Unsupported(n) => n.is_token(),
        }
    }
}

impl CstNode for Identifier {
    fn kind(&self) -> &str {
        "Identifier"
    }
    fn text(&self) -> &str {
        &self.name
    }
    fn span(&self) -> Span {
        self.span
    }
    fn is_token(&self) -> bool {
        true
    }
}

impl CstNode for Literal {
    fn kind(&self) -> &str {
        "Literal"
    }
    fn text(&self) -> &str {
        &self.raw
    }
    fn span(&self) -> Span {
        self.span
    }
    fn is_token(&self) -> bool {
        true
    }
}
