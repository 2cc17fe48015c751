//! Node-kind registry for the script grammar.
//!
//! The sole place script coverage is extended: one entry maps one grammar
//! production to one typed constructor. Adding a syntactic form means one
//! node variant, one constructor in the builder, and one entry here; the
//! traversal engine never changes. Productions absent from these tables
//! degrade to fallback nodes at build time.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use pest::iterators::Pair;

use super::ast::{Expression, Statement};
use super::builder::{self, TreeBuilder};
use super::Rule;
use crate::errors::ParseError;

pub(crate) type StatementBuilder =
    fn(&mut TreeBuilder<'_>, Pair<'_, Rule>) -> Result<Statement, ParseError>;
pub(crate) type ExpressionBuilder =
    fn(&mut TreeBuilder<'_>, Pair<'_, Rule>) -> Result<Expression, ParseError>;

static STATEMENTS: Lazy<HashMap<Rule, StatementBuilder>> = Lazy::new(|| {
    let mut table: HashMap<Rule, StatementBuilder> = HashMap::new();
    table.insert(Rule::expression_statement, builder::build_expression_statement);
    table.insert(Rule::variable_statement, builder::build_variable_statement);
    table.insert(Rule::block_statement, builder::build_block_statement);
    table.insert(Rule::if_statement, builder::build_if_statement);
    table.insert(Rule::empty_statement, builder::build_empty_statement);
    // Rule::return_statement is parsed but not yet modeled; it falls back.
    table
});

static EXPRESSIONS: Lazy<HashMap<Rule, ExpressionBuilder>> = Lazy::new(|| {
    let mut table: HashMap<Rule, ExpressionBuilder> = HashMap::new();
    table.insert(Rule::identifier, builder::build_identifier);
    table.insert(Rule::number_literal, builder::build_number_literal);
    table.insert(Rule::string_literal, builder::build_string_literal);
    table.insert(Rule::boolean_literal, builder::build_boolean_literal);
    table.insert(Rule::null_literal, builder::build_null_literal);
    table.insert(Rule::regex_literal, builder::build_regex_literal);
    // Rule::call_expression is parsed but not yet modeled; it falls back.
    table
});

pub(crate) fn statements() -> &'static HashMap<Rule, StatementBuilder> {
    &STATEMENTS
}

pub(crate) fn expressions() -> &'static HashMap<Rule, ExpressionBuilder> {
    &EXPRESSIONS
}
