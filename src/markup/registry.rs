//! Node-kind registry for the markup grammar.
//!
//! One entry per production, including the labeled alternatives of the
//! emphasis rule, which each get their own constructor. Extending markup
//! coverage means one node variant, one constructor, one entry here.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use pest::iterators::Pair;

use super::ast::{Block, Inline};
use super::builder::{self, TreeBuilder};
use super::Rule;
use crate::errors::ParseError;

pub(crate) type BlockBuilder =
    fn(&mut TreeBuilder<'_>, Pair<'_, Rule>) -> Result<Block, ParseError>;
pub(crate) type InlineBuilder =
    fn(&mut TreeBuilder<'_>, Pair<'_, Rule>) -> Result<Inline, ParseError>;

static BLOCKS: Lazy<HashMap<Rule, BlockBuilder>> = Lazy::new(|| {
    let mut table: HashMap<Rule, BlockBuilder> = HashMap::new();
    table.insert(Rule::heading, builder::build_heading);
    table.insert(Rule::paragraph, builder::build_paragraph);
    // Rule::thematic_break is parsed but not yet modeled; it falls back.
    table
});

static INLINES: Lazy<HashMap<Rule, InlineBuilder>> = Lazy::new(|| {
    let mut table: HashMap<Rule, InlineBuilder> = HashMap::new();
    table.insert(Rule::strong, builder::build_strong);
    table.insert(Rule::star_emphasis, builder::build_star_emphasis);
    table.insert(Rule::underscore_emphasis, builder::build_underscore_emphasis);
    table.insert(Rule::code_span, builder::build_code_span);
    table.insert(Rule::heading_marker, builder::build_heading_marker);
    table.insert(Rule::strong_marker, builder::build_emphasis_marker);
    table.insert(Rule::star_marker, builder::build_emphasis_marker);
    table.insert(Rule::underscore_marker, builder::build_emphasis_marker);
    table.insert(Rule::code_delimiter, builder::build_code_delimiter);
    table.insert(Rule::code_text, builder::build_code_text);
    table.insert(Rule::word, builder::build_word);
    table.insert(Rule::whitespace, builder::build_whitespace);
    table.insert(Rule::stray_marker, builder::build_stray_marker);
    table
});

pub(crate) fn blocks() -> &'static HashMap<Rule, BlockBuilder> {
    &BLOCKS
}

pub(crate) fn inlines() -> &'static HashMap<Rule, InlineBuilder> {
    &INLINES
}
