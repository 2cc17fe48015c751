// tests/markup_tests.rs
//
// Public-API tests for the markup grammar: block/inline shape, explicit
// marker tokens, span tiling, and fallback behavior.

use sylva::markup::{self, Block, Inline};
use sylva::node::{check_invariants, dump};
use sylva::{CstNode, DiagnosticKind, DiagnosticSink};

fn parse_ok(source: &str) -> markup::Document {
    markup::parse(source).expect("expected a successful parse")
}

/// Concatenated leaf text of a subtree, in child order.
fn leaf_text(node: &dyn CstNode, out: &mut String) {
    let children = node.children();
    if children.is_empty() {
        out.push_str(node.text());
        return;
    }
    for child in children {
        leaf_text(child, out);
    }
}

#[test]
fn empty_input_yields_no_tree() {
    assert!(markup::parse("").is_none());
    assert!(markup::parse("\n\n  \n").is_none());
}

#[test]
fn heading_with_marker_token_and_depth() {
    let doc = parse_ok("## Title here");
    assert_eq!(doc.children.len(), 1);

    let Block::Heading(heading) = &doc.children[0] else {
        panic!("expected a Heading, got {}", doc.children[0].kind());
    };
    assert_eq!(heading.depth, 2);

    let Inline::HeadingMarker(marker) = &heading.children[0] else {
        panic!("expected the marker as first child");
    };
    assert_eq!(marker.text, "##");
    assert_eq!(marker.depth, 2);
    assert!(matches!(&heading.children[1], Inline::Whitespace(_)));
    assert!(matches!(
        &heading.children[2],
        Inline::Word(w) if w.text == "Title"
    ));
}

#[test]
fn paragraph_with_strong_and_emphasis() {
    let doc = parse_ok("plain **bold** and *slanted*");
    let Block::Paragraph(paragraph) = &doc.children[0] else {
        panic!("expected a Paragraph");
    };

    let strong = paragraph
        .children
        .iter()
        .find_map(|i| match i {
            Inline::Strong(s) => Some(s),
            _ => None,
        })
        .expect("expected a Strong span");
    assert!(matches!(
        &strong.children[0],
        Inline::EmphasisMarker(m) if m.text == "**"
    ));
    assert!(matches!(
        &strong.children[1],
        Inline::Word(w) if w.text == "bold"
    ));

    let emphasis = paragraph
        .children
        .iter()
        .find_map(|i| match i {
            Inline::Emphasis(e) => Some(e),
            _ => None,
        })
        .expect("expected an Emphasis span");
    assert_eq!(emphasis.marker, '*');
}

#[test]
fn underscore_emphasis_records_its_marker() {
    let doc = parse_ok("_quiet_ words");
    let Block::Paragraph(paragraph) = &doc.children[0] else {
        panic!("expected a Paragraph");
    };
    let Inline::Emphasis(emphasis) = &paragraph.children[0] else {
        panic!("expected an Emphasis first");
    };
    assert_eq!(emphasis.marker, '_');
    assert_eq!(emphasis.text, "_quiet_");
}

#[test]
fn code_span_keeps_delimiters_and_text() {
    let doc = parse_ok("see `let x` here");
    let Block::Paragraph(paragraph) = &doc.children[0] else {
        panic!("expected a Paragraph");
    };
    let code = paragraph
        .children
        .iter()
        .find_map(|i| match i {
            Inline::CodeSpan(c) => Some(c),
            _ => None,
        })
        .expect("expected a CodeSpan");
    assert_eq!(code.children.len(), 3);
    assert!(matches!(&code.children[0], Inline::CodeDelimiter(_)));
    assert!(matches!(
        &code.children[1],
        Inline::CodeText(t) if t.text == "let x"
    ));
    assert!(matches!(&code.children[2], Inline::CodeDelimiter(_)));
}

#[test]
fn blocks_tile_their_span_exactly() {
    let doc = parse_ok("# A *b* `c d`\npara **e** text");
    for block in &doc.children {
        let mut text = String::new();
        leaf_text(block, &mut text);
        assert_eq!(text, block.text(), "leaves must tile {}", block.kind());
    }
}

#[test]
fn unpaired_marker_surfaces_as_stray_marker_token() {
    let doc = parse_ok("*loose");
    let Block::Paragraph(paragraph) = &doc.children[0] else {
        panic!("expected a Paragraph");
    };
    assert!(matches!(
        &paragraph.children[0],
        Inline::StrayMarker(m) if m.text == "*"
    ));
    assert_eq!(paragraph.children[0].kind(), "StrayMarker");
    assert!(matches!(&paragraph.children[1], Inline::Word(_)));
}

#[test]
fn unregistered_block_degrades_to_fallback() {
    let mut sink = DiagnosticSink::new();
    let doc = markup::parse_with_diagnostics("---\nafter", &mut sink)
        .expect("fallback must not fail the parse");

    assert_eq!(doc.children.len(), 2);
    let Block::Unsupported(node) = &doc.children[0] else {
        panic!("expected a fallback block, got {}", doc.children[0].kind());
    };
    assert_eq!(node.kind(), "UnsupportedThematicBreak");
    assert_eq!(node.text(), "---");
    assert!(matches!(&doc.children[1], Block::Paragraph(_)));

    assert_eq!(sink.len(), 1);
    assert!(matches!(
        &sink.iter().next().unwrap().kind,
        DiagnosticKind::UnmappedProduction { production, .. } if production == "thematic_break"
    ));
}

#[test]
fn multiple_blocks_across_lines() {
    let doc = parse_ok("# One\n\ntwo three\n## Four");
    let kinds: Vec<_> = doc.children.iter().map(|b| b.kind().to_string()).collect();
    assert_eq!(kinds, vec!["Heading", "Paragraph", "Heading"]);
}

#[test]
fn produced_trees_satisfy_structural_invariants() {
    for source in [
        "# Title",
        "plain **bold _deep_** and `code`",
        "---\npara",
        "###### deep heading",
        "a *b* c\nd **e** f",
    ] {
        let doc = parse_ok(source);
        check_invariants(&doc, source)
            .unwrap_or_else(|violation| panic!("{source:?}: {violation}"));
    }
}

#[test]
fn parsing_is_idempotent() {
    let source = "# T\nbody *em* tail";
    assert_eq!(parse_ok(source), parse_ok(source));
}

#[test]
fn dump_lists_every_node_once() {
    let doc = parse_ok("# T");
    let dumped = dump(&doc);
    let lines: Vec<_> = dumped.lines().collect();
    assert_eq!(lines[0], "Document @ 0..3");
    assert!(lines.iter().any(|l| l.trim_start().starts_with("Heading")));
    assert!(lines
        .iter()
        .any(|l| l.trim_start().starts_with("HeadingMarker")));
}
