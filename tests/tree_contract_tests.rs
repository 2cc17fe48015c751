// tests/tree_contract_tests.rs
//
// The same generic utilities must work over any grammar's output through
// the shared CstNode contract, via the uniform crate-level entry point.

use sylva::node::{check_invariants, dump, node_at_offset};
use sylva::{parse, parse_with_diagnostics, CstNode, DiagnosticSink, Grammar, RootNode};

#[test]
fn uniform_entry_point_selects_the_grammar() {
    let markup = parse("# Title", Grammar::Markup).expect("markup should parse");
    assert!(matches!(markup, RootNode::Markup(_)));
    assert_eq!(markup.kind(), "Document");

    let script = parse("var a = 1;", Grammar::Script).expect("script should parse");
    assert!(matches!(script, RootNode::Script(_)));
    assert_eq!(script.kind(), "Program");
}

#[test]
fn empty_input_is_none_for_both_grammars() {
    assert!(parse("", Grammar::Markup).is_none());
    assert!(parse("", Grammar::Script).is_none());
}

#[test]
fn generic_utilities_work_over_both_grammars() {
    let sources: [(&str, Grammar); 2] = [
        ("# A *b*\ntext line", Grammar::Markup),
        ("if (x) { var a = 1; }", Grammar::Script),
    ];
    for (source, grammar) in sources {
        let root = parse(source, grammar).expect("parse should succeed");

        check_invariants(&root, source)
            .unwrap_or_else(|violation| panic!("{source:?}: {violation}"));

        let dumped = dump(&root);
        assert!(dumped.lines().count() > 1, "dump should list the subtree");

        let deepest = node_at_offset(&root, 2).expect("offset 2 is inside the root");
        assert!(deepest.span().contains(2));
    }
}

#[test]
fn root_text_covers_the_whole_source() {
    let source = "var a = 1;";
    let root = parse(source, Grammar::Script).unwrap();
    assert_eq!(root.text(), source);
    assert_eq!(root.span().start, 0);
    assert_eq!(root.span().end, source.len());
}

#[test]
fn advisory_diagnostics_never_change_success() {
    let mut sink = DiagnosticSink::new();
    let root = parse_with_diagnostics("return 1;", Grammar::Script, &mut sink);
    assert!(root.is_some());
    assert!(!sink.is_empty());

    let mut sink = DiagnosticSink::new();
    let root = parse_with_diagnostics("---", Grammar::Markup, &mut sink);
    assert!(root.is_some());
    assert_eq!(sink.len(), 1);
}
