//! Integration tests for tag trees
//!
//! These tests verify that:
//! - The event route and the descent route agree
//! - Trees survive a markup round trip
//! - Element lookup stops early
//! - Deep nesting is accepted up to the limit
//! - Nesting limits and failures are reported

use lazyxml::markup::{
    build_tree, find_element, parse_tree, parse_tree_with_depth, BuildError, CharStream,
    ChunkConfig, ErrorKind, EventConfig, EventParser, ParseError, StrSource, Tag,
    DEFAULT_MAX_DEPTH,
};
use std::io::Cursor;

const CATALOG: &str = r#"<?xml version="1.0"?>
<!-- generated -->
<catalog>
  <book id="bk101" lang=en>
    <author>Gambardella,   Matthew</author>
    <title>XML Developer's Guide</title>
    <price currency='USD'>44.95</price>
    <tags><tag>xml</tag><tag>reference</tag></tags>
  </book>
  <book id="bk102">
    <author>Ralls, Kim</author>
    <title>Midnight Rain</title>
    <out-of-print/>
  </book>
</catalog>
"#;

fn by_events(text: &str, chunk: usize) -> Tag {
    build_tree(CharStream::new(StrSource::chunked(text, chunk))).unwrap()
}

fn by_descent(text: &str, chunk: usize) -> Tag {
    let mut stream = CharStream::new(StrSource::chunked(text, chunk));
    parse_tree(&mut stream).unwrap()
}

// ============================================================================
// Route Equivalence Tests
// ============================================================================

#[test]
fn test_catalog_tree_shape() {
    let root = by_events(CATALOG, 64);
    assert!(root.is_root());
    assert_eq!(root.children.len(), 1);

    let catalog = &root.children[0];
    let books: Vec<&Tag> = catalog.children_named("book").collect();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0].attribute("id"), Some("bk101"));
    assert_eq!(books[0].attribute("lang"), Some("en"));
    assert_eq!(
        books[0].child("author").map(|a| a.content.as_str()),
        Some("Gambardella, Matthew")
    );
    assert_eq!(
        books[0]
            .child("tags")
            .map(|t| t.children_named("tag").count()),
        Some(2)
    );
    assert!(books[1].child("out-of-print").is_some());
    assert_eq!(root.element_count(), 12);
}

#[test]
fn test_routes_agree_at_every_chunk_size() {
    let expected = by_events(CATALOG, usize::MAX);
    for size in [1, 2, 5, 13, 64] {
        assert_eq!(by_events(CATALOG, size), expected, "events, chunk size {}", size);
        assert_eq!(by_descent(CATALOG, size), expected, "descent, chunk size {}", size);
    }
}

#[test]
fn test_tree_from_reader() {
    let reader = Cursor::new(CATALOG.as_bytes().to_vec());
    let mut stream = CharStream::from_reader_with_config(reader, ChunkConfig::new(7));
    assert_eq!(parse_tree(&mut stream).unwrap(), by_events(CATALOG, 64));
}

#[test]
fn test_several_top_level_elements() {
    let text = "<a/> text <b>x</b>";
    let root = by_events(text, 3);
    assert_eq!(root.children, vec![Tag::new("a"), Tag::new("b").with_content("x")]);
    assert!(root.content.is_empty());
    assert_eq!(by_descent(text, 3), root);
}

// ============================================================================
// Round Trip Tests
// ============================================================================

#[test]
fn test_catalog_round_trip() {
    let root = by_events(CATALOG, 64);
    let markup = root.to_markup();
    assert_eq!(by_events(&markup, 64), root);
    assert_eq!(by_descent(&markup, 5), root);
}

#[test]
fn test_constructed_tree_round_trip() {
    let root = Tag::root().with_child(
        Tag::new("feed")
            .with_attribute("href", "https://example.org/?a=1&b=2")
            .with_attribute("note", r#"say "hi""#)
            .with_child(Tag::new("entry").with_content("first entry"))
            .with_child(Tag::new("entry")),
    );
    assert_eq!(by_events(&root.to_markup(), 4), root);
}

#[test]
fn test_json_round_trip() {
    let root = by_descent(CATALOG, 64);
    let restored = Tag::from_json(&root.to_json().unwrap()).unwrap();
    assert_eq!(restored, root);
}

// ============================================================================
// Element Lookup Tests
// ============================================================================

#[test]
fn test_find_element_then_continue() {
    let stream = CharStream::new(StrSource::chunked(CATALOG, 16));
    let mut parser = EventParser::new(stream, EventConfig::default());

    let first = find_element(&mut parser, "book").unwrap().unwrap();
    assert_eq!(first.attribute("id"), Some("bk101"));
    assert!(parser.stream().buffered_len() < CATALOG.len());

    let second = find_element(&mut parser, "book").unwrap().unwrap();
    assert_eq!(second.attribute("id"), Some("bk102"));
}

#[test]
fn test_find_element_nested_same_name() {
    let mut parser = EventParser::from_str(
        "<x><tag><tag>inner</tag>outer</tag></x>",
        EventConfig::default(),
    );
    let found = find_element(&mut parser, "tag").unwrap().unwrap();
    assert_eq!(found.content, "outer");
    assert_eq!(found.children, vec![Tag::new("tag").with_content("inner")]);
}

#[test]
fn test_find_element_reports_parse_errors() {
    let mut parser = EventParser::from_str("<x><y></x>", EventConfig::default());
    let err = find_element(&mut parser, "z").unwrap_err();
    assert!(matches!(err, BuildError::Parse(_)));
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_default_depth_limit() {
    let deep = "<d>".repeat(DEFAULT_MAX_DEPTH + 1);
    let mut stream = CharStream::from_str(deep);
    let err = parse_tree(&mut stream).unwrap_err();
    assert_eq!(
        err,
        ParseError::DepthLimitExceeded {
            depth: DEFAULT_MAX_DEPTH + 1,
            max_depth: DEFAULT_MAX_DEPTH
        }
    );
}

#[test]
fn test_depth_limit_counts_from_top_level() {
    let text = "<a><b/></a><c/>";
    let mut stream = CharStream::from_str(text);
    assert!(parse_tree_with_depth(&mut stream, 2).is_ok());

    let mut stream = CharStream::from_str(text);
    let err = parse_tree_with_depth(&mut stream, 1).unwrap_err();
    assert!(matches!(err, ParseError::DepthLimitExceeded { depth: 2, .. }));
    assert_eq!(err.kind(), ErrorKind::MalformedStructure);
}

#[test]
fn test_both_routes_reject_unclosed() {
    let text = "<a><b></b>";
    assert!(build_tree(CharStream::from_str(text)).is_err());
    let mut stream = CharStream::from_str(text);
    assert_eq!(
        parse_tree(&mut stream).unwrap_err().kind(),
        ErrorKind::UnexpectedEndOfInput
    );
}

#[test]
fn test_descent_reports_source_failure() {
    let mut calls = 0;
    let source = lazyxml::markup::from_fn(move || {
        calls += 1;
        if calls == 1 {
            Ok(Some("<a/><b/>".to_string()))
        } else {
            Err(std::io::Error::other("disk gone"))
        }
    });
    let mut stream = CharStream::new(source);
    let err = parse_tree(&mut stream).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
}

#[test]
fn test_source_failure_inside_element() {
    fn failing_after(prefix: &'static str) -> CharStream<impl lazyxml::markup::ChunkSource> {
        let mut calls = 0;
        CharStream::new(lazyxml::markup::from_fn(move || {
            calls += 1;
            if calls == 1 {
                Ok(Some(prefix.to_string()))
            } else {
                Err(std::io::Error::other("disk gone"))
            }
        }))
    }

    for prefix in ["<a><b>", "<a><b>text", "<a x=\"1"] {
        let err = parse_tree(&mut failing_after(prefix)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure, "descent, {}", prefix);
        assert!(err.to_string().contains("disk gone"));

        match build_tree(failing_after(prefix)).unwrap_err() {
            BuildError::Parse(e) => assert_eq!(e.kind(), ErrorKind::IoFailure, "events, {}", prefix),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[test]
fn test_deep_but_legal_nesting() {
    let text = format!(
        "{}{}",
        "<d>".repeat(DEFAULT_MAX_DEPTH),
        "</d>".repeat(DEFAULT_MAX_DEPTH)
    );
    let mut stream = CharStream::new(StrSource::chunked(&text, 7));
    let root = parse_tree(&mut stream).unwrap();

    let mut levels = 0;
    let mut tag = &root;
    while let Some(child) = tag.children.first() {
        levels += 1;
        tag = child;
    }
    assert_eq!(levels, DEFAULT_MAX_DEPTH);
}
