//! Integration tests for the streaming parse-event engine
//!
//! These tests cover:
//! - Event order over realistic documents
//! - Chunked and reader-backed input
//! - Event configuration
//! - Failure behavior

use lazyxml::markup::{
    drive, events_to_json, CharStream, ChunkConfig, DebugHandler, ErrorKind, EventConfig,
    EventCounter, EventKind, EventParser, OwnedEvent, ParseError, ParseEvent, StrSource,
};
use std::io::{self, Cursor};

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE rss>
<rss version="2.0">
  <channel>
    <title>Example   feed</title>
    <!-- items follow -->
    <item id="1"><title>First</title><link href='https://example.org/1'/></item>
    <item id="2"><title>Second</title><link href='https://example.org/2'/></item>
  </channel>
</rss>
"#;

fn collect(text: &str, chunk: usize, config: EventConfig) -> Result<Vec<OwnedEvent>, ParseError> {
    let stream = CharStream::new(StrSource::chunked(text, chunk));
    EventParser::new(stream, config).collect_events()
}

// ============================================================================
// Event Order Tests
// ============================================================================

#[test]
fn test_feed_event_log() {
    let mut parser = EventParser::from_str(FEED, EventConfig::all());
    let log = drive(&mut parser, &mut DebugHandler::new()).unwrap();

    let expected_prefix = vec![
        "PIBegin[xml]",
        "TagAttribute[version=\"1.0\"]",
        "TagAttribute[encoding=\"UTF-8\"]",
        "PIEnd",
        "TagOpen[rss]",
        "TagAttribute[version=\"2.0\"]",
        "TagOpen[channel]",
        "TagOpen[title]",
        "TagContent[\"Example feed\"]",
        "TagClose[title]",
        "Comment[\" items follow \"]",
        "TagOpen[item]",
        "TagAttribute[id=\"1\"]",
        "TagOpen[title]",
        "TagContent[\"First\"]",
        "TagClose[title]",
        "TagOpen[link]",
        "TagAttribute[href=\"https://example.org/1\"]",
        "TagSelfClose",
        "TagClose[item]",
    ];
    assert_eq!(&log[..expected_prefix.len()], expected_prefix.as_slice());
    assert_eq!(log.last().map(String::as_str), Some("TagClose[rss]"));
}

#[test]
fn test_feed_counts() {
    let mut parser = EventParser::from_str(FEED, EventConfig::default());
    let counts = drive(&mut parser, &mut EventCounter::new()).unwrap();

    assert_eq!(counts.elements(), 9);
    assert_eq!(counts.tag_closes + counts.tag_self_closes, 9);
    assert_eq!(counts.pi_begins, 1);
    assert_eq!(counts.comments, 0);
    assert_eq!(counts.count(EventKind::TagContent), 3);
}

#[test]
fn test_quoted_delimiters_do_not_end_tags() {
    let events = collect(r#"<a t="x > y" u='</a>'>body</a>"#, 3, EventConfig::default()).unwrap();
    assert_eq!(
        events,
        vec![
            OwnedEvent::TagOpen {
                name: "a".to_string()
            },
            OwnedEvent::TagAttribute {
                key: "t".to_string(),
                value: "x > y".to_string()
            },
            OwnedEvent::TagAttribute {
                key: "u".to_string(),
                value: "</a>".to_string()
            },
            OwnedEvent::TagContent {
                text: "body".to_string()
            },
            OwnedEvent::TagClose {
                name: "a".to_string()
            },
        ]
    );
}

#[test]
fn test_comment_with_dashes_and_quotes() {
    let events = collect(
        r#"<a><!-- x -- "-->" y ---></a>"#,
        2,
        EventConfig::default().with(EventKind::Comment, true),
    )
    .unwrap();
    assert_eq!(
        events[1],
        OwnedEvent::Comment {
            text: r#" x -- "-->" y -"#.to_string()
        }
    );
    assert_eq!(events.len(), 3);
}

#[test]
fn test_self_closing_equivalence() {
    let config = EventConfig::default().with(EventKind::TagSelfClose, false);
    let a = collect("<r><e k='v'/></r>", 64, config).unwrap();
    let b = collect("<r><e k='v'></e></r>", 64, config.with(EventKind::TagClose, false)).unwrap();
    let a: Vec<_> = a
        .into_iter()
        .filter(|e| e.kind() != EventKind::TagClose)
        .collect();
    assert_eq!(a, b);
}

// ============================================================================
// Chunked Input Tests
// ============================================================================

#[test]
fn test_chunk_size_does_not_change_events() {
    let whole = collect(FEED, usize::MAX, EventConfig::all()).unwrap();
    for size in [1, 2, 3, 7, 16, 64] {
        assert_eq!(collect(FEED, size, EventConfig::all()).unwrap(), whole, "chunk size {}", size);
    }
}

#[test]
fn test_reader_backed_parse() {
    let reader = Cursor::new(FEED.as_bytes().to_vec());
    let stream = CharStream::from_reader_with_config(reader, ChunkConfig::new(8));
    let events = EventParser::new(stream, EventConfig::all())
        .collect_events()
        .unwrap();
    assert_eq!(events, collect(FEED, usize::MAX, EventConfig::all()).unwrap());
}

#[test]
fn test_events_pulled_lazily() {
    let stream = CharStream::new(StrSource::chunked(FEED, 16));
    let mut parser = EventParser::new(stream, EventConfig::default());

    // The first event only needs the instruction header
    let first = parser.next_event().unwrap().map(|e| e.to_owned_event());
    assert_eq!(
        first,
        Some(OwnedEvent::ProcessingInstructionBegin {
            name: "xml".to_string()
        })
    );
    assert!(parser.stream().buffered_len() < FEED.len());
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_mismatch_stops_everything() {
    let mut parser = EventParser::from_str("<a><b></a><c/>", EventConfig::default());
    let mut seen = Vec::new();
    let err = loop {
        match parser.next_event() {
            Ok(Some(event)) => seen.push(event.to_owned_event()),
            Ok(None) => panic!("expected an error"),
            Err(e) => break e,
        }
    };

    assert_eq!(seen.len(), 2);
    assert_eq!(err.kind(), ErrorKind::MalformedStructure);
    assert!(parser.next_event().unwrap().is_none());
    assert!(parser.next_event().unwrap().is_none());
}

#[test]
fn test_error_position_formatting() {
    let text = "<root>\n  <item></iten>\n</root>";
    let err = EventParser::from_str(text, EventConfig::default())
        .collect_events()
        .unwrap_err();
    let message = err.format_with_position(text);
    assert!(message.contains("line 2"), "{}", message);
    assert!(message.contains("</iten>"), "{}", message);
}

#[test]
fn test_source_failure_becomes_io_error() {
    let mut sent = false;
    let source = lazyxml::markup::from_fn(move || {
        if sent {
            Err(io::Error::new(io::ErrorKind::TimedOut, "peer went quiet"))
        } else {
            sent = true;
            Ok(Some("<a><b>text".to_string()))
        }
    });

    let mut parser = EventParser::new(CharStream::new(source), EventConfig::default());
    let mut opened = 0;
    let err = loop {
        match parser.next_event() {
            Ok(Some(ParseEvent::TagOpen { .. })) => opened += 1,
            Ok(Some(_)) => {}
            Ok(None) => panic!("expected an error"),
            Err(e) => break e,
        }
    };

    assert_eq!(opened, 2);
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert!(err.to_string().contains("peer went quiet"));
}

#[test]
fn test_owned_iterator_yields_error_once() {
    let results: Vec<_> = EventParser::from_str("<a>", EventConfig::default())
        .into_owned_events()
        .collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_events_json_dump() {
    let events = collect("<a k='v'/>", 64, EventConfig::default()).unwrap();
    let json = events_to_json(&events).unwrap();
    assert_eq!(
        json,
        r#"[{"type":"TagOpen","name":"a"},{"type":"TagAttribute","key":"k","value":"v"},{"type":"TagSelfClose"}]"#
    );
}

#[test]
fn test_config_round_trips_through_json() {
    let config = EventConfig::default().with(EventKind::TagAttribute, false);
    let restored = EventConfig::from_json(&config.to_json().unwrap()).unwrap();
    assert_eq!(restored, config);
}
