//! lazyxml - Streaming, incremental markup parsing
//!
//! A pull parser for XML-like markup built on a lazily filled character
//! stream. Input arrives in chunks and is only read as far as the parser needs
//! it, so documents can be processed while they are still being received.
//! It provides:
//! - A buffered, searchable character stream over any chunk source
//! - Scanning primitives (words, quoted strings, literal sequences)
//! - A streaming parse-event engine with a configurable event filter
//! - Callback-style event handlers
//! - Tag trees, built from events or by a direct descent parser
//!
//! ## Quick Start
//!
//! ```rust
//! use lazyxml::markup::{EventConfig, EventParser, ParseEvent};
//!
//! let mut parser = EventParser::from_str(
//!     r#"<note to="you"><body>Hello   world</body></note>"#,
//!     EventConfig::default(),
//! );
//!
//! let mut text = Vec::new();
//! while let Some(event) = parser.next_event().unwrap() {
//!     if let ParseEvent::TagContent { text: t } = event {
//!         text.push(t.to_string());
//!     }
//! }
//! assert_eq!(text, vec!["Hello world"]);
//! ```
//!
//! ## Building Trees
//!
//! ```rust
//! use lazyxml::markup::{build_tree, CharStream, StrSource};
//!
//! // Chunks of 4 bytes: the parser pulls them as it goes
//! let stream = CharStream::new(StrSource::chunked("<a><b k='v'/>text</a>", 4));
//! let root = build_tree(stream).unwrap();
//! let a = &root.children[0];
//! assert_eq!(a.child("b").and_then(|b| b.attribute("k")), Some("v"));
//! assert_eq!(a.content, "text");
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
// Allow some pedantic lints that are too noisy
#![allow(clippy::module_inception)]
#![allow(clippy::redundant_closure)]

/// Logging macros - no-ops unless the `logging` feature is enabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

// Prelude module for convenient imports
pub mod prelude;

// Streaming markup core
pub mod markup;

/// Re-export commonly used types for convenience
pub use markup::{
    build_tree, drive, find_element, parse_tree, BuildError, CharStream, ChunkSource,
    EventConfig, EventHandler, EventKind, EventParser, OwnedEvent, ParseError, ParseEvent,
    ParseResult, StrSource, Tag, TreeBuilder,
};
