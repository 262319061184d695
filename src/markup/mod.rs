//! Streaming markup parsing
//!
//! # Module Organization
//!
//! ## Input
//! - [`source`] - Chunk sources (strings, iterators, readers, files)
//! - [`char_stream`] - Lazy buffered character stream
//! - [`char_class`] - Character classes and predicates
//!
//! ## Scanning
//! - [`scanner`] - Word, quoted-string and literal searches
//! - [`grammar`] - Markup productions shared by both parsers
//!
//! ## Events
//! - [`event`] - Parse events and event configuration
//! - [`engine`] - Streaming parse-event engine
//! - [`builder`] - Callback-style event handlers
//!
//! ## Trees
//! - [`tree`] - Tag trees, from events or by a direct descent parser
//!
//! ## Errors
//! - [`error`] - Parse errors
//! - [`source_location`] - Line/column tracking

// ============================================================================
// Module Declarations
// ============================================================================

pub mod builder;
pub mod char_class;
pub mod char_stream;
pub mod engine;
pub mod error;
pub mod event;
pub mod grammar;
pub mod scanner;
pub mod source;
pub mod source_location;
pub mod tree;

// ============================================================================
// Input
// ============================================================================

pub use char_stream::{CharStream, StreamStatus, TextSpan};
pub use source::{
    from_fn, ChunkConfig, ChunkSource, FnSource, IterSource, ReaderSource, StrSource,
};

// ============================================================================
// Character Classes
// ============================================================================

pub use char_class::{
    char_eq, is_blank, not, one_of, CharClass, CharClassTables, CharPredicate, Not, CHAR_CLASSES,
};

// ============================================================================
// Scanning
// ============================================================================

pub use scanner::{
    collapse_whitespace, declaration_end, literal_sequence_end, next_string, next_word,
    quoted_string_end, skip_whitespace, word_boundary,
};

// ============================================================================
// Events
// ============================================================================

pub use engine::{EventParser, OwnedEvents};
pub use event::{events_to_json, EventConfig, EventKind, OwnedEvent, ParseEvent};

pub use builder::{drive, BuildError, BuildResult, DebugHandler, EventCounter, EventHandler};

// ============================================================================
// Trees
// ============================================================================

pub use tree::{
    build_tree, find_element, parse_tree, parse_tree_str, parse_tree_with_depth, Attribute, Tag,
    TreeBuilder, DEFAULT_MAX_DEPTH,
};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{ErrorKind, ParseError, ParseResult};

// ============================================================================
// Source Location
// ============================================================================

pub use source_location::{get_line_at_offset, offset_to_line_col, SourcePosition};
