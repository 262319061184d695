//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from lazyxml.
//! Importing this module with a wildcard import brings the core types into scope:
//!
//! ```
//! use lazyxml::prelude::*;
//!
//! let mut parser = EventParser::from_str("<a/>", EventConfig::default());
//! let counts = drive(&mut parser, &mut EventCounter::new()).unwrap();
//! assert_eq!(counts.elements(), 1);
//! ```
//!
//! # Re-exported Items
//!
//! ## Input
//! - [`CharStream`] - Lazy buffered character stream
//! - [`ChunkSource`] - Trait for chunk producers
//! - [`StrSource`], [`IterSource`], [`ReaderSource`] - Built-in sources
//! - [`ChunkConfig`] - Chunk size configuration
//!
//! ## Events
//! - [`EventParser`] - Streaming parse-event engine
//! - [`ParseEvent`], [`OwnedEvent`] - Parse events
//! - [`EventConfig`], [`EventKind`] - Event filtering
//!
//! ## Handlers
//! - [`EventHandler`] - Callback trait
//! - [`drive()`] - Feed a parser to a handler
//! - [`DebugHandler`], [`EventCounter`] - Built-in handlers
//!
//! ## Trees
//! - [`Tag`], [`Attribute`] - Tree nodes
//! - [`TreeBuilder`], [`build_tree()`], [`parse_tree()`], [`find_element()`]
//!
//! ## Error Handling
//! - [`ParseError`], [`ParseResult`], [`BuildError`], [`BuildResult`]

// ============================================================================
// Input
// ============================================================================

pub use crate::markup::{CharStream, ChunkConfig, ChunkSource, IterSource, ReaderSource, StrSource};

// ============================================================================
// Events
// ============================================================================

pub use crate::markup::{EventConfig, EventKind, EventParser, OwnedEvent, ParseEvent};

// ============================================================================
// Handlers
// ============================================================================

pub use crate::markup::{drive, DebugHandler, EventCounter, EventHandler};

// ============================================================================
// Trees
// ============================================================================

pub use crate::markup::{build_tree, find_element, parse_tree, Attribute, Tag, TreeBuilder};

// ============================================================================
// Error Handling
// ============================================================================

pub use crate::markup::{BuildError, BuildResult, ParseError, ParseResult};
