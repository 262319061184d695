//! Event handler API
//!
//! [`EventHandler`] receives parse events as callbacks instead of pulling
//! them one by one. [`drive`] runs an [`EventParser`] to the end (or until the
//! handler asks to stop) and returns whatever the handler builds.
//!
//! # Example
//!
//! ```
//! use lazyxml::markup::builder::{drive, BuildResult, EventHandler};
//! use lazyxml::markup::engine::EventParser;
//! use lazyxml::markup::event::EventConfig;
//!
//! // Collects element names in document order
//! struct NameCollector {
//!     names: Vec<String>,
//! }
//!
//! impl EventHandler for NameCollector {
//!     type Output = Vec<String>;
//!
//!     fn on_tag_open(&mut self, name: &str) -> BuildResult<()> {
//!         self.names.push(name.to_string());
//!         Ok(())
//!     }
//!
//!     fn finish(&mut self) -> BuildResult<Vec<String>> {
//!         Ok(std::mem::take(&mut self.names))
//!     }
//! }
//!
//! let mut parser = EventParser::from_str("<a><b/><c/></a>", EventConfig::default());
//! let names = drive(&mut parser, &mut NameCollector { names: vec![] }).unwrap();
//! assert_eq!(names, vec!["a", "b", "c"]);
//! ```

use super::engine::EventParser;
use super::error::ParseError;
use super::event::{EventKind, ParseEvent};
use super::source::ChunkSource;

/// Result of a handler operation
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur while handling events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The events do not describe a structure the handler can build
    InvalidStructure {
        /// Description of the invalid structure
        message: String,
    },
    /// The parser failed
    Parse(ParseError),
    /// The handler has everything it needs; [`drive`] stops without error
    Stopped,
    /// Custom error from a handler
    Custom {
        /// Custom error message
        message: String,
    },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::InvalidStructure { message } => {
                write!(f, "Invalid structure: {}", message)
            }
            BuildError::Parse(e) => write!(f, "Parse error: {}", e),
            BuildError::Stopped => write!(f, "Stopped by handler"),
            BuildError::Custom { message } => write!(f, "Build error: {}", message),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for BuildError {
    fn from(e: ParseError) -> Self {
        BuildError::Parse(e)
    }
}

/// Trait for consuming parse events through callbacks
///
/// Every callback has a no-op default, so a handler only implements what it
/// cares about. Returning an error from a callback ends [`drive`] with that
/// error; returning [`BuildError::Stopped`] ends it early and successfully.
///
/// # Event Flow
///
/// ```text
/// <?xml version="1.0"?><a x="1">hi<b/></a>
///
/// on_pi_begin("xml")
///   on_attribute("version", "1.0")
/// on_pi_end()
/// on_tag_open("a")
///   on_attribute("x", "1")
///   on_content("hi")
///   on_tag_open("b")
///   on_tag_self_close()
/// on_tag_close("a")
/// ```
pub trait EventHandler {
    /// The output type produced by this handler
    type Output;

    // === Lifecycle ===

    /// Called before the first event
    fn on_start(&mut self) -> BuildResult<()> {
        Ok(())
    }

    /// Called when the parser fails, before [`drive`] returns the error
    fn on_error(&mut self, error: &ParseError) -> BuildResult<()> {
        let _ = error;
        Ok(())
    }

    /// Finalize and return the built result
    fn finish(&mut self) -> BuildResult<Self::Output>;

    // === Events ===

    /// Dispatch one event to the matching callback
    fn on_event(&mut self, event: ParseEvent<'_>) -> BuildResult<()> {
        match event {
            ParseEvent::TagOpen { name } => self.on_tag_open(name),
            ParseEvent::TagClose { name } => self.on_tag_close(name),
            ParseEvent::TagSelfClose => self.on_tag_self_close(),
            ParseEvent::TagAttribute { key, value } => self.on_attribute(key, value),
            ParseEvent::TagContent { text } => self.on_content(text),
            ParseEvent::Comment { text } => self.on_comment(text),
            ParseEvent::ProcessingInstructionBegin { name } => self.on_pi_begin(name),
            ParseEvent::ProcessingInstructionEnd => self.on_pi_end(),
        }
    }

    /// Called for `<name`
    fn on_tag_open(&mut self, name: &str) -> BuildResult<()> {
        let _ = name;
        Ok(())
    }

    /// Called for `</name>`
    fn on_tag_close(&mut self, name: &str) -> BuildResult<()> {
        let _ = name;
        Ok(())
    }

    /// Called for `/>`
    fn on_tag_self_close(&mut self) -> BuildResult<()> {
        Ok(())
    }

    /// Called for each attribute of a tag or processing instruction
    fn on_attribute(&mut self, key: &str, value: &str) -> BuildResult<()> {
        let _ = (key, value);
        Ok(())
    }

    /// Called for each non-blank text run
    fn on_content(&mut self, text: &str) -> BuildResult<()> {
        let _ = text;
        Ok(())
    }

    /// Called for each comment (only if comments are enabled)
    fn on_comment(&mut self, text: &str) -> BuildResult<()> {
        let _ = text;
        Ok(())
    }

    /// Called for `<?name`
    fn on_pi_begin(&mut self, name: &str) -> BuildResult<()> {
        let _ = name;
        Ok(())
    }

    /// Called for `?>`
    fn on_pi_end(&mut self) -> BuildResult<()> {
        Ok(())
    }
}

/// Feed every event of `parser` to `handler` and return its output
///
/// Stops early, without error, when a callback returns
/// [`BuildError::Stopped`]; the parser can then be resumed.
pub fn drive<S, H>(parser: &mut EventParser<S>, handler: &mut H) -> BuildResult<H::Output>
where
    S: ChunkSource,
    H: EventHandler + ?Sized,
{
    handler.on_start()?;

    loop {
        let event = match parser.next_event() {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(e) => {
                handler.on_error(&e)?;
                return Err(BuildError::Parse(e));
            }
        };

        match handler.on_event(event) {
            Ok(()) => {}
            Err(BuildError::Stopped) => {
                log_debug!("handler stopped at offset {}", parser.cursor());
                break;
            }
            Err(e) => return Err(e),
        }
    }

    handler.finish()
}

// ============================================================================
// Built-in Handlers
// ============================================================================

/// A handler that records events as strings, for debugging
///
/// # Example
///
/// ```
/// use lazyxml::markup::builder::{drive, DebugHandler};
/// use lazyxml::markup::engine::EventParser;
/// use lazyxml::markup::event::EventConfig;
///
/// let mut parser = EventParser::from_str("<a x='1'>hi</a>", EventConfig::default());
/// let log = drive(&mut parser, &mut DebugHandler::new()).unwrap();
/// assert_eq!(
///     log,
///     vec!["TagOpen[a]", "TagAttribute[x=\"1\"]", "TagContent[\"hi\"]", "TagClose[a]"]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct DebugHandler {
    /// List of collected event strings
    pub events: Vec<String>,
}

impl DebugHandler {
    /// Create a new debug handler
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for DebugHandler {
    type Output = Vec<String>;

    fn on_event(&mut self, event: ParseEvent<'_>) -> BuildResult<()> {
        self.events.push(event.to_string());
        Ok(())
    }

    fn on_error(&mut self, error: &ParseError) -> BuildResult<()> {
        self.events.push(format!("Error[{}]", error));
        Ok(())
    }

    fn finish(&mut self) -> BuildResult<Vec<String>> {
        Ok(std::mem::take(&mut self.events))
    }
}

/// A handler that counts events of each kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCounter {
    /// Number of tag opens
    pub tag_opens: usize,
    /// Number of close tags
    pub tag_closes: usize,
    /// Number of self-closing tags
    pub tag_self_closes: usize,
    /// Number of attributes
    pub attributes: usize,
    /// Number of text runs
    pub contents: usize,
    /// Number of comments
    pub comments: usize,
    /// Number of processing instructions begun
    pub pi_begins: usize,
    /// Number of processing instructions ended
    pub pi_ends: usize,
}

impl EventCounter {
    /// Create a new counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for one kind
    pub fn count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::TagOpen => self.tag_opens,
            EventKind::TagClose => self.tag_closes,
            EventKind::TagSelfClose => self.tag_self_closes,
            EventKind::TagAttribute => self.attributes,
            EventKind::TagContent => self.contents,
            EventKind::Comment => self.comments,
            EventKind::ProcessingInstructionBegin => self.pi_begins,
            EventKind::ProcessingInstructionEnd => self.pi_ends,
        }
    }

    /// Total number of events
    pub fn total(&self) -> usize {
        EventKind::ALL.iter().map(|&kind| self.count(kind)).sum()
    }

    /// Number of elements (opened tags)
    pub fn elements(&self) -> usize {
        self.tag_opens
    }
}

impl EventHandler for EventCounter {
    type Output = EventCounter;

    fn on_event(&mut self, event: ParseEvent<'_>) -> BuildResult<()> {
        let slot = match event.kind() {
            EventKind::TagOpen => &mut self.tag_opens,
            EventKind::TagClose => &mut self.tag_closes,
            EventKind::TagSelfClose => &mut self.tag_self_closes,
            EventKind::TagAttribute => &mut self.attributes,
            EventKind::TagContent => &mut self.contents,
            EventKind::Comment => &mut self.comments,
            EventKind::ProcessingInstructionBegin => &mut self.pi_begins,
            EventKind::ProcessingInstructionEnd => &mut self.pi_ends,
        };
        *slot += 1;
        Ok(())
    }

    fn finish(&mut self) -> BuildResult<EventCounter> {
        Ok(std::mem::take(self))
    }
}
