//! Parse events and event configuration
//!
//! [`ParseEvent`] is what the engine hands out: payloads borrow from the
//! parser, so an event must be dropped (or converted with
//! [`ParseEvent::to_owned_event`]) before the next event is pulled.
//!
//! [`EventConfig`] decides, once per parser, which kinds of event are built
//! at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A structural event produced by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseEvent<'a> {
    /// An element start tag was recognized (`<name`)
    TagOpen {
        /// Element name
        name: &'a str,
    },
    /// An element was closed by `</name>`
    TagClose {
        /// Element name
        name: &'a str,
    },
    /// An element was closed by `/>`
    TagSelfClose,
    /// An attribute of the current tag or processing instruction
    TagAttribute {
        /// Attribute name
        key: &'a str,
        /// Attribute value, without quotes; empty when no value was given
        value: &'a str,
    },
    /// A run of text content, whitespace-collapsed and trimmed
    TagContent {
        /// Normalized text
        text: &'a str,
    },
    /// A `<!-- ... -->` comment
    Comment {
        /// Raw text between the delimiters
        text: &'a str,
    },
    /// Start of a `<?name ...?>` processing instruction
    ProcessingInstructionBegin {
        /// Instruction target
        name: &'a str,
    },
    /// End of a processing instruction
    ProcessingInstructionEnd,
}

impl<'a> ParseEvent<'a> {
    /// The kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            ParseEvent::TagOpen { .. } => EventKind::TagOpen,
            ParseEvent::TagClose { .. } => EventKind::TagClose,
            ParseEvent::TagSelfClose => EventKind::TagSelfClose,
            ParseEvent::TagAttribute { .. } => EventKind::TagAttribute,
            ParseEvent::TagContent { .. } => EventKind::TagContent,
            ParseEvent::Comment { .. } => EventKind::Comment,
            ParseEvent::ProcessingInstructionBegin { .. } => EventKind::ProcessingInstructionBegin,
            ParseEvent::ProcessingInstructionEnd => EventKind::ProcessingInstructionEnd,
        }
    }

    /// Copy the payloads into an [`OwnedEvent`]
    pub fn to_owned_event(&self) -> OwnedEvent {
        match *self {
            ParseEvent::TagOpen { name } => OwnedEvent::TagOpen {
                name: name.to_string(),
            },
            ParseEvent::TagClose { name } => OwnedEvent::TagClose {
                name: name.to_string(),
            },
            ParseEvent::TagSelfClose => OwnedEvent::TagSelfClose,
            ParseEvent::TagAttribute { key, value } => OwnedEvent::TagAttribute {
                key: key.to_string(),
                value: value.to_string(),
            },
            ParseEvent::TagContent { text } => OwnedEvent::TagContent {
                text: text.to_string(),
            },
            ParseEvent::Comment { text } => OwnedEvent::Comment {
                text: text.to_string(),
            },
            ParseEvent::ProcessingInstructionBegin { name } => {
                OwnedEvent::ProcessingInstructionBegin {
                    name: name.to_string(),
                }
            }
            ParseEvent::ProcessingInstructionEnd => OwnedEvent::ProcessingInstructionEnd,
        }
    }
}

impl fmt::Display for ParseEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseEvent::TagOpen { name } => write!(f, "TagOpen[{}]", name),
            ParseEvent::TagClose { name } => write!(f, "TagClose[{}]", name),
            ParseEvent::TagSelfClose => write!(f, "TagSelfClose"),
            ParseEvent::TagAttribute { key, value } => {
                write!(f, "TagAttribute[{}={:?}]", key, value)
            }
            ParseEvent::TagContent { text } => write!(f, "TagContent[{:?}]", text),
            ParseEvent::Comment { text } => write!(f, "Comment[{:?}]", text),
            ParseEvent::ProcessingInstructionBegin { name } => write!(f, "PIBegin[{}]", name),
            ParseEvent::ProcessingInstructionEnd => write!(f, "PIEnd"),
        }
    }
}

/// Owned copy of a [`ParseEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OwnedEvent {
    /// See [`ParseEvent::TagOpen`]
    TagOpen {
        /// Element name
        name: String,
    },
    /// See [`ParseEvent::TagClose`]
    TagClose {
        /// Element name
        name: String,
    },
    /// See [`ParseEvent::TagSelfClose`]
    TagSelfClose,
    /// See [`ParseEvent::TagAttribute`]
    TagAttribute {
        /// Attribute name
        key: String,
        /// Attribute value
        value: String,
    },
    /// See [`ParseEvent::TagContent`]
    TagContent {
        /// Normalized text
        text: String,
    },
    /// See [`ParseEvent::Comment`]
    Comment {
        /// Comment text
        text: String,
    },
    /// See [`ParseEvent::ProcessingInstructionBegin`]
    ProcessingInstructionBegin {
        /// Instruction target
        name: String,
    },
    /// See [`ParseEvent::ProcessingInstructionEnd`]
    ProcessingInstructionEnd,
}

impl OwnedEvent {
    /// Borrow this event as a [`ParseEvent`]
    pub fn as_event(&self) -> ParseEvent<'_> {
        match self {
            OwnedEvent::TagOpen { name } => ParseEvent::TagOpen { name },
            OwnedEvent::TagClose { name } => ParseEvent::TagClose { name },
            OwnedEvent::TagSelfClose => ParseEvent::TagSelfClose,
            OwnedEvent::TagAttribute { key, value } => ParseEvent::TagAttribute { key, value },
            OwnedEvent::TagContent { text } => ParseEvent::TagContent { text },
            OwnedEvent::Comment { text } => ParseEvent::Comment { text },
            OwnedEvent::ProcessingInstructionBegin { name } => {
                ParseEvent::ProcessingInstructionBegin { name }
            }
            OwnedEvent::ProcessingInstructionEnd => ParseEvent::ProcessingInstructionEnd,
        }
    }

    /// The kind of this event
    #[inline]
    pub fn kind(&self) -> EventKind {
        self.as_event().kind()
    }
}

impl fmt::Display for OwnedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_event().fmt(f)
    }
}

/// Serialize a list of events to a JSON array
pub fn events_to_json(events: &[OwnedEvent]) -> Result<String, serde_json::Error> {
    serde_json::to_string(events)
}

/// The eight kinds of [`ParseEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// `<name`
    TagOpen,
    /// `</name>`
    TagClose,
    /// `/>`
    TagSelfClose,
    /// `key="value"`
    TagAttribute,
    /// Text between tags
    TagContent,
    /// `<!-- ... -->`
    Comment,
    /// `<?name`
    ProcessingInstructionBegin,
    /// `?>`
    ProcessingInstructionEnd,
}

impl EventKind {
    /// All kinds, in declaration order
    pub const ALL: [EventKind; 8] = [
        EventKind::TagOpen,
        EventKind::TagClose,
        EventKind::TagSelfClose,
        EventKind::TagAttribute,
        EventKind::TagContent,
        EventKind::Comment,
        EventKind::ProcessingInstructionBegin,
        EventKind::ProcessingInstructionEnd,
    ];
}

/// Which event kinds a parser materializes
///
/// Fixed when the parser is built. A disabled kind is never constructed; the
/// parser still recognizes the syntax and moves past it.
///
/// # Example
///
/// ```rust
/// use lazyxml::markup::event::{EventConfig, EventKind};
///
/// let config = EventConfig::none()
///     .with(EventKind::TagOpen, true)
///     .with(EventKind::TagClose, true);
/// assert!(config.enables(EventKind::TagOpen));
/// assert!(!config.enables(EventKind::TagContent));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventConfig {
    /// Emit [`ParseEvent::TagOpen`]
    pub emit_tag_open: bool,
    /// Emit [`ParseEvent::TagClose`]
    pub emit_tag_close: bool,
    /// Emit [`ParseEvent::TagSelfClose`]
    pub emit_tag_self_close: bool,
    /// Emit [`ParseEvent::TagAttribute`]
    pub emit_tag_attribute: bool,
    /// Emit [`ParseEvent::TagContent`]
    pub emit_tag_content: bool,
    /// Emit [`ParseEvent::Comment`]
    pub emit_comments: bool,
    /// Emit [`ParseEvent::ProcessingInstructionBegin`]
    pub emit_processing_instruction_begin: bool,
    /// Emit [`ParseEvent::ProcessingInstructionEnd`]
    pub emit_processing_instruction_end: bool,
}

impl Default for EventConfig {
    /// Everything except comments
    fn default() -> Self {
        Self {
            emit_comments: false,
            ..Self::all()
        }
    }
}

impl EventConfig {
    /// Enable every event kind
    pub const fn all() -> Self {
        Self::uniform(true)
    }

    /// Disable every event kind
    pub const fn none() -> Self {
        Self::uniform(false)
    }

    const fn uniform(on: bool) -> Self {
        Self {
            emit_tag_open: on,
            emit_tag_close: on,
            emit_tag_self_close: on,
            emit_tag_attribute: on,
            emit_tag_content: on,
            emit_comments: on,
            emit_processing_instruction_begin: on,
            emit_processing_instruction_end: on,
        }
    }

    /// Return a copy with `kind` switched on or off
    #[must_use]
    pub fn with(mut self, kind: EventKind, on: bool) -> Self {
        *self.switch(kind) = on;
        self
    }

    /// Check whether `kind` is emitted
    #[inline]
    pub fn enables(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::TagOpen => self.emit_tag_open,
            EventKind::TagClose => self.emit_tag_close,
            EventKind::TagSelfClose => self.emit_tag_self_close,
            EventKind::TagAttribute => self.emit_tag_attribute,
            EventKind::TagContent => self.emit_tag_content,
            EventKind::Comment => self.emit_comments,
            EventKind::ProcessingInstructionBegin => self.emit_processing_instruction_begin,
            EventKind::ProcessingInstructionEnd => self.emit_processing_instruction_end,
        }
    }

    fn switch(&mut self, kind: EventKind) -> &mut bool {
        match kind {
            EventKind::TagOpen => &mut self.emit_tag_open,
            EventKind::TagClose => &mut self.emit_tag_close,
            EventKind::TagSelfClose => &mut self.emit_tag_self_close,
            EventKind::TagAttribute => &mut self.emit_tag_attribute,
            EventKind::TagContent => &mut self.emit_tag_content,
            EventKind::Comment => &mut self.emit_comments,
            EventKind::ProcessingInstructionBegin => &mut self.emit_processing_instruction_begin,
            EventKind::ProcessingInstructionEnd => &mut self.emit_processing_instruction_end,
        }
    }

    /// Serialize to JSON
    #[inline]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON
    #[inline]
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
