//! Streaming parse-event engine
//!
//! [`EventParser`] turns a [`CharStream`] into an ordered sequence of
//! [`ParseEvent`]s. The grammar is split into small routines (document, tag,
//! tag name, attributes, content, close tag, comment, processing
//! instruction) that delegate to each other. Instead of nesting generators,
//! the parser keeps the active routines on an explicit stack of frames:
//!
//! ```text
//!   next_event()
//!        │
//!        ▼
//!   ┌─────────────────────┐   step()
//!   │ top frame           │──────────▶ Yield(event)     -> returned to caller
//!   ├─────────────────────┤            Delegate(child)  -> child pushed
//!   │ ...                 │            Complete(value)  -> popped, value to parent
//!   ├─────────────────────┤            Fail(error)      -> whole parse stops
//!   │ Document            │
//!   └─────────────────────┘
//! ```
//!
//! Only the top frame touches the stream, so events come out in document
//! order at any nesting depth and the cursor only moves forward.
//!
//! # Example
//!
//! ```rust
//! use lazyxml::markup::engine::EventParser;
//! use lazyxml::markup::event::{EventConfig, ParseEvent};
//!
//! let mut parser = EventParser::from_str("<a x=\"1\">hi</a>", EventConfig::default());
//! let mut names = Vec::new();
//! while let Some(event) = parser.next_event().unwrap() {
//!     if let ParseEvent::TagOpen { name } = event {
//!         names.push(name.to_string());
//!     }
//! }
//! assert_eq!(names, vec!["a"]);
//! ```

use super::char_stream::{CharStream, StreamStatus, TextSpan};
use super::error::{ParseError, ParseResult};
use super::event::{EventConfig, EventKind, OwnedEvent, ParseEvent};
use super::grammar::{self, HeaderItem, Markup};
use super::scanner::skip_whitespace;
use super::source::{ChunkSource, StrSource};

// ============================================================================
// Routine protocol
// ============================================================================

/// Value a finished routine hands back to the routine that delegated to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Nothing to report (comment, declaration, close tag, content)
    Done,
    /// A full element was parsed
    Element,
    /// A tag name was read
    Name(TextSpan),
    /// A tag header ended with `>` (or `?>` for an instruction)
    Opened,
    /// A tag header ended with `/>`
    SelfClosed,
}

/// An event whose payload has not been resolved against the buffer yet
#[derive(Debug, Clone, Copy)]
enum Pending {
    TagOpen(TextSpan),
    TagClose(TextSpan),
    TagSelfClose,
    TagAttribute { key: TextSpan, value: TextSpan },
    /// Payload lives in the content scratch string
    TagContent,
    Comment(TextSpan),
    PiBegin(TextSpan),
    PiEnd,
}

enum Step {
    /// Hand an event to the consumer; the routine resumes on the next pull
    Yield(Pending),
    /// Hand out the routine's final event, then complete with the outcome
    Last(Pending, Outcome),
    Delegate(Routine),
    Complete(Outcome),
    Fail(ParseError),
}

#[derive(Debug, Clone, Copy)]
enum TagState {
    Start,
    Named,
    Attributed(TextSpan),
    /// Waiting for the last delegate, then completes with the outcome
    Finishing(Outcome),
}

#[derive(Debug, Clone, Copy)]
enum PiState {
    Start,
    Body,
    End,
}

/// A resumable parsing routine
#[derive(Debug, Clone, Copy)]
enum Routine {
    /// Top level: every `<` starts a tag. `single` stops after one element.
    Document { single: bool, awaiting: bool },
    /// Cursor just past `<`
    Tag(TagState),
    /// Cursor on the first character of the name
    TagName,
    /// Attribute list up to `>`, `/>`, or `?>` when `pi` is set
    TagAttributes { pi: bool },
    /// Element body up to the matching close tag
    TagContent { name: TextSpan, closing: bool },
    /// Cursor just past `</`
    TagClose { expected: TextSpan },
    /// Cursor just past `<!--`
    Comment,
    /// Cursor just past `<?`
    ProcessingInstruction(PiState),
    /// Final event handed out; completes on the next step
    Finished(Outcome),
}

struct Ctx<'p, S> {
    stream: &'p mut CharStream<S>,
    config: &'p EventConfig,
    scratch: &'p mut String,
}

impl<S> Ctx<'_, S> {
    /// Yield `pending` as the routine's last event, or complete at once if its
    /// kind is disabled
    fn finish_with(&self, kind: EventKind, pending: Pending, outcome: Outcome) -> Step {
        if self.config.enables(kind) {
            Step::Last(pending, outcome)
        } else {
            Step::Complete(outcome)
        }
    }
}

impl From<ParseError> for Step {
    fn from(e: ParseError) -> Self {
        Step::Fail(e)
    }
}

/// Unwrap a grammar result inside a routine, failing the routine on error
macro_rules! attempt {
    ($e:expr) => {
        match $e {
            Ok(value) => value,
            Err(e) => return Step::from(e),
        }
    };
}

impl Routine {
    fn document(single: bool) -> Self {
        Routine::Document {
            single,
            awaiting: false,
        }
    }

    fn step<S: ChunkSource>(&mut self, ctx: &mut Ctx<'_, S>, handoff: Option<Outcome>) -> Step {
        match self {
            Routine::Document { single, awaiting } => {
                document_step(ctx, *single, awaiting, handoff)
            }
            Routine::Tag(state) => tag_step(ctx, state, handoff),
            Routine::TagName => {
                let name = attempt!(grammar::tag_name(ctx.stream, "tag name"));
                ctx.finish_with(EventKind::TagOpen, Pending::TagOpen(name), Outcome::Name(name))
            }
            Routine::TagAttributes { pi } => tag_attributes_step(ctx, *pi),
            Routine::TagContent { name, closing } => tag_content_step(ctx, *name, closing),
            Routine::TagClose { expected } => {
                let name = attempt!(grammar::close_tag(ctx.stream, *expected));
                ctx.finish_with(EventKind::TagClose, Pending::TagClose(name), Outcome::Done)
            }
            Routine::Comment => {
                let text = attempt!(grammar::comment(ctx.stream));
                ctx.finish_with(EventKind::Comment, Pending::Comment(text), Outcome::Done)
            }
            Routine::ProcessingInstruction(state) => pi_step(ctx, state),
            Routine::Finished(outcome) => Step::Complete(*outcome),
        }
    }
}

// ============================================================================
// Routines
// ============================================================================

fn document_step<S: ChunkSource>(
    ctx: &mut Ctx<'_, S>,
    single: bool,
    awaiting: &mut bool,
    handoff: Option<Outcome>,
) -> Step {
    if std::mem::take(awaiting) && single && handoff == Some(Outcome::Element) {
        return Step::Complete(Outcome::Done);
    }

    match ctx.stream.find_char('<') {
        Some(lt) => {
            ctx.stream.seek(lt + 1);
            *awaiting = true;
            Step::Delegate(Routine::Tag(TagState::Start))
        }
        None if single || ctx.stream.status() == StreamStatus::Failed => Step::Fail(
            ParseError::unexpected_end(ctx.stream.buffered_len(), "'<' starting an element"),
        ),
        None => Step::Complete(Outcome::Done),
    }
}

fn tag_step<S: ChunkSource>(
    ctx: &mut Ctx<'_, S>,
    state: &mut TagState,
    handoff: Option<Outcome>,
) -> Step {
    match (*state, handoff) {
        (TagState::Start, _) => match attempt!(grammar::markup_start(ctx.stream)) {
            Markup::Instruction => {
                *state = TagState::Finishing(Outcome::Done);
                Step::Delegate(Routine::ProcessingInstruction(PiState::Start))
            }
            Markup::Comment => {
                *state = TagState::Finishing(Outcome::Done);
                Step::Delegate(Routine::Comment)
            }
            Markup::Declaration => Step::Complete(Outcome::Done),
            Markup::Element => {
                *state = TagState::Named;
                Step::Delegate(Routine::TagName)
            }
        },
        (TagState::Named, Some(Outcome::Name(name))) => {
            *state = TagState::Attributed(name);
            Step::Delegate(Routine::TagAttributes { pi: false })
        }
        (TagState::Attributed(_), Some(Outcome::SelfClosed)) => Step::Complete(Outcome::Element),
        (TagState::Attributed(name), Some(Outcome::Opened)) => {
            // The content routine consumes the close tag
            *state = TagState::Finishing(Outcome::Element);
            Step::Delegate(Routine::TagContent {
                name,
                closing: false,
            })
        }
        (TagState::Finishing(outcome), Some(_)) => Step::Complete(outcome),
        _ => Step::Fail(ParseError::malformed(
            ctx.stream.cursor(),
            "tag routine resumed with an unexpected result",
        )),
    }
}

fn tag_attributes_step<S: ChunkSource>(ctx: &mut Ctx<'_, S>, pi: bool) -> Step {
    loop {
        match attempt!(grammar::header_item(ctx.stream, pi)) {
            HeaderItem::Attribute { key, value } if ctx.config.emit_tag_attribute => {
                return Step::Yield(Pending::TagAttribute { key, value });
            }
            HeaderItem::Attribute { .. } => continue,
            HeaderItem::Opened => return Step::Complete(Outcome::Opened),
            HeaderItem::SelfClosed => {
                return ctx.finish_with(
                    EventKind::TagSelfClose,
                    Pending::TagSelfClose,
                    Outcome::SelfClosed,
                )
            }
        }
    }
}

fn tag_content_step<S: ChunkSource>(
    ctx: &mut Ctx<'_, S>,
    name: TextSpan,
    closing: &mut bool,
) -> Step {
    if *closing {
        return Step::Complete(Outcome::Done);
    }

    if ctx.config.emit_tag_content {
        attempt!(grammar::text_run(ctx.stream, Some(&mut *ctx.scratch)));
        if !ctx.scratch.is_empty() {
            // Resumes on the '<' with an empty run
            return Step::Yield(Pending::TagContent);
        }
    } else {
        attempt!(grammar::text_run(ctx.stream, None));
    }

    let lt = ctx.stream.cursor();
    ctx.stream.seek(lt + 1);
    skip_whitespace(ctx.stream);
    if ctx.stream.eat('/') {
        *closing = true;
        Step::Delegate(Routine::TagClose { expected: name })
    } else {
        Step::Delegate(Routine::Tag(TagState::Start))
    }
}

fn pi_step<S: ChunkSource>(ctx: &mut Ctx<'_, S>, state: &mut PiState) -> Step {
    match *state {
        PiState::Start => {
            let name = attempt!(grammar::tag_name(ctx.stream, "processing instruction target"));
            if ctx.config.emit_processing_instruction_begin {
                *state = PiState::Body;
                return Step::Yield(Pending::PiBegin(name));
            }
            *state = PiState::End;
            Step::Delegate(Routine::TagAttributes { pi: true })
        }
        PiState::Body => {
            *state = PiState::End;
            Step::Delegate(Routine::TagAttributes { pi: true })
        }
        PiState::End => ctx.finish_with(
            EventKind::ProcessingInstructionEnd,
            Pending::PiEnd,
            Outcome::Done,
        ),
    }
}

// ============================================================================
// Parser
// ============================================================================

/// Pull-based event parser over a [`CharStream`]
///
/// Events are produced on demand by [`next_event`](Self::next_event). The
/// first error ends the parse: it is returned once, stays available through
/// [`error`](Self::error), and every later pull returns `Ok(None)`.
pub struct EventParser<S> {
    stream: CharStream<S>,
    config: EventConfig,
    frames: Vec<Routine>,
    scratch: String,
    error: Option<ParseError>,
}

impl EventParser<StrSource> {
    /// Parse an in-memory document
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: impl Into<String>, config: EventConfig) -> Self {
        Self::new(CharStream::from_str(text), config)
    }
}

impl<S: ChunkSource> EventParser<S> {
    /// Parse a whole document: every top-level element, comment, instruction
    /// and declaration until the end of input
    pub fn new(stream: CharStream<S>, config: EventConfig) -> Self {
        Self::with_root(stream, config, Routine::document(false))
    }

    /// Parse a single element: skip to the first `<`, and stop once the first
    /// element is closed
    ///
    /// Comments, instructions and declarations before the element are parsed
    /// as usual. Running out of input before any element is an error.
    pub fn element(stream: CharStream<S>, config: EventConfig) -> Self {
        Self::with_root(stream, config, Routine::document(true))
    }

    fn with_root(stream: CharStream<S>, config: EventConfig, root: Routine) -> Self {
        Self {
            stream,
            config,
            frames: vec![root],
            scratch: String::new(),
            error: None,
        }
    }

    /// Pull the next event
    ///
    /// Returns `Ok(None)` once the input is fully parsed, and after an error.
    pub fn next_event(&mut self) -> ParseResult<Option<ParseEvent<'_>>> {
        match self.pump()? {
            Some(pending) => Ok(Some(self.resolve(pending))),
            None => Ok(None),
        }
    }

    fn pump(&mut self) -> ParseResult<Option<Pending>> {
        let mut handoff = None;
        while let Some(routine) = self.frames.last_mut() {
            let mut ctx = Ctx {
                stream: &mut self.stream,
                config: &self.config,
                scratch: &mut self.scratch,
            };
            match routine.step(&mut ctx, handoff.take()) {
                Step::Yield(pending) => return Ok(Some(pending)),
                Step::Last(pending, outcome) => {
                    *routine = Routine::Finished(outcome);
                    return Ok(Some(pending));
                }
                Step::Delegate(child) => {
                    log_trace!(
                        "{:?} delegates to {:?} at offset {}",
                        routine,
                        child,
                        self.stream.cursor()
                    );
                    self.frames.push(child);
                }
                Step::Complete(outcome) => {
                    self.frames.pop();
                    handoff = Some(outcome);
                }
                Step::Fail(error) => return Err(self.fail(error)),
            }
        }
        Ok(None)
    }

    fn fail(&mut self, error: ParseError) -> ParseError {
        let error = error.or_io_failure(self.stream.error());
        log_debug!(
            "parse failed at offset {} (depth {}): {}",
            self.stream.cursor(),
            self.frames.len(),
            error
        );
        self.frames.clear();
        self.error = Some(error.clone());
        error
    }

    fn resolve(&self, pending: Pending) -> ParseEvent<'_> {
        match pending {
            Pending::TagOpen(name) => ParseEvent::TagOpen {
                name: self.stream.text(name),
            },
            Pending::TagClose(name) => ParseEvent::TagClose {
                name: self.stream.text(name),
            },
            Pending::TagSelfClose => ParseEvent::TagSelfClose,
            Pending::TagAttribute { key, value } => ParseEvent::TagAttribute {
                key: self.stream.text(key),
                value: self.stream.text(value),
            },
            Pending::TagContent => ParseEvent::TagContent {
                text: &self.scratch,
            },
            Pending::Comment(text) => ParseEvent::Comment {
                text: self.stream.text(text),
            },
            Pending::PiBegin(name) => ParseEvent::ProcessingInstructionBegin {
                name: self.stream.text(name),
            },
            Pending::PiEnd => ParseEvent::ProcessingInstructionEnd,
        }
    }

    /// The error that ended the parse, if any
    #[inline]
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Check if the parse has ended, successfully or not
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.frames.is_empty()
    }

    /// Current stream position
    #[inline]
    pub fn cursor(&self) -> usize {
        self.stream.cursor()
    }

    /// Number of active routines
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The event configuration fixed at construction
    #[inline]
    pub fn config(&self) -> &EventConfig {
        &self.config
    }

    /// The underlying stream
    #[inline]
    pub fn stream(&self) -> &CharStream<S> {
        &self.stream
    }

    /// Give up the parser and take back the stream
    pub fn into_stream(self) -> CharStream<S> {
        self.stream
    }

    /// Turn the parser into an iterator of owned events
    pub fn into_owned_events(self) -> OwnedEvents<S> {
        OwnedEvents { parser: self }
    }

    /// Parse to the end, collecting owned events
    pub fn collect_events(self) -> ParseResult<Vec<OwnedEvent>> {
        self.into_owned_events().collect()
    }
}

impl<S> std::fmt::Debug for EventParser<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventParser")
            .field("stream", &self.stream)
            .field("config", &self.config)
            .field("frames", &self.frames)
            .field("error", &self.error)
            .finish()
    }
}

/// Iterator of owned events, see [`EventParser::into_owned_events`]
///
/// Yields the parse error once, then ends.
#[derive(Debug)]
pub struct OwnedEvents<S> {
    parser: EventParser<S>,
}

impl<S> OwnedEvents<S> {
    /// The parser behind the iterator
    pub fn parser(&self) -> &EventParser<S> {
        &self.parser
    }
}

impl<S: ChunkSource> Iterator for OwnedEvents<S> {
    type Item = ParseResult<OwnedEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser
            .next_event()
            .map(|event| event.map(|e| e.to_owned_event()))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::error::ErrorKind;

    fn open(name: &str) -> OwnedEvent {
        OwnedEvent::TagOpen {
            name: name.to_string(),
        }
    }

    fn close(name: &str) -> OwnedEvent {
        OwnedEvent::TagClose {
            name: name.to_string(),
        }
    }

    fn content(text: &str) -> OwnedEvent {
        OwnedEvent::TagContent {
            text: text.to_string(),
        }
    }

    fn attr(key: &str, value: &str) -> OwnedEvent {
        OwnedEvent::TagAttribute {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    fn events(text: &str, config: EventConfig) -> Vec<OwnedEvent> {
        EventParser::from_str(text, config).collect_events().unwrap()
    }

    #[test]
    fn test_simple_element() {
        assert_eq!(
            events("<a>hi</a>", EventConfig::default()),
            vec![open("a"), content("hi"), close("a")]
        );
    }

    #[test]
    fn test_attributes_and_self_close() {
        assert_eq!(
            events(r#"<a x="1" y='two' z=3 flag/>"#, EventConfig::default()),
            vec![
                open("a"),
                attr("x", "1"),
                attr("y", "two"),
                attr("z", "3"),
                attr("flag", ""),
                OwnedEvent::TagSelfClose,
            ]
        );
    }

    #[test]
    fn test_bare_value_before_self_close() {
        assert_eq!(
            events("<a x=1/>", EventConfig::default()),
            vec![open("a"), attr("x", "1"), OwnedEvent::TagSelfClose]
        );
    }

    #[test]
    fn test_escaped_quote_in_value_is_kept_raw() {
        assert_eq!(
            events(r#"<a x="say \"hi\" >"></a>"#, EventConfig::default()),
            vec![open("a"), attr("x", r#"say \"hi\" >"#), close("a")]
        );
    }

    #[test]
    fn test_nested_order() {
        assert_eq!(
            events("<a><b>x</b>y<c/></a>", EventConfig::default()),
            vec![
                open("a"),
                open("b"),
                content("x"),
                close("b"),
                content("y"),
                open("c"),
                OwnedEvent::TagSelfClose,
                close("a"),
            ]
        );
    }

    #[test]
    fn test_whitespace_collapsing() {
        assert_eq!(
            events("<a>  one   \n  two  <b/>   \n  </a>", EventConfig::default()),
            vec![
                open("a"),
                content("one two"),
                open("b"),
                OwnedEvent::TagSelfClose,
                close("a"),
            ]
        );
    }

    #[test]
    fn test_comments_follow_config() {
        let text = "<a><!-- note --></a>";
        assert_eq!(
            events(text, EventConfig::default()),
            vec![open("a"), close("a")]
        );
        assert_eq!(
            events(text, EventConfig::all()),
            vec![
                open("a"),
                OwnedEvent::Comment {
                    text: " note ".to_string()
                },
                close("a"),
            ]
        );
    }

    #[test]
    fn test_processing_instruction() {
        assert_eq!(
            events(r#"<?xml version="1.0" encoding='utf-8'?><r/>"#, EventConfig::default()),
            vec![
                OwnedEvent::ProcessingInstructionBegin {
                    name: "xml".to_string()
                },
                attr("version", "1.0"),
                attr("encoding", "utf-8"),
                OwnedEvent::ProcessingInstructionEnd,
                open("r"),
                OwnedEvent::TagSelfClose,
            ]
        );
    }

    #[test]
    fn test_processing_instruction_skips_junk() {
        assert_eq!(
            events("<?php echo 1; ?><r/>", EventConfig::default()),
            vec![
                OwnedEvent::ProcessingInstructionBegin {
                    name: "php".to_string()
                },
                attr("echo", ""),
                OwnedEvent::ProcessingInstructionEnd,
                open("r"),
                OwnedEvent::TagSelfClose,
            ]
        );
    }

    #[test]
    fn test_declaration_is_skipped() {
        let text = r#"<!DOCTYPE note [<!ENTITY e "x>y">]><note/>"#;
        assert_eq!(
            events(text, EventConfig::all()),
            vec![open("note"), OwnedEvent::TagSelfClose]
        );
    }

    #[test]
    fn test_text_outside_elements_is_ignored() {
        assert_eq!(
            events("lead <a/> between <b/> trail", EventConfig::default()),
            vec![
                open("a"),
                OwnedEvent::TagSelfClose,
                open("b"),
                OwnedEvent::TagSelfClose,
            ]
        );
    }

    #[test]
    fn test_mismatched_close_fails_after_opens() {
        let mut parser = EventParser::from_str("<a><b></a>", EventConfig::default());
        assert_eq!(
            parser.next_event().unwrap(),
            Some(ParseEvent::TagOpen { name: "a" })
        );
        assert_eq!(
            parser.next_event().unwrap(),
            Some(ParseEvent::TagOpen { name: "b" })
        );
        let err = parser.next_event().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);
        assert!(err.to_string().contains("expected </b>"), "{}", err);

        assert_eq!(parser.next_event().unwrap(), None);
        assert_eq!(parser.error(), Some(&err));
        assert!(parser.is_finished());
    }

    #[test]
    fn test_unterminated_element() {
        let err = EventParser::from_str("<a><b>", EventConfig::default())
            .collect_events()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = EventParser::from_str(r#"<a x="oops>"#, EventConfig::default())
            .collect_events()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_stray_close_tag() {
        let err = EventParser::from_str("</a>", EventConfig::default())
            .collect_events()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);
    }

    #[test]
    fn test_junk_in_tag() {
        let err = EventParser::from_str("<a %>", EventConfig::default())
            .collect_events()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);
        assert_eq!(err.position(), Some(3));
    }

    #[test]
    fn test_disabled_kinds_are_skipped() {
        let config = EventConfig::none().with(EventKind::TagContent, true);
        assert_eq!(
            events(r#"<a x="1"><b/>text</a>"#, config),
            vec![content("text")]
        );
    }

    #[test]
    fn test_element_entry_stops_after_first_element() {
        let stream = CharStream::from_str("<!-- c --><a><b/></a><c/>");
        let mut parser = EventParser::element(stream, EventConfig::default());
        let mut seen = Vec::new();
        while let Some(event) = parser.next_event().unwrap() {
            seen.push(event.to_owned_event());
        }
        assert_eq!(seen.first(), Some(&open("a")));
        assert_eq!(seen.last(), Some(&close("a")));
        assert!(!seen.contains(&open("c")));
        assert_eq!(parser.stream().text(TextSpan::new(parser.cursor(), parser.cursor() + 4)), "<c/>");
    }

    #[test]
    fn test_element_entry_without_element() {
        let stream = CharStream::from_str("just text");
        let err = EventParser::element(stream, EventConfig::default())
            .collect_events()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_empty_document() {
        assert!(events("", EventConfig::all()).is_empty());
        assert!(events("   \n ", EventConfig::all()).is_empty());
    }

    #[test]
    fn test_namespaced_and_dotted_names() {
        assert_eq!(
            events("<ns:a.b-c></ns:a.b-c>", EventConfig::default()),
            vec![open("ns:a.b-c"), close("ns:a.b-c")]
        );
    }

    #[test]
    fn test_depth_tracks_nesting() {
        let mut parser = EventParser::from_str("<a><b><c/></b></a>", EventConfig::default());
        let mut max_depth = 0;
        while parser.next_event().unwrap().is_some() {
            max_depth = max_depth.max(parser.depth());
        }
        assert!(max_depth > 3);
        assert_eq!(parser.depth(), 0);
    }
}
