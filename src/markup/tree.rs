//! Tag trees
//!
//! A document can be turned into a tree of [`Tag`]s two ways:
//!
//! - [`TreeBuilder`], an [`EventHandler`] fed by the event engine
//!   ([`build_tree`] wires the two together);
//! - [`parse_tree`], a descent parser over the same grammar productions.
//!   Open elements are kept on a heap stack, and nesting is bounded by a
//!   depth limit.
//!
//! Both produce the same tree for the same input. The document itself is an
//! unnamed root tag whose children are the top-level elements. Comments,
//! processing instructions and declarations do not appear in the tree.

use super::builder::{drive, BuildError, BuildResult, EventHandler};
use super::char_stream::{CharStream, TextSpan};
use super::char_class::CharClass;
use super::engine::EventParser;
use super::error::{ParseError, ParseResult};
use super::event::EventConfig;
use super::grammar::{self, HeaderItem, Markup};
use super::scanner::skip_whitespace;
use super::source::{ChunkSource, StrSource};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default maximum nesting depth for [`parse_tree`]
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// An attribute of a tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Attribute value, quotes excluded, escapes kept as written
    pub value: String,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element and everything nested in it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tag {
    /// Element name; empty for the document root
    pub name: String,
    /// Attributes in document order, duplicates kept
    pub attributes: Vec<Attribute>,
    /// Child elements in document order
    pub children: Vec<Tag>,
    /// Text runs of this element, each normalized, joined by single spaces
    ///
    /// Runs separated by child elements are joined too, so `<a>x<b/>y</a>`
    /// has content `"x y"`.
    pub content: String,
}

impl Tag {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an empty document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Check if this is a document root
    #[inline]
    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// Builder-style attribute addition
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Builder-style child addition
    #[must_use]
    pub fn with_child(mut self, child: Tag) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style content addition
    #[must_use]
    pub fn with_content(mut self, text: &str) -> Self {
        self.push_content(text);
        self
    }

    /// Append a normalized text run, separated from earlier runs by a space
    pub fn push_content(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.content.is_empty() {
            self.content.push(' ');
        }
        self.content.push_str(text);
    }

    /// Value of the first attribute called `name`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// First child called `name`
    pub fn child(&self, name: &str) -> Option<&Tag> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children called `name`
    pub fn children_named<'t>(&'t self, name: &'t str) -> impl Iterator<Item = &'t Tag> + 't {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Number of elements in this subtree, excluding an unnamed root
    pub fn element_count(&self) -> usize {
        let own = usize::from(!self.is_root());
        own + self.children.iter().map(Tag::element_count).sum::<usize>()
    }

    /// Serialize back to markup
    ///
    /// Content is written before the children, and an element with neither is
    /// written self-closing. Reparsing the output gives an equal tree.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        if self.is_root() {
            out.push_str(&self.content);
            for child in &self.children {
                child.write_markup(out);
            }
            return;
        }

        out.push('<');
        out.push_str(&self.name);
        for attr in &self.attributes {
            out.push(' ');
            out.push_str(&attr.name);
            out.push('=');
            write_value(&attr.value, out);
        }

        if self.content.is_empty() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        out.push_str(&self.content);
        for child in &self.children {
            child.write_markup(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
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

/// Write an attribute value so that reparsing yields it verbatim
///
/// Double quotes treat `\` as an escape, single quotes have no escape, and
/// a bare value runs to whitespace or `>`. A value that fits none of these is
/// written in double quotes and does not survive a round trip.
fn write_value(value: &str, out: &mut String) {
    let quote = if !value.contains(['"', '\\']) {
        Some('"')
    } else if !value.contains('\'') {
        Some('\'')
    } else if reads_back_double_quoted(value) {
        Some('"')
    } else if reads_back_bare(value) {
        None
    } else {
        Some('"')
    };

    match quote {
        Some(q) => {
            out.push(q);
            out.push_str(value);
            out.push(q);
        }
        None => {
            out.push_str(value);
            // Keeps a trailing `/` away from the `>` that follows
            out.push(' ');
        }
    }
}

/// Check that `value` between double quotes ends at the closing quote
fn reads_back_double_quoted(value: &str) -> bool {
    let mut escaped = false;
    for c in value.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            return false;
        }
    }
    !escaped
}

/// Check that `value` written unquoted is read back whole
fn reads_back_bare(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with(['"', '\''])
        && !value.chars().any(|c| c == '>' || CharClass::Space.contains(c))
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

// ============================================================================
// Event route
// ============================================================================

/// Builds a [`Tag`] tree from events
///
/// Needs tag open, close and self-close events; attributes and content are
/// recorded when enabled. Attributes of processing instructions are ignored.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    stack: Vec<Tag>,
    in_instruction: bool,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Create a builder holding an empty root
    pub fn new() -> Self {
        Self {
            stack: vec![Tag::root()],
            in_instruction: false,
        }
    }

    /// Number of elements currently open
    pub fn open_elements(&self) -> usize {
        self.stack.len() - 1
    }

    fn top(&mut self) -> &mut Tag {
        // The root is never popped
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn close_top(&mut self) -> BuildResult<()> {
        if self.stack.len() < 2 {
            return Err(BuildError::InvalidStructure {
                message: "close without an open element".to_string(),
            });
        }
        let done = self.stack.pop().unwrap_or_default();
        self.top().children.push(done);
        Ok(())
    }
}

impl EventHandler for TreeBuilder {
    type Output = Tag;

    fn on_tag_open(&mut self, name: &str) -> BuildResult<()> {
        self.stack.push(Tag::new(name));
        Ok(())
    }

    fn on_tag_close(&mut self, name: &str) -> BuildResult<()> {
        if self.top().name != name {
            return Err(BuildError::InvalidStructure {
                message: format!("</{}> closes <{}>", name, self.top().name),
            });
        }
        self.close_top()
    }

    fn on_tag_self_close(&mut self) -> BuildResult<()> {
        self.close_top()
    }

    fn on_attribute(&mut self, key: &str, value: &str) -> BuildResult<()> {
        if !self.in_instruction {
            self.top().attributes.push(Attribute::new(key, value));
        }
        Ok(())
    }

    fn on_content(&mut self, text: &str) -> BuildResult<()> {
        self.top().push_content(text);
        Ok(())
    }

    fn on_pi_begin(&mut self, _name: &str) -> BuildResult<()> {
        self.in_instruction = true;
        Ok(())
    }

    fn on_pi_end(&mut self) -> BuildResult<()> {
        self.in_instruction = false;
        Ok(())
    }

    fn finish(&mut self) -> BuildResult<Tag> {
        if self.stack.len() != 1 {
            let open = self.top().name.clone();
            return Err(BuildError::InvalidStructure {
                message: format!("element <{}> is still open", open),
            });
        }
        let root = std::mem::replace(&mut self.stack[0], Tag::root());
        self.in_instruction = false;
        Ok(root)
    }
}

/// Parse a whole document into a tree through the event engine
pub fn build_tree<S: ChunkSource>(stream: CharStream<S>) -> BuildResult<Tag> {
    let mut parser = EventParser::new(stream, EventConfig::default());
    drive(&mut parser, &mut TreeBuilder::new())
}

/// Collects the first element with a given name
struct ElementFinder<'n> {
    name: &'n str,
    capture: Vec<Tag>,
    in_instruction: bool,
    found: Option<Tag>,
}

impl EventHandler for ElementFinder<'_> {
    type Output = Option<Tag>;

    fn on_tag_open(&mut self, name: &str) -> BuildResult<()> {
        if !self.capture.is_empty() || name == self.name {
            self.capture.push(Tag::new(name));
        }
        Ok(())
    }

    fn on_tag_close(&mut self, _name: &str) -> BuildResult<()> {
        self.on_tag_self_close()
    }

    fn on_tag_self_close(&mut self) -> BuildResult<()> {
        let Some(done) = self.capture.pop() else {
            return Ok(());
        };
        match self.capture.last_mut() {
            Some(parent) => {
                parent.children.push(done);
                Ok(())
            }
            None => {
                self.found = Some(done);
                Err(BuildError::Stopped)
            }
        }
    }

    fn on_attribute(&mut self, key: &str, value: &str) -> BuildResult<()> {
        if let (false, Some(top)) = (self.in_instruction, self.capture.last_mut()) {
            top.attributes.push(Attribute::new(key, value));
        }
        Ok(())
    }

    fn on_content(&mut self, text: &str) -> BuildResult<()> {
        if let Some(top) = self.capture.last_mut() {
            top.push_content(text);
        }
        Ok(())
    }

    fn on_pi_begin(&mut self, _name: &str) -> BuildResult<()> {
        self.in_instruction = true;
        Ok(())
    }

    fn on_pi_end(&mut self) -> BuildResult<()> {
        self.in_instruction = false;
        Ok(())
    }

    fn finish(&mut self) -> BuildResult<Option<Tag>> {
        Ok(self.found.take())
    }
}

/// Pull events only until the first element called `name` is complete
///
/// Returns `None` if the document ends without one. Input after the element
/// is left unread, so the parser can continue from there.
pub fn find_element<S: ChunkSource>(
    parser: &mut EventParser<S>,
    name: &str,
) -> BuildResult<Option<Tag>> {
    let mut finder = ElementFinder {
        name,
        capture: Vec::new(),
        in_instruction: false,
        found: None,
    };
    drive(parser, &mut finder)
}

// ============================================================================
// Descent route
// ============================================================================

/// Parse a whole document into a tree without the event engine
///
/// Uses [`DEFAULT_MAX_DEPTH`] as the nesting limit.
pub fn parse_tree<S: ChunkSource>(stream: &mut CharStream<S>) -> ParseResult<Tag> {
    parse_tree_with_depth(stream, DEFAULT_MAX_DEPTH)
}

/// Parse a whole document into a tree, failing beyond `max_depth` nested
/// elements
pub fn parse_tree_with_depth<S: ChunkSource>(
    stream: &mut CharStream<S>,
    max_depth: usize,
) -> ParseResult<Tag> {
    let mut descent = Descent {
        stream,
        max_depth,
        scratch: String::new(),
    };
    descent.document()
}

/// Parse an in-memory document into a tree without the event engine
pub fn parse_tree_str(text: &str) -> ParseResult<Tag> {
    let mut stream: CharStream<StrSource> = CharStream::from_str(text);
    parse_tree(&mut stream)
}

struct Descent<'s, S> {
    stream: &'s mut CharStream<S>,
    max_depth: usize,
    scratch: String,
}

/// An element whose header has been read
enum Header {
    /// `<name ...>`, content and a close tag follow
    Opened(Tag, TextSpan),
    /// `<name .../>`
    SelfClosed(Tag),
}

impl<S: ChunkSource> Descent<'_, S> {
    fn document(&mut self) -> ParseResult<Tag> {
        let root = self
            .walk()
            .map_err(|e| e.or_io_failure(self.stream.error()))?;

        if let Some(e) = self.stream.error() {
            return Err(ParseError::IoFailure {
                message: e.to_string(),
            });
        }
        Ok(root)
    }

    /// Open elements live on `open`, innermost last, with their name spans
    fn walk(&mut self) -> ParseResult<Tag> {
        let mut root = Tag::root();
        let mut open: Vec<(Tag, TextSpan)> = Vec::new();

        loop {
            if let Some((tag, _)) = open.last_mut() {
                grammar::text_run(self.stream, Some(&mut self.scratch))?;
                tag.push_content(&self.scratch);

                let lt = self.stream.cursor();
                self.stream.seek(lt + 1);
                skip_whitespace(self.stream);
                if self.stream.eat('/') {
                    if let Some((done, name)) = open.pop() {
                        grammar::close_tag(self.stream, name)?;
                        attach(&mut root, &mut open, done);
                    }
                    continue;
                }
            } else {
                let Some(lt) = self.stream.find_char('<') else {
                    break;
                };
                self.stream.seek(lt + 1);
            }

            match self.markup(open.len() + 1)? {
                Some(Header::Opened(tag, name)) => open.push((tag, name)),
                Some(Header::SelfClosed(tag)) => attach(&mut root, &mut open, tag),
                None => {}
            }
        }
        Ok(root)
    }

    /// Cursor just past `<`; returns the element header, if the markup was one
    fn markup(&mut self, depth: usize) -> ParseResult<Option<Header>> {
        match grammar::markup_start(self.stream)? {
            Markup::Instruction => {
                grammar::tag_name(self.stream, "processing instruction target")?;
                while grammar::header_item(self.stream, true)? != HeaderItem::Opened {}
                Ok(None)
            }
            Markup::Comment => {
                grammar::comment(self.stream)?;
                Ok(None)
            }
            Markup::Declaration => Ok(None),
            Markup::Element => {
                if depth > self.max_depth {
                    return Err(ParseError::DepthLimitExceeded {
                        depth,
                        max_depth: self.max_depth,
                    });
                }
                self.header().map(Some)
            }
        }
    }

    fn header(&mut self) -> ParseResult<Header> {
        let name = grammar::tag_name(self.stream, "tag name")?;
        let mut tag = Tag::new(self.stream.text(name));

        loop {
            match grammar::header_item(self.stream, false)? {
                HeaderItem::Attribute { key, value } => tag
                    .attributes
                    .push(Attribute::new(self.stream.text(key), self.stream.text(value))),
                HeaderItem::Opened => return Ok(Header::Opened(tag, name)),
                HeaderItem::SelfClosed => return Ok(Header::SelfClosed(tag)),
            }
        }
    }
}

/// Add a finished element to the innermost open one, or to the root
fn attach(root: &mut Tag, open: &mut [(Tag, TextSpan)], done: Tag) {
    match open.last_mut() {
        Some((parent, _)) => parent.children.push(done),
        None => root.children.push(done),
    }
}
