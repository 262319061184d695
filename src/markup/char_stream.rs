//! Lazy buffered character stream
//!
//! [`CharStream`] turns a [`ChunkSource`] into a seekable, searchable cursor.
//! Input is pulled one chunk at a time, only when an operation needs
//! characters that are not buffered yet.
//!
//! # Architecture
//!
//! ```text
//!   ChunkSource            CharStream                    Consumers
//!       │                      │                             │
//!       │◀──next_chunk()───────│◀──find / seek / consume─────│
//!       │──chunk──────────────▶│ buffer.push_str(chunk)      │
//!       │                      │──offset / &str─────────────▶│
//!
//!   buffer: [ consumed | looked ahead | (not pulled yet) ]
//!                      ^cursor        ^buffered_len()
//! ```
//!
//! The buffer only ever grows at its end, so byte offsets handed out by the
//! stream (and [`TextSpan`]s built from them) stay valid for the lifetime of
//! the stream. There is no compaction.
//!
//! # Status
//!
//! The stream starts in [`StreamStatus::Reading`] and moves, once, to either
//! [`StreamStatus::Exhausted`] or [`StreamStatus::Failed`]. Searches treat both
//! terminal states the same way (they stop pulling and report not-found); the
//! status and the source error stay available for reporting.

use super::char_class::{one_of, not, CharPredicate};
use super::source::{ChunkConfig, ChunkSource, ReaderSource, StrSource};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// State of the chunk source behind a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamStatus {
    /// More chunks may exist
    Reading,
    /// The source signalled end of input
    Exhausted,
    /// The source reported an I/O failure
    Failed,
}

/// A byte range into the stream buffer
///
/// Spans are plain offsets: they stay meaningful as long as the stream that
/// produced them is alive, and are resolved with [`CharStream::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextSpan {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl TextSpan {
    /// Create a new span
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Length of the span in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Buffered stream of chars over a lazily pulled chunk source
pub struct CharStream<S> {
    source: S,
    buffer: String,
    cursor: usize,
    status: StreamStatus,
    error: Option<io::Error>,
    chunks_pulled: usize,
}

impl CharStream<StrSource> {
    /// Create a stream over an in-memory string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: impl Into<String>) -> Self {
        Self::new(StrSource::new(text))
    }
}

impl<R: Read> CharStream<ReaderSource<R>> {
    /// Create a stream reading from `reader` with the default chunk size
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReaderSource::new(reader))
    }

    /// Create a stream reading from `reader` with the given chunk size
    pub fn from_reader_with_config(reader: R, config: ChunkConfig) -> Self {
        Self::new(ReaderSource::with_config(reader, config))
    }
}

impl CharStream<ReaderSource<File>> {
    /// Open a file and stream its contents
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<S: ChunkSource> CharStream<S> {
    /// Create a stream over a chunk source
    ///
    /// Nothing is pulled until the first operation needs input.
    pub fn new(source: S) -> Self {
        Self {
            source,
            buffer: String::new(),
            cursor: 0,
            status: StreamStatus::Reading,
            error: None,
            chunks_pulled: 0,
        }
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Current read position
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// State of the chunk source
    #[inline]
    pub fn status(&self) -> StreamStatus {
        self.status
    }

    /// The error reported by the source, if the stream failed
    #[inline]
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// Everything buffered so far
    #[inline]
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Number of buffered bytes
    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Number of non-empty chunks pulled from the source
    #[inline]
    pub fn chunks_pulled(&self) -> usize {
        self.chunks_pulled
    }

    /// Resolve a span produced by this stream
    ///
    /// # Panics
    /// Panics if the span lies outside the buffer or splits a character.
    #[inline]
    pub fn text(&self, span: TextSpan) -> &str {
        &self.buffer[span.start..span.end]
    }

    /// Check if the cursor is at the end of input
    ///
    /// True only when every buffered character has been read and the source
    /// has nothing more to give. May pull a chunk to find out.
    pub fn at_end_of_stream(&mut self) -> bool {
        if self.cursor < self.buffer.len() {
            return false;
        }
        // A successful pull always appends at least one char
        !self.pull()
    }

    /// Check if at least one more character can be read
    #[inline]
    pub fn has_more(&mut self) -> bool {
        !self.at_end_of_stream()
    }

    // ========================================================================
    // Chunk ingestion
    // ========================================================================

    /// Pull one more chunk into the buffer
    ///
    /// Returns `false` once the source is exhausted or failed.
    pub fn pull(&mut self) -> bool {
        if self.status != StreamStatus::Reading {
            return false;
        }

        loop {
            match self.source.next_chunk() {
                Ok(Some(chunk)) if chunk.is_empty() => continue,
                Ok(Some(chunk)) => {
                    self.buffer.push_str(&chunk);
                    self.chunks_pulled += 1;
                    log_trace!(
                        "pulled chunk #{} ({} bytes, {} buffered)",
                        self.chunks_pulled,
                        chunk.len(),
                        self.buffer.len()
                    );
                    return true;
                }
                Ok(None) => {
                    self.status = StreamStatus::Exhausted;
                    log_trace!("source exhausted after {} bytes", self.buffer.len());
                    return false;
                }
                Err(e) => {
                    log_debug!("source failed after {} bytes: {}", self.buffer.len(), e);
                    self.status = StreamStatus::Failed;
                    self.error = Some(e);
                    return false;
                }
            }
        }
    }

    /// Pull until the buffer reaches `pos` or the source ends
    ///
    /// Returns the reachable position, `min(pos, buffered_len())`.
    fn fill_to(&mut self, pos: usize) -> usize {
        while pos > self.buffer.len() && self.pull() {}
        pos.min(self.buffer.len())
    }

    /// Move an offset forward onto a char boundary
    fn ceil_char_boundary(&self, mut pos: usize) -> usize {
        while !self.buffer.is_char_boundary(pos) {
            pos += 1;
        }
        pos
    }

    // ========================================================================
    // Seeking
    // ========================================================================

    /// Move the cursor to `offset`
    ///
    /// Pulls chunks until `offset` is buffered. If the input ends first, the
    /// cursor is left at the end of the buffer and `false` is returned.
    pub fn seek(&mut self, offset: usize) -> bool {
        let reachable = self.fill_to(offset);
        self.cursor = self.ceil_char_boundary(reachable);
        reachable == offset
    }

    /// Move the cursor to the first character at or after it matching `predicate`
    ///
    /// If no such character exists, the cursor is left at the end of the buffer
    /// and `false` is returned.
    pub fn seek_where<P: CharPredicate>(&mut self, predicate: P) -> bool {
        match self.find(predicate) {
            Some(pos) => {
                self.cursor = pos;
                true
            }
            None => {
                self.cursor = self.buffer.len();
                false
            }
        }
    }

    /// Move the cursor back to the start of the input
    #[inline]
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Advance the cursor by up to `n` characters, returning how many were skipped
    pub fn advance(&mut self, n: usize) -> usize {
        let mut skipped = 0;
        while skipped < n && self.read_char().is_some() {
            skipped += 1;
        }
        skipped
    }

    // ========================================================================
    // Reading characters
    // ========================================================================

    /// Return the character at the cursor without consuming it
    pub fn peek(&mut self) -> Option<char> {
        if self.cursor == self.buffer.len() && !self.pull() {
            return None;
        }
        self.buffer[self.cursor..].chars().next()
    }

    /// Return the character at the cursor and advance past it
    pub fn read_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// Consume the next character if it is `expected`
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.cursor += expected.len_utf8();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Searching
    // ========================================================================

    /// Find the first character at or after the cursor matching `predicate`
    #[inline]
    pub fn find<P: CharPredicate>(&mut self, predicate: P) -> Option<usize> {
        self.find_from(predicate, self.cursor)
    }

    /// Find the first character at or after `from` matching `predicate`
    ///
    /// `from` must lie on a char boundary. The cursor does not move.
    pub fn find_from<P: CharPredicate>(&mut self, mut predicate: P, from: usize) -> Option<usize> {
        if self.fill_to(from) < from {
            return None;
        }

        let mut pos = from;
        loop {
            let found = self.buffer[pos..]
                .char_indices()
                .find(|&(_, c)| predicate.matches(c))
                .map(|(i, _)| pos + i);
            if found.is_some() {
                return found;
            }

            pos = self.buffer.len();
            if !self.pull() {
                return None;
            }
        }
    }

    /// Find the next occurrence of `c` at or after the cursor
    #[inline]
    pub fn find_char(&mut self, c: char) -> Option<usize> {
        self.find_char_from(c, self.cursor)
    }

    /// Find the next occurrence of `c` at or after `from`
    pub fn find_char_from(&mut self, c: char, from: usize) -> Option<usize> {
        if !c.is_ascii() {
            let mut utf8 = [0u8; 4];
            return self.find_str_from(c.encode_utf8(&mut utf8), from);
        }
        if self.fill_to(from) < from {
            return None;
        }

        let byte = c as u8;
        let mut pos = from;
        loop {
            if let Some(i) = memchr::memchr(byte, &self.buffer.as_bytes()[pos..]) {
                return Some(pos + i);
            }

            pos = self.buffer.len();
            if !self.pull() {
                return None;
            }
        }
    }

    /// Find the next occurrence of `needle` at or after the cursor
    #[inline]
    pub fn find_str(&mut self, needle: &str) -> Option<usize> {
        self.find_str_from(needle, self.cursor)
    }

    /// Find the next occurrence of `needle` at or after `from`
    ///
    /// Matches spanning chunk boundaries are found: after each pull the search
    /// resumes `needle.len() - 1` bytes before the previous buffer end.
    pub fn find_str_from(&mut self, needle: &str, from: usize) -> Option<usize> {
        if self.fill_to(from) < from {
            return None;
        }
        if needle.is_empty() {
            return Some(from);
        }

        let finder = memchr::memmem::Finder::new(needle.as_bytes());
        let mut pos = from;
        loop {
            if let Some(i) = finder.find(&self.buffer.as_bytes()[pos..]) {
                return Some(pos + i);
            }

            pos = self
                .buffer
                .len()
                .saturating_sub(needle.len() - 1)
                .max(from);
            if !self.pull() {
                return None;
            }
        }
    }

    /// Find the first character at or after the cursor that is in `set`
    #[inline]
    pub fn find_first_of(&mut self, set: &str) -> Option<usize> {
        self.find(one_of(set))
    }

    /// Find the first character at or after the cursor that is not in `set`
    #[inline]
    pub fn find_first_not_of(&mut self, set: &str) -> Option<usize> {
        self.find(not(one_of(set)))
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Return `len` bytes starting at `start`, clamped to the end of input
    ///
    /// An end that falls inside a character is moved past it.
    pub fn substring(&mut self, start: usize, len: usize) -> &str {
        let reachable = self.fill_to(start.saturating_add(len));
        let end = self.ceil_char_boundary(reachable);
        let start = self.ceil_char_boundary(start.min(end));
        &self.buffer[start..end]
    }

    /// Return the next `n` bytes and advance the cursor past them
    pub fn consume(&mut self, n: usize) -> &str {
        let to = self.cursor.saturating_add(n);
        self.consume_to(to)
    }

    /// Return everything from the cursor up to `offset` and advance the cursor there
    ///
    /// `offset` is clamped to the end of input. Offsets before the cursor
    /// yield an empty view and leave the cursor in place.
    pub fn consume_to(&mut self, offset: usize) -> &str {
        let span = self.consume_span_to(offset);
        &self.buffer[span.start..span.end]
    }

    /// Like [`consume_to`](Self::consume_to), returning the consumed span
    pub fn consume_span_to(&mut self, offset: usize) -> TextSpan {
        let start = self.cursor;
        let reachable = self.fill_to(offset);
        let end = self.ceil_char_boundary(reachable).max(start);
        self.cursor = end;
        TextSpan::new(start, end)
    }

    /// Return the text from the cursor up to `offset` without consuming it
    ///
    /// An `offset` inside a character is moved past it.
    pub fn peek_to(&mut self, offset: usize) -> &str {
        let start = self.cursor;
        let reachable = self.fill_to(offset);
        let end = self.ceil_char_boundary(reachable).max(start);
        &self.buffer[start..end]
    }

    /// Return the rest of the current line, terminator included, and advance past it
    ///
    /// Without a further `\n`, returns everything up to the end of input.
    pub fn readline(&mut self) -> &str {
        let start = self.cursor;
        self.cursor = match self.find_char('\n') {
            Some(pos) => pos + 1,
            None => self.buffer.len(),
        };
        &self.buffer[start..self.cursor]
    }

    /// Return the rest of the current line without consuming it
    pub fn peek_line(&mut self) -> &str {
        let start = self.cursor;
        let end = match self.find_char('\n') {
            Some(pos) => pos + 1,
            None => self.buffer.len(),
        };
        &self.buffer[start..end]
    }
}

impl<S> std::fmt::Debug for CharStream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharStream")
            .field("cursor", &self.cursor)
            .field("buffered", &self.buffer.len())
            .field("status", &self.status)
            .field("chunks_pulled", &self.chunks_pulled)
            .finish()
    }
}
