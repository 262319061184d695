//! Chunk sources feeding a [`CharStream`](super::char_stream::CharStream)
//!
//! A chunk source is pulled synchronously, one chunk at a time, only when the
//! stream needs characters it has not buffered yet. It answers with a chunk of
//! text, an end-of-input signal, or an I/O failure:
//!
//! ```text
//! Ok(Some(chunk))  -> more text, appended to the stream buffer
//! Ok(None)         -> end of input (terminal)
//! Err(error)       -> the source failed (terminal)
//! ```
//!
//! Chunks must be delivered in order. Empty chunks are allowed and skipped.

use std::io::{self, Read};

/// Configuration for chunked reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Size of each chunk in bytes
    pub chunk_size: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024, // 64 KB
        }
    }
}

impl ChunkConfig {
    /// Create a new chunk configuration
    #[inline]
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Configuration for small inputs (16 KB chunks)
    #[inline]
    pub fn small() -> Self {
        Self::new(16 * 1024)
    }

    /// Configuration for medium inputs (64 KB chunks)
    #[inline]
    pub fn medium() -> Self {
        Self::default()
    }

    /// Configuration for large inputs (256 KB chunks)
    #[inline]
    pub fn large() -> Self {
        Self::new(256 * 1024)
    }

    /// Configuration for very large inputs (1 MB chunks)
    #[inline]
    pub fn huge() -> Self {
        Self::new(1024 * 1024)
    }
}

/// Trait for types that can provide chunks of input
pub trait ChunkSource {
    /// Get the next chunk of input
    ///
    /// Returns `Ok(None)` when the input is exhausted and `Err` when the
    /// underlying producer failed. Neither should be followed by more chunks.
    fn next_chunk(&mut self) -> io::Result<Option<String>>;
}

impl<S: ChunkSource + ?Sized> ChunkSource for Box<S> {
    fn next_chunk(&mut self) -> io::Result<Option<String>> {
        (**self).next_chunk()
    }
}

impl<S: ChunkSource + ?Sized> ChunkSource for &mut S {
    fn next_chunk(&mut self) -> io::Result<Option<String>> {
        (**self).next_chunk()
    }
}

/// An in-memory string, delivered whole or in fixed-size pieces
#[derive(Debug, Clone)]
pub struct StrSource {
    text: String,
    pos: usize,
    chunk_size: usize,
}

impl StrSource {
    /// Deliver the whole string as a single chunk
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
            chunk_size: usize::MAX,
        }
    }

    /// Deliver the string in pieces of at most `chunk_size` bytes
    ///
    /// Pieces never split a character; a piece may exceed `chunk_size` only
    /// when a single character is wider than it.
    pub fn chunked(text: impl Into<String>, chunk_size: usize) -> Self {
        Self {
            text: text.into(),
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }
}

impl ChunkSource for StrSource {
    fn next_chunk(&mut self) -> io::Result<Option<String>> {
        if self.pos >= self.text.len() {
            return Ok(None);
        }

        let mut end = self.pos.saturating_add(self.chunk_size).min(self.text.len());
        while !self.text.is_char_boundary(end) {
            end += 1;
        }

        let chunk = self.text[self.pos..end].to_owned();
        self.pos = end;
        Ok(Some(chunk))
    }
}

/// Chunks taken from any iterator of strings
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I> IterSource<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    /// Wrap an iterator; its end is the end of input
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter(),
        }
    }
}

impl<I> ChunkSource for IterSource<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    fn next_chunk(&mut self) -> io::Result<Option<String>> {
        Ok(self.iter.next().map(Into::into))
    }
}

/// Chunks produced by a closure
///
/// Handy for sources with custom failure behavior.
pub struct FnSource<F> {
    f: F,
}

/// Build a chunk source from a closure
pub fn from_fn<F>(f: F) -> FnSource<F>
where
    F: FnMut() -> io::Result<Option<String>>,
{
    FnSource { f }
}

impl<F> ChunkSource for FnSource<F>
where
    F: FnMut() -> io::Result<Option<String>>,
{
    fn next_chunk(&mut self) -> io::Result<Option<String>> {
        (self.f)()
    }
}

/// Chunks read from an [`io::Read`] implementation
///
/// Reads `chunk_size` bytes at a time. A UTF-8 sequence cut by a read boundary
/// is carried over to the next chunk; invalid UTF-8 is reported as an
/// [`io::ErrorKind::InvalidData`] failure.
pub struct ReaderSource<R: Read> {
    reader: R,
    buffer: Vec<u8>,
    pending: Vec<u8>,
    eof: bool,
}

impl<R: Read> ReaderSource<R> {
    /// Create a reader source with the default chunk configuration
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ChunkConfig::default())
    }

    /// Create a reader source with the given chunk configuration
    pub fn with_config(reader: R, config: ChunkConfig) -> Self {
        Self {
            reader,
            buffer: vec![0u8; config.chunk_size.max(1)],
            pending: Vec::new(),
            eof: false,
        }
    }

    /// Get a reference to the underlying reader
    pub fn get_ref(&self) -> &R {
        &self.reader
    }
}

impl<R: Read> ChunkSource for ReaderSource<R> {
    fn next_chunk(&mut self) -> io::Result<Option<String>> {
        loop {
            if self.eof {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                self.pending.clear();
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "incomplete UTF-8 sequence at end of input",
                ));
            }

            let read = match self.reader.read(&mut self.buffer) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if read == 0 {
                self.eof = true;
                continue;
            }

            self.pending.extend_from_slice(&self.buffer[..read]);

            let valid = match std::str::from_utf8(&self.pending) {
                Ok(_) => self.pending.len(),
                Err(e) if e.error_len().is_some() => {
                    return Err(io::Error::new(io::ErrorKind::InvalidData, e));
                }
                Err(e) => e.valid_up_to(),
            };
            if valid == 0 {
                // Only the start of a multi-byte sequence so far
                continue;
            }

            let rest = self.pending.split_off(valid);
            let bytes = std::mem::replace(&mut self.pending, rest);
            return String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e));
        }
    }
}
