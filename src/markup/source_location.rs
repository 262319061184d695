//! Source Location Utilities
//!
//! Line/column calculation for byte offsets into the buffered input, used when
//! rendering parse errors.

use std::fmt;

/// A position in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Byte offset from start of input
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, counted in chars)
    pub column: usize,
}

impl SourcePosition {
    /// Create a new source position
    #[inline]
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create a position at the start of input
    #[inline]
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Calculate position from an offset in the input
    ///
    /// Offsets past the end are clamped; offsets inside a multi-byte char are
    /// moved back to the start of that char.
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let offset = floor_char_boundary(input, offset);
        let before = &input.as_bytes()[..offset];

        let line = memchr::memchr_iter(b'\n', before).count() + 1;
        let line_start = memchr::memrchr(b'\n', before).map_or(0, |p| p + 1);
        let column = input[line_start..offset].chars().count() + 1;

        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

/// Convert a byte offset to line and column numbers (both 1-based)
#[inline]
pub fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let pos = SourcePosition::from_offset(input, offset);
    (pos.line, pos.column)
}

/// Get the line content at a given offset, without its terminator
pub fn get_line_at_offset(input: &str, offset: usize) -> &str {
    let offset = floor_char_boundary(input, offset);
    let bytes = input.as_bytes();

    let line_start = memchr::memrchr(b'\n', &bytes[..offset]).map_or(0, |p| p + 1);
    let line_end = memchr::memchr(b'\n', &bytes[offset..]).map_or(input.len(), |p| offset + p);

    input[line_start..line_end].trim_end_matches('\r')
}

fn floor_char_boundary(input: &str, offset: usize) -> usize {
    let mut offset = offset.min(input.len());
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
