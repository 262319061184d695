//! Parse errors
//!
//! Every error is fail-fast: the routine that detects it terminates, and so do
//! all routines it was delegated from. Events returned before the error stay
//! valid.

use super::source_location::SourcePosition;
use std::fmt;

/// Result alias used throughout the crate
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for parse operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The chunk source reported a failure
    IoFailure {
        /// Message of the underlying I/O error
        message: String,
    },

    /// The grammar required more input than the source provided
    UnexpectedEndOfInput {
        /// Byte offset where more input was needed
        position: usize,
        /// What the parser was looking for
        expected: &'static str,
    },

    /// Delimiter mismatch, missing name, unterminated quote, mismatched close tag
    MalformedStructure {
        /// Byte offset of the offending input
        position: usize,
        /// Description of the violation
        reason: String,
    },

    /// Nesting exceeded the depth limit of the descent tree parser
    DepthLimitExceeded {
        /// Depth that was reached
        depth: usize,
        /// Maximum allowed depth
        max_depth: usize,
    },
}

/// Coarse classification of a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ParseError::IoFailure`]
    IoFailure,
    /// See [`ParseError::UnexpectedEndOfInput`]
    UnexpectedEndOfInput,
    /// See [`ParseError::MalformedStructure`] and [`ParseError::DepthLimitExceeded`]
    MalformedStructure,
}

impl ParseError {
    /// Create a malformed-structure error
    #[inline]
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        ParseError::MalformedStructure {
            position,
            reason: reason.into(),
        }
    }

    /// Create an unexpected-end error
    #[inline]
    pub fn unexpected_end(position: usize, expected: &'static str) -> Self {
        ParseError::UnexpectedEndOfInput { position, expected }
    }

    /// Report running out of input as an I/O failure when the source broke
    ///
    /// Other errors, and any error when `source_error` is `None`, are returned
    /// unchanged.
    pub fn or_io_failure(self, source_error: Option<&std::io::Error>) -> Self {
        match (&self, source_error) {
            (ParseError::UnexpectedEndOfInput { .. }, Some(io)) => ParseError::IoFailure {
                message: io.to_string(),
            },
            _ => self,
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::IoFailure { .. } => ErrorKind::IoFailure,
            ParseError::UnexpectedEndOfInput { .. } => ErrorKind::UnexpectedEndOfInput,
            ParseError::MalformedStructure { .. } | ParseError::DepthLimitExceeded { .. } => {
                ErrorKind::MalformedStructure
            }
        }
    }

    /// Byte offset the error refers to, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedEndOfInput { position, .. }
            | ParseError::MalformedStructure { position, .. } => Some(*position),
            ParseError::IoFailure { .. } | ParseError::DepthLimitExceeded { .. } => None,
        }
    }

    /// Add source position information to the error message
    pub fn format_with_position(&self, input: &str) -> String {
        match self.position() {
            Some(offset) => {
                let sp = SourcePosition::from_offset(input, offset);
                format!("{} at {} (byte offset {})", self, sp, offset)
            }
            None => self.to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::IoFailure { message } => write!(f, "I/O error: {}", message),
            ParseError::UnexpectedEndOfInput { expected, .. } => {
                write!(f, "Unexpected end of input: expected {}", expected)
            }
            ParseError::MalformedStructure { reason, .. } => {
                write!(f, "Malformed structure: {}", reason)
            }
            ParseError::DepthLimitExceeded { depth, max_depth } => write!(
                f,
                "Depth limit exceeded: depth {} exceeds limit of {}",
                depth, max_depth
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::IoFailure {
            message: e.to_string(),
        }
    }
}
