//! Character classes and predicates for stream searches
//!
//! Pre-computed lookup tables give O(1) membership tests for the ASCII
//! classes the markup grammar needs. Every class is ASCII-only: characters
//! outside the ASCII range never belong to any class except [`CharClass::Any`].
//!
//! # CharPredicate
//!
//! Searches on a [`CharStream`](super::char_stream::CharStream) take any
//! [`CharPredicate`]: a [`CharClass`], a [`Not`] wrapper, or a plain closure.
//! Predicates take `&mut self`, so stateful scanners (quote tracking, partial
//! literal matches) can be written as closures.
//!
//! ```rust
//! use lazyxml::markup::char_class::{not, CharClass, CharPredicate};
//!
//! let mut head = CharClass::TagHead;
//! assert!(head.matches('a'));
//! assert!(!head.matches('1'));
//!
//! let mut non_space = not(CharClass::Space);
//! assert!(non_space.matches('x'));
//! ```

/// Something that can be asked, one character at a time, whether it matches.
pub trait CharPredicate {
    /// Test a single character
    fn matches(&mut self, c: char) -> bool;
}

impl<F> CharPredicate for F
where
    F: FnMut(char) -> bool,
{
    #[inline]
    fn matches(&mut self, c: char) -> bool {
        self(c)
    }
}

/// Named character classes used by the markup grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Whitespace: `[ \t\n\r\x0B\x0C]`
    Space,
    /// Alphabetic: `[a-zA-Z]`
    Alpha,
    /// Digit: `[0-9]`
    Digit,
    /// Alphanumeric: `[a-zA-Z0-9]`
    Alnum,
    /// First character of a generic word: `[a-zA-Z_]`
    WordHead,
    /// Following characters of a generic word: `[a-zA-Z0-9_-]`
    WordBody,
    /// First character of a tag or attribute name: `[a-zA-Z_]`
    TagHead,
    /// Following characters of a tag or attribute name: `[a-zA-Z0-9_.:-]`
    TagBody,
    /// Any character
    Any,
}

impl CharClass {
    /// Check if a character belongs to this class
    #[inline(always)]
    pub fn contains(self, c: char) -> bool {
        if let Self::Any = self {
            return true;
        }
        if !c.is_ascii() {
            return false;
        }
        CHAR_CLASSES.test(c as u8, self.mask())
    }

    #[inline]
    const fn mask(self) -> u8 {
        match self {
            Self::Space => SPACE,
            Self::Alpha => ALPHA,
            Self::Digit => DIGIT,
            Self::Alnum => ALPHA | DIGIT,
            Self::WordHead => WORD_HEAD,
            Self::WordBody => WORD_BODY,
            Self::TagHead => WORD_HEAD,
            Self::TagBody => TAG_BODY,
            Self::Any => u8::MAX,
        }
    }
}

impl CharPredicate for CharClass {
    #[inline]
    fn matches(&mut self, c: char) -> bool {
        self.contains(c)
    }
}

/// Negation of a predicate
#[derive(Debug, Clone, Copy)]
pub struct Not<P>(pub P);

impl<P: CharPredicate> CharPredicate for Not<P> {
    #[inline]
    fn matches(&mut self, c: char) -> bool {
        !self.0.matches(c)
    }
}

/// Negate a predicate
#[inline]
pub fn not<P: CharPredicate>(predicate: P) -> Not<P> {
    Not(predicate)
}

/// Predicate matching exactly one character
#[inline]
pub fn char_eq(expected: char) -> impl FnMut(char) -> bool {
    move |c| c == expected
}

/// Predicate matching any character of `set`
#[inline]
pub fn one_of(set: &str) -> impl FnMut(char) -> bool + '_ {
    move |c| set.contains(c)
}

// Bit flags stored per ASCII byte
const SPACE: u8 = 1 << 0;
const ALPHA: u8 = 1 << 1;
const DIGIT: u8 = 1 << 2;
const WORD_HEAD: u8 = 1 << 3;
const WORD_BODY: u8 = 1 << 4;
const TAG_BODY: u8 = 1 << 5;

/// Pre-computed character class lookup table
///
/// One flag byte per ASCII character.
#[derive(Clone, Copy, Debug)]
pub struct CharClassTables {
    flags: [u8; 128],
}

impl CharClassTables {
    /// Create the lookup table at compile time
    pub const fn new() -> Self {
        let mut flags = [0u8; 128];

        let mut i = b'0';
        while i <= b'9' {
            flags[i as usize] |= DIGIT | WORD_BODY | TAG_BODY;
            i += 1;
        }

        i = b'a';
        while i <= b'z' {
            flags[i as usize] |= ALPHA | WORD_HEAD | WORD_BODY | TAG_BODY;
            i += 1;
        }

        i = b'A';
        while i <= b'Z' {
            flags[i as usize] |= ALPHA | WORD_HEAD | WORD_BODY | TAG_BODY;
            i += 1;
        }

        flags[b'_' as usize] |= WORD_HEAD | WORD_BODY | TAG_BODY;
        flags[b'-' as usize] |= WORD_BODY | TAG_BODY;
        flags[b'.' as usize] |= TAG_BODY;
        flags[b':' as usize] |= TAG_BODY;

        flags[b' ' as usize] |= SPACE;
        flags[b'\t' as usize] |= SPACE;
        flags[b'\n' as usize] |= SPACE;
        flags[b'\r' as usize] |= SPACE;
        flags[0x0B] |= SPACE; // vertical tab
        flags[0x0C] |= SPACE; // form feed

        Self { flags }
    }

    #[inline(always)]
    fn test(&self, b: u8, mask: u8) -> bool {
        self.flags[b as usize] & mask != 0
    }

    /// Check if a byte is whitespace
    #[inline(always)]
    pub fn is_space(&self, b: u8) -> bool {
        b < 128 && self.test(b, SPACE)
    }

    /// Check if a byte can start a tag name
    #[inline(always)]
    pub fn is_tag_head(&self, b: u8) -> bool {
        b < 128 && self.test(b, WORD_HEAD)
    }

    /// Check if a byte can continue a tag name
    #[inline(always)]
    pub fn is_tag_body(&self, b: u8) -> bool {
        b < 128 && self.test(b, TAG_BODY)
    }
}

impl Default for CharClassTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Global character class table
pub static CHAR_CLASSES: CharClassTables = CharClassTables::new();

/// Check whether `text` is empty or made only of whitespace
#[inline]
pub fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| CHAR_CLASSES.is_space(b))
}
