//! Scanning primitives
//!
//! Small searches built only on the [`CharStream`] search API. The offset
//! finders (`word_boundary`, `quoted_string_end`, `literal_sequence_end`,
//! `declaration_end`) never move the cursor; stateful matching lives in
//! closures handed to [`CharStream::find_from`], so a match that straddles a
//! chunk boundary is found without rescanning.
//!
//! The consuming helpers (`next_word`, `next_string`, `skip_whitespace`)
//! combine a search with a cursor move.

use super::char_class::{not, CharClass, CharPredicate};
use super::char_stream::{CharStream, TextSpan};
use super::source::ChunkSource;

/// Find the next word at or after the cursor
///
/// A word starts at the first character satisfying `head` and extends while
/// `body` holds. Returns `None` if no head character exists before the end of
/// input. A word running into the end of input ends there.
pub fn word_boundary<S, H, B>(stream: &mut CharStream<S>, head: H, body: B) -> Option<TextSpan>
where
    S: ChunkSource,
    H: CharPredicate,
    B: CharPredicate,
{
    let start = stream.find(head)?;
    let head_len = stream.buffered()[start..]
        .chars()
        .next()
        .map_or(0, char::len_utf8);

    let end = stream
        .find_from(not(body), start + head_len)
        .unwrap_or_else(|| stream.buffered_len());
    Some(TextSpan::new(start, end))
}

/// Find the end of a quoted string
///
/// `from` is the offset just past the opening delimiter. Each `escape`
/// character escapes the character after it, so `\\` followed by the delimiter
/// still closes the string. Returns the offset just past the closing delimiter.
pub fn quoted_string_end<S: ChunkSource>(
    stream: &mut CharStream<S>,
    from: usize,
    delim: char,
    escape: Option<char>,
) -> Option<usize> {
    let mut escaped = false;
    let pos = stream.find_from(
        |c: char| {
            if escaped {
                escaped = false;
                false
            } else if Some(c) == escape {
                escaped = true;
                false
            } else {
                c == delim
            }
        },
        from,
    )?;
    Some(pos + delim.len_utf8())
}

/// Find the end of the first occurrence of `pattern` at or after `from`
///
/// Double-quoted spans (with `\` escapes) are skipped: an occurrence inside
/// quotes does not count. Matching uses a KMP failure table, so overlapping
/// prefixes such as `--->` for `-->` are handled. Returns the offset just past
/// the match.
pub fn literal_sequence_end<S: ChunkSource>(
    stream: &mut CharStream<S>,
    from: usize,
    pattern: &str,
) -> Option<usize> {
    let pattern: Vec<char> = pattern.chars().collect();
    let Some(&last) = pattern.last() else {
        return Some(from);
    };
    let failure = failure_table(&pattern);

    let mut matched = 0;
    let mut in_quote = false;
    let mut escaped = false;
    let pos = stream.find_from(
        |c: char| {
            if in_quote {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_quote = false;
                }
                return false;
            }

            loop {
                if pattern[matched] == c {
                    matched += 1;
                    return matched == pattern.len();
                }
                if matched == 0 {
                    break;
                }
                matched = failure[matched - 1];
            }

            if c == '"' {
                in_quote = true;
            }
            false
        },
        from,
    )?;
    Some(pos + last.len_utf8())
}

/// KMP failure table: length of the longest proper prefix that is also a
/// suffix of `pattern[..=i]`
fn failure_table(pattern: &[char]) -> Vec<usize> {
    let mut table = vec![0; pattern.len()];
    let mut k = 0;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = table[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        table[i] = k;
    }
    table
}

/// Find the end of a `<!...>` declaration
///
/// `from` is the offset just past `<!`. Quoted strings (either quote style)
/// and bracketed internal subsets are skipped, so `>` inside them does not
/// terminate the declaration. Returns the offset just past the closing `>`.
pub fn declaration_end<S: ChunkSource>(stream: &mut CharStream<S>, from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let pos = stream.find_from(
        |c: char| {
            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                return false;
            }
            match c {
                '"' | '\'' => quote = Some(c),
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '>' => return depth == 0,
                _ => {}
            }
            false
        },
        from,
    )?;
    Some(pos + 1)
}

/// Consume and return the next word at or after the cursor
///
/// Text between the cursor and the word is skipped.
pub fn next_word<S, H, B>(stream: &mut CharStream<S>, head: H, body: B) -> Option<&str>
where
    S: ChunkSource,
    H: CharPredicate,
    B: CharPredicate,
{
    let span = word_boundary(stream, head, body)?;
    stream.seek(span.start);
    Some(stream.consume_to(span.end))
}

/// Consume and return the next quoted string at or after the cursor
///
/// The returned text excludes the delimiters; escape characters are kept as
/// they appear. On an unterminated string the cursor does not move.
pub fn next_string<S: ChunkSource>(
    stream: &mut CharStream<S>,
    delim: char,
    escape: Option<char>,
) -> Option<&str> {
    let open = stream.find_char(delim)? + delim.len_utf8();
    let end = quoted_string_end(stream, open, delim, escape)?;
    stream.seek(end);
    Some(stream.text(TextSpan::new(open, end - delim.len_utf8())))
}

/// Move the cursor past any whitespace, returning the new cursor
pub fn skip_whitespace<S: ChunkSource>(stream: &mut CharStream<S>) -> usize {
    stream.seek_where(not(CharClass::Space));
    stream.cursor()
}

/// Write `text` into `out` with whitespace runs collapsed to one space and
/// the ends trimmed
///
/// `out` is cleared first. A whitespace-only `text` leaves it empty.
pub fn collapse_whitespace(out: &mut String, text: &str) {
    out.clear();
    for word in text
        .split(|c: char| CharClass::Space.contains(c))
        .filter(|w| !w.is_empty())
    {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
}
