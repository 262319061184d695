//! Markup grammar productions
//!
//! Each function recognizes one piece of markup at the cursor, moves the
//! cursor past it, and reports what it found as spans. The event engine and
//! the descent tree parser are both written on top of these, so
//! the two routes accept exactly the same language.
//!
//! ```text
//! markup      := '<' S? ( instruction | comment | declaration | element )
//! element     := name header-item* ( '/>' | '>' content* '</' S? name S? '>' )
//! header-item := S? ( name S? ( '=' S? value )? )
//! value       := '"' ... '"' | "'" ... "'" | bare
//! instruction := '?' name header-item* '?>'
//! comment     := '!--' ... '-->'
//! declaration := '!' ... '>'
//! ```

use super::char_class::CharClass;
use super::char_stream::{CharStream, TextSpan};
use super::error::{ParseError, ParseResult};
use super::scanner::{
    collapse_whitespace, declaration_end, literal_sequence_end, quoted_string_end,
    skip_whitespace, word_boundary,
};
use super::source::ChunkSource;

/// What follows a `<`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// `<?`: cursor is just past the `?`
    Instruction,
    /// `<!--`: cursor is just past the dashes
    Comment,
    /// `<!...>`: already skipped
    Declaration,
    /// `<name`: cursor is on the first character of the name
    Element,
}

/// One step through a tag header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderItem {
    /// A `key[=value]` pair; the value is empty when absent
    Attribute {
        /// Attribute name
        key: TextSpan,
        /// Attribute value, quotes excluded
        value: TextSpan,
    },
    /// The header ended with `>` (or `?>` for an instruction)
    Opened,
    /// The header ended with `/>`
    SelfClosed,
}

/// Classify the markup after a `<`
///
/// The cursor must be just past the `<`. Whitespace is allowed before the
/// first significant character.
pub fn markup_start<S: ChunkSource>(stream: &mut CharStream<S>) -> ParseResult<Markup> {
    let at = skip_whitespace(stream);
    match stream.peek() {
        None => Err(ParseError::unexpected_end(at, "tag name")),
        Some('?') => {
            stream.seek(at + 1);
            Ok(Markup::Instruction)
        }
        Some('!') => {
            if stream.substring(at, 3) == "!--" {
                stream.seek(at + 3);
                return Ok(Markup::Comment);
            }
            let end = declaration_end(stream, at + 1)
                .ok_or_else(|| ParseError::unexpected_end(at, "'>' closing the declaration"))?;
            stream.seek(end);
            Ok(Markup::Declaration)
        }
        Some('/') => Err(ParseError::malformed(
            at,
            "closing tag without a matching open tag",
        )),
        Some(c) if CharClass::TagHead.contains(c) => Ok(Markup::Element),
        Some(c) => Err(ParseError::malformed(
            at,
            format!("unexpected character {:?} after '<'", c),
        )),
    }
}

/// Read a name starting exactly at the cursor and move past it
pub fn tag_name<S: ChunkSource>(
    stream: &mut CharStream<S>,
    what: &'static str,
) -> ParseResult<TextSpan> {
    let at = stream.cursor();
    match stream.peek() {
        Some(c) if CharClass::TagHead.contains(c) => {}
        Some(c) => {
            return Err(ParseError::malformed(
                at,
                format!("expected {}, found {:?}", what, c),
            ))
        }
        None => return Err(ParseError::unexpected_end(at, what)),
    }

    let span = word_boundary(stream, CharClass::TagHead, CharClass::TagBody)
        .ok_or_else(|| ParseError::unexpected_end(at, what))?;
    stream.seek(span.end);
    Ok(span)
}

/// Read the next attribute or the end of a tag header
///
/// With `pi` set the header belongs to a processing instruction: it ends at
/// `?>`, and anything that is not an attribute is skipped up to there.
pub fn header_item<S: ChunkSource>(
    stream: &mut CharStream<S>,
    pi: bool,
) -> ParseResult<HeaderItem> {
    let terminator = if pi { "'?>'" } else { "'>'" };

    loop {
        let at = skip_whitespace(stream);
        let Some(c) = stream.peek() else {
            return Err(ParseError::unexpected_end(at, terminator));
        };

        if pi {
            if c == '?' && stream.substring(at, 2) == "?>" {
                stream.seek(at + 2);
                return Ok(HeaderItem::Opened);
            }
        } else if c == '>' {
            stream.seek(at + 1);
            return Ok(HeaderItem::Opened);
        } else if c == '/' {
            return match stream.substring(at, 2) {
                "/>" => {
                    stream.seek(at + 2);
                    Ok(HeaderItem::SelfClosed)
                }
                "/" => Err(ParseError::unexpected_end(at + 1, "'>'")),
                _ => Err(ParseError::malformed(at, "expected '>' after '/'")),
            };
        }

        if CharClass::TagHead.contains(c) {
            let (key, value) = attribute(stream, pi)?;
            return Ok(HeaderItem::Attribute { key, value });
        }

        if !pi {
            return Err(ParseError::malformed(
                at,
                format!("unexpected character {:?} in tag", c),
            ));
        }

        let end = stream
            .find_str("?>")
            .ok_or_else(|| ParseError::unexpected_end(stream.buffered_len(), terminator))?;
        stream.seek(end);
    }
}

/// Parse one `key[=value]` pair starting at the cursor
fn attribute<S: ChunkSource>(
    stream: &mut CharStream<S>,
    pi: bool,
) -> ParseResult<(TextSpan, TextSpan)> {
    let key = tag_name(stream, "attribute name")?;
    skip_whitespace(stream);
    if !stream.eat('=') {
        return Ok((key, TextSpan::new(key.end, key.end)));
    }

    let at = skip_whitespace(stream);
    let value = match stream.peek() {
        Some(quote @ ('"' | '\'')) => {
            let escape = if quote == '"' { Some('\\') } else { None };
            let end = quoted_string_end(stream, at + 1, quote, escape).ok_or_else(|| {
                ParseError::unexpected_end(at, "closing quote of attribute value")
            })?;
            stream.seek(end);
            TextSpan::new(at + 1, end - 1)
        }
        _ => {
            let mut end = stream
                .find(|c: char| CharClass::Space.contains(c) || c == '>' || (pi && c == '?'))
                .unwrap_or_else(|| stream.buffered_len());
            // `<a x=1/>` is self-closing, not a value of "1/"
            let bytes = stream.buffered().as_bytes();
            if end > at && bytes[end - 1] == b'/' && bytes.get(end) == Some(&b'>') {
                end -= 1;
            }
            stream.seek(end);
            TextSpan::new(at, end)
        }
    };
    Ok((key, value))
}

/// Read a text run up to the next `<`, leaving the cursor on it
///
/// With `out` given, the run is whitespace-collapsed into it (an empty
/// result means the run was blank). Running out of input is an error: text
/// only occurs inside an element that still needs its closing tag.
pub fn text_run<S: ChunkSource>(
    stream: &mut CharStream<S>,
    out: Option<&mut String>,
) -> ParseResult<()> {
    let lt = stream
        .find_char('<')
        .ok_or_else(|| ParseError::unexpected_end(stream.buffered_len(), "closing tag"))?;
    match out {
        Some(out) => {
            let text = stream.consume_to(lt);
            collapse_whitespace(out, text);
        }
        None => {
            stream.seek(lt);
        }
    }
    Ok(())
}

/// Read `name S? '>'` of a closing tag and check it against `expected`
///
/// The cursor must be just past `</`. Returns the span of the name.
pub fn close_tag<S: ChunkSource>(
    stream: &mut CharStream<S>,
    expected: TextSpan,
) -> ParseResult<TextSpan> {
    let at = skip_whitespace(stream);
    let name = tag_name(stream, "closing tag name")?;
    if stream.text(name) != stream.text(expected) {
        return Err(ParseError::malformed(
            at,
            format!(
                "mismatched closing tag: expected </{}>, found </{}>",
                stream.text(expected),
                stream.text(name)
            ),
        ));
    }

    let gt = skip_whitespace(stream);
    match stream.peek() {
        Some('>') => {
            stream.seek(gt + 1);
            Ok(name)
        }
        Some(c) => Err(ParseError::malformed(
            gt,
            format!("expected '>' to end closing tag, found {:?}", c),
        )),
        None => Err(ParseError::unexpected_end(gt, "'>'")),
    }
}

/// Read a comment body; the cursor must be just past `<!--`
///
/// Returns the raw text between the delimiters.
pub fn comment<S: ChunkSource>(stream: &mut CharStream<S>) -> ParseResult<TextSpan> {
    let from = stream.cursor();
    let end = literal_sequence_end(stream, from, "-->")
        .ok_or_else(|| ParseError::unexpected_end(from, "'-->'"))?;
    stream.seek(end);
    Ok(TextSpan::new(from, end - "-->".len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::error::ErrorKind;

    #[test]
    fn test_markup_start() {
        let mut stream = CharStream::from_str("<?x?>");
        stream.seek(1);
        assert_eq!(markup_start(&mut stream).unwrap(), Markup::Instruction);
        assert_eq!(stream.cursor(), 2);

        let mut stream = CharStream::from_str("<!-- c -->");
        stream.seek(1);
        assert_eq!(markup_start(&mut stream).unwrap(), Markup::Comment);
        assert_eq!(stream.cursor(), 4);

        let mut stream = CharStream::from_str("<!DOCTYPE x>rest");
        stream.seek(1);
        assert_eq!(markup_start(&mut stream).unwrap(), Markup::Declaration);
        assert_eq!(stream.cursor(), 12);

        let mut stream = CharStream::from_str("<  name>");
        stream.seek(1);
        assert_eq!(markup_start(&mut stream).unwrap(), Markup::Element);
        assert_eq!(stream.cursor(), 3);
    }

    #[test]
    fn test_markup_start_errors() {
        let mut stream = CharStream::from_str("</a>");
        stream.seek(1);
        let err = markup_start(&mut stream).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStructure);

        let mut stream = CharStream::from_str("<");
        stream.seek(1);
        let err = markup_start(&mut stream).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_header_items() {
        let mut stream = CharStream::from_str(r#" a="1" b = 'x' c>"#);
        let mut keys = Vec::new();
        loop {
            match header_item(&mut stream, false).unwrap() {
                HeaderItem::Attribute { key, value } => {
                    keys.push((stream.text(key).to_string(), stream.text(value).to_string()))
                }
                HeaderItem::Opened => break,
                HeaderItem::SelfClosed => panic!("not self-closed"),
            }
        }
        assert_eq!(
            keys,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x".to_string()),
                ("c".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_header_self_closed() {
        let mut stream = CharStream::from_str("  />");
        assert_eq!(header_item(&mut stream, false).unwrap(), HeaderItem::SelfClosed);
        assert_eq!(stream.cursor(), 4);
    }

    #[test]
    fn test_instruction_header_skips_junk() {
        let mut stream = CharStream::from_str(" 42 ! ?>");
        assert_eq!(header_item(&mut stream, true).unwrap(), HeaderItem::Opened);
        assert!(stream.at_end_of_stream());
    }

    #[test]
    fn test_text_run() {
        let mut stream = CharStream::from_str("  a \n b  </x>");
        let mut out = String::new();
        text_run(&mut stream, Some(&mut out)).unwrap();
        assert_eq!(out, "a b");
        assert_eq!(stream.peek(), Some('<'));

        let mut stream = CharStream::from_str("no markup");
        let err = text_run(&mut stream, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEndOfInput);
    }

    #[test]
    fn test_close_tag() {
        let mut stream = CharStream::from_str("<item></item >");
        let expected = TextSpan::new(1, 5);
        stream.seek(8);
        let name = close_tag(&mut stream, expected).unwrap();
        assert_eq!(stream.text(name), "item");
        assert!(stream.at_end_of_stream());
    }

    #[test]
    fn test_close_tag_mismatch() {
        let mut stream = CharStream::from_str("<a></b>");
        stream.seek(5);
        let err = close_tag(&mut stream, TextSpan::new(1, 2)).unwrap_err();
        assert_eq!(err.position(), Some(5));
        assert!(err.to_string().contains("found </b>"));
    }

    #[test]
    fn test_comment() {
        let mut stream = CharStream::from_str("<!-- a -- b -->after");
        stream.seek(4);
        let span = comment(&mut stream).unwrap();
        assert_eq!(stream.text(span), " a -- b ");
        assert_eq!(stream.peek(), Some('a'));
    }
}
