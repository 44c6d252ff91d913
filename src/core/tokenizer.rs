//! XML Tokenizer - token classes for each lexing mode
//!
//! Three grammars, one token per call:
//! - Top level: entity references, CDATA, comments, PIs, start/end tag
//!   heads and text runs
//! - Attribute list: `>`, `/>`, whitespace and `name=` + opening quote
//! - Attribute value: entity references, the closing delimiter and plain runs
//!
//! `None` means nothing matches at the given offset. The reader decides
//! whether that is the end of an expansion frame or the end of the read.

use super::scanner::{Scanner, Span};

/// Token matched by the top-level grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// `&body;` - span covers `body`
    Reference(Span),
    /// `<![CDATA[...]]>` - span covers the content
    CData(Span),
    /// `<!--...-->`
    Comment,
    /// `<?...?>`
    ProcessingInstruction,
    /// `<name` - span covers the name, the rest is the attribute list
    StartTag(Span),
    /// `</name...>` - span covers the name, already consumed through `>`
    EndTag(Span),
    /// `</name` with no `>` anywhere after it
    UnterminatedEndTag(Span),
    /// Maximal run without `<` or `&`
    Text(Span),
}

/// Token matched by the attribute-list grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeToken {
    /// `>`, or `/>` when `void` is set
    Close { void: bool },
    /// Whitespace run between attributes
    Whitespace,
    /// `name="` or `name='`
    Head { name: Span, grammar: ValueGrammar },
}

/// Token matched by an attribute-value grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueToken {
    /// `&body;` - span covers `body`
    Reference(Span),
    /// The closing quote of the value
    Delimiter,
    /// Maximal run without `&` or the delimiter
    Run(Span),
}

/// Which value grammar is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueGrammar {
    /// Inside `"..."`
    DoubleQuoted,
    /// Inside `'...'`
    SingleQuoted,
    /// Inside replacement text expanded from an attribute value. No
    /// delimiter exists, so only exhaustion of the source ends it.
    Expansion,
}

impl ValueGrammar {
    /// Closing delimiter, `None` for expansion text
    #[inline]
    pub fn delimiter(self) -> Option<u8> {
        match self {
            ValueGrammar::DoubleQuoted => Some(b'"'),
            ValueGrammar::SingleQuoted => Some(b'\''),
            ValueGrammar::Expansion => None,
        }
    }

    fn for_quote(quote: u8) -> Option<Self> {
        match quote {
            b'"' => Some(ValueGrammar::DoubleQuoted),
            b'\'' => Some(ValueGrammar::SingleQuoted),
            _ => None,
        }
    }
}

/// Match one top-level token at `pos`
pub fn next_markup(input: &str, pos: usize) -> Option<(Markup, usize)> {
    let mut scanner = Scanner::at(input, pos);

    match scanner.peek()? {
        b'&' => {
            let body = read_reference(&mut scanner)?;
            Some((Markup::Reference(body), scanner.position()))
        }
        b'<' => {
            if scanner.starts_with(b"<![CDATA[") {
                scanner.advance(9);
                let start = scanner.position();
                let end = scanner.find_sequence(b"]]>")?;
                Some((Markup::CData(Span::new(start, end)), end + 3))
            } else if scanner.starts_with(b"<!--") {
                scanner.advance(4);
                let end = scanner.find_sequence(b"-->")?;
                Some((Markup::Comment, end + 3))
            } else if scanner.starts_with(b"<?") {
                scanner.advance(2);
                let end = scanner.find_sequence(b"?>")?;
                Some((Markup::ProcessingInstruction, end + 2))
            } else if scanner.starts_with(b"</") {
                scanner.advance(2);
                let name = scanner.read_name()?;
                // Anything between the name and '>' is ignored
                match scanner.find_byte(b'>') {
                    Some(gt) => Some((Markup::EndTag(name), gt + 1)),
                    None => Some((Markup::UnterminatedEndTag(name), scanner.len())),
                }
            } else {
                scanner.advance(1);
                let name = scanner.read_name()?;
                Some((Markup::StartTag(name), scanner.position()))
            }
        }
        _ => {
            let end = scanner.find_text_boundary().unwrap_or(scanner.len());
            Some((Markup::Text(Span::new(pos, end)), end))
        }
    }
}

/// Match one attribute-list token at `pos`
pub fn next_attribute(input: &str, pos: usize) -> Option<(AttributeToken, usize)> {
    let mut scanner = Scanner::at(input, pos);

    match scanner.peek()? {
        b'>' => Some((AttributeToken::Close { void: false }, pos + 1)),
        b'/' if scanner.peek_at(1) == Some(b'>') => {
            Some((AttributeToken::Close { void: true }, pos + 2))
        }
        c if super::scanner::is_whitespace(c) => {
            scanner.skip_whitespace();
            Some((AttributeToken::Whitespace, scanner.position()))
        }
        _ => {
            let name = scanner.read_name()?;
            scanner.skip_whitespace();
            if scanner.peek()? != b'=' {
                return None;
            }
            scanner.advance(1);
            scanner.skip_whitespace();
            let grammar = ValueGrammar::for_quote(scanner.peek()?)?;
            Some((AttributeToken::Head { name, grammar }, scanner.position() + 1))
        }
    }
}

/// Match one attribute-value token at `pos` under `grammar`
pub fn next_value(input: &str, pos: usize, grammar: ValueGrammar) -> Option<(ValueToken, usize)> {
    let mut scanner = Scanner::at(input, pos);
    let c = scanner.peek()?;

    if c == b'&' {
        let body = read_reference(&mut scanner)?;
        return Some((ValueToken::Reference(body), scanner.position()));
    }

    match grammar.delimiter() {
        Some(quote) if c == quote => Some((ValueToken::Delimiter, pos + 1)),
        Some(quote) => {
            let end = scanner.find_byte2(b'&', quote).unwrap_or(scanner.len());
            Some((ValueToken::Run(Span::new(pos, end)), end))
        }
        None => {
            let end = scanner.find_byte(b'&').unwrap_or(scanner.len());
            Some((ValueToken::Run(Span::new(pos, end)), end))
        }
    }
}

/// Read `&body;` with the scanner on `&`, returning the body span.
///
/// The body is either `#` plus ASCII alphanumerics or an XML name.
fn read_reference(scanner: &mut Scanner<'_>) -> Option<Span> {
    scanner.advance(1);
    let start = scanner.position();

    if scanner.peek()? == b'#' {
        scanner.advance(1);
        if scanner.read_alphanumeric().is_empty() {
            return None;
        }
    } else {
        scanner.read_name()?;
    }

    let end = scanner.position();
    if scanner.peek()? != b';' {
        return None;
    }
    scanner.advance(1);
    Some(Span::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markup(input: &str) -> Option<(Markup, usize)> {
        next_markup(input, 0)
    }

    #[test]
    fn test_text_run_stops_at_markup() {
        let input = "hello &amp; world";
        assert_eq!(markup(input), Some((Markup::Text(Span::new(0, 6)), 6)));
    }

    #[test]
    fn test_text_run_to_end() {
        assert_eq!(markup("tail"), Some((Markup::Text(Span::new(0, 4)), 4)));
    }

    #[test]
    fn test_reference() {
        let input = "&amp;rest";
        let (token, next) = markup(input).unwrap();
        assert_eq!(token, Markup::Reference(Span::new(1, 4)));
        assert_eq!(next, 5);
    }

    #[test]
    fn test_numeric_reference() {
        let input = "&#x26;";
        let (token, _) = markup(input).unwrap();
        match token {
            Markup::Reference(span) => assert_eq!(span.of(input), "#x26"),
            other => panic!("Expected reference, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_ampersand_does_not_match() {
        assert_eq!(markup("& b"), None);
        assert_eq!(markup("&amp"), None);
        assert_eq!(markup("&#;"), None);
    }

    #[test]
    fn test_cdata_comment_pi() {
        let input = "<![CDATA[a<b]]>";
        assert_eq!(markup(input), Some((Markup::CData(Span::new(9, 12)), 15)));
        assert_eq!(markup("<!-- x -->y"), Some((Markup::Comment, 10)));
        assert_eq!(markup("<?pi data?>y"), Some((Markup::ProcessingInstruction, 11)));
    }

    #[test]
    fn test_unterminated_constructs_do_not_match() {
        assert_eq!(markup("<![CDATA[abc"), None);
        assert_eq!(markup("<!-- abc"), None);
        assert_eq!(markup("<?pi"), None);
        assert_eq!(markup("<!DOCTYPE x>"), None);
        assert_eq!(markup("< a>"), None);
    }

    #[test]
    fn test_tags() {
        assert_eq!(markup("<root a='1'>"), Some((Markup::StartTag(Span::new(1, 5)), 5)));
        assert_eq!(markup("</root >x"), Some((Markup::EndTag(Span::new(2, 6)), 8)));
        assert_eq!(
            markup("</root"),
            Some((Markup::UnterminatedEndTag(Span::new(2, 6)), 6))
        );
    }

    #[test]
    fn test_attribute_tokens() {
        assert_eq!(
            next_attribute(">", 0),
            Some((AttributeToken::Close { void: false }, 1))
        );
        assert_eq!(
            next_attribute("/>", 0),
            Some((AttributeToken::Close { void: true }, 2))
        );
        assert_eq!(next_attribute("  \n>", 0), Some((AttributeToken::Whitespace, 3)));

        let input = "id = 'x'";
        assert_eq!(
            next_attribute(input, 0),
            Some((
                AttributeToken::Head {
                    name: Span::new(0, 2),
                    grammar: ValueGrammar::SingleQuoted
                },
                6
            ))
        );
    }

    #[test]
    fn test_attribute_list_rejects_garbage() {
        assert_eq!(next_attribute("id>", 0), None);
        assert_eq!(next_attribute("id=x", 0), None);
        assert_eq!(next_attribute("/ >", 0), None);
        assert_eq!(next_attribute("", 0), None);
    }

    #[test]
    fn test_value_tokens() {
        let input = "b&amp;c\"";
        let g = ValueGrammar::DoubleQuoted;
        assert_eq!(next_value(input, 0, g), Some((ValueToken::Run(Span::new(0, 1)), 1)));
        assert_eq!(next_value(input, 1, g), Some((ValueToken::Reference(Span::new(2, 5)), 6)));
        assert_eq!(next_value(input, 6, g), Some((ValueToken::Run(Span::new(6, 7)), 7)));
        assert_eq!(next_value(input, 7, g), Some((ValueToken::Delimiter, 8)));
        assert_eq!(next_value(input, 8, g), None);
    }

    #[test]
    fn test_single_quoted_value_allows_double_quote() {
        let input = "say \"hi\"'";
        assert_eq!(
            next_value(input, 0, ValueGrammar::SingleQuoted),
            Some((ValueToken::Run(Span::new(0, 8)), 8))
        );
    }

    #[test]
    fn test_expansion_value_has_no_delimiter() {
        let input = "(<d e=\"f\"/>)";
        assert_eq!(
            next_value(input, 0, ValueGrammar::Expansion),
            Some((ValueToken::Run(Span::new(0, input.len())), input.len()))
        );
        assert_eq!(next_value(input, input.len(), ValueGrammar::Expansion), None);
    }
}
