//! Prolog Scanner
//!
//! Finds where markup starts: everything before the first element start tag
//! is prolog (XML declaration, DOCTYPE, comments, PIs, filler text). The
//! contents are never interpreted here; the raw prefix is handed to the
//! backend's `head` hook.

use super::scanner::Scanner;

/// Return the end offset of the prolog.
///
/// Greedy and single pass. A construct that is not terminated ends the
/// prolog just before it, leaving the top-level lexer to reject it.
pub fn scan_prolog(input: &str) -> usize {
    let mut scanner = Scanner::at(input, 0);

    loop {
        let start = scanner.position();
        match scanner.peek() {
            None => return start,
            Some(b'<') => {
                let end = if scanner.starts_with(b"<!--") {
                    skip_comment(&mut scanner)
                } else if scanner.starts_with(b"<?") {
                    scanner.advance(2);
                    scanner.find_sequence(b"?>").map(|pos| pos + 2)
                } else if scanner.starts_with(b"<!") {
                    skip_declaration(&mut scanner)
                } else {
                    None
                };
                match end {
                    Some(end) => scanner.set_position(end),
                    None => return start,
                }
            }
            Some(_) => {
                let next = scanner.find_byte(b'<').unwrap_or(input.len());
                scanner.set_position(next);
            }
        }
    }
}

/// Skip `<!--...-->` starting at the scanner position
fn skip_comment(scanner: &mut Scanner<'_>) -> Option<usize> {
    scanner.advance(4);
    scanner.find_sequence(b"-->").map(|pos| pos + 3)
}

/// Skip a `<!...>` declaration with balanced inner `<...>` and opaque quotes
fn skip_declaration(scanner: &mut Scanner<'_>) -> Option<usize> {
    scanner.advance(2);
    let mut depth = 1usize;

    while let Some(c) = scanner.peek() {
        match c {
            b'"' | b'\'' => {
                scanner.advance(1);
                let close = scanner.find_byte(c)?;
                scanner.set_position(close + 1);
            }
            b'<' if scanner.starts_with(b"<!--") => {
                let end = skip_comment(scanner)?;
                scanner.set_position(end);
            }
            b'<' => {
                depth += 1;
                scanner.advance(1);
            }
            b'>' => {
                depth -= 1;
                scanner.advance(1);
                if depth == 0 {
                    return Some(scanner.position());
                }
            }
            _ => scanner.advance(1),
        }
    }
    None
}
