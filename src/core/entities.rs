//! XML Entity Resolution
//!
//! Handles the references that never consult the entity table:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//!
//! Everything else is left to the expansion stack.

/// Result of resolving a reference body (without `&` and `;`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Numeric or predefined reference that decodes to one character
    Char(char),
    /// Numeric reference that is unparsable or not a Unicode scalar value
    Invalid,
    /// A general entity name, to be looked up by the caller
    NotBuiltin,
}

/// Resolve a reference body
pub fn resolve_builtin(body: &str) -> Builtin {
    if let Some(numeric) = body.strip_prefix('#') {
        return match decode_numeric_entity(numeric) {
            Some(c) => Builtin::Char(c),
            None => Builtin::Invalid,
        };
    }

    match predefined_entity(body) {
        Some(c) => Builtin::Char(c),
        None => Builtin::NotBuiltin,
    }
}

/// Look up one of the five predefined entities
#[inline]
pub fn predefined_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

/// Decode a numeric character reference body (after `#`)
///
/// Decimal when it starts with a digit, hexadecimal when prefixed with `x`.
fn decode_numeric_entity(entity: &str) -> Option<char> {
    let first = *entity.as_bytes().first()?;

    let codepoint = if first == b'x' {
        let hex = &entity[1..];
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).ok()?
    } else if first.is_ascii_digit() {
        if !entity.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        entity.parse::<u32>().ok()?
    } else {
        return None;
    };

    char::from_u32(codepoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined() {
        assert_eq!(resolve_builtin("lt"), Builtin::Char('<'));
        assert_eq!(resolve_builtin("gt"), Builtin::Char('>'));
        assert_eq!(resolve_builtin("amp"), Builtin::Char('&'));
        assert_eq!(resolve_builtin("apos"), Builtin::Char('\''));
        assert_eq!(resolve_builtin("quot"), Builtin::Char('"'));
    }

    #[test]
    fn test_numeric_decimal_and_hex() {
        assert_eq!(resolve_builtin("#38"), Builtin::Char('&'));
        assert_eq!(resolve_builtin("#x26"), Builtin::Char('&'));
        assert_eq!(resolve_builtin("#x1F600"), Builtin::Char('😀'));
    }

    #[test]
    fn test_numeric_out_of_range() {
        assert_eq!(resolve_builtin("#x110000"), Builtin::Invalid);
        assert_eq!(resolve_builtin("#xD800"), Builtin::Invalid);
        assert_eq!(resolve_builtin("#99999999999"), Builtin::Invalid);
    }

    #[test]
    fn test_numeric_unparsable() {
        assert_eq!(resolve_builtin("#x"), Builtin::Invalid);
        assert_eq!(resolve_builtin("#xZZ"), Builtin::Invalid);
        assert_eq!(resolve_builtin("#X26"), Builtin::Invalid);
        assert_eq!(resolve_builtin("#12a"), Builtin::Invalid);
        assert_eq!(resolve_builtin("#abc"), Builtin::Invalid);
    }

    #[test]
    fn test_named_entities_are_not_builtin() {
        assert_eq!(resolve_builtin("nbsp"), Builtin::NotBuiltin);
        assert_eq!(resolve_builtin("Amp"), Builtin::NotBuiltin);
    }
}
