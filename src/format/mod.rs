//! Formatter and layout engine
//!
//! Pure functions that turn semantic values into exact source text: numbers,
//! strings, regular expressions, directive prologues and identifiers, plus
//! the layout rules (indentation, token separation, semicolons) the code
//! generator consults when joining fragments.
//!
//! Nothing here looks at the tree; everything takes plain values and the
//! resolved [`FormatOptions`](crate::options::FormatOptions).

mod layout;
mod number;
mod string;

pub use layout::{is_asi_hazard, Layout};
pub use number::{format_bigint, format_number, js_number_to_string, parse_numeric_literal};
pub use string::{decode_string_literal, escape_directive, escape_string, format_regexp, QuoteStyle};

use unicode_xid::UnicodeXID;

/// Whether `c` can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_xid_start())
}

/// Whether `c` can continue an identifier
pub fn is_identifier_part(c: char) -> bool {
    c == '$'
        || c == '_'
        || c == '\\'
        || c == '\u{200C}'
        || c == '\u{200D}'
        || c.is_ascii_alphanumeric()
        || (!c.is_ascii() && c.is_xid_continue())
}

/// ECMAScript line terminators
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// ECMAScript whitespace (excluding line terminators)
pub fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{000B}' | '\u{000C}' | ' ' | '\u{00A0}' | '\u{FEFF}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    )
}

/// Whether `name` is a syntactically valid identifier name
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Whether two adjacent tokens would fuse into one without a separating space
///
/// `left` is the last character already emitted, `right` the first character
/// of the next fragment. Word characters fuse (`typeof x`), doubled `+`/`-`
/// would read as increment/decrement (`a + +b`), `/` followed by `/` opens a
/// comment, and a regex or division followed by `i` would swallow
/// `in`/`instanceof` as flags.
pub fn tokens_fuse(left: char, right: char) -> bool {
    ((left == '+' || left == '-') && left == right)
        || (is_identifier_part(left) && is_identifier_part(right))
        || (left == '/' && (right == 'i' || right == '/'))
}

/// `text` with leading whitespace, line terminators and comments removed
///
/// Used to find the first code character of a rendered statement that may
/// carry leading comments.
pub fn skip_trivia(text: &str) -> &str {
    let mut rest = text;
    loop {
        let trimmed = rest.trim_start_matches(|c| is_whitespace(c) || is_line_terminator(c));
        if let Some(after) = trimmed.strip_prefix("//") {
            match after.find(is_line_terminator) {
                Some(i) => rest = &after[i..],
                None => return "",
            }
        } else if let Some(after) = trimmed.strip_prefix("/*") {
            match after.find("*/") {
                Some(i) => rest = &after[i + 2..],
                None => return "",
            }
        } else {
            return trimmed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_classes() {
        assert!(is_identifier_start('a'));
        assert!(is_identifier_start('$'));
        assert!(is_identifier_start('é'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_part('1'));
        assert!(!is_identifier_part('-'));
        assert!(is_identifier_name("m_width"));
        assert!(!is_identifier_name("1st"));
        assert!(!is_identifier_name(""));
    }

    #[test]
    fn fusing_tokens() {
        assert!(tokens_fuse('f', 'x'));
        assert!(tokens_fuse('+', '+'));
        assert!(tokens_fuse('-', '-'));
        assert!(!tokens_fuse('+', '-'));
        assert!(tokens_fuse('/', 'i'));
        assert!(!tokens_fuse(')', 'x'));
        assert!(tokens_fuse('/', '/'));
    }

    #[test]
    fn trivia_is_skipped() {
        assert_eq!(skip_trivia("  // note\n  [a]"), "[a]");
        assert_eq!(skip_trivia("/* a */ /* b */\n(x)"), "(x)");
        assert_eq!(skip_trivia("x"), "x");
        assert_eq!(skip_trivia("// only"), "");
    }

    #[test]
    fn whitespace_and_terminators() {
        assert!(is_line_terminator('\u{2028}'));
        assert!(!is_line_terminator(' '));
        assert!(is_whitespace('\u{00A0}'));
        assert!(!is_whitespace('\n'));
    }
}
