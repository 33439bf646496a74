//! String, directive and regular expression literal text

use super::is_identifier_part;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Quote character choice for string literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
    /// Whichever quote needs fewer escapes, double on a tie
    Auto,
}

impl From<String> for QuoteStyle {
    fn from(value: String) -> Self {
        QuoteStyle::parse(&value).unwrap_or_else(|| {
            warn!(quotes = %value, "unknown quote style, falling back to auto");
            QuoteStyle::Auto
        })
    }
}

impl QuoteStyle {
    /// Recognized spellings; anything else is left to the caller to normalize
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single" => Some(QuoteStyle::Single),
            "double" => Some(QuoteStyle::Double),
            "auto" => Some(QuoteStyle::Auto),
            _ => None,
        }
    }
}

fn push_unit_escape(out: &mut String, unit: u32) {
    out.push_str(&format!("\\u{:04X}", unit));
}

/// Escape for a character that may appear in a literal but is being escaped
/// anyway (control characters, non-printable or non-ASCII text)
fn push_allowed_escape(out: &mut String, c: char, next: Option<char>, json: bool) {
    match c {
        '\u{8}' => out.push_str("\\b"),
        '\u{C}' => out.push_str("\\f"),
        '\t' => out.push_str("\\t"),
        _ => {
            let code = c as u32;
            if code > 0xFFFF {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    push_unit_escape(out, *unit as u32);
                }
            } else if json || code > 0xFF {
                push_unit_escape(out, code);
            } else if code == 0 && !next.is_some_and(|n| n.is_ascii_digit()) {
                out.push_str("\\0");
            } else if code == 0x0B {
                out.push_str("\\x0B");
            } else {
                out.push_str(&format!("\\x{:02X}", code));
            }
        }
    }
}

/// Escape for a character that can never appear raw inside a string literal
fn push_disallowed_escape(out: &mut String, c: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\u{2028}' => out.push_str("\\u2028"),
        '\u{2029}' => out.push_str("\\u2029"),
        other => out.push(other),
    }
}

/// Render a string value as a quoted JS string literal
///
/// `json` forces JSON-compatible escapes; `escapeless` keeps non-ASCII and
/// non-printable characters raw where the language allows it.
pub fn escape_string(value: &str, quotes: QuoteStyle, json: bool, escapeless: bool) -> String {
    let mut body = String::with_capacity(value.len() + 2);
    let mut single_quotes = 0usize;
    let mut double_quotes = 0usize;

    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => single_quotes += 1,
            '"' => double_quotes += 1,
            '/' if json => body.push('\\'),
            '\\' | '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                push_disallowed_escape(&mut body, c);
                continue;
            }
            _ => {
                let code = c as u32;
                let needs_escape = !is_identifier_part(c)
                    && ((json && code < 0x20) || (!json && !escapeless && (code < 0x20 || code > 0x7E)));
                if needs_escape {
                    push_allowed_escape(&mut body, c, chars.peek().copied(), json);
                    continue;
                }
            }
        }
        body.push(c);
    }

    let single = match quotes {
        QuoteStyle::Single => !json,
        QuoteStyle::Double => false,
        QuoteStyle::Auto => !json && single_quotes < double_quotes,
    };
    let quote = if single { '\'' } else { '"' };
    let mut out = String::with_capacity(body.len() + 2);
    out.push(quote);
    for c in body.chars() {
        if c == quote {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// Quote a directive's raw text without re-escaping it
///
/// The raw text of `"use strict"` is significant, so the body is kept as is
/// and only the surrounding quote is chosen to avoid clashing with it.
pub fn escape_directive(raw: &str, quotes: QuoteStyle) -> String {
    let mut quote = if quotes == QuoteStyle::Double { '"' } else { '\'' };
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                quote = '"';
                break;
            }
            '"' => {
                quote = '\'';
                break;
            }
            '\\' => {
                chars.next();
            }
            _ => {}
        }
    }
    format!("{quote}{raw}{quote}")
}

/// Render a regular expression literal from its pattern and flags
pub fn format_regexp(pattern: &str, flags: &str) -> String {
    if pattern.is_empty() {
        return format!("/(?:)/{}", flags);
    }
    let mut out = String::with_capacity(pattern.len() + flags.len() + 2);
    out.push('/');
    let mut in_class = false;
    let mut escaped = false;
    for c in pattern.chars() {
        if escaped {
            match c {
                '\n' => out.push('n'),
                '\r' => out.push('r'),
                '\u{2028}' => out.push_str("u2028"),
                '\u{2029}' => out.push_str("u2029"),
                other => out.push(other),
            }
            escaped = false;
            continue;
        }
        if in_class {
            if c == ']' {
                in_class = false;
            }
        } else if c == '/' {
            out.push('\\');
        } else if c == '[' {
            in_class = true;
        }
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
        escaped = c == '\\';
    }
    out.push('/');
    out.push_str(flags);
    out
}

/// Decode the value of a quoted JS string literal
///
/// Returns `None` when `raw` is not a well-formed single string literal.
pub fn decode_string_literal(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    let quote = chars.next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }
    let inner = raw.get(1..raw.len().checked_sub(1)?)?;
    if !raw.ends_with(quote) || raw.len() < 2 {
        return None;
    }

    let mut units: Vec<u16> = Vec::with_capacity(inner.len());
    let mut it = inner.chars().peekable();
    while let Some(c) = it.next() {
        if c == quote || c == '\n' || c == '\r' {
            return None;
        }
        if c != '\\' {
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
            continue;
        }
        let escape = it.next()?;
        match escape {
            'n' => units.push(0x0A),
            'r' => units.push(0x0D),
            't' => units.push(0x09),
            'b' => units.push(0x08),
            'f' => units.push(0x0C),
            'v' => units.push(0x0B),
            '\r' => {
                if it.peek() == Some(&'\n') {
                    it.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            'x' => {
                let hex: String = [it.next()?, it.next()?].iter().collect();
                units.push(u16::from_str_radix(&hex, 16).ok()?);
            }
            'u' => {
                if it.peek() == Some(&'{') {
                    it.next();
                    let mut hex = String::new();
                    loop {
                        match it.next()? {
                            '}' => break,
                            h => hex.push(h),
                        }
                    }
                    let code = u32::from_str_radix(&hex, 16).ok()?;
                    let c = char::from_u32(code)?;
                    let mut buf = [0u16; 2];
                    units.extend_from_slice(c.encode_utf16(&mut buf));
                } else {
                    let hex: String = [it.next()?, it.next()?, it.next()?, it.next()?].iter().collect();
                    units.push(u16::from_str_radix(&hex, 16).ok()?);
                }
            }
            '0'..='7' => {
                let mut code = escape.to_digit(8)?;
                // legacy octal: up to three digits, value at most 0o377
                let max_len = if escape <= '3' { 3 } else { 2 };
                for _ in 1..max_len {
                    match it.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            it.next();
                        }
                        None => break,
                    }
                }
                units.push(code as u16);
            }
            other => {
                let mut buf = [0u16; 2];
                units.extend_from_slice(other.encode_utf16(&mut buf));
            }
        }
    }
    String::from_utf16(&units).ok()
}
