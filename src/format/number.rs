//! Numeric literal formatting
//!
//! Numbers are printed with the shortest digit string that reads back as the
//! same `f64`, laid out the way `Number.prototype.toString` lays them out.
//! The compact "renumber" mode additionally tries exponent and hexadecimal
//! spellings and keeps whichever is shortest.

use num_bigint::BigInt;

/// Shortest round-tripping digits and decimal exponent of a finite, positive value
///
/// Returns `(digits, n)` such that `value = 0.digits × 10^n`, with no leading
/// or trailing zeros in `digits`.
fn shortest_digits(value: f64) -> (String, i32) {
    let mut buffer = [0u8; lexical_core::BUFFER_SIZE];
    let written = lexical_core::write(value, &mut buffer);
    let text = String::from_utf8_lossy(written).to_ascii_lowercase();

    let (mantissa, exponent) = match text.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => (text, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa.as_str(), ""));

    let mut n = int_part.len() as i32 + exponent;
    let mut digits: String = int_part.chars().chain(frac_part.chars()).collect();
    while digits.starts_with('0') {
        digits.remove(0);
        n -= 1;
    }
    while digits.ends_with('0') {
        digits.pop();
    }
    (digits, n)
}

/// `Number.prototype.toString()` for a non-negative value
pub fn js_number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return "Infinity".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let (digits, n) = shortest_digits(value.abs());
    let k = digits.len() as i32;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let sign = if e < 0 { '-' } else { '+' };
        if k == 1 {
            format!("{}e{}{}", digits, sign, e.abs())
        } else {
            format!("{}.{}e{}{}", &digits[..1], &digits[1..], sign, e.abs())
        }
    };
    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format a non-negative numeric literal
///
/// Infinity has no literal spelling; `1e+400` overflows to it when read back.
/// With `renumber`, the shortest of the canonical spelling, the spelling
/// without a leading `0.`, and the integer-mantissa exponent spelling wins.
/// With `hexadecimal`, large integers may also be written in base 16.
pub fn format_number(value: f64, renumber: bool, hexadecimal: bool) -> String {
    if value.is_infinite() {
        return if renumber { "1e400" } else { "1e+400" }.to_string();
    }
    let canonical = js_number_to_string(value);
    if !renumber || canonical.len() < 3 {
        return canonical;
    }

    let mut best = canonical.replace("e+", "e");
    if let Some(rest) = best.strip_prefix("0.") {
        best = format!(".{}", rest);
    }

    let (digits, n) = shortest_digits(value);
    let exponent = n - digits.len() as i32;
    if exponent != 0 {
        let candidate = format!("{}e{}", digits, exponent);
        if candidate.len() < best.len() {
            best = candidate;
        }
    }

    if hexadecimal && value > 1e12 && value.fract() == 0.0 && value < 1.8e19 {
        let candidate = format!("0x{:x}", value as u64);
        if candidate.len() < best.len() {
            best = candidate;
        }
    }
    best
}

/// Read the numeric value of a JS numeric literal's source text
///
/// Handles decimal, exponent, hex/octal/binary prefixes, legacy octal and
/// numeric separators. Returns `None` for anything else (including BigInts).
pub fn parse_numeric_literal(raw: &str) -> Option<f64> {
    let text: String = raw.chars().filter(|&c| c != '_').collect::<String>().to_ascii_lowercase();
    if text.is_empty() || text.ends_with('n') {
        return None;
    }

    let radix_body = |prefix: &str, radix: u32| -> Option<Option<f64>> {
        let body = text.strip_prefix(prefix)?;
        Some(parse_radix(body, radix))
    };
    if let Some(v) = radix_body("0x", 16) {
        return v;
    }
    if let Some(v) = radix_body("0o", 8) {
        return v;
    }
    if let Some(v) = radix_body("0b", 2) {
        return v;
    }
    if text.len() > 1 && text.starts_with('0') && text.bytes().all(|b| b.is_ascii_digit()) {
        // legacy octal unless a digit 8 or 9 makes it decimal
        if text.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return parse_radix(&text[1..], 8);
        }
    }

    let mut normalized = text;
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }
    if let Some(pos) = normalized.find('.') {
        let next = normalized[pos + 1..].chars().next();
        if next.is_none() || next == Some('e') {
            normalized.insert(pos + 1, '0');
        }
    }
    lexical_core::parse::<f64>(normalized.as_bytes()).ok()
}

fn parse_radix(body: &str, radix: u32) -> Option<f64> {
    if body.is_empty() {
        return None;
    }
    let mut value = 0f64;
    for c in body.chars() {
        value = value * radix as f64 + c.to_digit(radix)? as f64;
    }
    Some(value)
}

/// Canonical spelling of a BigInt literal, including the `n` suffix
pub fn format_bigint(digits: &str) -> Option<String> {
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    let digits = digits.strip_suffix('n').unwrap_or(&digits).to_ascii_lowercase();
    let (body, radix) = if let Some(b) = digits.strip_prefix("0x") {
        (b, 16)
    } else if let Some(b) = digits.strip_prefix("0o") {
        (b, 8)
    } else if let Some(b) = digits.strip_prefix("0b") {
        (b, 2)
    } else {
        (digits.as_str(), 10)
    };
    let value = BigInt::parse_bytes(body.as_bytes(), radix)?;
    Some(format!("{}n", value))
}
