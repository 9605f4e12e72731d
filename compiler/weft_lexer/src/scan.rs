//! Built-in scan rules and match predicates.
//!
//! Scan rules run after their delimiter matched; `index` is the delimiter
//! start and `Scan::consumed` counts from there. Errors are positioned
//! relative to `index`; the lexer moves them to absolute offsets.

use weft_ir::Literal;

use crate::delimiter::Scan;

// === Predicates ===

/// `-` starts a number when a digit or a decimal point follows.
pub fn minus_starts_number(text: &str, index: usize) -> bool {
    text.get(index + 1..)
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit() || c == '.'))
}

/// `.` starts a number when a digit follows.
pub fn dot_starts_number(text: &str, index: usize) -> bool {
    text.get(index + 1..)
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// `\` directly before a line break.
pub fn escapes_line_break(text: &str, index: usize) -> bool {
    text.get(index + 1..)
        .is_some_and(|rest| rest.starts_with(['\n', '\r']))
}

// === Numbers ===

/// Decimal literal: optional leading `-`, digits, at most one `.`.
pub fn number(text: &str, index: usize) -> Scan {
    let rest = &text[index..];
    let mut len = 0;
    let mut seen_dot = false;
    for (i, c) in rest.char_indices() {
        let accepted = match c {
            '0'..='9' => true,
            '-' => i == 0,
            '.' if !seen_dot => {
                seen_dot = true;
                true
            }
            _ => false,
        };
        if !accepted {
            break;
        }
        len = i + c.len_utf8();
    }
    let digits = &rest[..len];

    if digits.ends_with('.') {
        return Scan::plain(len).with_error(len - 1, 1, "decimal point with no subsequent digits");
    }
    if seen_dot {
        return match digits.parse::<f64>() {
            Ok(x) => Scan::value(len, Literal::Float(x)),
            Err(_) => Scan::plain(len).with_error(0, len, "malformed decimal literal"),
        };
    }
    match digits.parse::<i64>() {
        Ok(n) => Scan::value(len, Literal::Int(n)),
        // Too wide for i64: keep the magnitude as a float.
        Err(_) => match digits.parse::<f64>() {
            Ok(x) => Scan::value(len, Literal::Float(x)),
            Err(_) => Scan::plain(len).with_error(0, len, "malformed integer literal"),
        },
    }
}

/// `0x` followed by hexadecimal digits.
pub fn hexadecimal(text: &str, index: usize) -> Scan {
    let prefix = 2;
    let digits: &str = {
        let rest = &text[index + prefix..];
        let end = rest
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    let len = prefix + digits.len();
    if digits.is_empty() {
        return Scan::plain(len).with_error(0, len, "hexadecimal literal with no digits");
    }
    match i64::from_str_radix(digits, 16) {
        Ok(n) => Scan::value(len, Literal::Int(n)),
        Err(_) => Scan::plain(len).with_error(0, len, "hexadecimal literal out of range"),
    }
}

/// `True` / `False`.
pub fn boolean(text: &str, index: usize) -> Scan {
    if text[index..].starts_with("True") {
        Scan::value(4, Literal::Bool(true))
    } else {
        Scan::value(5, Literal::Bool(false))
    }
}

// === Text bodies ===

/// Backslash escape inside a string or char body.
///
/// Unknown escapes are reported and keep the escaped character.
pub fn escape(text: &str, index: usize) -> Scan {
    let rest = &text[index + 1..];
    let mut chars = rest.chars();
    let Some(c) = chars.next() else {
        return Scan::plain(1).with_error(0, 1, "unterminated escape sequence");
    };
    let simple = |s: &str| Scan::value(1 + c.len_utf8(), Literal::Str(s.to_owned()));
    match c {
        'a' => simple("\x07"),
        'b' => simple("\x08"),
        'e' => simple("\x1b"),
        'f' => simple("\x0c"),
        'n' => simple("\n"),
        'r' => simple("\r"),
        't' => simple("\t"),
        'v' => simple("\x0b"),
        '\\' => simple("\\"),
        '\'' => simple("'"),
        '"' => simple("\""),
        '?' => simple("?"),
        // Line continuation.
        '\r' if rest[1..].starts_with('\n') => Scan::value(3, Literal::Str(String::new())),
        '\n' | '\r' => Scan::value(2, Literal::Str(String::new())),
        'x' => code_point(rest, 1, 2, 16),
        'u' => code_point(rest, 4, 4, 16),
        'U' => code_point(rest, 8, 8, 16),
        '0'..='7' => octal(rest),
        other => Scan::value(1 + other.len_utf8(), Literal::Str(other.to_string())).with_error(
            0,
            1 + other.len_utf8(),
            "unknown escape sequence",
        ),
    }
}

/// `\x`, `\u`, `\U`: between `min` and `max` digits after the letter.
fn code_point(rest: &str, min: usize, max: usize, radix: u32) -> Scan {
    let digits: String = rest[1..]
        .chars()
        .take(max)
        .take_while(|c| c.is_digit(radix))
        .collect();
    let len = 2 + digits.len();
    if digits.len() < min {
        return Scan::plain(len).with_error(0, len, "invalid escape sequence: missing hex digits");
    }
    decode(&digits, radix, len)
}

/// `\NNN` with one to three octal digits.
fn octal(rest: &str) -> Scan {
    let digits: String = rest.chars().take(3).take_while(|c| c.is_digit(8)).collect();
    decode(&digits, 8, 1 + digits.len())
}

fn decode(digits: &str, radix: u32, len: usize) -> Scan {
    match u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
    {
        Some(ch) => Scan::value(len, Literal::Str(ch.to_string())),
        None => Scan::plain(len).with_error(0, len, "escape sequence is not a valid character"),
    }
}

/// Raw line break inside a string or char body: ends the body, reported.
pub fn line_break_in_literal(text: &str, index: usize) -> Scan {
    let len = if text[index..].starts_with("\r\n") { 2 } else { 1 };
    Scan::plain(len).with_error(0, len, "line break inside text literal")
}

/// `\` + line break inside a line comment: the comment continues.
pub fn line_continuation(text: &str, index: usize) -> Scan {
    let len = if text[index + 1..].starts_with("\r\n") { 3 } else { 2 };
    Scan::plain(len)
}

#[cfg(test)]
mod tests;
