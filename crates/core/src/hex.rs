//! Hexadecimal text codec for picker colors.
//!
//! Accepted input: an optional leading `#`, then exactly 3 (`RGB`), 6
//! (`RRGGBB`) or 8 (`AARRGGBB`) hex digits, case-insensitive. Anything else is
//! rejected with `None` so callers can keep their previous state while the
//! user is still typing.

use crate::color::{Hsva, Rgba8};

/// Output options for [`format_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexFormat {
    pub include_hash: bool,
    pub include_alpha: bool,
    pub uppercase: bool,
}

impl Default for HexFormat {
    fn default() -> Self {
        Self {
            include_hash: false,
            include_alpha: false,
            uppercase: true,
        }
    }
}

/// Parses hex text into a color. See [`parse_rgba8`].
pub fn parse(text: &str, allow_alpha: bool) -> Option<Hsva> {
    parse_rgba8(text, allow_alpha).map(Hsva::from_rgba8)
}

/// Parses hex text into 8-bit RGBA.
///
/// The 3-digit form duplicates each nibble. The 8-digit form carries alpha in
/// its first byte; when `allow_alpha` is false that alpha is discarded and the
/// color comes back opaque.
pub fn parse_rgba8(text: &str, allow_alpha: bool) -> Option<Rgba8> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    // from_str_radix would accept a leading '+', so check every byte first
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|n| n * 17);

    match digits.len() {
        3 => Some(Rgba8::opaque(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Rgba8::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => {
            let a = if allow_alpha { byte(0)? } else { 255 };
            Some(Rgba8::new(byte(2)?, byte(4)?, byte(6)?, a))
        }
        _ => None,
    }
}

/// True when `text` is a complete, parseable hex color.
pub fn is_valid(text: &str) -> bool {
    parse_rgba8(text, true).is_some()
}

/// Formats as upper-case `RRGGBB`, or `AARRGGBB` when `include_alpha` is set.
/// No leading `#`.
pub fn format(color: Hsva, include_alpha: bool) -> String {
    format_with(
        color,
        HexFormat {
            include_alpha,
            ..HexFormat::default()
        },
    )
}

pub fn format_with(color: Hsva, options: HexFormat) -> String {
    format_rgba8_with(color.to_rgba8(), options)
}

/// [`format_with`] for a color that is already in bytes.
pub fn format_rgba8_with(c: Rgba8, options: HexFormat) -> String {
    let mut out = String::with_capacity(9);
    if options.include_hash {
        out.push('#');
    }
    if options.include_alpha {
        out.push_str(&format!("{:02X}", c.a));
    }
    out.push_str(&format!("{:02X}{:02X}{:02X}", c.r, c.g, c.b));
    if !options.uppercase {
        out.make_ascii_lowercase();
    }
    out
}

/// Keystroke filter for a hex text field.
///
/// Keeps a single leading `#` and hex digits, drops everything else, and
/// truncates to 8 digits (alpha allowed) or 6.
pub fn sanitize_hex_input(text: &str, allow_alpha: bool) -> String {
    let max_digits = if allow_alpha { 8 } else { 6 };
    let (hash, rest) = match text.strip_prefix('#') {
        Some(rest) => ("#", rest),
        None => ("", text),
    };
    let digits: String = rest
        .chars()
        .filter(char::is_ascii_hexdigit)
        .take(max_digits)
        .collect();
    format!("{hash}{digits}")
}
