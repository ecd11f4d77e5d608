//! Character references: decoding on the way in, escaping on the way out.
//!
//! Decoding covers numeric references (`&#38;`, `&#x26;`) and a table of
//! common named references. Only semicolon-terminated references decode;
//! anything else is left in the text unchanged.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// Longest name in [`NAMED`], bounds the scan after `&`.
const MAX_NAME_LEN: usize = 8;
const MAX_HEX_DIGITS: usize = 6;
const MAX_DEC_DIGITS: usize = 7;

static NAMED: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{00A0}"),
    ("shy", "\u{00AD}"),
    ("copy", "\u{00A9}"),
    ("reg", "\u{00AE}"),
    ("trade", "\u{2122}"),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("hellip", "\u{2026}"),
    ("bull", "\u{2022}"),
    ("middot", "\u{00B7}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("sbquo", "\u{201A}"),
    ("ldquo", "\u{201C}"),
    ("rdquo", "\u{201D}"),
    ("bdquo", "\u{201E}"),
    ("laquo", "\u{00AB}"),
    ("raquo", "\u{00BB}"),
    ("lsaquo", "\u{2039}"),
    ("rsaquo", "\u{203A}"),
    ("sect", "\u{00A7}"),
    ("para", "\u{00B6}"),
    ("dagger", "\u{2020}"),
    ("Dagger", "\u{2021}"),
    ("permil", "\u{2030}"),
    ("prime", "\u{2032}"),
    ("Prime", "\u{2033}"),
    ("cent", "\u{00A2}"),
    ("pound", "\u{00A3}"),
    ("euro", "\u{20AC}"),
    ("yen", "\u{00A5}"),
    ("curren", "\u{00A4}"),
    ("times", "\u{00D7}"),
    ("divide", "\u{00F7}"),
    ("plusmn", "\u{00B1}"),
    ("minus", "\u{2212}"),
    ("ne", "\u{2260}"),
    ("le", "\u{2264}"),
    ("ge", "\u{2265}"),
    ("deg", "\u{00B0}"),
    ("micro", "\u{00B5}"),
    ("frac12", "\u{00BD}"),
    ("frac14", "\u{00BC}"),
    ("frac34", "\u{00BE}"),
    ("sup1", "\u{00B9}"),
    ("sup2", "\u{00B2}"),
    ("sup3", "\u{00B3}"),
    ("infin", "\u{221E}"),
    ("larr", "\u{2190}"),
    ("uarr", "\u{2191}"),
    ("rarr", "\u{2192}"),
    ("darr", "\u{2193}"),
    ("harr", "\u{2194}"),
    ("iexcl", "\u{00A1}"),
    ("iquest", "\u{00BF}"),
    ("ordf", "\u{00AA}"),
    ("ordm", "\u{00BA}"),
    ("eacute", "\u{00E9}"),
    ("Eacute", "\u{00C9}"),
    ("egrave", "\u{00E8}"),
    ("agrave", "\u{00E0}"),
    ("aacute", "\u{00E1}"),
    ("auml", "\u{00E4}"),
    ("ouml", "\u{00F6}"),
    ("uuml", "\u{00FC}"),
    ("Auml", "\u{00C4}"),
    ("Ouml", "\u{00D6}"),
    ("Uuml", "\u{00DC}"),
    ("szlig", "\u{00DF}"),
    ("ccedil", "\u{00E7}"),
    ("ntilde", "\u{00F1}"),
    ("oslash", "\u{00F8}"),
    ("aring", "\u{00E5}"),
    ("thinsp", "\u{2009}"),
    ("ensp", "\u{2002}"),
    ("emsp", "\u{2003}"),
    ("zwnj", "\u{200C}"),
    ("zwj", "\u{200D}"),
];

static NAMED_INDEX: LazyLock<FxHashMap<&'static str, &'static str>> =
    LazyLock::new(|| NAMED.iter().copied().collect());

/// Decode character references in `input`.
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copy_start = 0;
    let mut search_from = 0;

    while let Some(rel) = memchr::memchr(b'&', &bytes[search_from..]) {
        let amp = search_from + rel;
        match decode_reference(input, amp + 1) {
            Some((replacement, end)) => {
                out.push_str(&input[copy_start..amp]);
                match replacement {
                    Replacement::Named(value) => out.push_str(value),
                    Replacement::Char(ch) => out.push(ch),
                }
                copy_start = end;
                search_from = end;
            }
            None => search_from = amp + 1,
        }
    }
    out.push_str(&input[copy_start..]);
    out
}

/// A decoded reference; numeric references produce a single char.
enum Replacement {
    Named(&'static str),
    Char(char),
}

/// Try to decode a reference whose body starts at `start` (just after `&`).
/// Returns the replacement and the offset just past the `;`.
fn decode_reference(input: &str, start: usize) -> Option<(Replacement, usize)> {
    let bytes = input.as_bytes();
    if bytes.get(start) == Some(&b'#') {
        let (hex, digits_start) = match bytes.get(start + 1) {
            Some(b'x' | b'X') => (true, start + 2),
            _ => (false, start + 1),
        };
        let max = if hex { MAX_HEX_DIGITS } else { MAX_DEC_DIGITS };
        let semi = scan_until_semicolon(bytes, digits_start, max, |b| {
            if hex { b.is_ascii_hexdigit() } else { b.is_ascii_digit() }
        })?;
        let digits = &input[digits_start..semi];
        let code = u32::from_str_radix(digits, if hex { 16 } else { 10 }).ok()?;
        let ch = match code {
            0 => char::REPLACEMENT_CHARACTER,
            _ => char::from_u32(code)?,
        };
        return Some((Replacement::Char(ch), semi + 1));
    }

    let semi = scan_until_semicolon(bytes, start, MAX_NAME_LEN, |b| b.is_ascii_alphanumeric())?;
    let name = &input[start..semi];
    NAMED_INDEX
        .get(name)
        .map(|&value| (Replacement::Named(value), semi + 1))
}

/// Scan at most `max` bytes accepted by `accept`, then require `;`.
fn scan_until_semicolon(
    bytes: &[u8],
    start: usize,
    max: usize,
    accept: impl Fn(u8) -> bool,
) -> Option<usize> {
    let mut index = start;
    while index < bytes.len() && index - start <= max {
        match bytes[index] {
            b';' => return (index > start).then_some(index),
            b if accept(b) => index += 1,
            _ => return None,
        }
    }
    None
}

/// Escape `&`, `<`, `>`, `"` and `'` for use in text or attribute values.
pub fn escape(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
