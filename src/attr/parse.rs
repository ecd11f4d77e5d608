//! Raw attributes -> typed [`Properties`].

use compact_str::CompactString;

use crate::entities;

use super::registry::{self, ValueKind};
use super::{Properties, PropertyValue, Style};

/// What to do with attributes the registry does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownAttributes {
    /// Keep every unknown attribute as a plain string
    #[default]
    PassThrough,
    /// Keep only `data-*` / `aria-*` custom attributes
    CustomOnly,
}

/// Attributes whose text is entity-decoded by the codec.
const DECODED_TEXT: &[&str] = &["placeholder", "title", "alt"];

/// Attribute codec, parse direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeParser {
    /// Unknown attribute policy
    pub unknown: UnknownAttributes,
    /// Decode references in text attributes (`title`, `alt`,
    /// `placeholder`). Only useful when the tokenizer left values raw.
    pub decode_text: bool,
}

impl AttributeParser {
    /// Create a parser with the given unknown-attribute policy.
    pub fn new(unknown: UnknownAttributes) -> Self {
        Self { unknown, decode_text: false }
    }

    /// Builder: decode references in text attributes.
    pub fn decode_text(mut self, yes: bool) -> Self {
        self.decode_text = yes;
        self
    }

    /// Decode raw `(name, value)` pairs in source order.
    ///
    /// Names are expected lower-cased. If two names resolve to the same
    /// property the first one wins.
    pub fn parse<'a, I>(&self, raw: I) -> Properties
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut properties = Properties::new();
        for (name, value) in raw {
            let Some(info) = registry::lookup_attribute(name) else {
                if self.unknown == UnknownAttributes::PassThrough
                    || registry::is_custom_attribute(name)
                {
                    properties.insert_if_absent(name, value);
                } else {
                    log::debug!(target: "hast::attr", "dropping unknown attribute `{name}`");
                }
                continue;
            };

            let parsed = match info.property {
                "style" => PropertyValue::Style(parse_style(value)),
                prop if self.decode_text && DECODED_TEXT.contains(&prop) => {
                    PropertyValue::String(entities::decode(value))
                }
                _ => parse_value(info.attribute, info.kind, value),
            };
            properties.insert_if_absent(info.property, parsed);
        }
        properties
    }
}

/// Decode one value according to its kind.
pub fn parse_value(attribute: &str, kind: ValueKind, value: &str) -> PropertyValue {
    match kind {
        ValueKind::Plain => PropertyValue::String(value.to_owned()),
        ValueKind::Boolean => PropertyValue::Bool(true),
        ValueKind::OverloadedBoolean => {
            if value.is_empty() || value.eq_ignore_ascii_case(attribute) {
                PropertyValue::Bool(true)
            } else {
                PropertyValue::String(value.to_owned())
            }
        }
        ValueKind::Numeric | ValueKind::PositiveNumeric => PropertyValue::Number(parse_number(value)),
        ValueKind::SpaceSeparated => PropertyValue::List(split_spaces(value)),
        ValueKind::CommaSeparated => PropertyValue::List(split_commas(value)),
    }
}

/// `color: red; margin:0` -> `[(color, red), (margin, 0)]`.
///
/// Declarations split at their first `:`; ones with an empty property or
/// value are dropped.
pub fn parse_style(value: &str) -> Style {
    value
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let (property, value) = (property.trim(), value.trim());
            (!property.is_empty() && !value.is_empty())
                .then(|| (CompactString::new(property), value.to_owned()))
        })
        .collect()
}

/// Decimal number, `NaN` when malformed. Blank input is `0`.
pub fn parse_number(value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    match value.strip_prefix(['+', '-']).unwrap_or(value) {
        "Infinity" if value.starts_with('-') => return f64::NEG_INFINITY,
        "Infinity" => return f64::INFINITY,
        _ => {}
    }
    if !value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E')) {
        return f64::NAN;
    }
    value.parse().unwrap_or(f64::NAN)
}

/// Split on runs of HTML whitespace.
pub fn split_spaces(value: &str) -> Vec<String> {
    value
        .split(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C'))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Split on commas, trimming each token and dropping empty ones.
pub fn split_commas(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}
