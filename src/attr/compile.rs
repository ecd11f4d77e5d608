//! Typed [`Properties`] -> attribute string.

use crate::entities::escape;

use super::case::param_case;
use super::registry::{self, ValueKind};
use super::{Properties, PropertyValue, Style};

/// Compile a property map to `name="value" flag ...`, in map order.
///
/// Properties whose compiled form is empty (false booleans) are skipped.
pub fn compile_properties(properties: &Properties) -> String {
    let mut out = String::new();
    for (key, value) in properties.iter() {
        let compiled = compile_property(key, value);
        if compiled.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&compiled);
    }
    out
}

/// Compile one property; empty when it should be omitted.
///
/// Unknown keys are emitted as written, except camelCase keys, which are
/// param-cased (`dataFooBar` -> `data-foo-bar`).
pub fn compile_property(key: &str, value: &PropertyValue) -> String {
    let info = registry::lookup(key);
    let kind = info.map_or(ValueKind::Plain, |info| info.kind);
    let name = match info {
        Some(info) => escape(info.attribute),
        None if key.bytes().any(|b| b.is_ascii_uppercase()) => escape(&param_case(key)),
        None => escape(key),
    };

    match (kind, value) {
        (ValueKind::Boolean, value) => {
            if value.is_truthy() { name } else { String::new() }
        }
        (ValueKind::OverloadedBoolean, PropertyValue::Bool(true)) => name,
        (ValueKind::OverloadedBoolean, PropertyValue::Bool(false)) => String::new(),
        (_, value) => {
            let text = match value {
                PropertyValue::Style(style) => compile_style(style),
                PropertyValue::List(list) => {
                    let separator = if kind == ValueKind::CommaSeparated { "," } else { " " };
                    list.join(separator)
                }
                PropertyValue::Number(n) => format_number(*n),
                PropertyValue::Bool(b) => b.to_string(),
                PropertyValue::String(s) => s.clone(),
            };
            format!("{name}=\"{}\"", escape(&text))
        }
    }
}

/// `[(color, red), (backgroundColor, blue)]` -> `color: red; background-color: blue;`.
pub fn compile_style(style: &Style) -> String {
    style
        .iter()
        .map(|(property, value)| format!("{}: {value};", param_case(property)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shortest round-tripping form: `3`, `1.5`, `NaN`, `-Infinity`.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, use exponent notation
/// with an explicit sign (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity".to_owned() } else { "-Infinity".to_owned() };
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    let abs = n.abs();
    if !(1e-6..1e21).contains(&abs) {
        let formatted = format!("{n:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    n.to_string()
}
