//! Conversions between markup names (`tab-index`) and property names
//! (`tabIndex`).

/// `tabIndex` -> `tab-index`, `WebkitTransition` -> `webkit-transition`.
///
/// Spaces and underscores become dashes; existing dashes are kept.
pub fn param_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (index, ch) in name.chars().enumerate() {
        match ch {
            'A'..='Z' => {
                if index > 0 && !out.ends_with('-') {
                    out.push('-');
                }
                out.push(ch.to_ascii_lowercase());
            }
            '_' | ' ' => out.push('-'),
            _ => out.push(ch),
        }
    }
    out
}

/// `tab-index` -> `tabIndex`.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        match ch {
            '-' | '_' | ' ' if !out.is_empty() => upper_next = true,
            '-' | '_' | ' ' => {}
            _ if upper_next => {
                out.push(ch.to_ascii_uppercase());
                upper_next = false;
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_case() {
        assert_eq!(param_case("tabIndex"), "tab-index");
        assert_eq!(param_case("className"), "class-name");
        assert_eq!(param_case("backgroundColor"), "background-color");
        assert_eq!(param_case("data-foo"), "data-foo");
        assert_eq!(param_case("color"), "color");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("tab-index"), "tabIndex");
        assert_eq!(camel_case("accept-charset"), "acceptCharset");
        assert_eq!(camel_case("-webkit-box"), "webkitBox");
        assert_eq!(camel_case("id"), "id");
    }

    #[test]
    fn test_round_trip_between_forms() {
        for name in ["tab-index", "http-equiv", "background-color"] {
            assert_eq!(param_case(&camel_case(name)), name);
        }
    }
}
