//! Static attribute metadata.
//!
//! [`ATTRIBUTES`] is a read-only table. [`lookup_attribute`] resolves
//! markup names (case-insensitively); [`lookup`] also accepts exact
//! property names such as `className`. Names that are not in the table are
//! opaque pass-through attributes.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// How an attribute's value is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Free text
    Plain,
    /// Present means true
    Boolean,
    /// Empty or own-name means true, anything else is kept as text
    OverloadedBoolean,
    /// Decimal number
    Numeric,
    /// Decimal number expected to be positive
    PositiveNumeric,
    /// `a, b, c`
    CommaSeparated,
    /// `a b c`
    SpaceSeparated,
}

impl ValueKind {
    /// Whether values of this kind are token lists.
    pub fn is_list(self) -> bool {
        matches!(self, Self::CommaSeparated | Self::SpaceSeparated)
    }

    /// Whether values of this kind are numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric | Self::PositiveNumeric)
    }
}

/// Metadata for one known attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeInfo {
    /// Canonical markup name (`class`, `tabindex`)
    pub attribute: &'static str,
    /// Property name used as the key in [`Properties`](super::Properties)
    pub property: &'static str,
    /// Value typing
    pub kind: ValueKind,
    /// Whether DOM consumers must set this through `setAttribute` rather
    /// than as an object property
    pub use_attribute: bool,
}

const fn info(
    attribute: &'static str,
    property: &'static str,
    kind: ValueKind,
    use_attribute: bool,
) -> AttributeInfo {
    AttributeInfo { attribute, property, kind, use_attribute }
}

use ValueKind::{
    Boolean as B, CommaSeparated as C, Numeric as N, OverloadedBoolean as O, Plain as P,
    PositiveNumeric as PN, SpaceSeparated as S,
};

/// Known attributes.
pub static ATTRIBUTES: &[AttributeInfo] = &[
    // Standard
    info("accept", "accept", C, false),
    info("accept-charset", "acceptCharset", S, false),
    info("accesskey", "accessKey", S, false),
    info("action", "action", P, false),
    info("allowfullscreen", "allowFullScreen", B, true),
    info("allowtransparency", "allowTransparency", P, true),
    info("alt", "alt", P, false),
    info("async", "async", B, false),
    info("autocomplete", "autoComplete", P, false),
    info("autofocus", "autoFocus", B, false),
    info("autoplay", "autoPlay", B, false),
    info("capture", "capture", B, true),
    info("cellpadding", "cellPadding", P, false),
    info("cellspacing", "cellSpacing", P, false),
    info("charset", "charSet", P, true),
    info("challenge", "challenge", P, true),
    info("checked", "checked", B, false),
    info("classid", "classID", P, true),
    info("class", "className", S, true),
    info("cols", "cols", PN, true),
    info("colspan", "colSpan", N, false),
    info("content", "content", P, false),
    info("contenteditable", "contentEditable", P, false),
    info("contextmenu", "contextMenu", P, true),
    info("controls", "controls", B, false),
    info("coords", "coords", C, false),
    info("crossorigin", "crossOrigin", P, false),
    info("data", "data", P, false),
    info("datetime", "dateTime", P, true),
    info("default", "default", B, false),
    info("defer", "defer", B, false),
    info("dir", "dir", P, false),
    info("disabled", "disabled", B, true),
    info("download", "download", O, false),
    info("draggable", "draggable", P, false),
    info("enctype", "encType", P, false),
    info("for", "htmlFor", S, false),
    info("form", "form", P, true),
    info("formaction", "formAction", P, true),
    info("formenctype", "formEncType", P, true),
    info("formmethod", "formMethod", P, true),
    info("formnovalidate", "formNoValidate", B, false),
    info("formtarget", "formTarget", P, true),
    info("frameborder", "frameBorder", P, true),
    info("headers", "headers", S, false),
    info("height", "height", P, true),
    info("hidden", "hidden", B, true),
    info("high", "high", N, false),
    info("href", "href", P, false),
    info("hreflang", "hrefLang", P, false),
    info("http-equiv", "httpEquiv", S, false),
    info("icon", "icon", P, false),
    info("id", "id", P, false),
    info("inputmode", "inputMode", P, true),
    info("is", "is", P, true),
    info("keyparams", "keyParams", P, true),
    info("keytype", "keyType", P, true),
    info("label", "label", P, false),
    info("lang", "lang", P, false),
    info("list", "list", P, true),
    info("loop", "loop", B, false),
    info("low", "low", N, false),
    info("manifest", "manifest", P, true),
    info("marginheight", "marginHeight", P, false),
    info("marginwidth", "marginWidth", P, false),
    info("max", "max", P, false),
    info("maxlength", "maxLength", N, true),
    info("media", "media", P, true),
    info("mediagroup", "mediaGroup", P, false),
    info("method", "method", P, false),
    info("min", "min", P, false),
    info("minlength", "minLength", N, true),
    info("multiple", "multiple", B, false),
    info("muted", "muted", B, false),
    info("name", "name", P, false),
    info("novalidate", "noValidate", B, false),
    info("open", "open", B, false),
    info("optimum", "optimum", N, false),
    info("pattern", "pattern", P, false),
    info("ping", "ping", S, false),
    info("placeholder", "placeholder", P, false),
    info("poster", "poster", P, false),
    info("preload", "preload", P, false),
    info("radiogroup", "radioGroup", P, false),
    info("readonly", "readOnly", B, false),
    info("rel", "rel", S, false),
    info("required", "required", B, false),
    info("reversed", "reversed", B, false),
    info("role", "role", P, true),
    info("rows", "rows", PN, true),
    info("rowspan", "rowSpan", N, false),
    info("sandbox", "sandbox", S, false),
    info("scope", "scope", P, false),
    info("scoped", "scoped", B, false),
    info("scrolling", "scrolling", P, false),
    info("seamless", "seamless", B, true),
    info("selected", "selected", B, false),
    info("shape", "shape", P, false),
    info("size", "size", PN, true),
    info("sizes", "sizes", S, true),
    info("span", "span", PN, false),
    info("spellcheck", "spellCheck", P, false),
    info("src", "src", P, false),
    info("srcdoc", "srcDoc", P, false),
    info("srcset", "srcSet", C, true),
    info("start", "start", N, false),
    info("step", "step", P, false),
    info("style", "style", P, false),
    info("summary", "summary", P, false),
    info("tabindex", "tabIndex", N, false),
    info("target", "target", P, false),
    info("title", "title", P, false),
    info("type", "type", P, false),
    info("usemap", "useMap", P, false),
    info("value", "value", P, false),
    info("width", "width", P, true),
    info("wmode", "wmode", P, true),
    info("wrap", "wrap", P, false),
    // Non-standard
    info("autocapitalize", "autoCapitalize", P, false),
    info("autocorrect", "autoCorrect", P, false),
    info("autosave", "autoSave", P, false),
    info("itemprop", "itemProp", S, true),
    info("itemscope", "itemScope", B, true),
    info("itemtype", "itemType", S, true),
    info("itemid", "itemID", P, true),
    info("itemref", "itemRef", S, true),
    info("property", "property", P, false),
    info("results", "results", P, false),
    info("security", "security", P, true),
    info("unselectable", "unselectable", P, true),
];

/// Attribute name -> table entry.
static BY_ATTRIBUTE: LazyLock<FxHashMap<&'static str, &'static AttributeInfo>> =
    LazyLock::new(|| ATTRIBUTES.iter().map(|entry| (entry.attribute, entry)).collect());

/// Property name -> table entry.
static BY_PROPERTY: LazyLock<FxHashMap<&'static str, &'static AttributeInfo>> =
    LazyLock::new(|| ATTRIBUTES.iter().map(|entry| (entry.property, entry)).collect());

/// Resolve a markup attribute name (`class`, `FOR`) to its metadata.
///
/// Property spellings (`classname`) do not resolve, and neither do
/// `data-*` / `aria-*` custom attributes.
pub fn lookup_attribute(name: &str) -> Option<&'static AttributeInfo> {
    if is_custom_attribute(name) {
        return None;
    }
    BY_ATTRIBUTE.get(name.to_ascii_lowercase().as_str()).copied()
}

/// Resolve a property key: an exact property name (`className`) or an
/// exact markup name (`class`).
pub fn lookup(key: &str) -> Option<&'static AttributeInfo> {
    if is_custom_attribute(key) {
        return None;
    }
    BY_PROPERTY.get(key).or_else(|| BY_ATTRIBUTE.get(key)).copied()
}

/// Matches `(data|aria)-[a-z_][a-z0-9_.-]*`.
pub fn is_custom_attribute(name: &str) -> bool {
    let rest = match name.strip_prefix("data-").or_else(|| name.strip_prefix("aria-")) {
        Some(rest) => rest,
        None => return false,
    };
    let mut bytes = rest.bytes();
    match bytes.next() {
        Some(b'a'..=b'z' | b'_') => {}
        _ => return false,
    }
    bytes.all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_property_keys() {
        let class = lookup("className").unwrap();
        assert_eq!(class.attribute, "class");
        assert_eq!(class.kind, ValueKind::SpaceSeparated);
        assert!(class.use_attribute);
        assert_eq!(lookup("class"), Some(class));

        let tab = lookup("tabIndex").unwrap();
        assert_eq!(tab.attribute, "tabindex");
        assert_eq!(lookup("tabindex"), Some(tab));

        assert_eq!(lookup("htmlFor").unwrap().attribute, "for");
        assert_eq!(lookup("httpEquiv").unwrap().attribute, "http-equiv");
        assert_eq!(lookup("classname"), None);
        assert_eq!(lookup("htmlfor"), None);
        assert_eq!(lookup("tab-index"), None);
    }

    #[test]
    fn test_lookup_markup_names() {
        let class = lookup_attribute("CLASS").unwrap();
        assert_eq!(class.property, "className");
        assert_eq!(lookup_attribute("for").unwrap().property, "htmlFor");
        assert_eq!(lookup_attribute("http-equiv").unwrap().property, "httpEquiv");
        assert_eq!(lookup_attribute("accept-charset").unwrap().property, "acceptCharset");

        for name in ["classname", "htmlfor", "httpequiv", "acceptcharset"] {
            assert_eq!(lookup_attribute(name), None, "{name}");
        }
    }

    #[test]
    fn test_value_kinds() {
        assert_eq!(lookup("disabled").unwrap().kind, ValueKind::Boolean);
        assert_eq!(lookup("download").unwrap().kind, ValueKind::OverloadedBoolean);
        assert!(lookup("rows").unwrap().kind.is_numeric());
        assert!(lookup("accept").unwrap().kind.is_list());
        assert!(!lookup("checked").unwrap().use_attribute);
    }

    #[test]
    fn test_unknown_and_custom() {
        assert_eq!(lookup("ng-click"), None);
        assert_eq!(lookup("data-id"), None);
        assert_eq!(lookup_attribute("data-id"), None);
        assert!(is_custom_attribute("data-foo"));
        assert!(is_custom_attribute("aria-label"));
        assert!(is_custom_attribute("data-x.y_z-1"));
        assert!(!is_custom_attribute("data-"));
        assert!(!is_custom_attribute("data-Foo"));
        assert!(!is_custom_attribute("data-1"));
        assert!(!is_custom_attribute("onclick"));
    }

    #[test]
    fn test_table_has_unique_names() {
        let mut seen = rustc_hash::FxHashSet::default();
        for entry in ATTRIBUTES {
            assert!(seen.insert(entry.attribute), "duplicate {}", entry.attribute);
        }
    }
}
