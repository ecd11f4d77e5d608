//! Static HTML element tables.

/// Elements that never have children or a closing tag.
pub fn is_void(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "area"
            | "base"
            | "basefont"
            | "br"
            | "col"
            | "command"
            | "embed"
            | "frame"
            | "hr"
            | "img"
            | "input"
            | "isindex"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

const FORM_TAGS: &[&str] = &["input", "option", "optgroup", "select", "button", "datalist", "textarea"];
const P_TAG: &[&str] = &["p"];

/// Open elements that an opening `tag_name` closes when they are on top
/// of the stack.
pub fn implicitly_closes(tag_name: &str) -> &'static [&'static str] {
    match tag_name {
        "tr" => &["tr", "th", "td"],
        "th" => &["th"],
        "td" => &["thead", "th", "td"],
        "body" => &["head", "link", "script"],
        "li" => &["li"],
        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => P_TAG,
        "select" | "input" | "output" | "button" | "datalist" | "textarea" => FORM_TAGS,
        "option" => &["option"],
        "optgroup" => &["optgroup"],
        _ => &[],
    }
}

/// Canonical name if `tag_name` (any case) is a raw-text element.
pub fn raw_text_tag(tag_name: &str) -> Option<&'static str> {
    ["script", "style"]
        .into_iter()
        .find(|raw| raw.eq_ignore_ascii_case(tag_name))
}

/// Close tags tolerated without a matching open element; they produce an
/// empty element instead.
pub fn is_tolerated_stray_close(tag_name: &str) -> bool {
    matches!(tag_name, "p" | "br")
}
