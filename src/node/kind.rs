//! Node payloads - what a node *is*, independent of where it sits.

use compact_str::CompactString;

use crate::attr::{Properties, PropertyValue};

// =============================================================================
// NodeKind - sum type
// =============================================================================

/// Payload of an arena node.
///
/// `Root` and `Fragment` are pure containers. `Element` is a container with a
/// tag name and typed properties. The remaining variants are leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Synthetic document root
    Root,
    /// Detachable group of siblings, rendered without wrapper syntax
    Fragment,
    Element(Element),
    Text(Text),
    Comment(Comment),
    CharacterData(CharacterData),
    Directive(Directive),
    /// Node kind introduced by a transform; rendered only if registered
    Extension(Extension),
}

impl NodeKind {
    // Generates for each variant (element -> Element, etc.):
    //   - is_xxx(&self) -> bool
    //   - as_xxx(&self) -> Option<&Type>
    //   - as_xxx_mut(&mut self) -> Option<&mut Type>
    impl_enum_accessors!(element, text, comment, character_data, directive, extension);

    /// Whether nodes of this kind may own children.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Root | Self::Fragment | Self::Element(_))
    }

    /// Stable name of the kind, used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Fragment => "fragment",
            Self::Element(_) => "element",
            Self::Text(_) => "text",
            Self::Comment(_) => "comment",
            Self::CharacterData(_) => "characterData",
            Self::Directive(_) => "directive",
            Self::Extension(ext) => &ext.kind,
        }
    }
}

// =============================================================================
// Element
// =============================================================================

/// An HTML element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Lower-cased tag name
    pub tag_name: CompactString,
    /// Decoded attributes keyed by property name
    pub properties: Properties,
}

impl Element {
    /// Create an element with no properties. The tag name is lower-cased.
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: CompactString::new(tag_name.to_ascii_lowercase()),
            properties: Properties::new(),
        }
    }

    /// Builder: attach properties.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Builder: set one property.
    pub fn property(mut self, name: impl Into<CompactString>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(name, value);
        self
    }

    /// Tag name comparison, ASCII case-insensitive.
    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag_name)
    }

    /// Whether this is a void element (`br`, `img`, ...), which never has
    /// children.
    pub fn is_void(&self) -> bool {
        crate::builder::is_void(&self.tag_name)
    }

    /// The `id` property as a string, if set.
    pub fn id(&self) -> Option<&str> {
        self.properties.get("id").and_then(PropertyValue::as_str)
    }

    /// The class list, if set.
    pub fn class_names(&self) -> &[String] {
        self.properties
            .get("className")
            .and_then(PropertyValue::as_list)
            .unwrap_or(&[])
    }
}

// =============================================================================
// Literal leaves
// =============================================================================

/// Character data between tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub value: String,
}

/// Content between `<!--` and `-->`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    pub value: String,
}

/// Content between `<![CDATA[` and `]]>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterData {
    pub value: String,
}

impl_literal_node!(Text, Comment, CharacterData);

/// Declaration (`<!doctype html>`) or processing instruction (`<?xml ...?>`).
///
/// `name` is the sigil plus the lower-cased keyword (`!doctype`, `?xml`);
/// `value` is the raw text between `<` and `>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directive {
    pub name: CompactString,
    pub value: String,
}

impl Directive {
    /// Build a declaration directive from the text after `<!`.
    pub fn declaration(content: &str) -> Self {
        Self::with_sigil('!', content)
    }

    /// Build a processing-instruction directive from the text after `<?`.
    pub fn processing_instruction(content: &str) -> Self {
        Self::with_sigil('?', content)
    }

    fn with_sigil(sigil: char, content: &str) -> Self {
        let keyword = content
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or_default();
        let mut name = CompactString::with_capacity(keyword.len() + 1);
        name.push(sigil);
        name.push_str(&keyword.to_lowercase());

        let mut value = String::with_capacity(content.len() + 1);
        value.push(sigil);
        value.push_str(content);
        Self { name, value }
    }
}

/// Payload of a node kind the core does not know about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extension {
    /// Kind name; selects the renderer
    pub kind: CompactString,
    /// Opaque payload handed to the renderer
    pub value: String,
}

impl Extension {
    /// Create an extension payload.
    pub fn new(kind: impl Into<CompactString>, value: impl Into<String>) -> Self {
        Self { kind: kind.into(), value: value.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_names() {
        let doctype = Directive::declaration("DOCTYPE html");
        assert_eq!(doctype.name, "!doctype");
        assert_eq!(doctype.value, "!DOCTYPE html");

        let pi = Directive::processing_instruction("xml version=\"1.0\"?");
        assert_eq!(pi.name, "?xml");
        assert_eq!(pi.value, "?xml version=\"1.0\"?");
    }

    #[test]
    fn test_accessors() {
        let mut kind = NodeKind::Text(Text::new("a"));
        assert!(kind.is_text());
        assert!(!kind.is_element());
        kind.as_text_mut().unwrap().push_str("b");
        assert_eq!(kind.as_text().unwrap().value(), "ab");
        assert!(!kind.is_container());
        assert_eq!(kind.name(), "text");
    }

    #[test]
    fn test_element_lowercases() {
        let elem = Element::new("DIV").property("id", "main");
        assert_eq!(elem.tag_name, "div");
        assert!(elem.is("Div"));
        assert_eq!(elem.id(), Some("main"));
        assert!(elem.class_names().is_empty());
    }
}
