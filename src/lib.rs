//! hast - HTML to a syntax tree and back
//!
//! ## Core Concepts
//!
//! **Arena tree**: a [`Document`] owns every node; children are referenced by
//! [`NodeId`], so transforms can move subtrees freely and the tree is
//! validated before rendering.
//!
//! **Typed attributes**: attribute text is decoded through a static registry
//! into [`PropertyValue`]s (booleans, numbers, token lists, style maps) and
//! compiled back on output.
//!
//! ## Modules
//! - `node`: Document, NodeId, NodeKind, Position
//! - `attr`: Attribute registry and codec
//! - `lexer`: Tokenizer producing lexical events
//! - `builder`: Tree construction state machine
//! - `render`: Serializer
//! - `transform`: Transform trait, Pipeline, Processor
//!
//! ## Usage
//!
//! ```
//! let doc = hast::parse("<ul><li>one<li>two</ul>").unwrap();
//! assert_eq!(
//!     hast::serialize(&doc).unwrap(),
//!     "<ul><li>one</li><li>two</li></ul>"
//! );
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Core modules
// =============================================================================

/// Node types: Document, NodeKind, Element, Position
pub mod node;

/// Attribute registry, typed values and codec
pub mod attr;

/// Character reference decoding and escaping
pub mod entities;

/// Tokenizer
pub mod lexer;

/// Tree construction
pub mod builder;

/// HTML rendering
pub mod render;

/// Transform trait, Pipeline, Processor
pub mod transform;

/// Deterministic hashing
pub mod hash;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{
    CharacterData, Children, Comment, Directive, Document, Element, Extension, Node, NodeId,
    NodeKind, Point, Position, Text,
};

// Attributes
pub use attr::{Properties, PropertyValue, UnknownAttributes, ValueKind};

// Construction
pub use builder::{ParseOptions, TreeBuilder, parse, parse_with};

// Rendering
pub use render::{RenderConfig, Renderer, render_document};

// Transform
pub use transform::{IdentityTransform, Pipeline, Processor, Transform};

// Hashing
pub use hash::StableHasher;

// Error types
pub use error::{HastError, HastResult, LexError, RenderError, TreeError};

/// Render a document with the default renderer.
pub fn serialize(doc: &Document) -> Result<String, RenderError> {
    render_document(doc)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    static_assertions::assert_impl_all!(Document: Send, Sync, Clone);
    static_assertions::assert_impl_all!(Processor: Send, Sync);
    static_assertions::assert_impl_all!(HastError: Send, Sync, std::error::Error);

    #[test]
    fn test_round_trip_examples() {
        let cases = [
            "<p>one</p><p>two</p>",
            r#"<input type="checkbox" checked>"#,
            r#"<div class="a b" style="color: red; margin: 0;">x</div>"#,
            "<!DOCTYPE html><html><head><title>t</title></head><body></body></html>",
            "<br><hr><img src=\"a.png\">",
            r#"<div data-foo_bar="1" foo_bar="2"></div>"#,
            r#"<div classname="x" htmlfor="y" http-equiv="z"></div>"#,
        ];
        for source in cases {
            assert_eq!(serialize(&parse(source).unwrap()).unwrap(), source);
        }
    }

    #[test]
    fn test_spec_examples() {
        let doc = parse("<p>one<p>two").unwrap();
        assert_eq!(serialize(&doc).unwrap(), "<p>one</p><p>two</p>");

        let doc = parse(r#"<p class="a  b"></p>"#).unwrap();
        assert_eq!(serialize(&doc).unwrap(), r#"<p class="a b"></p>"#);

        let doc = parse(r#"<p style="color: red; margin:0"></p>"#).unwrap();
        assert_eq!(serialize(&doc).unwrap(), r#"<p style="color: red; margin: 0;"></p>"#);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Properties over generated markup
    // ─────────────────────────────────────────────────────────────────────────

    fn text() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z \n]{1,8}",
            Just("a &amp; b".to_owned()),
            Just("&lt;x&gt;".to_owned()),
            Just("AT&T".to_owned()),
            Just("&#169;".to_owned()),
            Just("1 < 2".to_owned()),
        ]
    }

    fn leaf() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => text(),
            1 => "[a-z -]{0,6}".prop_map(|c| format!("<!--{c}-->")),
            1 => Just("<![CDATA[a<b]]>".to_owned()),
            1 => Just("<!DOCTYPE html>".to_owned()),
            1 => Just("<?pi x?>".to_owned()),
            1 => Just("<script>if (a<b) f('&amp;')</script>".to_owned()),
            1 => prop::sample::select(vec!["</p>", "</br>", "</span>", "</li>"]).prop_map(str::to_owned),
        ]
    }

    fn attribute() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            r#"class="a  b""#,
            "disabled",
            "tabindex=3",
            "rows=x",
            r#"style="color: red; margin:0""#,
            "data-x='1'",
            "href=/x?a&amp;b",
            "download",
            r#"download="f.txt""#,
            r#"accept="a , b""#,
            r#"title="&lt;hi&gt;""#,
            "ng-click=go()",
            "id=a id=b",
            "data-foo_bar=1",
            "classname=x",
        ])
    }

    fn markup() -> impl Strategy<Value = String> {
        let tags = vec![
            "div", "p", "span", "b", "ul", "li", "table", "tr", "td", "select", "option", "h1",
            "br", "img", "input",
        ];
        leaf().prop_recursive(4, 48, 4, move |inner| {
            (
                prop::sample::select(tags.clone()),
                prop::collection::vec(attribute(), 0..3),
                prop::collection::vec(inner, 0..4),
                any::<bool>(),
            )
                .prop_map(|(tag, attributes, children, close)| {
                    let mut out = format!("<{tag}");
                    for attribute in attributes {
                        out.push(' ');
                        out.push_str(attribute);
                    }
                    out.push('>');
                    out.extend(children);
                    if close {
                        out.push_str(&format!("</{tag}>"));
                    }
                    out
                })
        })
    }

    fn assert_positions(doc: &Document, id: NodeId) {
        let mut previous: Option<Position> = None;
        for &child in doc.children(id) {
            let pos = doc.position(child).expect("parsed nodes carry positions");
            assert!(pos.start <= pos.end, "{child}: {pos}");
            if let Some(prev) = previous {
                assert!(prev.end.offset <= pos.start.offset, "{prev} then {pos}");
            }
            previous = Some(pos);
            assert_positions(doc, child);
        }
    }

    proptest! {
        #[test]
        fn prop_serialization_is_idempotent(source in markup()) {
            let once = serialize(&parse(&source).unwrap()).unwrap();
            let twice = serialize(&parse(&once).unwrap()).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_positions_are_monotonic(source in markup()) {
            let doc = parse(&source).unwrap();
            assert_positions(&doc, doc.root());
        }

        #[test]
        fn prop_trees_validate(source in markup()) {
            let doc = parse(&source).unwrap();
            prop_assert!(doc.validate().is_ok());
            for (id, element) in doc.elements() {
                if builder::is_void(&element.tag_name) {
                    prop_assert!(doc.children(id).is_empty());
                }
            }
        }

        #[test]
        fn prop_arbitrary_input_never_panics(source in "[<>/!?a-z=\"' &;-]{0,40}") {
            if let Ok(doc) = parse(&source) {
                prop_assert!(serialize(&doc).is_ok());
            }
        }
    }
}
