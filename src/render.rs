//! HTML serialization.
//!
//! Renders a [`Document`] back to markup: attributes through the codec's
//! compile direction, text escaped except inside raw-text elements.

use compact_str::CompactString;
use rustc_hash::FxHashMap;

use crate::attr::compile_properties;
use crate::builder::{is_void, raw_text_tag};
use crate::entities::escape;
use crate::error::RenderError;
use crate::node::{Document, Element, Extension, NodeId, NodeKind};

// =============================================================================
// RenderConfig
// =============================================================================

/// Configuration for HTML rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// Tags rendered without escaping in addition to `script` and `style`.
    pub raw_text: Vec<CompactString>,
}

impl RenderConfig {
    /// Only `script` and `style` are raw text.
    pub const DEFAULT: Self = Self { raw_text: Vec::new() };

    /// Create a default config.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Treat `tag_name` as a raw-text element too.
    pub fn with_raw_text(mut self, tag_name: impl Into<CompactString>) -> Self {
        self.raw_text.push(tag_name.into());
        self
    }

    /// Whether children of `tag_name` are emitted verbatim.
    pub fn is_raw_text(&self, tag_name: &str) -> bool {
        raw_text_tag(tag_name).is_some()
            || self.raw_text.iter().any(|raw| raw.eq_ignore_ascii_case(tag_name))
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Serializer for extension node kinds.
pub type ExtensionRenderer = Box<dyn Fn(&Extension, &mut String) + Send + Sync>;

/// Document serializer.
///
/// Core node kinds always render. [`NodeKind::Extension`] nodes render only
/// if a serializer was registered for their kind; otherwise rendering fails
/// with [`RenderError::UnknownNodeKind`].
#[derive(Default)]
pub struct Renderer {
    config: RenderConfig,
    extensions: FxHashMap<CompactString, ExtensionRenderer>,
}

impl Renderer {
    /// Renderer with the default config and no extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with `config`.
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config, extensions: FxHashMap::default() }
    }

    /// Builder: register a serializer for an extension kind.
    pub fn extension<F>(mut self, kind: impl Into<CompactString>, render: F) -> Self
    where
        F: Fn(&Extension, &mut String) + Send + Sync + 'static,
    {
        self.register(kind, render);
        self
    }

    /// Register a serializer for an extension kind, replacing any previous one.
    pub fn register<F>(&mut self, kind: impl Into<CompactString>, render: F)
    where
        F: Fn(&Extension, &mut String) + Send + Sync + 'static,
    {
        self.extensions.insert(kind.into(), Box::new(render));
    }

    /// The active config.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Validate the arena, then render everything under the root.
    pub fn render(&self, doc: &Document) -> Result<String, RenderError> {
        doc.validate()?;
        let mut output = String::new();
        self.render_children(doc, doc.root(), None, &mut output)?;
        log::trace!(target: "hast::render", "rendered {} bytes", output.len());
        Ok(output)
    }

    /// Render one node and its subtree, without validating the arena.
    pub fn render_node(&self, doc: &Document, id: NodeId) -> Result<String, RenderError> {
        let mut output = String::new();
        let parent = doc.ancestors(id).find_map(|a| doc.element(a));
        self.render_one(doc, id, parent, &mut output)?;
        Ok(output)
    }

    /// `parent` is the nearest enclosing element; fragments are transparent.
    fn render_children(
        &self,
        doc: &Document,
        id: NodeId,
        parent: Option<&Element>,
        output: &mut String,
    ) -> Result<(), RenderError> {
        for &child in doc.children(id) {
            self.render_one(doc, child, parent, output)?;
        }
        Ok(())
    }

    fn render_one(
        &self,
        doc: &Document,
        id: NodeId,
        parent: Option<&Element>,
        output: &mut String,
    ) -> Result<(), RenderError> {
        let node = doc.node(id)?;
        match &node.kind {
            NodeKind::Root | NodeKind::Fragment => self.render_children(doc, id, parent, output)?,
            NodeKind::Element(elem) => {
                output.push('<');
                output.push_str(&elem.tag_name);
                let attributes = compile_properties(&elem.properties);
                if !attributes.is_empty() {
                    output.push(' ');
                    output.push_str(&attributes);
                }
                output.push('>');
                self.render_children(doc, id, Some(elem), output)?;
                if !is_void(&elem.tag_name) {
                    output.push_str("</");
                    output.push_str(&elem.tag_name);
                    output.push('>');
                }
            }
            NodeKind::Text(text) => {
                if parent.is_some_and(|p| self.config.is_raw_text(&p.tag_name)) {
                    output.push_str(text.value());
                } else {
                    output.push_str(&escape(text.value()));
                }
            }
            NodeKind::Comment(comment) => {
                output.push_str("<!--");
                output.push_str(comment.value());
                output.push_str("-->");
            }
            NodeKind::CharacterData(cdata) => {
                output.push_str("<![CDATA[");
                output.push_str(cdata.value());
                output.push_str("]]>");
            }
            NodeKind::Directive(directive) => {
                output.push('<');
                output.push_str(&directive.value);
                output.push('>');
            }
            NodeKind::Extension(ext) => match self.extensions.get(&ext.kind) {
                Some(render) => render(ext, output),
                None => return Err(RenderError::UnknownNodeKind(ext.kind.clone())),
            },
        }
        Ok(())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("extensions", &self.extensions.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Document Rendering
// =============================================================================

/// Render a document with the default renderer.
pub fn render_document(doc: &Document) -> Result<String, RenderError> {
    Renderer::new().render(doc)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;
    use crate::error::TreeError;
    use crate::node::{Comment, Text};

    fn round_trip(source: &str) -> String {
        render_document(&parse(source).unwrap()).unwrap()
    }

    #[test]
    fn test_render_elements() {
        assert_eq!(round_trip("<div id=main><p>a</p></div>"), r#"<div id="main"><p>a</p></div>"#);
        assert_eq!(round_trip("<br>"), "<br>");
        assert_eq!(round_trip("<img src=a.png alt=x>"), r#"<img src="a.png" alt="x">"#);
    }

    #[test]
    fn test_render_attributes() {
        assert_eq!(round_trip("<input disabled>"), "<input disabled>");
        assert_eq!(round_trip(r#"<p class="a  b"></p>"#), r#"<p class="a b"></p>"#);
        assert_eq!(
            round_trip(r#"<p style="color: red; margin:0"></p>"#),
            r#"<p style="color: red; margin: 0;"></p>"#
        );
    }

    #[test]
    fn test_render_escaping() {
        assert_eq!(round_trip("a &lt; b &amp; c"), "a &lt; b &amp; c");
        assert_eq!(round_trip("<script>if (a<b) {}</script>"), "<script>if (a<b) {}</script>");
        assert_eq!(round_trip(r#"<a title='say "hi"'></a>"#), r#"<a title="say &quot;hi&quot;"></a>"#);
    }

    #[test]
    fn test_render_literals() {
        let source = "<!DOCTYPE html><!-- c --><![CDATA[x]]><?xml v?>";
        assert_eq!(round_trip(source), source);
    }

    #[test]
    fn test_custom_raw_text() {
        let mut doc = Document::new();
        let pre = doc.create_element(Element::new("xmp"));
        let text = doc.create_text("<b>");
        doc.append(doc.root(), pre).unwrap();
        doc.append(pre, text).unwrap();

        assert_eq!(render_document(&doc).unwrap(), "<xmp>&lt;b&gt;</xmp>");
        let renderer = Renderer::with_config(RenderConfig::new().with_raw_text("XMP"));
        assert_eq!(renderer.render(&doc).unwrap(), "<xmp><b></xmp>");
    }

    #[test]
    fn test_fragments_render_children_only() {
        let mut doc = Document::new();
        let fragment = doc.create(NodeKind::Fragment);
        let a = doc.create_text("a");
        let b = doc.create(NodeKind::Comment(Comment::new("b")));
        doc.append(doc.root(), fragment).unwrap();
        doc.append(fragment, a).unwrap();
        doc.append(fragment, b).unwrap();
        assert_eq!(render_document(&doc).unwrap(), "a<!--b-->");
    }

    #[test]
    fn test_fragments_keep_raw_text_context() {
        let mut doc = Document::new();
        let script = doc.create_element(Element::new("script"));
        let fragment = doc.create(NodeKind::Fragment);
        let code = doc.create_text("a < b && c");
        doc.append(doc.root(), script).unwrap();
        doc.append(script, fragment).unwrap();
        doc.append(fragment, code).unwrap();

        assert_eq!(render_document(&doc).unwrap(), "<script>a < b && c</script>");
        assert_eq!(Renderer::new().render_node(&doc, code).unwrap(), "a < b && c");
    }

    #[test]
    fn test_extensions() {
        let mut doc = Document::new();
        let ext = doc.create(NodeKind::Extension(Extension::new("math", "x^2")));
        doc.append(doc.root(), ext).unwrap();

        assert_eq!(
            render_document(&doc),
            Err(RenderError::UnknownNodeKind("math".into()))
        );

        let renderer = Renderer::new().extension("math", |ext, out| {
            out.push_str("<math>");
            out.push_str(&ext.value);
            out.push_str("</math>");
        });
        assert_eq!(renderer.render(&doc).unwrap(), "<math>x^2</math>");
    }

    #[test]
    fn test_invalid_tree_is_rejected() {
        let mut doc = Document::new();
        let text = doc.create_text("t");
        doc.append(doc.root(), text).unwrap();
        // Bypass checked mutation to give a leaf a child.
        let orphan = doc.create(NodeKind::Text(Text::new("x")));
        doc.push_child(text, orphan);
        assert_eq!(
            render_document(&doc),
            Err(RenderError::Tree(TreeError::NotAContainer(text)))
        );
    }

    #[test]
    fn test_void_element_with_children_is_rejected() {
        let mut doc = Document::new();
        let br = doc.create_element(Element::new("br"));
        let x = doc.create_text("x");
        doc.append(doc.root(), br).unwrap();
        assert_eq!(doc.append(br, x), Err(TreeError::VoidElement(br)));

        doc.push_child(br, x);
        assert_eq!(render_document(&doc), Err(RenderError::Tree(TreeError::VoidElement(br))));
    }
}
