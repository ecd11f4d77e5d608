//! Parse -> transforms -> render, as one reusable object.

use crate::builder::{ParseOptions, parse_with};
use crate::error::HastResult;
use crate::node::Document;
use crate::render::Renderer;

use super::Transform;

/// Registered transform chain plus the parse and render settings around it.
///
/// # Example
///
/// ```
/// use hast::transform::Processor;
/// use hast::Document;
///
/// let processor = Processor::new().with_transform(|mut doc: Document| {
///     doc.for_each_element_mut(|e| e.properties.set("id", "x"));
///     doc
/// });
/// assert_eq!(processor.process("<p>a</p>").unwrap(), r#"<p id="x">a</p>"#);
/// ```
#[derive(Default)]
pub struct Processor {
    options: ParseOptions,
    renderer: Renderer,
    transforms: Vec<Box<dyn Transform + Send + Sync>>,
}

impl Processor {
    /// Processor with default options, no transforms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: parse options.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder: renderer used by [`stringify`](Self::stringify).
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Builder: append a transform. Transforms run in registration order.
    pub fn with_transform<T>(mut self, transform: T) -> Self
    where
        T: Transform + Send + Sync + 'static,
    {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Number of registered transforms.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether no transform is registered.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Parse `source` with this processor's options.
    pub fn parse(&self, source: &str) -> HastResult<Document> {
        Ok(parse_with(source, &self.options)?)
    }

    /// Run every transform over `doc`.
    pub fn run(&self, doc: Document) -> Document {
        self.transforms.iter().fold(doc, |doc, transform| {
            if !log::log_enabled!(target: "hast::transform", log::Level::Debug) {
                return transform.transform(doc);
            }
            let before = doc.fingerprint();
            let doc = transform.transform(doc);
            let changed = before != doc.fingerprint();
            log::debug!(target: "hast::transform", "{}: changed={changed}", transform.name());
            doc
        })
    }

    /// Render `doc` to markup.
    pub fn stringify(&self, doc: &Document) -> HastResult<String> {
        Ok(self.renderer.render(doc)?)
    }

    /// Parse, transform and render.
    pub fn process(&self, source: &str) -> HastResult<String> {
        let doc = self.parse(source)?;
        let doc = self.run(doc);
        self.stringify(&doc)
    }

    /// Process independent sources in parallel. Results keep input order.
    #[cfg(feature = "parallel")]
    pub fn process_batch<S>(&self, sources: &[S]) -> Vec<HastResult<String>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        sources.par_iter().map(|source| self.process(source.as_ref())).collect()
    }
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("options", &self.options)
            .field("renderer", &self.renderer)
            .field("transforms", &self.transforms.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::UnknownAttributes;
    use crate::error::{HastError, LexError, RenderError};
    use crate::node::{Extension, NodeKind, Text};

    fn upper_text(mut doc: Document) -> Document {
        let ids: Vec<_> = doc.descendants(doc.root()).collect();
        for id in ids {
            if let Some(NodeKind::Text(text)) = doc.kind_mut(id) {
                *text = Text::new(text.value().to_uppercase());
            }
        }
        doc
    }

    fn append_marker(mut doc: Document) -> Document {
        let marker = doc.create_text("!");
        let root = doc.root();
        doc.append(root, marker).unwrap();
        doc
    }

    #[test]
    fn test_transforms_run_in_order() {
        let processor = Processor::new().with_transform(append_marker).with_transform(upper_text);
        assert_eq!(processor.len(), 2);
        assert_eq!(processor.process("<b>hi</b>").unwrap(), "<b>HI</b>!");

        let reversed = Processor::new().with_transform(upper_text).with_transform(append_marker);
        assert_eq!(reversed.process("x").unwrap(), "X!");
    }

    #[test]
    fn test_errors_surface() {
        let processor = Processor::new();
        assert!(matches!(processor.process("<a"), Err(HastError::Lex(LexError::UnexpectedEof { .. }))));

        let with_extension = Processor::new().with_transform(|mut doc: Document| {
            let ext = doc.create(NodeKind::Extension(Extension::new("chart", "")));
            let root = doc.root();
            doc.append(root, ext).unwrap();
            doc
        });
        assert_eq!(
            with_extension.process("x"),
            Err(HastError::Render(RenderError::UnknownNodeKind("chart".into())))
        );
    }

    #[test]
    fn test_options_apply() {
        let processor = Processor::new()
            .with_options(ParseOptions::DEFAULT.with_unknown_attributes(UnknownAttributes::CustomOnly));
        assert_eq!(processor.process(r#"<p foo="1" data-x="2"></p>"#).unwrap(), r#"<p data-x="2"></p>"#);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_process_batch() {
        let processor = Processor::new().with_transform(upper_text);
        let results = processor.process_batch(&["a", "<b>c</b>", "<x"]);
        assert_eq!(results[0].as_deref(), Ok("A"));
        assert_eq!(results[1].as_deref(), Ok("<b>C</b>"));
        assert!(results[2].is_err());
    }
}
