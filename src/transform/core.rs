//! Core transform trait.

use crate::node::Document;

/// A tree-mutating stage run between parse and render.
///
/// Transforms take ownership of the document and hand it back, so a stage
/// never keeps a handle to a tree it has passed on.
pub trait Transform {
    /// Transform the document.
    fn transform(&self, doc: Document) -> Document;

    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Transform for F
where
    F: Fn(Document) -> Document,
{
    #[inline]
    fn transform(&self, doc: Document) -> Document {
        self(doc)
    }
}

// =============================================================================
// IdentityTransform
// =============================================================================

/// Identity transform that returns the document unchanged.
///
/// Useful for conditional transforms where one branch doesn't need to modify
/// the document.
///
/// # Example
///
/// ```
/// use hast::transform::{IdentityTransform, Pipeline};
///
/// let doc = hast::parse("<p>x</p>").unwrap();
/// let same = Pipeline::new(doc.clone()).pipe(IdentityTransform).into_inner();
/// assert_eq!(doc, same);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl Transform for IdentityTransform {
    #[inline]
    fn transform(&self, doc: Document) -> Document {
        doc
    }

    fn name(&self) -> &str {
        "identity"
    }
}
