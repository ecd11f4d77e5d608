//! Fluent, one-off document pipeline.

use crate::node::Document;

use super::{IdentityTransform, Transform};

// =============================================================================
// Pipeline
// =============================================================================

/// Synchronous pipeline for document processing.
///
/// Wraps a `Document` and provides fluent API for transformations and data collection.
///
/// # Example
///
/// ```
/// use hast::transform::Pipeline;
/// use hast::Document;
///
/// fn strip_comments(mut doc: Document) -> Document {
///     let comments: Vec<_> = doc
///         .descendants(doc.root())
///         .filter(|&id| doc.kind(id).is_some_and(|k| k.is_comment()))
///         .collect();
///     for id in comments {
///         doc.detach(id).unwrap();
///     }
///     doc
/// }
///
/// let doc = hast::parse("a<!--b-->c").unwrap();
/// let doc = Pipeline::new(doc).pipe(strip_comments).into_inner();
/// assert_eq!(hast::serialize(&doc).unwrap(), "ac");
/// ```
pub struct Pipeline {
    doc: Document,
}

impl Pipeline {
    /// Create a new pipeline from a document.
    #[inline]
    pub fn new(doc: Document) -> Self {
        Self { doc }
    }

    /// Apply a transform to the document.
    #[inline]
    pub fn pipe<T>(self, transform: T) -> Self
    where
        T: Transform,
    {
        Self { doc: transform.transform(self.doc) }
    }

    /// Conditionally apply a transform.
    ///
    /// Only applies the transform if `condition` is true.
    #[inline]
    pub fn pipe_if<T>(self, condition: bool, transform: T) -> Self
    where
        T: Transform,
    {
        if condition {
            self.pipe(transform)
        } else {
            self.pipe(IdentityTransform)
        }
    }

    /// Apply `then_transform` if condition is true, otherwise `else_transform`.
    #[inline]
    pub fn pipe_if_else<T1, T2>(self, condition: bool, then_transform: T1, else_transform: T2) -> Self
    where
        T1: Transform,
        T2: Transform,
    {
        if condition {
            self.pipe(then_transform)
        } else {
            self.pipe(else_transform)
        }
    }

    /// Inspect the document without consuming the pipeline.
    #[inline]
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&Document),
    {
        f(&self.doc);
        self
    }

    /// Tap into the pipeline to extract data while continuing the chain.
    #[inline]
    pub fn tap<F, R>(self, f: F) -> (Self, R)
    where
        F: FnOnce(&Document) -> R,
    {
        let result = f(&self.doc);
        (self, result)
    }

    /// Get a reference to the underlying document.
    #[inline]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Consume the pipeline and return the document.
    #[inline]
    pub fn into_inner(self) -> Document {
        self.doc
    }
}

impl From<Document> for Pipeline {
    #[inline]
    fn from(doc: Document) -> Self {
        Self::new(doc)
    }
}

impl From<Pipeline> for Document {
    #[inline]
    fn from(pipeline: Pipeline) -> Self {
        pipeline.into_inner()
    }
}
