//! Plugin stage: tree-mutating transforms between parse and render.
//!
//! # Module Structure
//!
//! - `Transform` - Core trait, implemented for every `Fn(Document) -> Document`
//! - `Pipeline` - Fluent one-off chain over an owned document
//! - `Processor` - Reusable parse -> transforms -> render driver
//!
//! # Example
//!
//! ```
//! use hast::transform::{Pipeline, Processor};
//! use hast::Document;
//!
//! fn noop(doc: Document) -> Document {
//!     doc
//! }
//!
//! let doc = hast::parse("<p>x</p>").unwrap();
//! let doc = Pipeline::new(doc).pipe(noop).into_inner();
//!
//! let processor = Processor::new().with_transform(noop);
//! assert_eq!(processor.stringify(&doc).unwrap(), "<p>x</p>");
//! ```

mod core;
mod pipeline;
mod processor;

pub use core::{IdentityTransform, Transform};
pub use pipeline::Pipeline;
pub use processor::Processor;
