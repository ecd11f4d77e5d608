//! Prelude module for common imports.
//!
//! ```
//! use hast::prelude::*;
//!
//! let doc = parse("<p>x</p>").unwrap();
//! assert_eq!(serialize(&doc).unwrap(), "<p>x</p>");
//! ```

// Node types
pub use crate::node::{Document, Element, NodeId, NodeKind, Point, Position, Text};

// Attributes
pub use crate::attr::{AttributeParser, Properties, PropertyValue, UnknownAttributes};

// Construction
pub use crate::builder::{ParseOptions, parse, parse_with};

// Render
pub use crate::render::{RenderConfig, Renderer, render_document};
pub use crate::serialize;

// Transform
pub use crate::transform::{IdentityTransform, Pipeline, Processor, Transform};

// Error
pub use crate::error::{HastError, HastResult};
