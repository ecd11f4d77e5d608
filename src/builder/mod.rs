//! Tree construction.
//!
//! # Key Features
//!
//! - Single pass over the token stream, one transition per [`Event`](crate::lexer::Event)
//! - Void elements, implicit closing and tolerated stray `</p>` / `</br>`
//! - Incremental source positions on every node
//!
//! # Example
//!
//! ```
//! use hast::builder::parse;
//!
//! let doc = parse("<p>one<p>two").unwrap();
//! assert_eq!(doc.children(doc.root()).len(), 2);
//! ```

mod position;
pub(crate) mod tables;
mod tree_builder;

pub use position::PositionTracker;
pub use tables::{implicitly_closes, is_void, raw_text_tag};
pub use tree_builder::TreeBuilder;

use crate::attr::{AttributeParser, UnknownAttributes};
use crate::error::LexError;
use crate::lexer::Tokenizer;
use crate::node::Document;

// =============================================================================
// ParseOptions
// =============================================================================

/// Options for [`parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Policy for attributes missing from the registry
    pub unknown_attributes: UnknownAttributes,
    /// Decode character references in text and attribute values
    pub decode_entities: bool,
}

impl ParseOptions {
    /// Keep every attribute, decode references.
    pub const DEFAULT: Self = Self {
        unknown_attributes: UnknownAttributes::PassThrough,
        decode_entities: true,
    };

    /// Keep only known and `data-*` / `aria-*` attributes.
    pub const STRICT: Self = Self {
        unknown_attributes: UnknownAttributes::CustomOnly,
        decode_entities: true,
    };

    /// Set the unknown attribute policy.
    pub fn with_unknown_attributes(mut self, policy: UnknownAttributes) -> Self {
        self.unknown_attributes = policy;
        self
    }

    /// Set whether references are decoded.
    pub fn with_decode_entities(mut self, decode: bool) -> Self {
        self.decode_entities = decode;
        self
    }

    /// Attribute parser matching these options. Text attributes are decoded
    /// by the codec only when the tokenizer leaves values raw.
    pub fn attribute_parser(&self) -> AttributeParser {
        AttributeParser::new(self.unknown_attributes).decode_text(!self.decode_entities)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Parse `source` with default options.
pub fn parse(source: &str) -> Result<Document, LexError> {
    parse_with(source, &ParseOptions::DEFAULT)
}

/// Parse `source`.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Document, LexError> {
    let tokens = Tokenizer::new(source).decode_entities(options.decode_entities);
    let doc = TreeBuilder::new(source, options).build(tokens)?;
    log::debug!(target: "hast::builder", "parsed {} bytes into {} nodes", source.len(), doc.len());
    Ok(doc)
}
