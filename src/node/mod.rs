//! Node types: the arena [`Document`] and the payloads it stores.
//!
//! # Key Features
//!
//! - One arena per document, children referenced by [`NodeId`]
//! - Closed [`NodeKind`] sum type, plus an `Extension` escape hatch for
//!   transforms that need node kinds of their own
//! - Optional [`Position`] on every parsed node

mod document;
mod kind;
mod position;

pub use document::{Ancestors, Children, Descendants, Document, Node, NodeId};
pub use kind::{CharacterData, Comment, Directive, Element, Extension, NodeKind, Text};
pub use position::{Point, Position};
