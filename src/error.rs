//! Error types for hast.
//!
//! Errors are split by stage: the lexer reports [`LexError`], the arena
//! reports [`TreeError`], the renderer reports [`RenderError`]. [`HastError`]
//! unifies them for callers that drive the whole pipeline.

use compact_str::CompactString;
use thiserror::Error;

use crate::node::NodeId;

/// Errors reported by the tokenizer. Always fatal to tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// Input ended while a markup construct was still open.
    #[error("unexpected end of input in {construct} starting at offset {offset}")]
    UnexpectedEof {
        /// Human readable construct name (`tag`, `comment`, ...)
        construct: &'static str,
        /// Byte offset where the construct began
        offset: usize,
    },
}

/// Arena invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id does not belong to this document.
    #[error("node {0} does not exist")]
    MissingNode(NodeId),

    /// Children can only be attached to root, fragment and element nodes.
    #[error("node {0} cannot have children")]
    NotAContainer(NodeId),

    /// Void elements never have children.
    #[error("void element {0} cannot have children")]
    VoidElement(NodeId),

    /// The node already has a parent; detach it first.
    #[error("node {0} is already attached to a parent")]
    AlreadyAttached(NodeId),

    /// Attaching would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle {
        /// Intended parent
        parent: NodeId,
        /// Node being attached
        child: NodeId,
    },

    /// A node is listed in more than one child sequence.
    #[error("node {0} appears in more than one child list")]
    SharedChild(NodeId),

    /// A node's parent link disagrees with the child list it sits in.
    #[error("node {child} is listed under {listed} but points at {recorded:?}")]
    ParentMismatch {
        /// Node whose back-link is wrong
        child: NodeId,
        /// Parent whose child list contains it
        listed: NodeId,
        /// Parent recorded on the node itself
        recorded: Option<NodeId>,
    },

    /// The reference node is not a child of the given parent.
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// Expected parent
        parent: NodeId,
        /// Reference child
        child: NodeId,
    },

    /// The root cannot be moved, replaced or removed.
    #[error("the root node cannot be detached")]
    DetachRoot,
}

/// Errors raised while rendering a tree back to markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// No renderer is registered for an extension node kind.
    #[error("no serializer registered for node kind `{0}`")]
    UnknownNodeKind(CompactString),

    /// The tree failed validation before rendering.
    #[error("invalid tree: {0}")]
    Tree(#[from] TreeError),
}

/// Top-level error for the parse → transform → render pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HastError {
    /// Tokenizer failure, construction aborted
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    /// Tree manipulation failure
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Rendering failure
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type alias for hast operations.
pub type HastResult<T> = Result<T, HastError>;
