//! Arena document - the tree every stage hands to the next.
//!
//! All nodes live in one vector and refer to each other by [`NodeId`].
//! Transforms can detach, move and replace subtrees without dangling
//! references; [`Document::validate`] re-checks ownership before rendering.

use std::fmt;

use smallvec::SmallVec;

use crate::error::TreeError;

use super::{Element, NodeKind, Position, Text};

// =============================================================================
// NodeId / Node
// =============================================================================

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The synthetic root is always the first slot.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type alias for child id lists.
pub type Children = SmallVec<[NodeId; 4]>;

/// One arena slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What the node is
    pub kind: NodeKind,
    /// Where the node came from, if it was parsed
    pub position: Option<Position>,
    parent: Option<NodeId>,
    children: Children,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            position: None,
            parent: None,
            children: Children::new(),
        }
    }

    /// Owning parent, `None` for the root and for detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered child ids.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

// =============================================================================
// Document
// =============================================================================

/// Arena-backed tree with a synthetic root.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root)],
        }
    }

    /// The root id.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of arena slots, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a node by id, mutably. Links are not reachable through this.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Get a node by id or fail with [`TreeError::MissingNode`].
    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.get(id).ok_or(TreeError::MissingNode(id))
    }

    /// Payload of a node.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|n| &n.kind)
    }

    /// Payload of a node, mutably.
    pub fn kind_mut(&mut self, id: NodeId) -> Option<&mut NodeKind> {
        self.get_mut(id).map(|n| &mut n.kind)
    }

    /// Element payload, if the node is an element.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.kind(id).and_then(NodeKind::as_element)
    }

    /// Element payload, mutably.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.kind_mut(id).and_then(NodeKind::as_element_mut)
    }

    /// Text payload, if the node is a text node.
    pub fn text(&self, id: NodeId) -> Option<&Text> {
        self.kind(id).and_then(NodeKind::as_text)
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node; empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// First child of a node.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Last child of a node.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Source position of a node.
    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.get(id).and_then(|n| n.position)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Allocate a detached node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind));
        id
    }

    /// Allocate a detached element.
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.create(NodeKind::Element(element))
    }

    /// Allocate a detached text node.
    pub fn create_text(&mut self, value: impl Into<String>) -> NodeId {
        self.create(NodeKind::Text(Text::new(value)))
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        self.link(parent, child);
        Ok(())
    }

    /// Insert a detached node before `reference`, a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        let index = self
            .children(parent)
            .iter()
            .position(|&c| c == reference)
            .ok_or(TreeError::NotAChild { parent, child: reference })?;
        self.nodes[parent.index()].children.insert(index, child);
        self.nodes[child.index()].parent = Some(parent);
        Ok(())
    }

    /// Detach a node (and its subtree) from its parent.
    ///
    /// The node stays in the arena and can be attached again. Detaching an
    /// already detached node is a no-op.
    pub fn detach(&mut self, id: NodeId) -> Result<(), TreeError> {
        if id == NodeId::ROOT {
            return Err(TreeError::DetachRoot);
        }
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.retain(|c| *c != id);
            self.nodes[id.index()].parent = None;
        }
        Ok(())
    }

    /// Put the detached node `new` where `old` is, detaching `old`.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), TreeError> {
        if old == NodeId::ROOT {
            return Err(TreeError::DetachRoot);
        }
        let parent = self.node(old)?.parent.ok_or(TreeError::NotAChild {
            parent: NodeId::ROOT,
            child: old,
        })?;
        self.insert_before(parent, new, old)?;
        self.detach(old)
    }

    /// Unchecked append used by the tree builder, whose stack discipline
    /// already guarantees fresh, detached children.
    pub(crate) fn push_child(&mut self, parent: NodeId, child: NodeId) {
        self.link(parent, child);
    }

    pub(crate) fn set_position_start(&mut self, id: NodeId, start: super::Point) {
        let node = &mut self.nodes[id.index()];
        match &mut node.position {
            Some(pos) => pos.start = start,
            None => node.position = Some(Position::new(start, start)),
        }
    }

    pub(crate) fn set_position_end(&mut self, id: NodeId, end: super::Point) {
        let node = &mut self.nodes[id.index()];
        match &mut node.position {
            Some(pos) => pos.end = end,
            None => node.position = Some(Position::new(end, end)),
        }
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
    }

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        check_accepts_children(parent, &self.node(parent)?.kind)?;
        let node = self.node(child)?;
        if child == NodeId::ROOT {
            return Err(TreeError::DetachRoot);
        }
        if node.parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        if child == parent || self.ancestors(parent).any(|a| a == child) {
            return Err(TreeError::WouldCycle { parent, child });
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// Iterate over ancestors, parent first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { doc: self, current: self.parent(id) }
    }

    /// Pre-order iterator over `id` and everything below it.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants { doc: self, stack: vec![id] }
    }

    /// Elements reachable from the root, in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &Element)> {
        self.descendants(NodeId::ROOT)
            .filter_map(|id| self.element(id).map(|e| (id, e)))
    }

    /// Find the first element matching a predicate.
    pub fn find_element<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.elements().find(|(_, e)| predicate(e)).map(|(id, _)| id)
    }

    /// Find all elements matching a predicate.
    pub fn find_all<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.elements()
            .filter(|(_, e)| predicate(e))
            .map(|(id, _)| id)
            .collect()
    }

    /// Visit every reachable element mutably, in document order.
    pub fn for_each_element_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Element),
    {
        let ids: Vec<NodeId> = self.descendants(NodeId::ROOT).collect();
        for id in ids {
            if let Some(element) = self.element_mut(id) {
                f(element);
            }
        }
    }

    /// Concatenated text of all text descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        for node in self.descendants(id) {
            if let Some(text) = self.text(node) {
                result.push_str(&text.value);
            }
        }
        result
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Check the ownership invariants of everything reachable from the root:
    /// children only under containers, one owner per node, back-links that
    /// agree with child lists, no cycles.
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![NodeId::ROOT];
        seen[0] = true;

        while let Some(parent) = stack.pop() {
            let node = self.node(parent)?;
            if !node.children.is_empty() {
                check_accepts_children(parent, &node.kind)?;
            }
            for &child in &node.children {
                let child_node = self.node(child)?;
                if seen[child.index()] {
                    return Err(TreeError::SharedChild(child));
                }
                if child_node.parent != Some(parent) {
                    return Err(TreeError::ParentMismatch {
                        child,
                        listed: parent,
                        recorded: child_node.parent,
                    });
                }
                seen[child.index()] = true;
                stack.push(child);
            }
        }
        Ok(())
    }
}

fn check_accepts_children(id: NodeId, kind: &NodeKind) -> Result<(), TreeError> {
    match kind {
        NodeKind::Element(element) if element.is_void() => Err(TreeError::VoidElement(id)),
        kind if kind.is_container() => Ok(()),
        _ => Err(TreeError::NotAContainer(id)),
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over ancestors of a node.
pub struct Ancestors<'a> {
    doc: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.doc.parent(id);
        Some(id)
    }
}

/// Depth-first, pre-order iterator.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Push children in reverse order so they're visited left-to-right
        self.stack.extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Comment;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let div = doc.create_element(Element::new("div"));
        let text = doc.create_text("hello");
        doc.append(doc.root(), div).unwrap();
        doc.append(div, text).unwrap();
        (doc, div, text)
    }

    #[test]
    fn test_append_and_query() {
        let (doc, div, text) = sample();
        assert_eq!(doc.children(doc.root()), &[div]);
        assert_eq!(doc.parent(text), Some(div));
        assert_eq!(doc.text_content(doc.root()), "hello");
        assert_eq!(doc.find_element(|e| e.is("div")), Some(div));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_append_rejects_attached_and_cycles() {
        let (mut doc, div, text) = sample();
        let span = doc.create_element(Element::new("span"));

        assert_eq!(doc.append(span, div), Err(TreeError::AlreadyAttached(div)));
        assert_eq!(doc.append(text, span), Err(TreeError::NotAContainer(text)));

        doc.append(div, span).unwrap();
        doc.detach(div).unwrap();
        assert_eq!(
            doc.append(span, div),
            Err(TreeError::WouldCycle { parent: span, child: div })
        );
    }

    #[test]
    fn test_void_elements_reject_children() {
        let (mut doc, div, _text) = sample();
        let br = doc.create_element(Element::new("br"));
        let img = doc.create_element(Element::new("IMG"));
        let x = doc.create_text("x");
        doc.append(div, br).unwrap();

        assert_eq!(doc.append(br, x), Err(TreeError::VoidElement(br)));
        assert_eq!(doc.insert_before(img, x, x), Err(TreeError::VoidElement(img)));
        assert!(doc.children(br).is_empty());
        assert_eq!(doc.parent(x), None);

        // Bypass the checked API to simulate a broken transform.
        doc.push_child(br, x);
        assert_eq!(doc.validate(), Err(TreeError::VoidElement(br)));
    }

    #[test]
    fn test_detach_and_reattach() {
        let (mut doc, div, text) = sample();
        doc.detach(text).unwrap();
        assert!(doc.children(div).is_empty());
        assert_eq!(doc.parent(text), None);

        doc.append(doc.root(), text).unwrap();
        assert_eq!(doc.children(doc.root()), &[div, text]);
        assert!(doc.validate().is_ok());
        assert_eq!(doc.detach(doc.root()), Err(TreeError::DetachRoot));
    }

    #[test]
    fn test_insert_before_and_replace() {
        let (mut doc, div, text) = sample();
        let comment = doc.create(NodeKind::Comment(Comment::new("c")));
        doc.insert_before(div, comment, text).unwrap();
        assert_eq!(doc.children(div), &[comment, text]);

        let strong = doc.create_element(Element::new("strong"));
        doc.replace(text, strong).unwrap();
        assert_eq!(doc.children(div), &[comment, strong]);
        assert_eq!(doc.parent(text), None);
    }

    #[test]
    fn test_validate_detects_shared_child() {
        let (mut doc, _div, text) = sample();
        // Bypass the checked API to simulate a broken transform.
        doc.push_child(doc.root(), text);
        assert!(matches!(
            doc.validate(),
            Err(TreeError::SharedChild(id) | TreeError::ParentMismatch { child: id, .. }) if id == text
        ));
    }

    #[test]
    fn test_descendants_preorder() {
        let mut doc = Document::new();
        let a = doc.create_element(Element::new("a"));
        let b = doc.create_element(Element::new("b"));
        let c = doc.create_element(Element::new("c"));
        doc.append(doc.root(), a).unwrap();
        doc.append(a, b).unwrap();
        doc.append(doc.root(), c).unwrap();

        let tags: Vec<_> = doc.elements().map(|(_, e)| e.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_document_is_send_sync() {
        static_assertions::assert_impl_all!(Document: Send, Sync, Clone);
    }
}
