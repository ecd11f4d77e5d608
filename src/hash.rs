//! Deterministic hashing utilities for documents
//!
//! Provides cross-process deterministic hashing using blake3.

use crate::attr::compile_property;
use crate::node::{Document, NodeId, NodeKind};

// =============================================================================
// StableHasher - Builder Pattern
// =============================================================================

/// A deterministic hasher using blake3
///
/// Unlike `std::hash::Hasher`, this produces the same output across
/// process restarts for the same input.
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    /// Create a new StableHasher
    #[inline]
    pub fn new() -> Self {
        Self { inner: blake3::Hasher::new() }
    }

    /// Update with raw bytes
    #[inline]
    pub fn update(mut self, data: &[u8]) -> Self {
        self.inner.update(data);
        self
    }

    /// Update with a length-prefixed string, so `("ab", "c")` and
    /// `("a", "bc")` hash differently
    #[inline]
    pub fn update_str(self, s: &str) -> Self {
        self.update_usize(s.len()).update(s.as_bytes())
    }

    /// Update with a usize value (little-endian)
    #[inline]
    pub fn update_usize(self, v: usize) -> Self {
        self.update(&(v as u64).to_le_bytes())
    }

    /// Finish and return the first 8 bytes of the digest as a
    /// little-endian u64
    #[inline]
    pub fn finish(self) -> u64 {
        let hash = self.inner.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }
}

impl Default for StableHasher {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Document fingerprint
// =============================================================================

impl Document {
    /// Stable hash of everything reachable from the root: kinds, tag names,
    /// compiled attributes, literal values and nesting. Positions and
    /// detached nodes are ignored.
    pub fn fingerprint(&self) -> u64 {
        hash_node(self, self.root(), StableHasher::new()).finish()
    }
}

fn hash_node(doc: &Document, id: NodeId, hasher: StableHasher) -> StableHasher {
    let Some(kind) = doc.kind(id) else {
        return hasher;
    };
    let mut hasher = hasher.update_str(kind.name());
    hasher = match kind {
        NodeKind::Root | NodeKind::Fragment => hasher,
        NodeKind::Element(elem) => {
            let mut hasher = hasher.update_str(&elem.tag_name).update_usize(elem.properties.len());
            for (key, value) in elem.properties.iter() {
                hasher = hasher.update_str(key).update_str(&compile_property(key, value));
            }
            hasher
        }
        NodeKind::Text(text) => hasher.update_str(text.value()),
        NodeKind::Comment(comment) => hasher.update_str(comment.value()),
        NodeKind::CharacterData(cdata) => hasher.update_str(cdata.value()),
        NodeKind::Directive(directive) => hasher.update_str(&directive.name).update_str(&directive.value),
        NodeKind::Extension(ext) => hasher.update_str(&ext.value),
    };

    let children = doc.children(id);
    hasher = hasher.update_usize(children.len());
    for &child in children {
        hasher = hash_node(doc, child, hasher);
    }
    hasher
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;

    #[test]
    fn test_hasher_is_deterministic() {
        let a = StableHasher::new().update_str("ab").update_str("c").finish();
        let b = StableHasher::new().update_str("ab").update_str("c").finish();
        let c = StableHasher::new().update_str("a").update_str("bc").finish();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fingerprint_ignores_positions() {
        let one = parse("<p class=a>x</p>").unwrap();
        let two = parse("<p   class=\"a\" >x</p >").unwrap();
        assert_eq!(one.fingerprint(), two.fingerprint());
    }

    #[test]
    fn test_fingerprint_tracks_changes() {
        let mut doc = parse("<p>x</p>").unwrap();
        let before = doc.fingerprint();
        doc.for_each_element_mut(|e| e.properties.set("id", "y"));
        assert_ne!(before, doc.fingerprint());

        let p = doc.children(doc.root())[0];
        let after_edit = doc.fingerprint();
        doc.detach(p).unwrap();
        assert_ne!(after_edit, doc.fingerprint());
        assert_eq!(doc.fingerprint(), Document::new().fingerprint());
    }
}
