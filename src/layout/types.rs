//! Layout Types
//!
//! The Layout Provider contract and the table that carries its output.

use crate::engine::NodeId;
use crate::types::Rect;

/// Source of computed geometry.
///
/// Geometry is parent-relative and already accounts for ordinary flex flow.
/// A node with no geometry (never laid out) paints nothing and has zero size.
pub trait LayoutProvider {
    fn geometry(&self, node: NodeId) -> Option<Rect>;
}

impl<F> LayoutProvider for F
where
    F: Fn(NodeId) -> Option<Rect>,
{
    fn geometry(&self, node: NodeId) -> Option<Rect> {
        self(node)
    }
}

/// Computed layout result.
///
/// Parallel to the node arena: slot `i` holds the geometry of `NodeId(i)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedLayout {
    rects: Vec<Option<Rect>>,
}

impl ComputedLayout {
    /// Create a new empty computed layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `len` nodes.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            rects: vec![None; len],
        }
    }

    /// Record the geometry of a node.
    pub fn set(&mut self, node: NodeId, rect: Rect) {
        let idx = node.index();
        if idx >= self.rects.len() {
            self.rects.resize(idx + 1, None);
        }
        self.rects[idx] = Some(rect);
    }

    /// Forget the geometry of a node.
    pub fn unset(&mut self, node: NodeId) {
        if let Some(slot) = self.rects.get_mut(node.index()) {
            *slot = None;
        }
    }

    #[inline]
    pub fn get(&self, node: NodeId) -> Option<Rect> {
        self.rects.get(node.index()).copied().flatten()
    }

    /// Number of nodes with geometry.
    pub fn laid_out(&self) -> usize {
        self.rects.iter().filter(|r| r.is_some()).count()
    }
}

impl LayoutProvider for ComputedLayout {
    #[inline]
    fn geometry(&self, node: NodeId) -> Option<Rect> {
        self.get(node)
    }
}
