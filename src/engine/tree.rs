//! Node arena.
//!
//! Nodes are indices into a flat `Vec`, each storing its parent index. Walking
//! up to the root is an index walk; there are no back-pointers to keep alive.
//!
//! ```text
//! NodeId(0): Box  (parent=None,    children=[1, 2])
//! NodeId(1): Text (parent=Some(0), "hello")
//! NodeId(2): Box  (parent=Some(0), position=absolute, top=2)
//! ```
//!
//! Ids are assigned in creation order, so a tree rebuilt each frame in the
//! same order keeps the same ids (and with them its scroll state).

use std::fmt;

use crate::types::Style;

/// Index of a node in a [`NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One element of the tree.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub style: Style,
    /// Literal text payload, leaf only. May span several lines.
    pub text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of styled nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
    revision: u64,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever created.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bumped on every mutation.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Create a detached container node.
    pub fn create_node(&mut self, style: Style) -> NodeId {
        self.push(Node {
            style,
            ..Node::default()
        })
    }

    /// Create a detached text leaf.
    pub fn create_text(&mut self, style: Style, text: impl Into<String>) -> NodeId {
        self.push(Node {
            style,
            text: Some(text.into()),
            ..Node::default()
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.revision += 1;
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved. Unknown ids and attempts
    /// to create a cycle are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            return;
        }
        if self.ancestors(parent).any(|a| a == child) {
            tracing::warn!(%parent, %child, "refusing to append an ancestor as child");
            return;
        }
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.revision += 1;
    }

    /// Detach a node from its parent. The node stays in the arena.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get(node).and_then(Node::parent) else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != node);
        self.nodes[node.0].parent = None;
        self.revision += 1;
    }

    /// Detach every child of `node`.
    pub fn remove_children(&mut self, node: NodeId) {
        let Some(n) = self.nodes.get_mut(node.0) else {
            return;
        };
        let children = std::mem::take(&mut n.children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.revision += 1;
    }

    pub fn set_style(&mut self, node: NodeId, style: Style) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.style = style;
            self.revision += 1;
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: Option<String>) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.text = text;
            self.revision += 1;
        }
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    #[inline]
    pub fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.0)
    }

    #[inline]
    pub fn style(&self, node: NodeId) -> Option<&Style> {
        self.get(node).map(|n| &n.style)
    }

    #[inline]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(Node::parent)
    }

    #[inline]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(Node::children).unwrap_or(&[])
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(node),
        }
    }

    /// Top of the chain containing `node`.
    pub fn root_of(&self, node: NodeId) -> NodeId {
        self.ancestors(node).last().unwrap_or(node)
    }

    /// Stable preorder of the subtree rooted at `root`.
    ///
    /// The position of a node in this list is its document order.
    pub fn document_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Borrowed view of one node.
    pub fn node_ref(&self, node: NodeId) -> Option<NodeRef<'_>> {
        self.contains(node).then_some(NodeRef { tree: self, id: node })
    }
}

/// Iterator over a node's ancestors.
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a NodeTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// A node together with the tree it lives in.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a NodeTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn tree(&self) -> &'a NodeTree {
        self.tree
    }

    #[inline]
    pub fn style(&self) -> &'a Style {
        &self.tree.nodes[self.id.0].style
    }

    #[inline]
    pub fn text(&self) -> Option<&'a str> {
        self.tree.nodes[self.id.0].text.as_deref()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree.parent(self.id).and_then(|p| self.tree.node_ref(p))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.children(self.id)
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (NodeTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = NodeTree::new();
        let root = tree.create_node(Style::default());
        let a = tree.create_node(Style::default());
        let b = tree.create_text(Style::default(), "b");
        let c = tree.create_text(Style::default(), "c");
        tree.append_child(root, a);
        tree.append_child(a, b);
        tree.append_child(root, c);
        (tree, root, a, b, c)
    }

    #[test]
    fn test_document_order_is_preorder() {
        let (tree, root, a, b, c) = sample();
        assert_eq!(tree.document_order(root), vec![root, a, b, c]);
        assert_eq!(tree.document_order(a), vec![a, b]);
        assert!(tree.document_order(NodeId(99)).is_empty());
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let (tree, root, a, b, _) = sample();
        assert_eq!(tree.ancestors(b).collect::<Vec<_>>(), vec![a, root]);
        assert_eq!(tree.ancestors(root).count(), 0);
        assert_eq!(tree.root_of(b), root);
    }

    #[test]
    fn test_append_moves_existing_child() {
        let (mut tree, root, a, _, c) = sample();
        tree.append_child(a, c);
        assert_eq!(tree.children(root), &[a]);
        assert_eq!(tree.parent(c), Some(a));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let (mut tree, root, a, b, _) = sample();
        let before = tree.revision();
        tree.append_child(b, root);
        tree.append_child(a, a);
        assert_eq!(tree.revision(), before);
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn test_remove_children() {
        let (mut tree, root, a, _, c) = sample();
        tree.remove_children(root);
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.parent(c), None);
    }

    #[test]
    fn test_revision_bumps() {
        let mut tree = NodeTree::new();
        let n = tree.create_node(Style::default());
        let r = tree.revision();
        tree.set_text(n, Some("x".into()));
        assert!(tree.revision() > r);
    }

    #[test]
    fn test_node_ref() {
        let (tree, root, a, b, _) = sample();
        let node = tree.node_ref(b).unwrap();
        assert_eq!(node.text(), Some("b"));
        assert_eq!(node.parent().map(|p| p.id()), Some(a));
        let kids: Vec<_> = tree.node_ref(root).unwrap().children().map(|n| n.id()).collect();
        assert_eq!(kids.len(), 2);
        assert!(tree.node_ref(NodeId(42)).is_none());
    }
}
