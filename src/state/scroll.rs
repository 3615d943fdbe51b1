//! Scroll State Module
//!
//! Manages scrolling behavior:
//! - Per-container scroll offset, persisted across frames in a [`ScrollRegistry`]
//! - Scroll bounds derived from the current layout (content extent vs. inner size)
//! - Scroll operations with clamping, exposed through the [`Scrollable`] capability
//!
//! Architecture:
//! - offsets = user state, survives re-layout, only changed by explicit scroll calls
//! - extent / max scroll = recomputed from geometry on demand, never cached

use std::collections::{HashMap, HashSet};
use std::fmt;

use spark_signals::{Signal, signal};

use crate::engine::{NodeId, NodeRef, NodeTree};
use crate::framebuffer::place;
use crate::layout::{ComputedLayout, LayoutProvider};
use crate::types::Rect;

// =============================================================================
// TYPES
// =============================================================================

/// Scroll position of one container, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

impl ScrollOffset {
    pub const ZERO: Self = Self { x: 0, y: 0 };
}

/// Requested scroll position. `None` or a non-finite value leaves that axis
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollTarget {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl ScrollTarget {
    pub fn x(x: f64) -> Self {
        Self { x: Some(x), y: None }
    }

    pub fn y(y: f64) -> Self {
        Self { x: None, y: Some(y) }
    }

    pub fn xy(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y) }
    }
}

/// Round and clamp one requested axis into `[0, max]`.
fn resolve_axis(requested: Option<f64>, current: i32, max: i32) -> i32 {
    match requested {
        Some(v) if v.is_finite() => v.round().clamp(0.0, max.max(0) as f64) as i32,
        _ => current,
    }
}

// =============================================================================
// SCROLL REGISTRY
// =============================================================================

/// Scroll offsets for every known scroll container.
///
/// The version signal moves whenever an offset changes, so a frame scheduler
/// can tell that the next compositing pass would differ.
pub struct ScrollRegistry {
    offsets: HashMap<NodeId, ScrollOffset>,
    version: Signal<u64>,
}

impl ScrollRegistry {
    pub fn new() -> Self {
        Self {
            offsets: HashMap::new(),
            version: signal(0),
        }
    }

    /// Current offset of a container; zero for unknown nodes.
    #[inline]
    pub fn offset(&self, node: NodeId) -> ScrollOffset {
        self.offsets.get(&node).copied().unwrap_or_default()
    }

    /// Whether state exists for this node.
    #[inline]
    pub fn is_tracked(&self, node: NodeId) -> bool {
        self.offsets.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Store an offset as-is. Returns true if it changed.
    ///
    /// No clamping happens here; [`Scrollable`] operations clamp before
    /// storing.
    pub fn set_offset(&mut self, node: NodeId, offset: ScrollOffset) -> bool {
        let slot = self.offsets.entry(node).or_default();
        if *slot == offset {
            return false;
        }
        *slot = offset;
        self.version.set(self.version.get().wrapping_add(1));
        true
    }

    /// Bumped on every offset change.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    /// The underlying signal, for reactive consumers.
    pub fn version_signal(&self) -> Signal<u64> {
        self.version.clone()
    }

    /// Track the scroll containers reachable from `root`.
    ///
    /// New containers start at `{0, 0}`. Offsets of nodes that are gone or no
    /// longer scroll are dropped.
    pub fn sync_with(&mut self, tree: &NodeTree, root: NodeId) {
        let containers: HashSet<NodeId> = tree
            .document_order(root)
            .into_iter()
            .filter(|&id| tree.style(id).is_some_and(|s| s.is_scroll_container()))
            .collect();

        let before = self.offsets.len();
        self.offsets.retain(|id, _| containers.contains(id));
        let dropped = before - self.offsets.len();

        let mut created = 0;
        for id in containers {
            self.offsets.entry(id).or_insert_with(|| {
                created += 1;
                ScrollOffset::ZERO
            });
        }

        if created > 0 || dropped > 0 {
            tracing::trace!(created, dropped, tracked = self.offsets.len(), "scroll state synced");
        }
    }
}

impl Default for ScrollRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScrollRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollRegistry")
            .field("offsets", &self.offsets)
            .field("version", &self.version.get())
            .finish()
    }
}

// =============================================================================
// SCROLL BOUNDS
// =============================================================================

/// Size inside the node's borders.
pub fn inner_size<L>(tree: &NodeTree, layout: &L, node: NodeId) -> (u16, u16)
where
    L: LayoutProvider + ?Sized,
{
    let Some(rect) = layout.geometry(node) else {
        return (0, 0);
    };
    let (top, right, bottom, left) = tree
        .style(node)
        .map(|s| s.borders.thickness())
        .unwrap_or_default();
    (
        (rect.width as i32 - left - right).max(0) as u16,
        (rect.height as i32 - top - bottom).max(0) as u16,
    )
}

/// Furthest right/bottom edge reached by any descendant, measured from the
/// container's inner origin.
pub fn content_extent<L>(tree: &NodeTree, layout: &L, node: NodeId) -> (u16, u16)
where
    L: LayoutProvider + ?Sized,
{
    let Some(rect) = layout.geometry(node) else {
        return (0, 0);
    };
    let (top, _, _, left) = tree
        .style(node)
        .map(|s| s.borders.thickness())
        .unwrap_or_default();

    let mut reach = (0, 0);
    extend(tree, layout, node, rect.at(0, 0), &mut reach);

    (
        reach.0.saturating_sub(left).clamp(0, u16::MAX as i32) as u16,
        reach.1.saturating_sub(top).clamp(0, u16::MAX as i32) as u16,
    )
}

fn extend<L>(tree: &NodeTree, layout: &L, node: NodeId, block: Rect, reach: &mut (i32, i32))
where
    L: LayoutProvider + ?Sized,
{
    for &child in tree.children(node) {
        let mut child_block = block;
        if let (Some(geometry), Some(style)) = (layout.geometry(child), tree.style(child)) {
            let (x, y) = place(style, geometry, block);
            let rect = geometry.at(x, y);
            reach.0 = reach.0.max(rect.right());
            reach.1 = reach.1.max(rect.bottom());
            child_block = rect;
        }
        extend(tree, layout, child, child_block, reach);
    }
}

/// How far the container can scroll on each axis. Never negative.
pub fn max_scroll<L>(tree: &NodeTree, layout: &L, node: NodeId) -> ScrollOffset
where
    L: LayoutProvider + ?Sized,
{
    let (content_w, content_h) = content_extent(tree, layout, node);
    let (inner_w, inner_h) = inner_size(tree, layout, node);
    ScrollOffset {
        x: (content_w as i32 - inner_w as i32).max(0),
        y: (content_h as i32 - inner_h as i32).max(0),
    }
}

/// Frame-absolute box of a node, placed the way the compositor places it.
///
/// Walks from the root down: flow nodes add their position to the enclosing
/// box, absolute nodes resolve their offsets against it. Ancestors without
/// geometry contribute nothing. Scroll offsets are not applied, and a node
/// without geometry has zero size.
pub fn bounds<L>(tree: &NodeTree, layout: &L, node: NodeId) -> Rect
where
    L: LayoutProvider + ?Sized,
{
    let mut path: Vec<NodeId> = tree.ancestors(node).collect();
    path.reverse();
    path.push(node);

    let mut block: Option<Rect> = None;
    for id in path {
        let (Some(geometry), Some(style)) = (layout.geometry(id), tree.style(id)) else {
            continue;
        };
        let (x, y) = match block {
            Some(block) => place(style, geometry, block),
            None => (geometry.x, geometry.y),
        };
        block = Some(geometry.at(x, y));
    }

    match (layout.geometry(node), block) {
        (Some(_), Some(rect)) => rect,
        (_, Some(block)) => Rect::new(block.x, block.y, 0, 0),
        _ => Rect::default(),
    }
}

// =============================================================================
// CAPABILITY
// =============================================================================

/// Scroll operations available on a node reference.
pub trait Scrollable {
    /// Move to the requested position, clamped per axis.
    fn scroll_to(&mut self, target: ScrollTarget);

    fn scroll_to_top(&mut self);

    /// Jump to the maximum vertical offset as of this call.
    fn scroll_to_bottom(&mut self);

    fn scroll_position(&self) -> ScrollOffset;

    fn bounds(&self) -> Rect;
}

/// A scroll-capable reference to one node.
///
/// Borrows the tree and layout of the current frame plus the persistent
/// registry. Operations on a node that is not a scroll container leave all
/// state untouched.
pub struct ScrollHandle<'a, L: LayoutProvider + ?Sized = ComputedLayout> {
    node: NodeId,
    tree: &'a NodeTree,
    layout: &'a L,
    registry: &'a mut ScrollRegistry,
}

impl<'a, L: LayoutProvider + ?Sized> ScrollHandle<'a, L> {
    pub fn new(
        node: NodeId,
        tree: &'a NodeTree,
        layout: &'a L,
        registry: &'a mut ScrollRegistry,
    ) -> Self {
        Self {
            node,
            tree,
            layout,
            registry,
        }
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Whether the node scrolls on any axis.
    pub fn is_scrollable(&self) -> bool {
        self.tree
            .style(self.node)
            .is_some_and(|s| s.is_scroll_container())
    }

    pub fn max_scroll(&self) -> ScrollOffset {
        max_scroll(self.tree, self.layout, self.node)
    }

    pub fn content_extent(&self) -> (u16, u16) {
        content_extent(self.tree, self.layout, self.node)
    }

    fn store(&mut self, offset: ScrollOffset) -> bool {
        if !self.is_scrollable() {
            return false;
        }
        self.registry.set_offset(self.node, offset)
    }

    /// Scroll by a delta amount.
    ///
    /// Returns `true` if scrolling occurred, `false` if already at boundary.
    pub fn scroll_by(&mut self, delta_x: i32, delta_y: i32) -> bool {
        let current = self.scroll_position();
        let max = self.max_scroll();
        self.store(ScrollOffset {
            x: current.x.saturating_add(delta_x).clamp(0, max.x),
            y: current.y.saturating_add(delta_y).clamp(0, max.y),
        })
    }

    /// Scroll to start (set X offset to 0, preserve Y).
    pub fn scroll_to_start(&mut self) {
        let current = self.scroll_position();
        self.store(ScrollOffset { x: 0, ..current });
    }

    /// Scroll to end (set X offset to max, preserve Y).
    pub fn scroll_to_end(&mut self) {
        let current = self.scroll_position();
        let max = self.max_scroll();
        self.store(ScrollOffset { x: max.x, ..current });
    }
}

impl<'a> NodeRef<'a> {
    /// Scroll capability for this node, backed by `layout` and `registry`.
    pub fn scroll<L: LayoutProvider + ?Sized>(
        self,
        layout: &'a L,
        registry: &'a mut ScrollRegistry,
    ) -> ScrollHandle<'a, L> {
        ScrollHandle::new(self.id(), self.tree(), layout, registry)
    }
}

impl<L: LayoutProvider + ?Sized> Scrollable for ScrollHandle<'_, L> {
    fn scroll_to(&mut self, target: ScrollTarget) {
        let current = self.scroll_position();
        let max = self.max_scroll();
        let next = ScrollOffset {
            x: resolve_axis(target.x, current.x, max.x),
            y: resolve_axis(target.y, current.y, max.y),
        };
        self.store(next);
    }

    fn scroll_to_top(&mut self) {
        let current = self.scroll_position();
        self.store(ScrollOffset { y: 0, ..current });
    }

    fn scroll_to_bottom(&mut self) {
        let current = self.scroll_position();
        let max = self.max_scroll();
        self.store(ScrollOffset { y: max.y, ..current });
    }

    fn scroll_position(&self) -> ScrollOffset {
        self.registry.offset(self.node)
    }

    fn bounds(&self) -> Rect {
        bounds(self.tree, self.layout, self.node)
    }
}
