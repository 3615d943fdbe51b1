//! Compositor - node tree + geometry → FrameBuffer
//!
//! Two phases:
//!
//! 1. **Collect**: walk the tree in document order, resolve every node's
//!    frame position (flow offsets, absolute offsets, scroll translation) and
//!    its active clip, and record one paint entry per fill, border and text.
//! 2. **Paint**: stable-sort entries by layer and write them in order. Normal
//!    flow is one layer at the bottom; each absolute node opens its own layer
//!    keyed by `(z_index, document order)`. Later writes win.
//!
//! Positions are signed all the way down. Anything that lands outside the
//! active clip or the frame is dropped cell by cell in the FrameBuffer.

use crate::engine::{Node, NodeId, NodeTree};
use crate::layout::LayoutProvider;
use crate::state::{ScrollOffset, ScrollRegistry};
use crate::types::{BorderStyle, Borders, Rect, Style};

use super::buffer::{ClipRect, FrameBuffer};

// =============================================================================
// Paint entries
// =============================================================================

/// Stacking layer. Flow sorts below every positioned layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    Flow,
    Positioned { z: i32, order: usize },
}

#[derive(Debug, Clone, Copy)]
enum PaintContent<'a> {
    Fill(char),
    Border(Borders, BorderStyle),
    /// Text drawn from the given origin, one row per line.
    Text { x: i32, y: i32, text: &'a str },
}

#[derive(Debug, Clone, Copy)]
struct PaintEntry<'a> {
    layer: Layer,
    rect: Rect,
    clip: ClipRect,
    content: PaintContent<'a>,
}

impl PaintEntry<'_> {
    fn paint(&self, buffer: &mut FrameBuffer) {
        match self.content {
            PaintContent::Fill(ch) => buffer.fill_rect(self.rect, ch, &self.clip),
            PaintContent::Border(borders, style) => {
                buffer.draw_border(self.rect, borders, style, &self.clip)
            }
            PaintContent::Text { x, y, text } => {
                for (row, line) in text.split('\n').enumerate() {
                    buffer.draw_text(x, y.saturating_add(row as i32), line, &self.clip);
                }
            }
        }
    }
}

// =============================================================================
// Positioning helpers
// =============================================================================

/// Resolve an absolute node's origin against its containing block.
///
/// `geometry` is the node's parent-relative layout result; `block` is the
/// containing block in the coordinate space the result is returned in. The
/// start edge (`left`/`top`) wins when both edges are set; with neither, the
/// provider's static position is kept.
pub fn resolve_absolute(style: &Style, geometry: Rect, block: Rect) -> (i32, i32) {
    let x = match (style.left, style.right) {
        (Some(left), _) => block.x.saturating_add(left),
        (None, Some(right)) => block
            .right()
            .saturating_sub(right)
            .saturating_sub(geometry.width as i32),
        (None, None) => block.x.saturating_add(geometry.x),
    };
    let y = match (style.top, style.bottom) {
        (Some(top), _) => block.y.saturating_add(top),
        (None, Some(bottom)) => block
            .bottom()
            .saturating_sub(bottom)
            .saturating_sub(geometry.height as i32),
        (None, None) => block.y.saturating_add(geometry.y),
    };
    (x, y)
}

/// Origin of a node inside `block`: resolved offsets for absolute nodes, the
/// provider's position otherwise.
pub(crate) fn place(style: &Style, geometry: Rect, block: Rect) -> (i32, i32) {
    if style.is_absolute() {
        resolve_absolute(style, geometry, block)
    } else {
        (
            block.x.saturating_add(geometry.x),
            block.y.saturating_add(geometry.y),
        )
    }
}

/// The box inside a node's borders. May be empty or negative in size.
pub(crate) fn inner_box(rect: Rect, borders: Borders) -> ClipRect {
    let (top, right, bottom, left) = borders.thickness();
    ClipRect::new(
        rect.x.saturating_add(left),
        rect.y.saturating_add(top),
        rect.width as i32 - left - right,
        rect.height as i32 - top - bottom,
    )
}

// =============================================================================
// Collection
// =============================================================================

/// Inherited state for one level of the walk.
#[derive(Debug, Clone, Copy)]
struct Context {
    /// Nearest ancestor box with geometry, in frame coordinates.
    block: Rect,
    /// Translation applied to the block's children.
    scroll: ScrollOffset,
    clip: ClipRect,
    layer: Layer,
}

struct Collector<'a, L: ?Sized> {
    tree: &'a NodeTree,
    layout: &'a L,
    scroll: &'a ScrollRegistry,
    entries: Vec<PaintEntry<'a>>,
    order: usize,
    positioned: usize,
}

impl<'a, L: LayoutProvider + ?Sized> Collector<'a, L> {
    fn visit(&mut self, id: NodeId, ctx: Context) {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            return;
        };
        let order = self.order;
        self.order += 1;

        let style = &node.style;
        let layer = if style.is_absolute() {
            self.positioned += 1;
            Layer::Positioned {
                z: style.z_index(),
                order,
            }
        } else {
            ctx.layer
        };

        let mut child_ctx = Context { layer, ..ctx };

        // Without geometry the node paints nothing and adds no offset; its
        // children still resolve against the enclosing block.
        if let Some(geometry) = self.layout.geometry(id) {
            let (x, y) = place(style, geometry, ctx.block);
            let rect = geometry.at(
                x.saturating_sub(ctx.scroll.x),
                y.saturating_sub(ctx.scroll.y),
            );
            self.emit(node, rect, ctx.clip, layer);

            let Some(clip) = child_clip(style, rect, ctx.clip) else {
                return;
            };
            child_ctx.block = rect;
            child_ctx.clip = clip;
            child_ctx.scroll = if style.is_scroll_container() {
                self.scroll.offset(id)
            } else {
                ScrollOffset::ZERO
            };
        }

        for &child in node.children() {
            self.visit(child, child_ctx);
        }
    }

    fn emit(&mut self, node: &'a Node, rect: Rect, clip: ClipRect, layer: Layer) {
        if rect.is_empty() {
            return;
        }
        let style = &node.style;
        let mut push = |content| {
            self.entries.push(PaintEntry {
                layer,
                rect,
                clip,
                content,
            })
        };

        if let Some(ch) = style.fill {
            push(PaintContent::Fill(ch));
        }
        if !style.borders.is_empty() {
            push(PaintContent::Border(style.borders, style.border_style));
        }
        if let Some(text) = node.text.as_deref() {
            let (top, _, _, left) = style.borders.thickness();
            push(PaintContent::Text {
                x: rect.x.saturating_add(left + style.padding.left as i32),
                y: rect.y.saturating_add(top + style.padding.top as i32),
                text,
            });
        }
    }
}

/// Clip for a node's children: the inherited clip narrowed to the node's
/// inner box on every axis that clips. Scroll containers clip both axes.
fn child_clip(style: &Style, rect: Rect, clip: ClipRect) -> Option<ClipRect> {
    let inner = inner_box(rect, style.borders);
    let scrolls = style.is_scroll_container();

    let mut clip = Some(clip);
    if scrolls || style.overflow_x().clips() {
        clip = clip.and_then(|c| c.restrict_x(inner.x, inner.width));
    }
    if scrolls || style.overflow_y().clips() {
        clip = clip.and_then(|c| c.restrict_y(inner.y, inner.height));
    }
    clip
}

// =============================================================================
// Entry point
// =============================================================================

/// Composite the subtree at `root` into a frame of the root's size.
///
/// The root is painted at the frame origin. A root without geometry yields
/// an empty 0×0 frame.
pub fn paint<L>(tree: &NodeTree, root: NodeId, layout: &L, scroll: &ScrollRegistry) -> FrameBuffer
where
    L: LayoutProvider + ?Sized,
{
    let Some(root_rect) = layout.geometry(root) else {
        tracing::trace!(%root, "root has no geometry");
        return FrameBuffer::new(0, 0);
    };

    let mut buffer = FrameBuffer::new(root_rect.width, root_rect.height);
    let ctx = Context {
        // Offset so the root lands on (0, 0)
        block: root_rect.at(root_rect.x.saturating_neg(), root_rect.y.saturating_neg()),
        scroll: ScrollOffset::ZERO,
        clip: buffer.bounds(),
        layer: Layer::Flow,
    };

    let mut collector = Collector {
        tree,
        layout,
        scroll,
        entries: Vec::new(),
        order: 0,
        positioned: 0,
    };
    collector.visit(root, ctx);

    let mut entries = collector.entries;
    // Stable: entries within one layer keep document order
    entries.sort_by_key(|e| e.layer);
    for entry in &entries {
        entry.paint(&mut buffer);
    }

    tracing::trace!(
        nodes = collector.order,
        positioned = collector.positioned,
        entries = entries.len(),
        width = buffer.width(),
        height = buffer.height(),
        "frame painted"
    );
    buffer
}
