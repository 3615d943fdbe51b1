//! Taffy Bridge - Integration with Taffy layout engine
//!
//! The Layout Provider used by the pipeline. Converts node styles to Taffy
//! styles, runs flexbox computation, and extracts results into a
//! [`ComputedLayout`].
//!
//! Absolutely positioned nodes are handed to Taffy as absolute with `auto`
//! insets: they stay out of their siblings' flow and Taffy reports their
//! static position and intrinsic size. Offsets are resolved later by the
//! compositor.

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, LengthPercentage, NodeId as TaffyNodeId,
    Overflow as TaffyOverflow, Position as TaffyPosition, Rect as TaffyRect, Size,
    Style as TaffyStyle, TaffyTree,
};

use crate::engine::{NodeId, NodeTree};
use crate::error::Result;
use crate::types::{Dimension, FlexDirection, FlexWrap, Overflow, Position, Rect, Style};

use super::text_measure::measure_text;
use super::types::ComputedLayout;

// =============================================================================
// STYLE CONVERSION
// =============================================================================

fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(n) => TaffyDimension::Length(n as f32),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn to_taffy_flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
        FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
    }
}

fn to_taffy_overflow(overflow: Overflow) -> TaffyOverflow {
    match overflow {
        Overflow::Visible => TaffyOverflow::Visible,
        Overflow::Hidden => TaffyOverflow::Hidden,
        Overflow::Scroll => TaffyOverflow::Scroll,
    }
}

fn to_taffy_position(position: Position) -> TaffyPosition {
    match position {
        Position::Relative => TaffyPosition::Relative,
        Position::Absolute => TaffyPosition::Absolute,
    }
}

fn cells(n: impl Into<f32>) -> LengthPercentage {
    LengthPercentage::Length(n.into())
}

/// Build a Taffy style from a node style.
fn build_style(style: &Style) -> TaffyStyle {
    let (bt, br, bb, bl) = style.borders.thickness();

    TaffyStyle {
        display: Display::Flex,
        position: to_taffy_position(style.position),

        flex_direction: to_taffy_flex_direction(style.flex_direction),
        flex_wrap: to_taffy_flex_wrap(style.flex_wrap),
        flex_grow: style.flex_grow.max(0.0),
        flex_shrink: style.flex_shrink.unwrap_or(1.0).max(0.0),

        size: Size {
            width: to_taffy_dimension(style.width),
            height: to_taffy_dimension(style.height),
        },

        padding: TaffyRect {
            top: cells(style.padding.top),
            right: cells(style.padding.right),
            bottom: cells(style.padding.bottom),
            left: cells(style.padding.left),
        },

        border: TaffyRect {
            top: cells(bt as u16),
            right: cells(br as u16),
            bottom: cells(bb as u16),
            left: cells(bl as u16),
        },

        gap: Size {
            width: cells(style.gap),
            height: cells(style.gap),
        },

        overflow: taffy::Point {
            x: to_taffy_overflow(style.overflow_x()),
            y: to_taffy_overflow(style.overflow_y()),
        },

        ..Default::default()
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute layout for the subtree rooted at `root` using Taffy.
///
/// * `width` - Available width in terminal columns
/// * `height` - Available height in rows; `None` lets content decide
///   (inline output grows with its content)
///
/// Nodes outside the subtree get no geometry.
pub fn compute_layout(
    tree: &NodeTree,
    root: NodeId,
    width: u16,
    height: Option<u16>,
) -> Result<ComputedLayout> {
    let mut result = ComputedLayout::with_capacity(tree.len());
    let order = tree.document_order(root);
    if order.is_empty() {
        return Ok(result);
    }

    let mut taffy: TaffyTree<NodeId> = TaffyTree::new();
    let mut ids: Vec<Option<TaffyNodeId>> = vec![None; tree.len()];

    // First pass: create all nodes (without children)
    for &id in &order {
        let Some(node) = tree.get(id) else { continue };
        let is_text = node.text.is_some();
        let style = build_style(&node.style);
        let taffy_id = if is_text {
            taffy.new_leaf_with_context(style, id)?
        } else {
            taffy.new_leaf(style)?
        };
        ids[id.index()] = Some(taffy_id);
    }

    // Second pass: parent-child relationships, in document order
    for &id in &order {
        let Some(parent) = ids[id.index()] else { continue };
        for child in tree.children(id) {
            if let Some(child) = ids[child.index()] {
                taffy.add_child(parent, child)?;
            }
        }
    }

    let available = Size {
        width: AvailableSpace::Definite(width as f32),
        height: match height {
            Some(h) => AvailableSpace::Definite(h as f32),
            None => AvailableSpace::MaxContent,
        },
    };

    let measure = |known: Size<Option<f32>>,
                   _available: Size<AvailableSpace>,
                   _node: TaffyNodeId,
                   context: Option<&mut NodeId>,
                   _style: &TaffyStyle| {
        let Some(&mut id) = context else {
            return Size::ZERO;
        };
        let text = tree.get(id).and_then(|n| n.text.as_deref()).unwrap_or("");
        let (w, h) = measure_text(text);
        Size {
            width: known.width.unwrap_or(w as f32),
            height: known.height.unwrap_or(h as f32),
        }
    };

    let Some(root_id) = ids[root.index()] else {
        return Ok(result);
    };
    taffy.compute_layout_with_measure(root_id, available, measure)?;

    // Extract results
    for &id in &order {
        let Some(taffy_id) = ids[id.index()] else { continue };
        match taffy.layout(taffy_id) {
            Ok(layout) => result.set(
                id,
                Rect::from_f32(
                    layout.location.x,
                    layout.location.y,
                    layout.size.width,
                    layout.size.height,
                ),
            ),
            Err(err) => tracing::warn!(node = %id, %err, "no layout for node"),
        }
    }

    tracing::trace!(nodes = order.len(), width, ?height, "layout computed");
    Ok(result)
}
