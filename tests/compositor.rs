//! Compositing scenarios through the full pipeline (taffy layout included).

use pretty_assertions::assert_eq;
use spark_compositor::{
    BorderStyle, ComputedLayout, Dimension, FlexDirection, NodeId, NodeTree, Overflow, Rect,
    RendererOptions, ScrollRegistry, ScrollTarget, Scrollable, Session, Style, paint,
};

fn session(width: u16) -> Session<Vec<u8>> {
    Session::with_viewport(Vec::new(), RendererOptions::default(), width, None)
}

/// Root of `width × height` with one absolutely positioned text child.
fn single_absolute(width: u16, height: u16, root: Style, child: Style, text: &str) -> String {
    let mut s = session(80);
    let tree = s.tree_mut();
    let r = tree.create_node(root.with_size(width, height));
    let t = tree.create_text(child, text);
    tree.append_child(r, t);
    s.frame(r).unwrap().to_text()
}

fn rows(frame: &str) -> Vec<&str> {
    frame.split('\n').collect()
}

#[test]
fn test_absolute_top_places_row() {
    let frame = single_absolute(10, 5, Style::default(), Style::absolute().with_top(2), "X");
    assert_eq!(rows(&frame), vec!["", "", "X", "", ""]);
}

#[test]
fn test_absolute_right_ends_row() {
    let frame = single_absolute(10, 3, Style::default(), Style::absolute().with_right(0), "end");
    assert_eq!(rows(&frame)[0], "       end");
    assert!(rows(&frame)[0].ends_with("end"));
}

#[test]
fn test_overflow_hidden_cuts_at_boundary() {
    let frame = single_absolute(
        10,
        3,
        Style::default().with_overflow(Overflow::Hidden),
        Style::absolute().with_left(7),
        "abcdef",
    );
    assert_eq!(rows(&frame)[0], "       abc");
    assert!(!frame.contains("abcdef"));
}

#[test]
fn test_wide_glyph_at_clip_edge_is_dropped() {
    let frame = single_absolute(
        4,
        1,
        Style::default().with_overflow(Overflow::Hidden),
        Style::absolute().with_left(1),
        "ab中",
    );
    assert_eq!(frame, " ab");
}

#[test]
fn test_negative_offsets_inside_hidden_ancestor() {
    let frame = single_absolute(
        6,
        2,
        Style::default().with_overflow(Overflow::Hidden),
        Style::absolute().with_left(-3).with_top(-1),
        "hidden\nvisible",
    );
    assert_eq!(rows(&frame), vec!["ible", ""]);
}

#[test]
fn test_stacking_order() {
    let mut s = session(80);
    let tree = s.tree_mut();
    let root = tree.create_node(Style::default().with_size(8, 1));
    let high = tree.create_text(Style::absolute().with_z_index(2), "HIGH");
    let mid_a = tree.create_text(Style::absolute().with_left(2).with_z_index(1), "aaaa");
    let mid_b = tree.create_text(Style::absolute().with_left(3).with_z_index(1), "bbbb");
    let flow = tree.create_text(Style::default(), "........");
    for child in [high, mid_a, mid_b, flow] {
        tree.append_child(root, child);
    }

    // z=2 over z=1; among z=1 the later sibling wins; flow lies underneath
    assert_eq!(s.frame(root).unwrap().to_text(), "HIGHbbb.");
}

#[test]
fn test_flex_row_with_borders() {
    let mut s = session(80);
    let tree = s.tree_mut();
    let root = tree.create_node(
        Style::default()
            .with_size(12, 3)
            .with_direction(FlexDirection::Row),
    );
    let left = tree.create_node(
        Style::default()
            .with_width(Dimension::Cells(6))
            .with_border(BorderStyle::Ascii),
    );
    let right = tree.create_node(
        Style::default()
            .with_flex_grow(1.0)
            .with_border(BorderStyle::Ascii),
    );
    let l_text = tree.create_text(Style::default(), "L");
    let r_text = tree.create_text(Style::default(), "R");
    tree.append_child(root, left);
    tree.append_child(root, right);
    tree.append_child(left, l_text);
    tree.append_child(right, r_text);

    let frame = s.frame(root).unwrap().to_text();
    assert_eq!(rows(&frame), vec!["+----++----+", "|L   ||R   |", "+----++----+"]);
}

#[test]
fn test_scroll_viewport() {
    let mut s = session(80);
    let tree = s.tree_mut();
    let root = tree.create_node(Style::default().with_size(6, 4));
    let list = tree.create_node(
        Style::default()
            .with_size(6, 4)
            .with_border(BorderStyle::Ascii)
            .with_overflow_y(Overflow::Scroll),
    );
    tree.append_child(root, list);
    let items: Vec<NodeId> = (1..=5)
        .map(|i| {
            tree.create_text(
                Style {
                    flex_shrink: Some(0.0),
                    ..Style::default()
                },
                format!("row{i}"),
            )
        })
        .collect();
    for &item in &items {
        tree.append_child(list, item);
    }

    let frame = s.frame(root).unwrap().to_text();
    assert_eq!(rows(&frame), vec!["+----+", "|row1|", "|row2|", "+----+"]);

    // Five rows of content in a two-row viewport
    let mut handle = s.scroll_handle(list);
    assert_eq!(handle.max_scroll().y, 3);
    handle.scroll_to(ScrollTarget::y(99.0));
    assert_eq!(handle.scroll_position().y, 3);

    let bounds = s.scroll_handle(items[0]).bounds();
    assert_eq!((bounds.x, bounds.y), (1, 1));

    assert!(s.is_stale());
    let frame = s.frame(root).unwrap().to_text();
    assert_eq!(rows(&frame), vec!["+----+", "|row4|", "|row5|", "+----+"]);
    assert_eq!(s.scroll().offset(list).y, 3);
}

#[test]
fn test_scroll_moves_absolute_children() {
    let mut tree = NodeTree::new();
    let root = tree.create_node(Style::default().with_overflow(Overflow::Scroll));
    let marker = tree.create_text(Style::absolute().with_top(3), "M");
    tree.append_child(root, marker);

    let mut layout = ComputedLayout::new();
    layout.set(root, Rect::new(0, 0, 3, 2));
    layout.set(marker, Rect::new(0, 0, 1, 1));

    let mut scroll = ScrollRegistry::new();
    scroll.sync_with(&tree, root);
    assert_eq!(paint(&tree, root, &layout, &scroll).to_text(), "\n");

    spark_compositor::ScrollHandle::new(root, &tree, &layout, &mut scroll).scroll_to_bottom();
    assert_eq!(scroll.offset(root).y, 2);
    assert_eq!(paint(&tree, root, &layout, &scroll).to_text(), "\nM");
}

#[test]
fn test_render_to_output() {
    let mut s = session(10);
    let tree = s.tree_mut();
    let root = tree.create_node(Style::default());
    let text = tree.create_text(Style::default(), "hello");
    tree.append_child(root, text);

    s.render(root).unwrap();
    s.tree_mut().set_text(text, Some("world".into()));
    s.render(root).unwrap();
    s.finish().unwrap();

    let out = String::from_utf8(s.into_inner()).unwrap();
    assert!(out.contains("hello"));
    assert!(out.contains("\x1b[2Kworld"));
}
