//! Render session: one tree, one output stream, frame after frame.
//!
//! ```text
//! NodeTree ──► compute_layout (taffy) ──► ComputedLayout
//!                                              │
//! ScrollRegistry ◄── sync_with ────────────────┤
//!       │                                      ▼
//!       └────────────────────────────────► paint ──► FrameBuffer ──► LineRenderer
//! ```
//!
//! Frames are strictly serialized through `&mut self`. Scroll operations go
//! through [`Session::scroll_handle`] between frames and only mark the
//! session stale; nothing is written until the next [`Session::render`].

use std::io::Write;

use crate::engine::{NodeId, NodeTree};
use crate::error::Result;
use crate::framebuffer::{FrameBuffer, paint};
use crate::layout::{ComputedLayout, compute_layout};
use crate::renderer::{LineRenderer, RendererOptions};
use crate::state::{ScrollHandle, ScrollRegistry};

use super::terminal::terminal_width;

/// What the last paint was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    revision: u64,
    scroll_version: u64,
    width: u16,
    height: Option<u16>,
}

/// Owns everything that lives longer than one frame.
pub struct Session<W: Write> {
    tree: NodeTree,
    layout: ComputedLayout,
    scroll: ScrollRegistry,
    renderer: LineRenderer<W>,
    width: u16,
    height: Option<u16>,
    painted: Option<Stamp>,
}

impl<W: Write> Session<W> {
    /// A session as wide as the terminal, growing with its content.
    pub fn new(sink: W, options: RendererOptions) -> Self {
        Self::with_viewport(sink, options, terminal_width(), None)
    }

    /// A session with an explicit viewport. `height: None` lets content
    /// decide the frame height.
    pub fn with_viewport(
        sink: W,
        options: RendererOptions,
        width: u16,
        height: Option<u16>,
    ) -> Self {
        Self {
            tree: NodeTree::new(),
            layout: ComputedLayout::new(),
            scroll: ScrollRegistry::new(),
            renderer: LineRenderer::with_options(sink, options),
            width,
            height,
            painted: None,
        }
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }

    /// Geometry from the last frame.
    pub fn layout(&self) -> &ComputedLayout {
        &self.layout
    }

    pub fn scroll(&self) -> &ScrollRegistry {
        &self.scroll
    }

    pub fn renderer(&self) -> &LineRenderer<W> {
        &self.renderer
    }

    pub fn viewport(&self) -> (u16, Option<u16>) {
        (self.width, self.height)
    }

    pub fn set_viewport(&mut self, width: u16, height: Option<u16>) {
        self.width = width;
        self.height = height;
    }

    fn stamp(&self) -> Stamp {
        Stamp {
            revision: self.tree.revision(),
            scroll_version: self.scroll.version(),
            width: self.width,
            height: self.height,
        }
    }

    /// Whether the next frame could differ from the last one painted.
    pub fn is_stale(&self) -> bool {
        self.painted != Some(self.stamp())
    }

    /// Lay out, sync scroll state and paint the subtree at `root`.
    pub fn frame(&mut self, root: NodeId) -> Result<FrameBuffer> {
        self.layout = compute_layout(&self.tree, root, self.width, self.height)?;
        self.scroll.sync_with(&self.tree, root);
        let frame = paint(&self.tree, root, &self.layout, &self.scroll);
        self.painted = Some(self.stamp());
        Ok(frame)
    }

    /// Paint a frame and push it to the output.
    pub fn render(&mut self, root: NodeId) -> Result<()> {
        let frame = self.frame(root)?;
        self.renderer.render(&frame.to_text())?;
        Ok(())
    }

    /// Scroll capability for a node, against the last frame's geometry.
    pub fn scroll_handle(&mut self, node: NodeId) -> ScrollHandle<'_> {
        ScrollHandle::new(node, &self.tree, &self.layout, &mut self.scroll)
    }

    /// Record output written by someone else as already on screen.
    pub fn sync(&mut self, text: &str) {
        self.renderer.sync(text);
    }

    /// Erase the rendered block.
    pub fn clear(&mut self) -> Result<()> {
        self.renderer.clear()?;
        Ok(())
    }

    /// Leave the last frame on screen and restore the terminal.
    pub fn finish(&mut self) -> Result<()> {
        self.renderer.done()?;
        Ok(())
    }

    /// Give back the output sink.
    pub fn into_inner(self) -> W {
        self.renderer.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ScrollTarget, Scrollable};
    use crate::types::{Dimension, Overflow, Style};

    fn session() -> Session<Vec<u8>> {
        Session::with_viewport(Vec::new(), RendererOptions::default(), 20, None)
    }

    #[test]
    fn test_frame_uses_layout() {
        let mut session = session();
        let tree = session.tree_mut();
        let root = tree.create_node(Style::default().with_width(Dimension::Cells(10)));
        let text = tree.create_text(Style::default(), "hi");
        tree.append_child(root, text);

        let frame = session.frame(root).unwrap();
        assert_eq!(frame.width(), 10);
        assert_eq!(frame.to_text(), "hi");
    }

    #[test]
    fn test_staleness() {
        let mut session = session();
        let root = session.tree_mut().create_node(Style::default().with_size(4, 2));
        assert!(session.is_stale());

        session.frame(root).unwrap();
        assert!(!session.is_stale());

        session.tree_mut().set_style(root, Style::default().with_size(5, 2));
        assert!(session.is_stale());

        session.frame(root).unwrap();
        session.set_viewport(30, None);
        assert!(session.is_stale());
    }

    #[test]
    fn test_scroll_marks_stale() {
        let mut session = session();
        let tree = session.tree_mut();
        let root = tree.create_node(Style::default().with_size(4, 2));
        let list = tree.create_node(
            Style::default()
                .with_size(4, 2)
                .with_overflow_y(Overflow::Scroll),
        );
        let text = tree.create_text(
            Style {
                flex_shrink: Some(0.0),
                ..Style::default()
            },
            "1\n2\n3\n4",
        );
        tree.append_child(root, list);
        tree.append_child(list, text);

        assert_eq!(session.frame(root).unwrap().to_text(), "1\n2");

        session.scroll_handle(list).scroll_to(ScrollTarget::y(2.0));
        assert!(session.is_stale());
        assert_eq!(session.frame(root).unwrap().to_text(), "3\n4");
    }

    #[test]
    fn test_render_and_finish() {
        let mut session = session();
        let tree = session.tree_mut();
        let root = tree.create_node(Style::default().with_width(Dimension::Cells(5)));
        let text = tree.create_text(Style::default(), "ok");
        tree.append_child(root, text);

        session.render(root).unwrap();
        assert_eq!(session.renderer().previous_output(), "ok");

        session.finish().unwrap();
        let out = String::from_utf8(session.into_inner()).unwrap();
        assert!(out.contains("ok"));
        assert!(out.ends_with("\n\x1b[?25h"));
    }
}
