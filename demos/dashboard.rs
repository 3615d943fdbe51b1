//! Dashboard Example - Live inline updates
//!
//! Demonstrates the full pipeline:
//! - Building a styled tree (flex row, borders, fills)
//! - A scroll container following the newest log line
//! - An absolute, z-indexed badge over the panels
//! - Incremental rendering: only changed lines are rewritten
//!
//! Run with: cargo run --example dashboard
//! Try: SPARK_RENDER_MODE=standard cargo run --example dashboard

use std::io;
use std::thread;
use std::time::Duration;

use spark_compositor::{
    BorderStyle, Dimension, FlexDirection, Overflow, RendererOptions, Scrollable, Session, Style,
};

const FRAMES: usize = 40;

fn main() -> spark_compositor::Result<()> {
    let options = RendererOptions::from_env();
    let mut session = Session::new(io::stdout(), options);

    let tree = session.tree_mut();
    let root = tree.create_node(
        Style::default()
            .with_width(Dimension::Cells(48))
            .with_height(Dimension::Cells(8))
            .with_direction(FlexDirection::Row),
    );

    let stats = tree.create_node(
        Style::default()
            .with_width(Dimension::Cells(20))
            .with_border(BorderStyle::Rounded),
    );
    let counter = tree.create_text(Style::default(), "");
    let bar = tree.create_text(Style::default(), "");
    tree.append_child(stats, counter);
    tree.append_child(stats, bar);

    let log = tree.create_node(
        Style::default()
            .with_flex_grow(1.0)
            .with_border(BorderStyle::Single)
            .with_overflow_y(Overflow::Scroll),
    );

    let badge = tree.create_text(
        Style::absolute()
            .with_top(0)
            .with_right(2)
            .with_z_index(1)
            .with_fill(' '),
        " live ",
    );

    tree.append_child(root, stats);
    tree.append_child(root, log);
    tree.append_child(root, badge);

    for frame in 0..FRAMES {
        let tree = session.tree_mut();
        tree.set_text(counter, Some(format!("frame {:>3}/{FRAMES}", frame + 1)));
        let filled = (frame + 1) * 16 / FRAMES;
        tree.set_text(bar, Some(format!("{}{}", "#".repeat(filled), ".".repeat(16 - filled))));

        let line = tree.create_text(
            Style {
                flex_shrink: Some(0.0),
                ..Style::default()
            },
            format!("event {frame:>2}: tick"),
        );
        tree.append_child(log, line);

        // Lay out first so the log's extent includes the new line
        session.frame(root)?;
        session.scroll_handle(log).scroll_to_bottom();
        session.render(root)?;

        thread::sleep(Duration::from_millis(80));
    }

    session.finish()
}
