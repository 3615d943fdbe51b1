//! # spark-compositor
//!
//! Terminal compositor and incremental line renderer.
//!
//! Takes a tree of styled boxes and text, composites it into a character
//! frame (flow, absolute positioning, z-index, overflow clipping, scroll
//! viewports) and updates the terminal in place, rewriting only what changed.
//!
//! ## Architecture
//!
//! Nodes live in an arena and are addressed by [`NodeId`]; parents are
//! indices, so ancestor walks never chase owning pointers. Each frame runs
//! straight through:
//! ```text
//! NodeTree → LayoutProvider (taffy) → paint (+ ScrollRegistry) → FrameBuffer → LineRenderer
//! ```
//!
//! Scroll offsets are the only state that survives between frames.
//!
//! ## Modules
//!
//! - [`types`] - Geometry and style (Rect, Position, Overflow, Borders, Style)
//! - [`engine`] - Node arena
//! - [`layout`] - Layout provider contract and the taffy bridge
//! - [`framebuffer`] - Cell grid, clipping, the compositor
//! - [`state`] - Scroll registry and the `Scrollable` capability
//! - [`renderer`] - ANSI primitives and the line renderer
//! - [`pipeline`] - Session wiring everything to one output stream

pub mod engine;
pub mod error;
pub mod framebuffer;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{Error, Result};

pub use engine::{NodeId, NodeRef, NodeTree};

pub use layout::{ComputedLayout, LayoutProvider, compute_layout, measure_text, string_width};

pub use framebuffer::{Cell, ClipRect, FrameBuffer, paint};

pub use state::{
    ScrollHandle, ScrollOffset, ScrollRegistry, ScrollTarget, Scrollable, bounds, content_extent,
    max_scroll,
};

pub use renderer::{LineRenderer, RenderMode, RendererOptions};

pub use pipeline::{Session, terminal_size};
