//! FrameBuffer Module
//!
//! Turns a laid-out node tree into one frame of character cells.
//!
//! - [`FrameBuffer`]: the cell grid plus clipped drawing primitives
//! - [`paint`]: the compositor (flow, absolute positioning, z-index,
//!   overflow clipping, scroll translation)

mod buffer;
mod compositor;

pub use buffer::{Cell, CellFlags, ClipRect, FrameBuffer};
pub use compositor::{paint, resolve_absolute};
pub(crate) use compositor::{inner_box, place};
