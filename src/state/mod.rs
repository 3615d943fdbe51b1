//! State Module - Runtime state that outlives a single frame
//!
//! - **Scroll** - Per-container offsets, scroll bounds, the [`Scrollable`] capability

mod scroll;

pub use scroll::*;
