//! Layout Module
//!
//! The Layout Provider: node + style → parent-relative geometry.
//!
//! The compositor only depends on the [`LayoutProvider`] trait. The pipeline
//! plugs in [Taffy](https://github.com/DioxusLabs/taffy) for flexbox flow:
//!
//! 1. Converts node styles → Taffy styles
//! 2. Builds the Taffy tree from the arena
//! 3. Measures text leaves for intrinsic sizing
//! 4. Extracts computed geometry into a [`ComputedLayout`]

mod taffy_bridge;
mod text_measure;
mod types;

pub use taffy_bridge::compute_layout;
pub use text_measure::*;
pub use types::*;
