//! Renderer Module
//!
//! Pushes finished frames (as text) to an output sink, replacing the
//! previous frame in place:
//!
//! - [`ansi`]: the terminal control sequences used
//! - [`OutputBuffer`]: batches one update into a single write
//! - [`UpdateStrategy`]: standard (erase all, rewrite) or incremental
//!   (rewrite changed lines only)
//! - [`LineRenderer`]: owns the previous-frame state and the cursor

pub mod ansi;
mod inline;
mod options;
mod output;
mod strategy;

pub use inline::LineRenderer;
pub use options::{
    ParseRenderModeError, RENDER_MODE_ENV, RenderMode, RendererOptions, SHOW_CURSOR_ENV,
};
pub use output::OutputBuffer;
pub use strategy::{IncrementalUpdate, StandardUpdate, UpdateStrategy, strategy_for};
