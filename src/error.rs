//! Error types for spark-compositor.
//!
//! Malformed input never errors: missing geometry, negative offsets and
//! out-of-range scroll targets all degrade silently. What remains is I/O on
//! the output sink and failures inside the layout engine.

use thiserror::Error;

/// Errors surfaced by the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error while writing to the output sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The flexbox engine rejected the tree.
    #[error("Layout error: {0}")]
    Layout(#[from] taffy::TaffyError),
}

pub type Result<T> = std::result::Result<T, Error>;
