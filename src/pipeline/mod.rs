//! Pipeline Module - Wires the stages together
//!
//! - [`Session`]: tree + layout + scroll state + renderer for one output stream
//! - [`terminal`]: terminal size detection

mod session;
pub mod terminal;

pub use session::Session;
pub use terminal::{FALLBACK_SIZE, terminal_size, terminal_width};
