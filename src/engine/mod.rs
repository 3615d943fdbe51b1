//! Engine - the node arena.
//!
//! Nodes are NOT objects with back-references. They are indices into an
//! arena, each carrying its parent index:
//!
//! ```text
//! Index 0: Box  (parent=None, overflow=hidden)
//! Index 1: Text (parent=0,    "hello")
//! Index 2: Box  (parent=0,    position=absolute, z_index=1)
//! ```
//!
//! Ancestor-offset accumulation is an index walk with no ownership cycles.

mod tree;

pub use tree::*;
