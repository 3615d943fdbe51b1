//! ANSI escape sequences for inline terminal updates.
//!
//! Only the primitives the line renderer needs:
//! - Cursor movement and visibility
//! - Line erasing
//! - Synchronized output for flicker-free rendering

use std::io::Write;

// =============================================================================
// Cursor Movement
// =============================================================================

/// Move cursor up by n rows.
#[inline]
pub fn cursor_up<W: Write>(w: &mut W, n: u16) -> std::io::Result<()> {
    if n > 0 {
        write!(w, "\x1b[{}A", n)
    } else {
        Ok(())
    }
}

/// Move cursor to beginning of line.
#[inline]
pub fn cursor_column_zero<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[G")
}

/// Move cursor to next line start. Never scrolls.
#[inline]
pub fn cursor_next_line<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[E")
}

/// Hide cursor.
#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25l")
}

/// Show cursor.
#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25h")
}

// =============================================================================
// Erasing
// =============================================================================

/// Clear entire line.
#[inline]
pub fn erase_line<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[2K")
}

/// Erase `count` lines ending at the cursor row, moving upward.
///
/// The cursor ends at column zero of the topmost erased line. Zero is a
/// no-op.
pub fn erase_lines<W: Write>(w: &mut W, count: u16) -> std::io::Result<()> {
    if count == 0 {
        return Ok(());
    }
    for i in 0..count {
        erase_line(w)?;
        if i + 1 < count {
            cursor_up(w, 1)?;
        }
    }
    cursor_column_zero(w)
}

// =============================================================================
// Synchronized Output (Flicker Prevention)
// =============================================================================

/// Begin synchronized output (terminal buffers until end_sync).
#[inline]
pub fn begin_sync<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?2026h")
}

/// End synchronized output (terminal flushes buffer).
#[inline]
pub fn end_sync<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?2026l")
}

/// Saturating row count for the cursor primitives.
#[inline]
pub(crate) fn rows(n: usize) -> u16 {
    n.min(u16::MAX as usize) as u16
}

// =============================================================================
// Tests
// =============================================================================
