//! Update strategies: how to turn the previous block into the next one.
//!
//! Both strategies assume the same cursor model. After a frame is written
//! the cursor rests on the last row of the block, and the block is exactly
//! `lines.len()` rows tall. Each strategy must leave the cursor in that same
//! position for the next frame.

use std::io;

use super::ansi::{self, rows};
use super::options::RenderMode;
use super::output::OutputBuffer;

/// One way of replacing the previous frame with the next.
pub trait UpdateStrategy {
    /// Queue the sequence that turns `previous` (lines on screen, empty when
    /// nothing is rendered) into `next`.
    fn update(&self, out: &mut OutputBuffer, previous: &[String], next: &str) -> io::Result<()>;
}

/// Strategy for a render mode.
pub fn strategy_for(mode: RenderMode) -> Box<dyn UpdateStrategy> {
    match mode {
        RenderMode::Standard => Box::new(StandardUpdate),
        RenderMode::Incremental => Box::new(IncrementalUpdate),
    }
}

/// Erase the whole previous block, write the new one.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardUpdate;

impl UpdateStrategy for StandardUpdate {
    fn update(&self, out: &mut OutputBuffer, previous: &[String], next: &str) -> io::Result<()> {
        ansi::erase_lines(out, rows(previous.len()))?;
        out.write_str(next);
        Ok(())
    }
}

/// Rewrite only the lines that differ.
///
/// Unchanged lines are stepped over without erasing. A real newline is only
/// emitted after a rewritten line or to reach a row the previous block never
/// had, so the terminal scrolls exactly when the block grows.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalUpdate;

impl UpdateStrategy for IncrementalUpdate {
    fn update(&self, out: &mut OutputBuffer, previous: &[String], next: &str) -> io::Result<()> {
        if is_blank(previous) || next.is_empty() {
            return StandardUpdate.update(out, previous, next);
        }

        let next_lines: Vec<&str> = next.split('\n').collect();
        let prev_count = previous.len();
        let next_count = next_lines.len();

        // Move to column zero of the block's first row
        if next_count < prev_count {
            ansi::erase_lines(out, rows(prev_count - next_count))?;
            ansi::cursor_up(out, rows(next_count))?;
        } else {
            ansi::cursor_up(out, rows(prev_count - 1))?;
        }
        ansi::cursor_column_zero(out)?;

        let last = next_count - 1;
        for (i, line) in next_lines.iter().enumerate() {
            let unchanged = previous.get(i).is_some_and(|p| p == line);
            if unchanged {
                if i < last {
                    if i + 1 < prev_count {
                        ansi::cursor_next_line(out)?;
                    } else {
                        out.write_str("\n");
                    }
                }
                continue;
            }

            ansi::erase_line(out)?;
            out.write_str(line);
            if i < last {
                out.write_str("\n");
            }
        }
        Ok(())
    }
}

/// Nothing on screen, or an empty frame.
fn is_blank(lines: &[String]) -> bool {
    match lines {
        [] => true,
        [only] => only.is_empty(),
        _ => false,
    }
}
