//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells: one finished frame. All drawing
//! goes through a [`ClipRect`]; cells outside `clip ∩ frame` are dropped.
//!
//! # Design Decisions
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing for cache efficiency.
//! - **Signed coordinates**: callers pass `i32` positions, which may be
//!   negative (scrolled or offset out of view). Clamping happens per cell.
//! - **Wide characters**: the trailing half of a 2-cell glyph is a
//!   continuation cell. A glyph that does not fit inside the clip is dropped
//!   whole; overwriting half of a glyph blanks the other half.

use crate::layout::char_width;
use crate::types::{BorderStyle, Borders, Rect};

// =============================================================================
// Cell
// =============================================================================

bitflags::bitflags! {
    /// Per-cell flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u8 {
        const NONE = 0;
        /// Trailing half of a wide glyph; holds no character of its own.
        const CONTINUATION = 1 << 0;
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub flags: CellFlags,
}

impl Cell {
    pub const BLANK: Self = Self {
        ch: ' ',
        flags: CellFlags::NONE,
    };

    const CONTINUATION: Self = Self {
        ch: ' ',
        flags: CellFlags::CONTINUATION,
    };

    #[inline]
    pub fn is_continuation(&self) -> bool {
        self.flags.contains(CellFlags::CONTINUATION)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

// =============================================================================
// ClipRect
// =============================================================================

/// A clipping rectangle in frame coordinates.
///
/// Edges are signed so that boxes scrolled or offset out of view intersect
/// correctly. An empty intersection is `None`, never a zero-sized rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ClipRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Compute intersection of two rects.
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            Some(ClipRect::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1)))
        } else {
            None
        }
    }

    /// Narrow the horizontal extent only.
    pub fn restrict_x(&self, x: i32, width: i32) -> Option<ClipRect> {
        self.intersect(&ClipRect::new(x, self.y, width, self.height))
    }

    /// Narrow the vertical extent only.
    pub fn restrict_y(&self, y: i32, height: i32) -> Option<ClipRect> {
        self.intersect(&ClipRect::new(self.x, y, self.width, height))
    }
}

impl From<Rect> for ClipRect {
    fn from(r: Rect) -> Self {
        Self::new(r.x, r.y, r.width as i32, r.height as i32)
    }
}

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer bounds as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width as i32, self.height as i32)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x as usize, y as usize)])
        } else {
            None
        }
    }

    /// Raw cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Overwrite one in-bounds cell, repairing any wide glyph it splits.
    fn put(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        let old = self.cells[idx];
        if old.is_continuation() {
            if x > 0 {
                self.cells[idx - 1] = Cell::BLANK;
            }
        } else if char_width(old.ch) == 2 && x + 1 < self.width as usize {
            if self.cells[idx + 1].is_continuation() {
                self.cells[idx + 1] = Cell::BLANK;
            }
        }
        self.cells[idx] = cell;
    }

    /// Set a single cell if it lies inside `clip` and the frame.
    ///
    /// Returns true if the cell was set.
    pub fn set_cell(&mut self, x: i32, y: i32, ch: char, clip: &ClipRect) -> bool {
        if !clip.contains(x, y) || !self.in_bounds(x, y) {
            return false;
        }
        self.put(x as usize, y as usize, Cell { ch, flags: CellFlags::NONE });
        true
    }

    /// Draw one line of text starting at `(x, y)`.
    ///
    /// Only the part inside `clip ∩ frame` is written: a run crossing the
    /// boundary keeps exactly its in-bounds prefix or suffix. Returns the
    /// number of cells written.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, clip: &ClipRect) -> usize {
        let Some(clip) = clip.intersect(&self.bounds()) else {
            return 0;
        };
        if y < clip.y || y >= clip.bottom() {
            return 0;
        }

        let mut col = x;
        let mut written = 0;
        for ch in text.chars() {
            if col >= clip.right() {
                break;
            }
            let w = char_width(ch) as i32;
            if w == 0 {
                continue;
            }
            // Whole glyph must fit; never round outward
            if col >= clip.x && col + w <= clip.right() {
                self.put(col as usize, y as usize, Cell { ch, flags: CellFlags::NONE });
                if w == 2 {
                    self.put(col as usize + 1, y as usize, Cell::CONTINUATION);
                }
                written += w as usize;
            }
            col += w;
        }
        written
    }

    /// Fill a rectangle with a character.
    pub fn fill_rect(&mut self, rect: Rect, ch: char, clip: &ClipRect) {
        let Some(area) = ClipRect::from(rect)
            .intersect(clip)
            .and_then(|c| c.intersect(&self.bounds()))
        else {
            return;
        };
        if char_width(ch) != 1 {
            return;
        }
        for row in area.y..area.bottom() {
            for col in area.x..area.right() {
                self.put(col as usize, row as usize, Cell { ch, flags: CellFlags::NONE });
            }
        }
    }

    /// Draw a border on the given sides of `rect`.
    pub fn draw_border(
        &mut self,
        rect: Rect,
        borders: Borders,
        style: BorderStyle,
        clip: &ClipRect,
    ) {
        if rect.is_empty() || borders.is_empty() {
            return;
        }

        let (horiz, vert, tl, tr, br, bl) = style.chars();
        let x1 = rect.x;
        let y1 = rect.y;
        let x2 = rect.right() - 1;
        let y2 = rect.bottom() - 1;

        let top = borders.contains(Borders::TOP);
        let bottom = borders.contains(Borders::BOTTOM);
        let left = borders.contains(Borders::LEFT);
        let right = borders.contains(Borders::RIGHT);

        if top {
            for col in x1..=x2 {
                self.set_cell(col, y1, horiz, clip);
            }
        }
        if bottom {
            for col in x1..=x2 {
                self.set_cell(col, y2, horiz, clip);
            }
        }
        if left {
            for row in y1..=y2 {
                self.set_cell(x1, row, vert, clip);
            }
        }
        if right {
            for row in y1..=y2 {
                self.set_cell(x2, row, vert, clip);
            }
        }

        // Corners only where two sides meet
        if top && left {
            self.set_cell(x1, y1, tl, clip);
        }
        if top && right {
            self.set_cell(x2, y1, tr, clip);
        }
        if bottom && right {
            self.set_cell(x2, y2, br, clip);
        }
        if bottom && left {
            self.set_cell(x1, y2, bl, clip);
        }
    }

    // =========================================================================
    // Text Output
    // =========================================================================

    /// One row as text, trailing whitespace trimmed.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y as usize);
        let row = &self.cells[start..start + self.width as usize];
        let mut line: String = row
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect();
        line.truncate(line.trim_end().len());
        line
    }

    /// Every row as text.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    /// The frame as text: rows joined by `\n`, trailing whitespace trimmed.
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn all(buffer: &FrameBuffer) -> ClipRect {
        buffer.bounds()
    }

    #[test]
    fn test_clip_rect_contains() {
        let clip = ClipRect::new(10, 10, 20, 20);
        assert!(clip.contains(10, 10));
        assert!(clip.contains(29, 29));
        assert!(!clip.contains(9, 10));
        assert!(!clip.contains(30, 10));
    }

    #[test]
    fn test_clip_rect_intersect() {
        let a = ClipRect::new(0, 0, 20, 20);
        let b = ClipRect::new(10, 10, 20, 20);

        let intersect = a.intersect(&b).unwrap();
        assert_eq!(intersect, ClipRect::new(10, 10, 10, 10));

        // Non-overlapping
        let c = ClipRect::new(100, 100, 10, 10);
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn test_clip_rect_negative_origin() {
        let a = ClipRect::new(-5, -5, 10, 10);
        let screen = ClipRect::new(0, 0, 80, 24);
        assert_eq!(a.intersect(&screen), Some(ClipRect::new(0, 0, 5, 5)));
    }

    #[test]
    fn test_clip_rect_per_axis() {
        let base = ClipRect::new(0, 0, 10, 10);
        assert_eq!(base.restrict_x(2, 3), Some(ClipRect::new(2, 0, 3, 10)));
        assert_eq!(base.restrict_y(8, 5), Some(ClipRect::new(0, 8, 10, 2)));
        assert_eq!(base.restrict_x(20, 3), None);
    }

    #[test]
    fn test_framebuffer_creation() {
        let buffer = FrameBuffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.cells().len(), 80 * 24);
    }

    #[test]
    fn test_draw_text() {
        let mut buffer = FrameBuffer::new(20, 5);
        let clip = all(&buffer);
        buffer.draw_text(0, 0, "Hello", &clip);

        assert_eq!(buffer.get(0, 0).unwrap().ch, 'H');
        assert_eq!(buffer.get(4, 0).unwrap().ch, 'o');
        assert_eq!(buffer.row_text(0), "Hello");
    }

    #[test]
    fn test_draw_text_truncates_at_clip() {
        let mut buffer = FrameBuffer::new(10, 1);
        let clip = ClipRect::new(0, 0, 10, 1);
        let written = buffer.draw_text(7, 0, "abcdef", &clip);
        assert_eq!(written, 3);
        assert_eq!(buffer.row_text(0), "       abc");
    }

    #[test]
    fn test_draw_text_negative_start_keeps_suffix() {
        let mut buffer = FrameBuffer::new(10, 1);
        let clip = all(&buffer);
        buffer.draw_text(-2, 0, "abcdef", &clip);
        assert_eq!(buffer.row_text(0), "cdef");
    }

    #[test]
    fn test_draw_text_outside_is_noop() {
        let mut buffer = FrameBuffer::new(4, 2);
        let clip = all(&buffer);
        assert_eq!(buffer.draw_text(0, -1, "abc", &clip), 0);
        assert_eq!(buffer.draw_text(0, 5, "abc", &clip), 0);
        assert_eq!(buffer.draw_text(-10, 0, "abc", &clip), 0);
        assert_eq!(buffer.to_text(), "\n");
    }

    #[test]
    fn test_wide_glyph_dropped_at_boundary() {
        let mut buffer = FrameBuffer::new(5, 1);
        let clip = ClipRect::new(0, 0, 4, 1);
        // 'ab' + '中' would need columns 3 and 4; column 4 is clipped
        buffer.draw_text(1, 0, "ab中", &clip);
        assert_eq!(buffer.row_text(0), " ab");
    }

    #[test]
    fn test_overwrite_half_of_wide_glyph() {
        let mut buffer = FrameBuffer::new(6, 1);
        let clip = all(&buffer);
        buffer.draw_text(0, 0, "中文", &clip);
        assert_eq!(buffer.row_text(0), "中文");

        // Overwrite the trailing half of '中'
        buffer.draw_text(1, 0, "x", &clip);
        assert_eq!(buffer.row_text(0), " x文");

        // Overwrite the leading half of '文'
        buffer.draw_text(2, 0, "y", &clip);
        assert_eq!(buffer.row_text(0), " xy");
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut buffer = FrameBuffer::new(6, 3);
        let clip = ClipRect::new(0, 0, 4, 2);
        buffer.fill_rect(Rect::new(2, 1, 10, 10), '#', &clip);
        assert_eq!(buffer.to_text(), "\n  ##\n");
    }

    #[test]
    fn test_draw_border() {
        let mut buffer = FrameBuffer::new(4, 3);
        let clip = all(&buffer);
        buffer.draw_border(Rect::new(0, 0, 4, 3), Borders::ALL, BorderStyle::Ascii, &clip);
        assert_eq!(buffer.to_text(), "+--+\n|  |\n+--+");
    }

    #[test]
    fn test_to_text_trims_trailing_whitespace() {
        let mut buffer = FrameBuffer::new(8, 2);
        let clip = all(&buffer);
        buffer.draw_text(0, 1, "hi  ", &clip);
        assert_eq!(buffer.lines(), vec!["".to_string(), "hi".to_string()]);
    }
}
