//! Text Measurement
//!
//! Display width of text in terminal cells, backed by `unicode-width`:
//! - ASCII printable: 1 cell
//! - CJK, most emoji: 2 cells
//! - Control and zero-width characters: 0 cells
//!
//! Text payloads arrive already wrapped; a payload's extent is its widest
//! line by its line count.

use unicode_width::UnicodeWidthChar;

/// Display width of one character.
#[inline]
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display width of a single line.
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Extent of a (possibly multi-line) text payload as `(width, height)`.
///
/// Empty text measures `(0, 0)`.
pub fn measure_text(text: &str) -> (u16, u16) {
    if text.is_empty() {
        return (0, 0);
    }
    let mut width = 0usize;
    let mut height = 0usize;
    for line in text.split('\n') {
        width = width.max(string_width(line));
        height += 1;
    }
    (clamp_u16(width), clamp_u16(height))
}

#[inline]
fn clamp_u16(v: usize) -> u16 {
    v.min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_width() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width(' '), 1);
        assert_eq!(char_width('\n'), 0);
        assert_eq!(char_width('中'), 2);
    }

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width("中文"), 4);
        assert_eq!(string_width("a中b"), 4);
        assert_eq!(string_width(""), 0);
    }

    #[test]
    fn test_measure_text() {
        assert_eq!(measure_text(""), (0, 0));
        assert_eq!(measure_text("abc"), (3, 1));
        assert_eq!(measure_text("ab\nlonger\nx"), (6, 3));
        assert_eq!(measure_text("中\n"), (2, 2));
    }
}
