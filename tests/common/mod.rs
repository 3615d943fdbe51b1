//! Virtual terminal for integration tests.
//!
//! Interprets exactly the control sequences the renderer emits and keeps a
//! growable grid of rows, like a terminal's normal buffer with scrollback.
//! `ESC[E` never creates a row (a real terminal does not scroll on it at the
//! bottom margin), while `\n` on the last row appends one.

#![allow(dead_code)]

use std::io::{self, Write};

use spark_compositor::layout::char_width;

/// Placeholder for the trailing half of a wide glyph.
const WIDE_TAIL: char = '\0';

#[derive(Debug)]
pub struct VirtualTerminal {
    rows: Vec<Vec<char>>,
    row: usize,
    col: usize,
    pub cursor_visible: bool,
    /// Number of `write` calls received.
    pub writes: usize,
    pending: Vec<u8>,
}

impl Default for VirtualTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualTerminal {
    pub fn new() -> Self {
        Self {
            rows: vec![Vec::new()],
            row: 0,
            col: 0,
            cursor_visible: true,
            writes: 0,
            pending: Vec::new(),
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Visible text: rows with trailing whitespace trimmed, trailing empty
    /// rows dropped.
    pub fn text(&self) -> String {
        normalize(
            &self
                .rows
                .iter()
                .map(|r| r.iter().filter(|&&c| c != WIDE_TAIL).collect::<String>())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    fn feed(&mut self, input: &str) {
        let mut chars = input.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\x1b' => {
                    if chars.next_if_eq(&'[').is_none() {
                        panic!("unsupported escape sequence");
                    }
                    let mut params = String::new();
                    let mut fin = None;
                    for c in chars.by_ref() {
                        if c.is_ascii_alphabetic() {
                            fin = Some(c);
                            break;
                        }
                        params.push(c);
                    }
                    self.csi(&params, fin.expect("unterminated CSI"));
                }
                '\n' => {
                    self.row += 1;
                    if self.row == self.rows.len() {
                        self.rows.push(Vec::new());
                    }
                    self.col = 0;
                }
                '\r' => self.col = 0,
                c => self.print(c),
            }
        }
    }

    fn csi(&mut self, params: &str, fin: char) {
        let n = || params.parse::<usize>().unwrap_or(1).max(1);
        match (params, fin) {
            ("?25", 'l') => self.cursor_visible = false,
            ("?25", 'h') => self.cursor_visible = true,
            ("?2026", 'h' | 'l') => {}
            (_, 'A') => self.row = self.row.saturating_sub(n()),
            (_, 'B') => self.row = (self.row + n()).min(self.rows.len() - 1),
            (_, 'G') => self.col = n() - 1,
            (_, 'E') => {
                self.row = (self.row + n()).min(self.rows.len() - 1);
                self.col = 0;
            }
            ("2", 'K') => self.rows[self.row].clear(),
            ("" | "0", 'K') => self.rows[self.row].truncate(self.col),
            ("" | "0", 'J') => {
                self.rows[self.row].truncate(self.col);
                self.rows.truncate(self.row + 1);
            }
            _ => panic!("unsupported CSI {params:?} {fin:?}"),
        }
    }

    fn print(&mut self, ch: char) {
        let width = char_width(ch);
        if width == 0 {
            return;
        }
        let line = &mut self.rows[self.row];
        if line.len() < self.col + width {
            line.resize(self.col + width, ' ');
        }
        line[self.col] = ch;
        if width == 2 {
            line[self.col + 1] = WIDE_TAIL;
        }
        self.col += width;
    }
}

impl Write for VirtualTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        self.pending.extend_from_slice(buf);
        // Only feed complete UTF-8; keep a split code point for the next call
        let valid = match std::str::from_utf8(&self.pending) {
            Ok(s) => s.len(),
            Err(e) => e.valid_up_to(),
        };
        let text = String::from_utf8_lossy(&self.pending[..valid]).into_owned();
        self.pending.drain(..valid);
        self.feed(&text);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Trim trailing whitespace per row and drop trailing empty rows.
pub fn normalize(text: &str) -> String {
    let rows: Vec<&str> = text.split('\n').map(str::trim_end).collect();
    let keep = rows.iter().rposition(|r| !r.is_empty()).map_or(0, |i| i + 1);
    rows[..keep].join("\n")
}
