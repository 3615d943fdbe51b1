//! Inline line renderer.
//!
//! Writes frames to the normal terminal buffer (not the alternate screen),
//! replacing the previously written block in place. The block keeps the
//! terminal's scrollback intact, which suits CLI tools that show updating
//! content under a prompt.
//!
//! The renderer is the sole writer of its block. Anything else that writes
//! to the same stream must be announced through [`LineRenderer::sync`], or
//! the cached previous frame drifts from the screen and the next update
//! lands on the wrong rows.

use std::io::{self, Write};

use super::ansi;
use super::options::{RenderMode, RendererOptions};
use super::output::OutputBuffer;
use super::strategy::{UpdateStrategy, strategy_for};

/// Inline renderer over any output sink.
pub struct LineRenderer<W: Write> {
    sink: W,
    output: OutputBuffer,
    strategy: Box<dyn UpdateStrategy>,
    options: RendererOptions,
    previous_output: String,
    previous_lines: Vec<String>,
    cursor_hidden: bool,
}

impl<W: Write> LineRenderer<W> {
    /// Create a renderer with default options (incremental, cursor hidden).
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, RendererOptions::default())
    }

    pub fn with_options(sink: W, options: RendererOptions) -> Self {
        Self {
            sink,
            output: OutputBuffer::new(),
            strategy: strategy_for(options.mode),
            options,
            previous_output: String::new(),
            previous_lines: Vec::new(),
            cursor_hidden: false,
        }
    }

    /// Render a frame, replacing the previous one.
    ///
    /// Rendering the same text twice writes nothing the second time.
    pub fn render(&mut self, next: &str) -> io::Result<()> {
        if next == self.previous_output {
            return Ok(());
        }

        ansi::begin_sync(&mut self.output)?;
        if !self.options.show_cursor && !self.cursor_hidden {
            ansi::cursor_hide(&mut self.output)?;
            self.cursor_hidden = true;
        }
        self.strategy
            .update(&mut self.output, &self.previous_lines, next)?;
        ansi::end_sync(&mut self.output)?;

        tracing::debug!(
            mode = %self.options.mode,
            from = self.previous_lines.len(),
            to = line_count(next),
            bytes = self.output.len(),
            "render"
        );

        self.output.flush_to(&mut self.sink)?;
        self.remember(next);
        Ok(())
    }

    /// Erase the rendered block and forget it.
    pub fn clear(&mut self) -> io::Result<()> {
        if !self.previous_lines.is_empty() {
            ansi::erase_lines(&mut self.output, ansi::rows(self.previous_lines.len()))?;
            self.output.flush_to(&mut self.sink)?;
            tracing::debug!(lines = self.previous_lines.len(), "clear");
        }
        self.reset();
        Ok(())
    }

    /// Finish the session: leave the rendered block on screen, move below
    /// it, and restore the cursor.
    pub fn done(&mut self) -> io::Result<()> {
        if !self.previous_lines.is_empty() {
            self.output.write_str("\n");
        }
        if self.cursor_hidden {
            ansi::cursor_show(&mut self.output)?;
            self.cursor_hidden = false;
        }
        self.output.flush_to(&mut self.sink)?;
        tracing::debug!(lines = self.previous_lines.len(), "done");
        self.reset();
        Ok(())
    }

    /// Adopt `text` as what is already on screen, without writing anything.
    pub fn sync(&mut self, text: &str) {
        self.remember(text);
    }

    /// The last rendered (or synced) frame.
    pub fn previous_output(&self) -> &str {
        &self.previous_output
    }

    /// Rows occupied by the rendered block; zero when nothing is rendered.
    pub fn line_count(&self) -> usize {
        self.previous_lines.len()
    }

    pub fn mode(&self) -> RenderMode {
        self.options.mode
    }

    pub fn options(&self) -> RendererOptions {
        self.options
    }

    pub fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Give back the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn remember(&mut self, text: &str) {
        self.previous_output = text.to_string();
        self.previous_lines = text.split('\n').map(String::from).collect();
    }

    fn reset(&mut self) {
        self.previous_output.clear();
        self.previous_lines.clear();
    }
}

impl<W: Write + std::fmt::Debug> std::fmt::Debug for LineRenderer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineRenderer")
            .field("sink", &self.sink)
            .field("options", &self.options)
            .field("previous_lines", &self.previous_lines.len())
            .field("cursor_hidden", &self.cursor_hidden)
            .finish()
    }
}

fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

// =============================================================================
// Tests
// =============================================================================
