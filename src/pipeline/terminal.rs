//! Terminal size detection.

/// Size assumed when the output is not a terminal (pipes, CI, tests).
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Detect the terminal size as `(columns, rows)`.
///
/// Uses crossterm to query the terminal dimensions, falling back to
/// [`FALLBACK_SIZE`] when the query fails or reports a zero dimension.
pub fn terminal_size() -> (u16, u16) {
    match crossterm::terminal::size() {
        Ok((width, height)) if width > 0 && height > 0 => (width, height),
        Ok(size) => {
            tracing::debug!(?size, "terminal reported an empty size, using fallback");
            FALLBACK_SIZE
        }
        Err(err) => {
            tracing::debug!(%err, "terminal size unavailable, using fallback");
            FALLBACK_SIZE
        }
    }
}

/// Get the current terminal width.
pub fn terminal_width() -> u16 {
    terminal_size().0
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_size_never_zero() {
        let (width, height) = terminal_size();
        assert!(width > 0);
        assert!(height > 0);
        assert_eq!(terminal_width(), width);
    }
}
