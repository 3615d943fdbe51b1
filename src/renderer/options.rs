//! Renderer configuration.
//!
//! Built in code with the builder setters, or read from the environment:
//!
//! | variable | values | default |
//! |---|---|---|
//! | `SPARK_RENDER_MODE` | `standard`, `incremental` | `incremental` |
//! | `SPARK_SHOW_CURSOR` | `1`, `true`, `yes`, `on` | cursor hidden |

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const RENDER_MODE_ENV: &str = "SPARK_RENDER_MODE";
pub const SHOW_CURSOR_ENV: &str = "SPARK_SHOW_CURSOR";

/// How each frame replaces the previous one on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Erase the whole previous block and write the new one.
    Standard,
    /// Rewrite only the lines that changed.
    #[default]
    Incremental,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown render mode: {0:?} (expected \"standard\" or \"incremental\")")]
pub struct ParseRenderModeError(String);

impl FromStr for RenderMode {
    type Err = ParseRenderModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "incremental" => Ok(Self::Incremental),
            _ => Err(ParseRenderModeError(s.to_string())),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standard => "standard",
            Self::Incremental => "incremental",
        })
    }
}

/// Options fixed at renderer construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RendererOptions {
    pub mode: RenderMode,
    /// Leave the cursor visible while frames are live.
    pub show_cursor: bool,
}

impl RendererOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_show_cursor(mut self, show: bool) -> Self {
        self.show_cursor = show;
        self
    }

    /// Read options from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read options through an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(raw) = lookup(RENDER_MODE_ENV) {
            match raw.parse() {
                Ok(mode) => options.mode = mode,
                Err(err) => tracing::warn!(%err, "ignoring {RENDER_MODE_ENV}"),
            }
        }

        if let Some(raw) = lookup(SHOW_CURSOR_ENV) {
            options.show_cursor = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        options
    }
}
