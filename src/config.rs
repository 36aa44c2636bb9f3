//! Run configuration assembled by the entry point before any suite runs.

use termcolor::ColorChoice;

use crate::context::Flags;

/// Wrap width for compact output when none is given.
pub const DEFAULT_WIDTH: usize = 70;

/// When to colour status words and glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorMode {
    /// Colour only when standard output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto if atty::is(atty::Stream::Stdout) => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Flags, filters, and output settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub flags: Flags,
    pub suite_filter: Option<String>,
    pub test_filter: Option<String>,
    pub width: usize,
    pub color: ColorMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            flags: Flags::empty(),
            suite_filter: None,
            test_filter: None,
            width: DEFAULT_WIDTH,
            color: ColorMode::Auto,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_suite_filter(mut self, filter: impl Into<String>) -> Self {
        self.suite_filter = Some(filter.into());
        self
    }

    pub fn with_test_filter(mut self, filter: impl Into<String>) -> Self {
        self.test_filter = Some(filter.into());
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RunConfig::default();
        assert_eq!(config.width, 70);
        assert!(config.flags.is_empty());
        assert!(config.suite_filter.is_none());
        assert!(config.test_filter.is_none());
    }

    #[test]
    fn builders_compose() {
        let config = RunConfig::new()
            .with_flags(Flags::VERBOSE | Flags::FIRST_FAILURE_STOP)
            .with_suite_filter("io")
            .with_test_filter("read")
            .with_width(40)
            .with_color(ColorMode::Never);
        assert!(config.flags.contains(Flags::VERBOSE));
        assert_eq!(config.suite_filter.as_deref(), Some("io"));
        assert_eq!(config.test_filter.as_deref(), Some("read"));
        assert_eq!(config.width, 40);
        assert_eq!(config.color.choice(), ColorChoice::Never);
    }
}
