//! Output configuration types

use termcolor::{Color, ColorSpec};

/// The four semantic colors used by the tree formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub directory: ColorSpec,
    pub file: ColorSpec,
    pub link: ColorSpec,
    pub error: ColorSpec,
}

impl Palette {
    /// Replace the directory color, keeping it bright like the default.
    pub fn with_directory(mut self, color: Color) -> Self {
        self.directory = bright(color);
        self
    }
}

fn bright(color: Color) -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color)).set_intense(true);
    spec
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            directory: bright(Color::Cyan),
            // Terminal default.
            file: ColorSpec::new(),
            link: bright(Color::Magenta),
            error: bright(Color::Red),
        }
    }
}

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    pub palette: Palette,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            palette: Palette::default(),
        }
    }
}
