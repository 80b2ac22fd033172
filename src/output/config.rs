//! Output configuration types

use super::palette::Palette;
use super::width::WidthProbe;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Colors for the separator and rail, cycled by depth.
    pub palette: Palette,
    pub width: WidthProbe,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            palette: Palette::default(),
            width: WidthProbe::default(),
        }
    }
}
