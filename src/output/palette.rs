//! Depth to color mapping

use termcolor::Color;

use crate::error::ThreadError;

/// Fewest colors a palette may hold.
pub const MIN_PALETTE_SIZE: usize = 6;

/// Ordered colors cycled by nesting depth.
///
/// Depths past the end wrap around, so `color_index(d)` equals
/// `color_index(d + len)` for every depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, ThreadError> {
        if colors.len() < MIN_PALETTE_SIZE {
            return Err(ThreadError::InvalidPalette {
                min: MIN_PALETTE_SIZE,
                got: colors.len(),
            });
        }
        Ok(Self { colors })
    }

    /// Build a palette from color names (`green`, `magenta`, ...) or ANSI
    /// 256-color numbers.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ThreadError> {
        let colors = names
            .iter()
            .map(|name| {
                let name = name.as_ref().trim();
                name.parse::<Color>().map_err(|e| ThreadError::InvalidColor {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color_index(&self, depth: usize) -> usize {
        depth % self.colors.len()
    }

    pub fn color_for(&self, depth: usize) -> Color {
        self.colors[self.color_index(depth)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::Green,
                Color::Magenta,
                Color::Cyan,
                Color::Yellow,
                Color::Blue,
                Color::Red,
            ],
        }
    }
}
