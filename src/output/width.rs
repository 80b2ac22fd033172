//! Terminal width measurement

use terminal_size::{Width, terminal_size};

use crate::error::DisplayEnvironmentError;

pub const DEFAULT_FALLBACK_WIDTH: usize = 80;

/// How the formatter learns the output width.
///
/// The width is asked for once per printed line, so a terminal resized
/// mid-render reflows the lines that follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthProbe {
    /// Ask the terminal attached to stdout, using `fallback` when there is none.
    Terminal { fallback: usize },
    /// Always use this width.
    Fixed(usize),
}

impl WidthProbe {
    pub fn current(&self) -> usize {
        match *self {
            WidthProbe::Fixed(width) => width,
            WidthProbe::Terminal { fallback } => match terminal_width() {
                Ok(width) => width,
                Err(e) => {
                    log::debug!("{}, using {} columns", e, fallback);
                    fallback
                }
            },
        }
    }
}

impl Default for WidthProbe {
    fn default() -> Self {
        WidthProbe::Terminal {
            fallback: DEFAULT_FALLBACK_WIDTH,
        }
    }
}

fn terminal_width() -> Result<usize, DisplayEnvironmentError> {
    match terminal_size() {
        Some((Width(w), _)) if w > 0 => Ok(w as usize),
        _ => Err(DisplayEnvironmentError),
    }
}
