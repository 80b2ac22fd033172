//! Thread formatting and display
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `palette` - Depth to color mapping
//! - `width` - Terminal width measurement with fallback
//! - `utils` - Text layout helpers (paragraph splitting, wrapping)
//! - `streaming` - `ThreadFormatter`, the colored console renderer

mod config;
mod palette;
mod streaming;
mod utils;
mod width;

pub use config::OutputConfig;
pub use palette::{MIN_PALETTE_SIZE, Palette};
pub use streaming::{RAIL, ThreadFormatter};
pub use utils::{MIN_TEXT_WIDTH, paragraphs, text_width, wrap_text};
pub use width::{DEFAULT_FALLBACK_WIDTH, WidthProbe};
