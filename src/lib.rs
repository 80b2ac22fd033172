//! threadtree - render a discussion thread as a depth-colored tree in the terminal

pub mod error;
pub mod model;
pub mod output;
pub mod source;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{DisplayEnvironmentError, SourceError, ThreadError};
pub use model::{Author, Comment, Post};
pub use output::{OutputConfig, Palette, ThreadFormatter, WidthProbe};
pub use source::{CommentSource, SnapshotSource, current_top_post, parse_post_id};
pub use tree::{ThreadOutput, TreeWalker, WalkSummary, WalkerConfig};
