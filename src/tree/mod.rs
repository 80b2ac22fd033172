//! Thread walking logic
//!
//! `TreeWalker` visits a post and its replies depth-first, applying the
//! depth, breadth and low-score limits from `WalkerConfig`, and hands every
//! visited node to a `ThreadOutput`.

mod config;
mod walker;

pub use config::{PRUNE_SCORE_THRESHOLD, WalkerConfig};
pub use walker::{ThreadOutput, TreeWalker, WalkSummary};
