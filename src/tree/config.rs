//! Configuration types for the thread walker

/// Comments scoring below this are treated as the end of a ranked listing.
pub const PRUNE_SCORE_THRESHOLD: i64 = 1;

/// Configuration for thread walking behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Maximum number of top-level comments rendered.
    pub max_top_level: usize,
    /// Number of comment levels rendered. 0 or 1 shows top-level comments only.
    pub max_depth: usize,
    /// Maximum number of replies listed under any single comment.
    pub max_replies_per_node: usize,
    /// Stop a sibling listing at the first comment scoring below
    /// `PRUNE_SCORE_THRESHOLD`. Listings are assumed to be sorted by score.
    pub prune_low_score: bool,
}

impl WalkerConfig {
    /// Whether a comment rendered at `depth` may have its replies listed.
    pub fn descends_from(&self, depth: usize) -> bool {
        depth + 1 < self.max_depth
    }

    /// Whether `score` ends the sibling listing it appears in.
    pub fn prunes(&self, score: i64) -> bool {
        self.prune_low_score && score < PRUNE_SCORE_THRESHOLD
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_top_level: 100,
            max_depth: 10,
            max_replies_per_node: 5,
            prune_low_score: true,
        }
    }
}
