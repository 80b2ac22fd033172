//! Error types for sources and rendering

use std::io;

use thiserror::Error;

/// Failure reported by a `CommentSource`.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The post id, URL or subreddit name does not resolve.
    #[error("unable to find {what}")]
    NotFound { what: String },

    /// The source could not answer, e.g. a transport failure.
    #[error("source unavailable: {reason}")]
    Unavailable { reason: String },

    /// The children of `id` sit behind a "load more" placeholder the source
    /// will not expand. Walkers treat this as an empty reply list.
    #[error("replies of {id} were not expanded")]
    Unexpanded { id: String },
}

impl SourceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// The output is not a terminal, or the terminal did not report a size.
/// Formatters recover by using a fallback width.
#[derive(Debug, Error)]
#[error("terminal width unavailable")]
pub struct DisplayEnvironmentError;

/// Errors surfaced by the walker, the formatter and configuration.
#[derive(Debug, Error)]
pub enum ThreadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A source call failed while listing the replies of `node`.
    #[error("failed to fetch replies of {node} at depth {depth}: {source}")]
    Fetch {
        node: String,
        depth: usize,
        #[source]
        source: SourceError,
    },

    #[error("color palette needs at least {min} colors, got {got}")]
    InvalidPalette { min: usize, got: usize },

    #[error("invalid color '{name}': {reason}")]
    InvalidColor { name: String, reason: String },

    #[error("error writing output: {0}")]
    Io(#[from] io::Error),
}

impl ThreadError {
    /// True when the error means the requested thread does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Source(SourceError::NotFound { .. }))
    }
}
