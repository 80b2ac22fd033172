//! Where posts and comments come from
//!
//! The walker only talks to the `CommentSource` trait. The crate ships a
//! `SnapshotSource` that serves a thread captured as JSON; a networked source
//! can implement the same trait and keep authentication, pagination and retry
//! behind it.

mod identifier;
mod snapshot;

pub use identifier::{normalize_subreddit, parse_post_id};
pub use snapshot::{Snapshot, SnapshotComment, SnapshotEntry, SnapshotPost, SnapshotSource};

use crate::error::SourceError;
use crate::model::{Comment, Post};

/// Supplier of posts and their reply forests.
///
/// Every listing is returned in the source's own ranking order, which the
/// walker relies on for its score-based pruning.
pub trait CommentSource {
    /// Look up a post by id, fullname or URL.
    fn fetch_post(&self, identifier: &str) -> Result<Post, SourceError>;

    fn top_level_comments(&self, post: &Post) -> Result<Vec<Comment>, SourceError>;

    fn children(&self, comment: &Comment) -> Result<Vec<Comment>, SourceError>;

    /// Posts of a subreddit ordered by "hot" ranking.
    fn resolve_subreddit_hot(&self, subreddit: &str) -> Result<Vec<Post>, SourceError>;
}

impl<S: CommentSource + ?Sized> CommentSource for &S {
    fn fetch_post(&self, identifier: &str) -> Result<Post, SourceError> {
        (**self).fetch_post(identifier)
    }

    fn top_level_comments(&self, post: &Post) -> Result<Vec<Comment>, SourceError> {
        (**self).top_level_comments(post)
    }

    fn children(&self, comment: &Comment) -> Result<Vec<Comment>, SourceError> {
        (**self).children(comment)
    }

    fn resolve_subreddit_hot(&self, subreddit: &str) -> Result<Vec<Post>, SourceError> {
        (**self).resolve_subreddit_hot(subreddit)
    }
}

/// Fetch the current top ("hot") post of a subreddit.
pub fn current_top_post<S: CommentSource + ?Sized>(
    source: &S,
    subreddit: &str,
) -> Result<Post, SourceError> {
    let name = normalize_subreddit(subreddit);
    let posts = source.resolve_subreddit_hot(name)?;
    let post = posts
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::not_found(format!("any posts in /r/{}", name)))?;
    log::info!("current top post of /r/{} is {}", name, post.id);
    Ok(post)
}
