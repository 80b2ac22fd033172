//! SnapshotSource - serves posts and comments from a JSON thread snapshot
//!
//! A snapshot is a captured copy of one or more threads:
//!
//! ```json
//! { "posts": [ { "id": "abc", "subreddit": "rust", "title": "Hello",
//!                "selftext": "World", "score": 10, "author": "alice",
//!                "comments": [ { "kind": "comment", "id": "c1", "author": "bob",
//!                                "score": 5, "body": "Hi there", "replies": [] },
//!                              { "kind": "more", "count": 12 } ] } ] }
//! ```
//!
//! `"more"` entries stand for replies that were never loaded. They are
//! dropped when listings are built, like resolving "load more" with a limit of 0.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::model::{Author, Comment, Post};

use super::CommentSource;
use super::identifier::{normalize_subreddit, parse_post_id};

/// Top-level snapshot document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub posts: Vec<SnapshotPost>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotPost {
    pub id: String,
    pub subreddit: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selftext: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub comments: Vec<SnapshotEntry>,
}

/// One slot in a reply listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapshotEntry {
    Comment(SnapshotComment),
    /// Placeholder for `count` replies that were not loaded.
    More {
        #[serde(default)]
        count: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotComment {
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub body: String,
    /// Defaults to "written by the post's author" when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_submitter: Option<bool>,
    #[serde(default)]
    pub replies: Vec<SnapshotEntry>,
}

/// In-memory `CommentSource` built from a `Snapshot`.
#[derive(Debug, Default)]
pub struct SnapshotSource {
    posts: HashMap<String, Post>,
    top_level: HashMap<String, Vec<Comment>>,
    /// (post id, comment id) -> direct replies.
    children: HashMap<(String, String), Vec<Comment>>,
    /// Lowercased subreddit name -> post ids in hot order.
    hot: HashMap<String, Vec<String>>,
}

impl SnapshotSource {
    /// Read and index a snapshot file.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path).map_err(|e| {
            SourceError::unavailable(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&text).map_err(|e| match e {
            SourceError::Unavailable { reason } => {
                SourceError::unavailable(format!("'{}': {}", path.display(), reason))
            }
            other => other,
        })
    }

    /// Parse a snapshot document. Nesting depth is not limited; the parser
    /// grows its stack on the heap as reply chains get deeper.
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        let invalid =
            |e: serde_json::Error| SourceError::unavailable(format!("invalid snapshot: {}", e));

        let mut de = serde_json::Deserializer::from_str(text);
        de.disable_recursion_limit();
        let snapshot =
            Snapshot::deserialize(serde_stacker::Deserializer::new(&mut de)).map_err(invalid)?;
        de.end().map_err(invalid)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut source = Self::default();
        for post in snapshot.posts {
            source.index_post(post);
        }
        source
    }

    fn index_post(&mut self, snapshot_post: SnapshotPost) {
        let post_id = snapshot_post.id.to_ascii_lowercase();
        let post_author = snapshot_post.author.clone();

        let mut pending: Vec<(Option<String>, Vec<SnapshotEntry>)> =
            vec![(None, snapshot_post.comments)];
        let mut placeholders = 0usize;

        while let Some((parent_id, entries)) = pending.pop() {
            let mut listing = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry {
                    SnapshotEntry::Comment(c) => {
                        let is_submitter = c.is_submitter.unwrap_or_else(|| {
                            c.author.is_some() && c.author == post_author
                        });
                        let has_replies = c
                            .replies
                            .iter()
                            .any(|r| matches!(r, SnapshotEntry::Comment(_)));
                        listing.push(Comment {
                            id: c.id.clone(),
                            post_id: post_id.clone(),
                            author: Author::from(c.author),
                            score: c.score,
                            body: c.body,
                            is_submitter,
                            has_replies,
                        });
                        if has_replies {
                            pending.push((Some(c.id), c.replies));
                        }
                    }
                    SnapshotEntry::More { count } => placeholders += count,
                }
            }

            match parent_id {
                None => {
                    self.top_level.insert(post_id.clone(), listing);
                }
                Some(id) => {
                    if self
                        .children
                        .insert((post_id.clone(), id.clone()), listing)
                        .is_some()
                    {
                        log::warn!("post {}: duplicate comment id '{}' in snapshot", post_id, id);
                    }
                }
            }
        }

        if placeholders > 0 {
            log::debug!(
                "post {}: dropped {} unloaded replies behind \"more\" placeholders",
                post_id,
                placeholders
            );
        }

        self.hot
            .entry(snapshot_post.subreddit.to_ascii_lowercase())
            .or_default()
            .push(post_id.clone());

        let post = Post {
            id: post_id.clone(),
            subreddit: snapshot_post.subreddit,
            title: snapshot_post.title,
            selftext: snapshot_post.selftext,
            url: snapshot_post.url,
            score: snapshot_post.score,
            author: Author::from(post_author),
        };
        if self.posts.insert(post_id.clone(), post).is_some() {
            log::warn!("duplicate post id '{}' in snapshot", post_id);
        }
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }
}

impl CommentSource for SnapshotSource {
    fn fetch_post(&self, identifier: &str) -> Result<Post, SourceError> {
        let id = parse_post_id(identifier)
            .ok_or_else(|| SourceError::not_found(format!("post '{}'", identifier)))?;
        self.posts
            .get(&id)
            .cloned()
            .ok_or_else(|| SourceError::not_found(format!("post '{}'", identifier)))
    }

    fn top_level_comments(&self, post: &Post) -> Result<Vec<Comment>, SourceError> {
        Ok(self.top_level.get(&post.id).cloned().unwrap_or_default())
    }

    fn children(&self, comment: &Comment) -> Result<Vec<Comment>, SourceError> {
        let key = (comment.post_id.clone(), comment.id.clone());
        Ok(self.children.get(&key).cloned().unwrap_or_default())
    }

    fn resolve_subreddit_hot(&self, subreddit: &str) -> Result<Vec<Post>, SourceError> {
        let name = normalize_subreddit(subreddit);
        let ids = self
            .hot
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| SourceError::not_found(format!("subreddit '{}'", name)))?;
        Ok(ids.iter().filter_map(|id| self.posts.get(id).cloned()).collect())
    }
}
