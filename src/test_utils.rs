//! Test utilities for building threads and snapshot files.
//!
//! This module is only compiled for tests, benchmarks and the `test-utils` feature.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::model::{Author, Comment, Post};
use crate::source::{Snapshot, SnapshotComment, SnapshotEntry, SnapshotPost, SnapshotSource};
use crate::tree::{ThreadOutput, WalkSummary};

/// Builder for a post and its comment forest.
#[derive(Debug, Clone)]
pub struct PostBuilder {
    post: SnapshotPost,
}

impl PostBuilder {
    /// A self post in `r/test` by `op` with a score of 1.
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            post: SnapshotPost {
                id: id.to_string(),
                subreddit: "test".to_string(),
                title: title.to_string(),
                selftext: None,
                url: format!("https://www.reddit.com/r/test/comments/{}/", id),
                score: 1,
                author: Some("op".to_string()),
                comments: Vec::new(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.post.id
    }

    pub fn subreddit(mut self, name: &str) -> Self {
        self.post.subreddit = name.to_string();
        self
    }

    pub fn author(mut self, name: &str) -> Self {
        self.post.author = Some(name.to_string());
        self
    }

    pub fn deleted_author(mut self) -> Self {
        self.post.author = None;
        self
    }

    pub fn score(mut self, score: i64) -> Self {
        self.post.score = score;
        self
    }

    pub fn selftext(mut self, text: &str) -> Self {
        self.post.selftext = Some(text.to_string());
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.post.url = url.to_string();
        self
    }

    pub fn comment(mut self, comment: CommentBuilder) -> Self {
        self.post.comments.push(SnapshotEntry::Comment(comment.build()));
        self
    }

    /// Append a "load more" placeholder to the top-level listing.
    pub fn more(mut self, count: usize) -> Self {
        self.post.comments.push(SnapshotEntry::More { count });
        self
    }

    pub fn build(self) -> SnapshotPost {
        self.post
    }
}

/// Builder for one comment and its replies.
#[derive(Debug, Clone)]
pub struct CommentBuilder {
    comment: SnapshotComment,
}

impl CommentBuilder {
    pub fn new(id: &str, author: &str, score: i64, body: &str) -> Self {
        Self {
            comment: SnapshotComment {
                id: id.to_string(),
                author: Some(author.to_string()),
                score,
                body: body.to_string(),
                is_submitter: None,
                replies: Vec::new(),
            },
        }
    }

    pub fn deleted_author(mut self) -> Self {
        self.comment.author = None;
        self
    }

    pub fn submitter(mut self, is_submitter: bool) -> Self {
        self.comment.is_submitter = Some(is_submitter);
        self
    }

    pub fn reply(mut self, reply: CommentBuilder) -> Self {
        self.comment.replies.push(SnapshotEntry::Comment(reply.build()));
        self
    }

    pub fn more(mut self, count: usize) -> Self {
        self.comment.replies.push(SnapshotEntry::More { count });
        self
    }

    pub fn build(self) -> SnapshotComment {
        self.comment
    }
}

pub fn snapshot(posts: impl IntoIterator<Item = PostBuilder>) -> Snapshot {
    Snapshot {
        posts: posts.into_iter().map(PostBuilder::build).collect(),
    }
}

pub fn source(posts: impl IntoIterator<Item = PostBuilder>) -> SnapshotSource {
    SnapshotSource::from_snapshot(snapshot(posts))
}

/// A snapshot written to a temporary file, removed when dropped.
pub struct SnapshotFile {
    _dir: TempDir,
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(snapshot: &Snapshot) -> Self {
        let json = serde_json::to_string_pretty(snapshot).expect("Failed to serialize snapshot");
        Self::with_contents(&json)
    }

    /// Write raw text, for exercising malformed snapshots.
    pub fn with_contents(contents: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("thread.json");
        fs::write(&path, contents).expect("Failed to write snapshot");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A node as seen by `RecordingOutput`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedNode {
    Post(String),
    Comment {
        id: String,
        depth: usize,
        reply_to: String,
    },
}

/// `ThreadOutput` that records the visiting order instead of printing.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub nodes: Vec<RecordedNode>,
    pub finished: bool,
}

impl RecordingOutput {
    /// Ids of the recorded comments, in visiting order.
    pub fn comment_ids(&self) -> Vec<&str> {
        self.comments().map(|(id, _, _)| id).collect()
    }

    /// `(id, depth, reply_to)` of every recorded comment.
    pub fn comments(&self) -> impl Iterator<Item = (&str, usize, &str)> {
        self.nodes.iter().filter_map(|node| match node {
            RecordedNode::Comment {
                id,
                depth,
                reply_to,
            } => Some((id.as_str(), *depth, reply_to.as_str())),
            RecordedNode::Post(_) => None,
        })
    }
}

impl ThreadOutput for RecordingOutput {
    fn output_post(&mut self, post: &Post) -> io::Result<()> {
        self.nodes.push(RecordedNode::Post(post.id.clone()));
        Ok(())
    }

    fn output_comment(
        &mut self,
        comment: &Comment,
        depth: usize,
        reply_to: &Author,
    ) -> io::Result<()> {
        self.nodes.push(RecordedNode::Comment {
            id: comment.id.clone(),
            depth,
            reply_to: reply_to.to_string(),
        });
        Ok(())
    }

    fn finish(&mut self, _summary: &WalkSummary) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}
