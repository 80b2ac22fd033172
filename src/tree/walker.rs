//! TreeWalker - visits a post's reply forest in display order

use std::io;

use crate::error::{SourceError, ThreadError};
use crate::model::{Author, Comment, Post};
use crate::source::CommentSource;

use super::config::WalkerConfig;

/// Callback for walk output - receives each visited node in traversal order.
pub trait ThreadOutput {
    fn output_post(&mut self, post: &Post) -> io::Result<()>;

    /// `reply_to` is the author of the post or comment being replied to.
    fn output_comment(
        &mut self,
        comment: &Comment,
        depth: usize,
        reply_to: &Author,
    ) -> io::Result<()>;

    fn finish(&mut self, summary: &WalkSummary) -> io::Result<()>;
}

/// Counts gathered during a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub comments_rendered: usize,
    /// Depth of the deepest rendered comment, None when no comment was rendered.
    pub deepest: Option<usize>,
    /// Sibling listings cut short by the low-score rule.
    pub pruned_listings: usize,
    /// Sibling listings cut short by a count limit.
    pub truncated_listings: usize,
}

impl WalkSummary {
    fn record(&mut self, depth: usize) {
        self.comments_rendered += 1;
        self.deepest = Some(self.deepest.map_or(depth, |d| d.max(depth)));
    }
}

/// Pending siblings at one depth. Replaces a recursive call frame.
struct Frame {
    comments: std::vec::IntoIter<Comment>,
    depth: usize,
    reply_to: Author,
}

/// Depth-first walker over a thread.
///
/// Uses an explicit stack rather than recursion so pathological nesting
/// cannot exhaust the call stack. The visiting order is pre-order: a comment
/// is emitted, then its whole subtree, then its next sibling.
pub struct TreeWalker {
    config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Emit `post` followed by its comment tree to `output`.
    ///
    /// A source failure aborts the walk; whatever was written before stays written.
    pub fn walk<S, O>(
        &self,
        post: &Post,
        source: &S,
        output: &mut O,
    ) -> Result<WalkSummary, ThreadError>
    where
        S: CommentSource + ?Sized,
        O: ThreadOutput,
    {
        let mut summary = WalkSummary::default();
        output.output_post(post)?;

        let top_level = settle(&post.id, 0, source.top_level_comments(post))?;
        let top_level = limit(top_level, self.config.max_top_level, &mut summary);

        let mut stack = vec![Frame {
            comments: top_level.into_iter(),
            depth: 0,
            reply_to: post.author.clone(),
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(comment) = frame.comments.next() else {
                stack.pop();
                continue;
            };

            if self.config.prunes(comment.score) {
                log::debug!(
                    "score {} of {} at depth {} ends its listing",
                    comment.score,
                    comment.id,
                    frame.depth
                );
                summary.pruned_listings += 1;
                stack.pop();
                continue;
            }

            let depth = frame.depth;
            output.output_comment(&comment, depth, &frame.reply_to)?;
            summary.record(depth);

            if comment.has_replies && self.config.descends_from(depth) {
                let replies = settle(&comment.id, depth, source.children(&comment))?;
                let replies = limit(replies, self.config.max_replies_per_node, &mut summary);
                if !replies.is_empty() {
                    stack.push(Frame {
                        comments: replies.into_iter(),
                        depth: depth + 1,
                        reply_to: comment.author,
                    });
                }
            }
        }

        output.finish(&summary)?;
        Ok(summary)
    }
}

/// Turn a listing result into comments, treating unexpanded listings as empty.
fn settle(
    node: &str,
    depth: usize,
    listing: Result<Vec<Comment>, SourceError>,
) -> Result<Vec<Comment>, ThreadError> {
    match listing {
        Ok(comments) => Ok(comments),
        Err(SourceError::Unexpanded { id }) => {
            log::debug!("replies of {} were not expanded, rendering none", id);
            Ok(Vec::new())
        }
        Err(source) => Err(ThreadError::Fetch {
            node: node.to_string(),
            depth,
            source,
        }),
    }
}

fn limit(mut comments: Vec<Comment>, max: usize, summary: &mut WalkSummary) -> Vec<Comment> {
    if comments.len() > max {
        comments.truncate(max);
        summary.truncated_listings += 1;
    }
    comments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CommentBuilder, PostBuilder, RecordedNode, RecordingOutput, source};

    fn walk(config: WalkerConfig, post: PostBuilder) -> (RecordingOutput, WalkSummary) {
        let id = post.id().to_string();
        let source = source([post]);
        let post = source.fetch_post(&id).unwrap();
        let mut output = RecordingOutput::default();
        let summary = TreeWalker::new(config)
            .walk(&post, &source, &mut output)
            .unwrap();
        (output, summary)
    }

    fn c(id: &str, score: i64) -> CommentBuilder {
        CommentBuilder::new(id, &format!("user_{}", id), score, &format!("body {}", id))
    }

    #[test]
    fn test_post_is_emitted_first_regardless_of_score() {
        let post = PostBuilder::new("p1", "Hello").score(-20);
        let (output, summary) = walk(WalkerConfig::default(), post);
        assert_eq!(output.nodes, vec![RecordedNode::Post("p1".to_string())]);
        assert!(output.finished);
        assert_eq!(summary.comments_rendered, 0);
        assert_eq!(summary.deepest, None);
    }

    #[test]
    fn test_top_level_prune_is_a_hard_break() {
        let post = PostBuilder::new("p1", "Hello")
            .comment(c("a", 5))
            .comment(c("b", 3))
            .comment(c("c", 0))
            .comment(c("d", 7));
        let (output, summary) = walk(WalkerConfig::default(), post);
        assert_eq!(output.comment_ids(), vec!["a", "b"]);
        assert_eq!(summary.pruned_listings, 1);
    }

    #[test]
    fn test_prune_disabled_renders_everything() {
        let post = PostBuilder::new("p1", "Hello")
            .comment(c("a", 5))
            .comment(c("b", -3))
            .comment(c("c", 7));
        let config = WalkerConfig {
            prune_low_score: false,
            ..Default::default()
        };
        let (output, _) = walk(config, post);
        assert_eq!(output.comment_ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reply_prune_only_cuts_its_own_listing() {
        let post = PostBuilder::new("p1", "Hello")
            .comment(
                c("a", 5)
                    .reply(c("a1", 2))
                    .reply(c("a2", 0))
                    .reply(c("a3", 9)),
            )
            .comment(c("b", 4).reply(c("b1", 1)));
        let (output, summary) = walk(WalkerConfig::default(), post);
        assert_eq!(output.comment_ids(), vec!["a", "a1", "b", "b1"]);
        assert_eq!(summary.pruned_listings, 1);
    }

    #[test]
    fn test_top_level_truncation() {
        let mut post = PostBuilder::new("p1", "Hello");
        for i in 0..5 {
            post = post.comment(c(&format!("c{}", i), 10 - i));
        }
        let config = WalkerConfig {
            max_top_level: 2,
            ..Default::default()
        };
        let (output, summary) = walk(config, post);
        assert_eq!(output.comment_ids(), vec!["c0", "c1"]);
        assert_eq!(summary.truncated_listings, 1);
        assert_eq!(summary.pruned_listings, 0);
    }

    #[test]
    fn test_reply_truncation() {
        let mut parent = c("a", 10);
        for i in 0..8 {
            parent = parent.reply(c(&format!("r{}", i), 5));
        }
        let post = PostBuilder::new("p1", "Hello").comment(parent);
        let config = WalkerConfig {
            max_replies_per_node: 3,
            ..Default::default()
        };
        let (output, _) = walk(config, post);
        assert_eq!(output.comment_ids(), vec!["a", "r0", "r1", "r2"]);
    }

    #[test]
    fn test_depth_cutoff() {
        let post = PostBuilder::new("p1", "Hello")
            .comment(c("a", 5).reply(c("a1", 5).reply(c("a1x", 5))));
        let config = WalkerConfig {
            max_depth: 2,
            ..Default::default()
        };
        let (output, summary) = walk(config, post);
        assert_eq!(output.comment_ids(), vec!["a", "a1"]);
        assert_eq!(summary.deepest, Some(1));
    }

    #[test]
    fn test_depth_one_is_top_level_only() {
        let post = PostBuilder::new("p1", "Hello").comment(c("a", 5).reply(c("a1", 5)));
        for max_depth in [0, 1] {
            let config = WalkerConfig {
                max_depth,
                ..Default::default()
            };
            let (output, _) = walk(config, post.clone());
            assert_eq!(output.comment_ids(), vec!["a"]);
        }
    }

    #[test]
    fn test_preorder_and_depth_steps() {
        let post = PostBuilder::new("p1", "Hello")
            .comment(
                c("a", 9)
                    .reply(c("a1", 8).reply(c("a1a", 7)))
                    .reply(c("a2", 6)),
            )
            .comment(c("b", 5));
        let (output, summary) = walk(WalkerConfig::default(), post);
        let visited: Vec<_> = output
            .comments()
            .map(|(id, depth, _)| (id.to_string(), depth))
            .collect();
        assert_eq!(
            visited,
            vec![
                ("a".to_string(), 0),
                ("a1".to_string(), 1),
                ("a1a".to_string(), 2),
                ("a2".to_string(), 1),
                ("b".to_string(), 0),
            ]
        );
        assert_eq!(summary.comments_rendered, 5);
        assert_eq!(summary.deepest, Some(2));

        // Depth never jumps by more than one on the way down.
        for pair in visited.windows(2) {
            assert!(pair[1].1 <= pair[0].1 + 1);
        }
    }

    #[test]
    fn test_reply_to_is_parent_author() {
        let post = PostBuilder::new("p1", "Hello")
            .author("alice")
            .comment(c("a", 5).reply(c("a1", 5)));
        let (output, _) = walk(WalkerConfig::default(), post);
        let reply_to: Vec<_> = output
            .comments()
            .map(|(_, _, reply_to)| reply_to.to_string())
            .collect();
        assert_eq!(reply_to, vec!["alice", "user_a"]);
    }

    #[test]
    fn test_very_deep_thread_does_not_recurse() {
        let mut chain = c("n4999", 1);
        for i in (0..4999).rev() {
            chain = c(&format!("n{}", i), 1).reply(chain);
        }
        let post = PostBuilder::new("p1", "Hello").comment(chain);
        let config = WalkerConfig {
            max_depth: usize::MAX,
            ..Default::default()
        };
        let (_, summary) = walk(config, post);
        assert_eq!(summary.comments_rendered, 5000);
        assert_eq!(summary.deepest, Some(4999));
    }

    struct FlakySource {
        inner: crate::source::SnapshotSource,
        unexpanded: &'static str,
        broken: &'static str,
    }

    impl CommentSource for FlakySource {
        fn fetch_post(&self, identifier: &str) -> Result<Post, SourceError> {
            self.inner.fetch_post(identifier)
        }

        fn top_level_comments(&self, post: &Post) -> Result<Vec<Comment>, SourceError> {
            self.inner.top_level_comments(post)
        }

        fn children(&self, comment: &Comment) -> Result<Vec<Comment>, SourceError> {
            if comment.id == self.unexpanded {
                Err(SourceError::Unexpanded {
                    id: comment.id.clone(),
                })
            } else if comment.id == self.broken {
                Err(SourceError::unavailable("connection reset"))
            } else {
                self.inner.children(comment)
            }
        }

        fn resolve_subreddit_hot(&self, subreddit: &str) -> Result<Vec<Post>, SourceError> {
            self.inner.resolve_subreddit_hot(subreddit)
        }
    }

    fn flaky_post() -> PostBuilder {
        PostBuilder::new("p1", "Hello")
            .comment(c("a", 5).reply(c("a1", 5)))
            .comment(c("b", 4).reply(c("b1", 4)))
            .comment(c("z", 3).reply(c("z1", 3)))
    }

    #[test]
    fn test_unexpanded_children_render_as_empty() {
        let source = FlakySource {
            inner: source([flaky_post()]),
            unexpanded: "a",
            broken: "",
        };
        let post = source.fetch_post("p1").unwrap();
        let mut output = RecordingOutput::default();
        TreeWalker::new(WalkerConfig::default())
            .walk(&post, &source, &mut output)
            .unwrap();
        assert_eq!(output.comment_ids(), vec!["a", "b", "b1", "z", "z1"]);
    }

    #[test]
    fn test_source_failure_aborts_with_context() {
        let source = FlakySource {
            inner: source([flaky_post()]),
            unexpanded: "",
            broken: "b",
        };
        let post = source.fetch_post("p1").unwrap();
        let mut output = RecordingOutput::default();
        let err = TreeWalker::new(WalkerConfig::default())
            .walk(&post, &source, &mut output)
            .unwrap_err();
        match err {
            ThreadError::Fetch { node, depth, .. } => {
                assert_eq!(node, "b");
                assert_eq!(depth, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Output written before the failure is kept, nothing after it.
        assert_eq!(output.comment_ids(), vec!["a", "a1", "b"]);
        assert!(!output.finished);
    }

    #[test]
    fn test_walk_is_repeatable() {
        let post = flaky_post();
        let (first, _) = walk(WalkerConfig::default(), post.clone());
        let (second, _) = walk(WalkerConfig::default(), post);
        assert_eq!(first.nodes, second.nodes);
    }
}
