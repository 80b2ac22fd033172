//! Post and comment records handed out by a `CommentSource`

use std::fmt;

/// Display name used when an account has been deleted or hidden.
pub const DELETED_AUTHOR: &str = "[deleted]";

/// The author of a post or comment. `None` means the account is gone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Author(pub Option<String>);

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Some(name.into()))
    }

    pub fn deleted() -> Self {
        Self(None)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<Option<String>> for Author {
    fn from(name: Option<String>) -> Self {
        Self(name)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(DELETED_AUTHOR))
    }
}

/// Root of a thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub subreddit: String,
    pub title: String,
    /// Self-text. Link posts have none.
    pub selftext: Option<String>,
    pub url: String,
    pub score: i64,
    pub author: Author,
}

impl Post {
    /// The text shown beneath the header: self-text when it has any
    /// non-whitespace content, the URL otherwise.
    pub fn display_body(&self) -> &str {
        match self.selftext.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => &self.url,
        }
    }
}

/// A reply to a post or to another comment.
///
/// Children are not embedded; they are requested from the source with
/// `CommentSource::children` so a remote source can fetch lazily.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    /// Id of the post the comment belongs to. Comment ids are only unique
    /// within their thread.
    pub post_id: String,
    pub author: Author,
    pub score: i64,
    pub body: String,
    /// Written by the author of the post.
    pub is_submitter: bool,
    pub has_replies: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(selftext: Option<&str>) -> Post {
        Post {
            id: "abc".to_string(),
            subreddit: "rust".to_string(),
            title: "Title".to_string(),
            selftext: selftext.map(str::to_string),
            url: "https://example.com/link".to_string(),
            score: 1,
            author: Author::new("alice"),
        }
    }

    #[test]
    fn test_author_display() {
        assert_eq!(Author::new("bob").to_string(), "bob");
        assert_eq!(Author::deleted().to_string(), "[deleted]");
    }

    #[test]
    fn test_display_body_prefers_selftext() {
        assert_eq!(post(Some("World")).display_body(), "World");
    }

    #[test]
    fn test_display_body_falls_back_to_url() {
        assert_eq!(post(None).display_body(), "https://example.com/link");
        assert_eq!(post(Some("  ")).display_body(), "https://example.com/link");
    }
}
