//! Parsing of user-supplied post identifiers and subreddit names

use std::sync::LazyLock;

use regex::Regex;

/// `.../comments/<id>/...` permalinks, with or without scheme and host.
static PERMALINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|/)comments/([a-z0-9]+)(?:/|$|\?|#)")
        .expect("PERMALINK regex is invalid")
});

/// `redd.it/<id>` short links.
static SHORT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?redd\.it/([a-z0-9]+)/?$").expect("SHORT_LINK regex is invalid")
});

/// Bare ids and `t3_` fullnames.
static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:t3_)?([a-z0-9]+)$").expect("BARE_ID regex is invalid"));

/// Extract the post id from an id, a `t3_` fullname, a permalink or a short link.
/// Ids are returned lowercase. Returns None when nothing id-like is found.
pub fn parse_post_id(identifier: &str) -> Option<String> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return None;
    }

    [&*SHORT_LINK, &*PERMALINK, &*BARE_ID]
        .iter()
        .find_map(|re| re.captures(identifier))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

/// Strip an `r/` or `/r/` prefix and surrounding slashes from a subreddit name.
pub fn normalize_subreddit(name: &str) -> &str {
    let name = name.trim().trim_matches('/');
    name.strip_prefix("r/").unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_id() {
        assert_eq!(parse_post_id("abc123"), Some("abc123".to_string()));
        assert_eq!(parse_post_id("  ABC123 "), Some("abc123".to_string()));
    }

    #[test]
    fn test_parse_fullname() {
        assert_eq!(parse_post_id("t3_abc123"), Some("abc123".to_string()));
    }

    #[test]
    fn test_parse_permalink() {
        let url = "https://www.reddit.com/r/rust/comments/1x2y3z/some_title/";
        assert_eq!(parse_post_id(url), Some("1x2y3z".to_string()));
        assert_eq!(
            parse_post_id("reddit.com/r/rust/comments/1x2y3z"),
            Some("1x2y3z".to_string())
        );
        assert_eq!(
            parse_post_id("https://old.reddit.com/comments/1x2y3z?context=3"),
            Some("1x2y3z".to_string())
        );
    }

    #[test]
    fn test_parse_short_link() {
        assert_eq!(
            parse_post_id("https://redd.it/q1w2e3"),
            Some("q1w2e3".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_post_id(""), None);
        assert_eq!(parse_post_id("not an id"), None);
        assert_eq!(parse_post_id("https://example.com/page"), None);
    }

    #[test]
    fn test_normalize_subreddit() {
        assert_eq!(normalize_subreddit("rust"), "rust");
        assert_eq!(normalize_subreddit("r/rust"), "rust");
        assert_eq!(normalize_subreddit("/r/rust/"), "rust");
    }
}
