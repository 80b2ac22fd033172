//! Shared text layout helpers

/// Narrowest column a wrapped body is squeezed into, however deep the nesting.
pub const MIN_TEXT_WIDTH: usize = 20;

/// Columns available for text once `prefix_len` columns of a `width`-wide
/// line are taken by indentation and rail.
pub fn text_width(width: usize, prefix_len: usize) -> usize {
    width.saturating_sub(prefix_len).max(MIN_TEXT_WIDTH)
}

/// Split text into paragraphs on blank lines. Line breaks inside a
/// paragraph are left for `wrap_text` to fold.
pub fn paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    if paragraphs.is_empty() {
        paragraphs.push(String::new());
    }
    paragraphs
}

/// Wrap text to fit within max_width, preferring word boundaries.
/// Uses character count (not byte count) to properly handle UTF-8.
/// Words longer than the width are split across lines.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if !current_line.is_empty() && current_len + 1 + word_len <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        if !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
        }

        // Start the word on a fresh line, chunking it if it cannot fit.
        let mut chars = word.chars().peekable();
        loop {
            let chunk: String = chars.by_ref().take(max_width).collect();
            if chars.peek().is_none() {
                current_len = chunk.chars().count();
                current_line = chunk;
                break;
            }
            lines.push(chunk);
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
