//! Streaming thread formatter
//!
//! `ThreadFormatter` writes each node as soon as the walker hands it over,
//! so output appears in traversal order with nothing buffered in between.
//!
//! A comment at depth 1 on a 40-column terminal looks like:
//!
//! ```text
//!    + ------------------------------
//!    | score: 5 || author: bob || reply to: alice
//!    |
//!    | Hi there, this body wraps at the
//!    | terminal edge.
//! ```

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::model::{Author, Comment, Post};
use crate::tree::{ThreadOutput, WalkSummary};

use super::config::OutputConfig;
use super::utils::{paragraphs, text_width, wrap_text};

/// Marker drawn at the start of indented lines.
pub const RAIL: &str = "|";

/// Columns a comment separator leaves free past its indentation.
const SEPARATOR_MARGIN: usize = 5;

/// Columns the post header leaves free at the right edge.
const HEADER_MARGIN: usize = 5;

const HEADER_PREFIX: &str = " | ";

/// Formats posts and comments onto any termcolor writer.
pub struct ThreadFormatter<W> {
    config: OutputConfig,
    out: W,
}

impl ThreadFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self::new(StandardStream::stdout(choice), config)
    }
}

impl<W: WriteColor> ThreadFormatter<W> {
    pub fn new(out: W, config: OutputConfig) -> Self {
        Self { config, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn width(&self) -> usize {
        self.config.width.current()
    }

    fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(self.out, "{}", text)?;
        self.out.reset()
    }

    /// Header block for the post: separator, title, score line, then the
    /// self-text or, for link posts, the URL.
    pub fn render_root_header(&mut self, post: &Post) -> io::Result<()> {
        let dashes = self.width().saturating_sub(HEADER_MARGIN).max(1);
        writeln!(self.out, " + {}", "-".repeat(dashes))?;

        self.write_header_text(&post.title)?;
        writeln!(self.out, " |")?;
        writeln!(
            self.out,
            "{}score: {} || author: {}",
            HEADER_PREFIX, post.score, post.author
        )?;
        writeln!(self.out, " |")?;

        let body = post.display_body();
        for (i, paragraph) in paragraphs(body).iter().enumerate() {
            if i > 0 {
                writeln!(self.out, " |")?;
            }
            self.write_header_text(paragraph)?;
        }
        Ok(())
    }

    fn write_header_text(&mut self, text: &str) -> io::Result<()> {
        let width = text_width(
            self.width().saturating_sub(HEADER_MARGIN),
            HEADER_PREFIX.len(),
        );
        for line in wrap_text(text, width) {
            writeln!(self.out, "{}{}", HEADER_PREFIX, line)?;
        }
        Ok(())
    }

    /// Comment block: colored separator, metadata line, spacer and the
    /// wrapped body, all indented by depth.
    pub fn render_comment(
        &mut self,
        comment: &Comment,
        depth: usize,
        reply_to: &Author,
    ) -> io::Result<()> {
        let color = self.config.palette.color_for(depth);
        let indent = depth + 1;

        let dashes = self.width().saturating_sub(indent + SEPARATOR_MARGIN).max(1);
        write!(self.out, "{:indent$} + ", "", indent = indent)?;
        self.write_colored(&"-".repeat(dashes), color)?;
        writeln!(self.out)?;

        write!(self.out, "{:indent$} ", "", indent = indent)?;
        self.write_colored(RAIL, color)?;
        write!(
            self.out,
            " score: {} || author: {}",
            comment.score, comment.author
        )?;
        if comment.is_submitter {
            write!(self.out, " [OP]")?;
        }
        writeln!(self.out, " || reply to: {}", reply_to)?;

        self.write_rail(indent, color)?;

        let body_indent = depth + 2;
        for (i, paragraph) in paragraphs(&comment.body).iter().enumerate() {
            if i > 0 {
                self.write_rail(body_indent - 1, color)?;
            }
            let width = text_width(self.width(), body_indent + RAIL.len() + 1);
            for line in wrap_text(paragraph, width) {
                write!(self.out, "{:indent$}", "", indent = body_indent)?;
                self.write_colored(RAIL, color)?;
                if line.is_empty() {
                    writeln!(self.out)?;
                } else {
                    writeln!(self.out, " {}", line)?;
                }
            }
        }
        Ok(())
    }

    /// A line holding only the rail, placed after `indent` spaces and one more.
    fn write_rail(&mut self, indent: usize, color: Color) -> io::Result<()> {
        write!(self.out, "{:indent$} ", "", indent = indent)?;
        self.write_colored(RAIL, color)?;
        writeln!(self.out)
    }
}

impl<W: WriteColor> ThreadOutput for ThreadFormatter<W> {
    fn output_post(&mut self, post: &Post) -> io::Result<()> {
        self.render_root_header(post)
    }

    fn output_comment(
        &mut self,
        comment: &Comment,
        depth: usize,
        reply_to: &Author,
    ) -> io::Result<()> {
        self.render_comment(comment, depth, reply_to)
    }

    fn finish(&mut self, _summary: &WalkSummary) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}
