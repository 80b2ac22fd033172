//! CLI entry point for threadtree

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use threadtree::source::normalize_subreddit;
use threadtree::{
    CommentSource, OutputConfig, Palette, SnapshotSource, ThreadError, ThreadFormatter,
    TreeWalker, WalkerConfig, WidthProbe, current_top_post,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "threadtree")]
#[command(about = "Render a discussion thread as a depth-colored comment tree")]
#[command(version)]
struct Args {
    /// Post to render: id, t3_ fullname, permalink or redd.it link
    #[arg(required_unless_present = "subreddit", conflicts_with = "subreddit")]
    post: Option<String>,

    /// Render the current top (hot) post of this subreddit instead
    #[arg(short = 's', long = "subreddit", value_name = "NAME")]
    subreddit: Option<String>,

    /// Thread snapshot (JSON) to read posts and comments from
    #[arg(long = "source", value_name = "FILE")]
    source: PathBuf,

    /// Maximum number of top-level comments
    #[arg(short = 'n', long = "top", default_value = "100")]
    top: usize,

    /// Comment levels to show (0 or 1 shows top-level comments only)
    #[arg(short = 'L', long = "depth", default_value = "10")]
    depth: usize,

    /// Maximum replies shown under each comment
    #[arg(short = 'R', long = "replies", default_value = "5")]
    replies: usize,

    /// Keep listing comments after one scores below 1
    #[arg(long = "keep-low-score")]
    keep_low_score: bool,

    /// Comma-separated depth colors, at least 6 (names or ANSI 256 numbers)
    #[arg(long = "palette", value_name = "COLORS", value_delimiter = ',')]
    palette: Vec<String>,

    /// Render at this width instead of the terminal's (0 = detect)
    #[arg(short = 'w', long = "width", value_name = "COLUMNS")]
    width: Option<usize>,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log diagnostics to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("threadtree: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ThreadError> {
    let palette = if args.palette.is_empty() {
        Palette::default()
    } else {
        Palette::from_names(&args.palette)?
    };

    let source = SnapshotSource::from_path(&args.source)?;
    log::debug!(
        "loaded {} posts from '{}'",
        source.post_count(),
        args.source.display()
    );

    let post = match &args.subreddit {
        Some(name) => {
            let post = current_top_post(&source, name)?;
            eprintln!(
                "Retrieving the current top post from /r/{}",
                normalize_subreddit(name)
            );
            post
        }
        None => source.fetch_post(args.post.as_deref().unwrap_or_default())?,
    };

    let walker_config = WalkerConfig {
        max_top_level: args.top,
        max_depth: args.depth,
        max_replies_per_node: args.replies,
        prune_low_score: !args.keep_low_score,
    };

    let output_config = OutputConfig {
        use_color: should_use_color(args.color),
        palette,
        width: match args.width {
            Some(width) if width > 0 => WidthProbe::Fixed(width),
            _ => WidthProbe::default(),
        },
    };

    let mut formatter = ThreadFormatter::stdout(output_config);
    let summary = TreeWalker::new(walker_config).walk(&post, &source, &mut formatter)?;
    log::info!(
        "rendered {} comments of {} (deepest level {:?}, {} listings pruned, {} truncated)",
        summary.comments_rendered,
        post.id,
        summary.deepest,
        summary.pruned_listings,
        summary.truncated_listings
    );
    Ok(())
}
