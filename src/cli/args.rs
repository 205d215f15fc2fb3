//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `-t` / `-b` / `-c`: Select identifier parts (tag, branch, commit)
//! - `--ignore-unclean-tag`: Drop the `<count>-<sha>` suffix
//! - `--rev <REV>`: Describe a revision other than HEAD
//! - `--no-ci`: Ignore CI environment variables
//! - `--json`: Print the full report as JSON
//! - `--separator <SEP>`: Join parts with SEP
//! - `--debug` / `--quiet`: Logging level

use clap::Parser;
use std::path::PathBuf;

use crate::engine;
use crate::ui::output::{Selection, Verbosity};

/// Describe the current git commit as a version string
#[derive(Parser, Debug)]
#[command(name = "tagver")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
OUTPUT:
    v1.0.5               HEAD is tagged
    v1.0.4-1-5227b593    HEAD is one commit past v1.0.4
    main-5227b593        no tag reachable from HEAD

In CI (GitHub Actions, GitLab CI) the tag, branch, and commit reported by
the CI system take precedence over the repository's own.")]
pub struct Cli {
    /// Print the nearest tag
    #[arg(short, long)]
    pub tag: bool,

    /// Print the current branch
    #[arg(short, long)]
    pub branch: bool,

    /// Print the abbreviated commit hash
    #[arg(short, long)]
    pub commit: bool,

    /// Print only the tag name even when HEAD is past the tag
    #[arg(long)]
    pub ignore_unclean_tag: bool,

    /// Describe this revision instead of HEAD (CI variables are ignored)
    #[arg(long, value_name = "REV")]
    pub rev: Option<String>,

    /// Ignore CI environment variables
    #[arg(long)]
    pub no_ci: bool,

    /// Print the full report as JSON
    #[arg(long, conflicts_with_all = ["tag", "branch", "commit"])]
    pub json: bool,

    /// Join identifier parts with SEP
    #[arg(long, value_name = "SEP")]
    pub separator: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Only print the identifier and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Any path inside the repository
    #[arg(value_name = "GIT_DIR", default_value = ".")]
    pub path: PathBuf,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Output verbosity from `--quiet` and `--debug`.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Identifier parts selected by `-t`, `-b`, `-c`.
    pub fn selection(&self) -> Selection {
        Selection {
            tag: self.tag,
            branch: self.branch,
            commit: self.commit,
        }
    }

    /// Engine context for this invocation.
    pub fn context(&self) -> engine::Context {
        engine::Context {
            path: self.path.clone(),
        }
    }

    /// Engine options for this invocation.
    pub fn options(&self) -> engine::Options {
        engine::Options {
            rev: self.rev.clone(),
            separator: self.separator.clone(),
            ignore_unclean_tag: self.ignore_unclean_tag,
            no_ci: self.no_ci,
        }
    }
}
