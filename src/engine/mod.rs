//! engine
//!
//! Orchestrates one invocation: open the repository, load configuration,
//! describe the start commit, resolve the branch, then apply whatever the CI
//! environment reports.
//!
//! # Architecture
//!
//! The engine owns no state between invocations. Every setting arrives
//! through [`Context`] and [`Options`], and the outcome leaves as an
//! [`Outcome`]. Nothing is printed here; the CLI decides how to render the
//! [`Report`].
//!
//! # Precedence
//!
//! - Built-in defaults, then global config, then repo config, then flags
//! - Values reported by CI replace the locally derived ones, unless a
//!   revision was asked for explicitly
//!
//! # Example
//!
//! ```ignore
//! use tagver::core::env::ProcessEnv;
//! use tagver::engine::{self, Context, Options};
//!
//! let outcome = engine::run(&Context::default(), &Options::default(), &ProcessEnv)?;
//! println!("{:?}", outcome.report.tag);
//! ```

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use crate::ci::{self, CiRefs, Provider};
use crate::core::config::{Config, ConfigFile};
use crate::core::env::Env;
use crate::core::types::Oid;
use crate::describe::{self, DescribeError};
use crate::git::{CommitGraph, Git, GitError, Head};

/// Where to run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Any path inside the repository.
    pub path: PathBuf,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
        }
    }
}

/// Per-invocation overrides, usually from command-line flags.
///
/// `None` and `false` mean "not given": the configured value applies.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Describe this revision instead of HEAD. CI variables are ignored.
    pub rev: Option<String>,
    /// Identifier separator.
    pub separator: Option<String>,
    /// Drop the `<count>-<sha>` suffix.
    pub ignore_unclean_tag: bool,
    /// Ignore CI environment variables.
    pub no_ci: bool,
}

/// Everything known about the described commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Nearest tag
    pub tag: Option<String>,
    /// Commits between the described commit and the tag
    pub distance: usize,
    /// Abbreviated hash, present only when past the tag
    pub abbreviated_hash: Option<String>,
    /// Abbreviated hash of the described commit
    pub commit: String,
    /// Branch HEAD is on, or the one containing a detached HEAD
    pub branch: Option<String>,
    /// Whether HEAD is detached
    pub detached: bool,
    /// CI system whose variables were applied
    pub ci: Option<Provider>,
}

impl Report {
    /// Check if the described commit carries the tag itself.
    pub fn is_exact(&self) -> bool {
        self.tag.is_some() && self.distance == 0
    }

    /// Replace locally derived values with those reported by CI.
    ///
    /// A CI tag is exact by definition. A CI commit is abbreviated the same
    /// way local ones are.
    pub fn apply_ci(&mut self, refs: &CiRefs) {
        self.ci = Some(refs.provider);

        if let Some(commit) = &refs.commit {
            let abbrev = abbreviate(commit);
            if self.abbreviated_hash.is_some() {
                self.abbreviated_hash = Some(abbrev.clone());
            }
            self.commit = abbrev;
        }
        if let Some(branch) = &refs.branch {
            self.branch = Some(branch.clone());
        }
        if let Some(tag) = &refs.tag {
            self.tag = Some(tag.clone());
            self.distance = 0;
            self.abbreviated_hash = None;
        }
    }
}

/// Result of [`run`].
#[derive(Debug, Clone)]
pub struct Outcome {
    /// What was found
    pub report: Report,
    /// Effective identifier separator
    pub separator: String,
    /// Effective unclean-suffix setting
    pub ignore_unclean_tag: bool,
    /// Recoverable problems worth telling the user about
    pub warnings: Vec<String>,
}

/// Describe the repository at `ctx.path`.
///
/// # Errors
///
/// - The path is not inside a repository
/// - HEAD is unborn, or `--rev` does not name a commit
/// - A config file cannot be read, parsed, or validated
/// - The repository cannot be read
/// - A detected CI provider lacks a variable it always sets
pub fn run(ctx: &Context, opts: &Options, env: &impl Env) -> Result<Outcome> {
    let git = Git::open(&ctx.path)?;
    debug!(git_dir = %git.git_dir().display(), "opened repository");

    let loaded = Config::load(env, Some(git.git_dir()), git.work_dir())
        .context("failed to load configuration")?;
    let config = loaded.config;
    let mut warnings: Vec<String> = loaded.warnings.into_iter().map(|w| w.message).collect();

    let separator = match &opts.separator {
        Some(sep) => {
            ConfigFile {
                separator: Some(sep.clone()),
                ..Default::default()
            }
            .validate()?;
            sep.clone()
        }
        None => config.separator().to_string(),
    };
    let ignore_unclean_tag = opts.ignore_unclean_tag || config.ignore_unclean_tag();

    // CI variables describe the pipeline's checkout, not an explicit revision
    let ci_refs = if opts.rev.is_none() && !opts.no_ci && config.ci() {
        ci::refs_from_env(env)?
    } else {
        None
    };
    if let Some(refs) = &ci_refs {
        debug!(provider = %refs.provider, "using CI environment");
    }

    let head = match git.head() {
        Ok(head) => head,
        Err(GitError::RefNotFound { .. }) => anyhow::bail!("repository has no commits"),
        Err(e) => return Err(e).context("failed to read HEAD"),
    };
    let start = match &opts.rev {
        Some(rev) => git
            .resolve_revision(rev)
            .with_context(|| format!("failed to resolve revision '{}'", rev))?,
        None => head.oid().clone(),
    };

    let report = report(&git, &head, &start, ci_refs.as_ref(), &mut warnings)?;

    Ok(Outcome {
        report,
        separator,
        ignore_unclean_tag,
        warnings,
    })
}

/// Build the report for `start` on any commit graph.
///
/// A missing branch is not fatal: it is recorded in `warnings` and the
/// report carries no branch.
pub fn report<G: CommitGraph + ?Sized>(
    graph: &G,
    head: &Head,
    start: &Oid,
    ci_refs: Option<&CiRefs>,
    warnings: &mut Vec<String>,
) -> Result<Report> {
    let described = describe::describe(graph, start).context("failed to describe commit")?;

    let ci_branch = ci_refs.is_some_and(|r| r.branch.is_some());
    let branch = if ci_branch {
        None
    } else {
        match describe::current_branch(graph) {
            Ok(name) => Some(name.to_string()),
            Err(DescribeError::NotFound(message)) => {
                debug!("{}", message);
                warnings.push(message);
                None
            }
            Err(e) => return Err(e).context("failed to resolve branch"),
        }
    };

    let mut report = Report {
        tag: described.tag,
        distance: described.distance,
        abbreviated_hash: described.abbreviated_hash,
        commit: start.abbrev().to_string(),
        branch,
        detached: head.is_detached(),
        ci: None,
    };
    if let Some(refs) = ci_refs {
        report.apply_ci(refs);
    }
    Ok(report)
}

fn abbreviate(commit: &str) -> String {
    commit.chars().take(Oid::ABBREV_LEN).collect()
}
