//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! The identifier itself always goes to stdout, since it is the reason the
//! tool was run. Warnings and errors go to stderr; warnings respect the
//! quiet flag. When `--json` is enabled, the full report is printed as JSON
//! instead.

use std::fmt::Display;

use crate::engine::Report;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Default log filter directive for this level.
    pub fn log_filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Debug => "debug",
        }
    }
}

/// Print a result line (always shown).
pub fn print(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Which parts of the identifier were asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// `-t`
    pub tag: bool,
    /// `-b`
    pub branch: bool,
    /// `-c`
    pub commit: bool,
}

impl Selection {
    /// Check if no part was explicitly selected.
    pub fn is_default(&self) -> bool {
        !self.tag && !self.branch && !self.commit
    }
}

/// Compose the identifier printed for `report`.
///
/// Parts are joined in the order tag, branch, commit:
/// - nothing selected: the tag with its `<count>-<sha>` suffix when past it,
///   or `<branch>-<sha>` when there is no tag
/// - tag alone: the tag with its suffix
/// - tag with branch or commit: the bare tag name, then the others
/// - `ignore_unclean_tag` drops the suffix everywhere
///
/// Returns `None` when there is nothing to print.
pub fn compose_identifier(
    report: &Report,
    selection: Selection,
    separator: &str,
    ignore_unclean_tag: bool,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if selection.is_default() {
        match &report.tag {
            Some(tag) => {
                parts.push(tag.clone());
                if !ignore_unclean_tag {
                    parts.extend(unclean_suffix(report));
                }
            }
            None => {
                parts.extend(report.branch.clone());
                parts.push(report.commit.clone());
            }
        }
    } else {
        if selection.tag {
            if let Some(tag) = &report.tag {
                parts.push(tag.clone());
                let alone = !selection.branch && !selection.commit;
                if alone && !ignore_unclean_tag {
                    parts.extend(unclean_suffix(report));
                }
            }
        }
        if selection.branch {
            parts.extend(report.branch.clone());
        }
        if selection.commit {
            parts.push(report.commit.clone());
        }
    }

    parts.retain(|p| !p.is_empty());
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(separator))
    }
}

fn unclean_suffix(report: &Report) -> Vec<String> {
    match (&report.abbreviated_hash, report.distance) {
        (Some(hash), distance) if distance > 0 => vec![distance.to_string(), hash.clone()],
        _ => Vec::new(),
    }
}
