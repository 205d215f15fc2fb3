//! describe::walk
//!
//! The describe algorithm: nearest tag, distance, and abbreviated hash.
//!
//! Equivalent to `git describe --tags` except that the hash carries no `g`
//! prefix and is always 8 characters.

use serde::Serialize;
use tracing::debug;

use super::tags::TagIndex;
use super::tiebreak::pick_best;
use crate::core::types::Oid;
use crate::git::{CommitGraph, GitError};

/// Outcome of describing a commit.
///
/// - Tagged exactly: `{ tag: Some, distance: 0, abbreviated_hash: None }`
/// - Past a tag: `{ tag: Some, distance: n > 0, abbreviated_hash: Some }`,
///   where the hash belongs to the described commit, not the tagged one
/// - No reachable tag: `{ tag: None, distance: 0, abbreviated_hash: None }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DescribeResult {
    /// Nearest tag name
    pub tag: Option<String>,
    /// Commits between the described commit and the tagged one
    pub distance: usize,
    /// First 8 hex characters of the described commit, when past a tag
    pub abbreviated_hash: Option<String>,
}

impl DescribeResult {
    /// Check if the described commit carries the tag itself.
    pub fn is_exact(&self) -> bool {
        self.tag.is_some() && self.distance == 0
    }
}

/// Describe `start` relative to its nearest tagged ancestor.
///
/// History is walked newest committer time first; the first commit that
/// carries a tag ends the walk, and when it carries several the semver
/// tie-break picks one. The distance is the number of commits visited before
/// the tagged one.
///
/// Having no tags is not an error: the result is simply empty.
///
/// # Errors
///
/// Fails if tags cannot be enumerated or the history walk hits a missing
/// object.
pub fn describe<G: CommitGraph + ?Sized>(
    graph: &G,
    start: &Oid,
) -> Result<DescribeResult, GitError> {
    let index = TagIndex::build(graph)?;
    if index.is_empty() {
        debug!("repository has no tags");
        return Ok(DescribeResult::default());
    }

    let mut count = 0;
    for step in graph.log(start)? {
        let oid = step?;
        if let Some(tag) = index.get(&oid).and_then(pick_best) {
            debug!(tag = %tag.name, distance = count, commit = %oid.abbrev(), "nearest tag");
            return Ok(DescribeResult {
                tag: Some(tag.name.clone()),
                distance: count,
                abbreviated_hash: (count > 0).then(|| start.abbrev().to_string()),
            });
        }
        count += 1;
    }

    debug!(visited = count, "no tag reachable from {}", start.abbrev());
    Ok(DescribeResult::default())
}

/// Describe the commit HEAD points at.
pub fn describe_head<G: CommitGraph + ?Sized>(graph: &G) -> Result<DescribeResult, GitError> {
    let head = graph.head()?;
    describe(graph, head.oid())
}
