//! describe::branch
//!
//! Branch name for the current HEAD, including the detached case.
//!
//! A detached HEAD (the usual state of a CI checkout) has no branch of its
//! own, so the branch is inferred: the first branch whose tip has HEAD in
//! its history. Local branches always win over remote-tracking ones.

use tracing::debug;

use super::reach::ReachabilityMemo;
use super::DescribeError;
use crate::core::types::BranchName;
use crate::git::{BranchKind, BranchRef, CommitGraph, Head};

/// Branch name for HEAD.
///
/// When HEAD is attached this is the branch it points to, with no search.
/// When detached, see [`resolve_branch`].
pub fn current_branch<G: CommitGraph + ?Sized>(graph: &G) -> Result<BranchName, DescribeError> {
    match graph.head()? {
        Head::Branch { name, .. } => Ok(name),
        Head::Detached { .. } => resolve_branch(graph),
    }
}

/// Infer the branch containing HEAD's commit.
///
/// Every local branch, then every remote-tracking branch, is tested with
/// one shared reachability memo targeted at HEAD. The first local match is
/// returned; failing that, the first remote match with its remote name
/// stripped (`origin/feature-x` becomes `feature-x`).
///
/// # Errors
///
/// - [`DescribeError::NotFound`] if no branch contains HEAD
/// - [`DescribeError::GraphAccess`] on any repository read failure
pub fn resolve_branch<G: CommitGraph + ?Sized>(graph: &G) -> Result<BranchName, DescribeError> {
    let head = graph.head()?;
    let mut memo = ReachabilityMemo::new(head.oid().clone());

    let mut candidates = graph.local_branches()?;
    candidates.extend(
        graph
            .remote_branches()?
            .into_iter()
            .filter(|b| !is_symbolic_remote_head(&b.name)),
    );

    let mut matches: Vec<BranchRef> = Vec::new();
    for branch in candidates {
        if memo.reaches(graph, &branch.oid)? {
            matches.push(branch);
        }
    }
    debug!(
        head = %head.oid().abbrev(),
        matches = ?matches.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
        memoized = memo.len(),
        "branches containing HEAD"
    );

    if let Some(local) = matches.iter().find(|b| b.kind == BranchKind::Local) {
        return Ok(local.name.clone());
    }

    if let Some(remote) = matches.first() {
        let remotes = graph.remotes()?;
        return Ok(strip_remote(&remote.name, &remotes));
    }

    Err(DescribeError::NotFound(format!(
        "no branch found in detached head at {}",
        head.oid().abbrev()
    )))
}

/// `origin/HEAD` and friends mirror another remote branch.
fn is_symbolic_remote_head(name: &BranchName) -> bool {
    name.as_str() == "HEAD" || name.as_str().ends_with("/HEAD")
}

/// Strip the longest configured remote name prefix from a remote branch.
///
/// The name is returned unchanged when no remote matches.
fn strip_remote(name: &BranchName, remotes: &[String]) -> BranchName {
    remotes
        .iter()
        .filter_map(|remote| {
            name.as_str()
                .strip_prefix(remote.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .map(|rest| (remote.len(), rest))
        })
        .max_by_key(|(len, _)| *len)
        .and_then(|(_, rest)| BranchName::new(rest).ok())
        .unwrap_or_else(|| name.clone())
}
