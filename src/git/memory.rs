//! git::memory
//!
//! In-memory commit graph for deterministic testing.
//!
//! # Design
//!
//! [`MemoryGraph`] implements [`CommitGraph`] over plain collections. Commit
//! hashes are generated from a counter so that every commit has a distinct
//! 8-character abbreviation, and committer times increase with creation
//! order unless given explicitly. Objects can be marked broken to exercise
//! error propagation.
//!
//! # Example
//!
//! ```
//! use tagver::git::memory::MemoryGraph;
//! use tagver::git::CommitGraph;
//!
//! let mut graph = MemoryGraph::new();
//! let a = graph.commit(&[]);
//! let b = graph.commit(&[&a]);
//! graph.tag_annotated("v1.0.0", &a);
//! graph.set_head_branch("main", &b);
//!
//! assert_eq!(graph.parents(&b).unwrap(), vec![a]);
//! assert_eq!(graph.tags().unwrap().len(), 1);
//! ```

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::graph::{BranchKind, BranchRef, CommitGraph, Head, LogIter, TagRef};
use super::GitError;
use crate::core::types::{BranchName, Oid};

#[derive(Debug, Clone)]
struct MemoryCommit {
    parents: Vec<Oid>,
    time: i64,
}

/// An in-memory repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    commits: HashMap<Oid, MemoryCommit>,
    tags: Vec<TagRef>,
    branches: Vec<BranchRef>,
    remotes: Vec<String>,
    head: Option<Head>,
    broken: HashSet<Oid>,
    counter: u64,
}

impl MemoryGraph {
    /// Create an empty graph with an unborn HEAD.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with the given parents; its committer time is one tick
    /// after the previous commit.
    pub fn commit(&mut self, parents: &[&Oid]) -> Oid {
        let time = self.counter as i64 + 1;
        self.commit_at(parents, time)
    }

    /// Add a commit with an explicit committer time.
    pub fn commit_at(&mut self, parents: &[&Oid], time: i64) -> Oid {
        self.counter += 1;
        let oid = self.next_oid();
        self.commits.insert(
            oid.clone(),
            MemoryCommit {
                parents: parents.iter().map(|p| (*p).clone()).collect(),
                time,
            },
        );
        oid
    }

    /// Add a linear chain of `len` commits on top of `parent` and return
    /// them oldest first.
    pub fn chain(&mut self, parent: Option<&Oid>, len: usize) -> Vec<Oid> {
        let mut out: Vec<Oid> = Vec::with_capacity(len);
        for _ in 0..len {
            let tip = out.last().cloned().or_else(|| parent.cloned());
            let oid = match tip {
                Some(p) => self.commit(&[&p]),
                None => self.commit(&[]),
            };
            out.push(oid);
        }
        out
    }

    /// Tag a commit with a lightweight tag.
    pub fn tag_lightweight(&mut self, name: &str, commit: &Oid) {
        self.tags.push(TagRef::lightweight(name, commit.clone()));
    }

    /// Tag a commit with an annotated tag.
    pub fn tag_annotated(&mut self, name: &str, commit: &Oid) {
        self.tags.push(TagRef::annotated(name, commit.clone()));
    }

    /// Create or move a local branch.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid branch name.
    pub fn branch(&mut self, name: &str, tip: &Oid) {
        self.put_branch(name, tip, BranchKind::Local);
    }

    /// Create or move a remote-tracking branch (`origin/main`).
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid branch name.
    pub fn remote_branch(&mut self, name: &str, tip: &Oid) {
        self.put_branch(name, tip, BranchKind::Remote);
    }

    /// Configure a remote by name.
    pub fn add_remote(&mut self, name: &str) {
        self.remotes.push(name.to_string());
    }

    /// Point HEAD at a local branch, creating or moving it to `tip`.
    pub fn set_head_branch(&mut self, name: &str, tip: &Oid) {
        self.branch(name, tip);
        self.head = Some(Head::Branch {
            name: valid_branch(name),
            oid: tip.clone(),
        });
    }

    /// Detach HEAD at a commit.
    pub fn detach_head(&mut self, oid: &Oid) {
        self.head = Some(Head::Detached { oid: oid.clone() });
    }

    /// Make every load of this commit fail with [`GitError::ObjectNotFound`].
    pub fn break_commit(&mut self, oid: &Oid) {
        self.broken.insert(oid.clone());
    }

    fn put_branch(&mut self, name: &str, tip: &Oid, kind: BranchKind) {
        let name = valid_branch(name);
        self.branches.retain(|b| b.name != name);
        self.branches.push(BranchRef {
            name,
            oid: tip.clone(),
            kind,
        });
    }

    fn next_oid(&self) -> Oid {
        // Multiplying by an odd constant is a bijection on u32, so the
        // 8-character prefixes stay distinct
        let prefix = (self.counter as u32).wrapping_mul(0x9E37_79B1);
        let hex = format!("{:08x}{:032x}", prefix, self.counter);
        Oid::new(hex).unwrap_or_else(|_| unreachable!("generated hex is always valid"))
    }

    fn load(&self, oid: &Oid) -> Result<&MemoryCommit, GitError> {
        if self.broken.contains(oid) {
            return Err(GitError::ObjectNotFound {
                oid: oid.to_string(),
            });
        }
        self.commits
            .get(oid)
            .ok_or_else(|| GitError::ObjectNotFound {
                oid: oid.to_string(),
            })
    }

    fn branches_of(&self, kind: BranchKind) -> Vec<BranchRef> {
        self.branches
            .iter()
            .filter(|b| b.kind == kind)
            .cloned()
            .collect()
    }
}

fn valid_branch(name: &str) -> BranchName {
    match BranchName::new(name) {
        Ok(name) => name,
        Err(e) => panic!("MemoryGraph: {e}"),
    }
}

/// Committer-time ordered walk over a [`MemoryGraph`].
///
/// Ties on time are broken by hash so the order is fully deterministic.
struct MemoryLog<'a> {
    graph: &'a MemoryGraph,
    queue: BinaryHeap<(i64, Reverse<Oid>)>,
    seen: HashSet<Oid>,
}

impl Iterator for MemoryLog<'_> {
    type Item = Result<Oid, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, Reverse(oid)) = self.queue.pop()?;
        let commit = match self.graph.load(&oid) {
            Ok(commit) => commit,
            Err(e) => {
                self.queue.clear();
                return Some(Err(e));
            }
        };

        for parent in &commit.parents {
            if self.seen.insert(parent.clone()) {
                let time = self.graph.commits.get(parent).map_or(i64::MIN, |c| c.time);
                self.queue.push((time, Reverse(parent.clone())));
            }
        }

        Some(Ok(oid))
    }
}

impl CommitGraph for MemoryGraph {
    fn tags(&self) -> Result<Vec<TagRef>, GitError> {
        Ok(self.tags.clone())
    }

    fn local_branches(&self) -> Result<Vec<BranchRef>, GitError> {
        Ok(self.branches_of(BranchKind::Local))
    }

    fn remote_branches(&self) -> Result<Vec<BranchRef>, GitError> {
        Ok(self.branches_of(BranchKind::Remote))
    }

    fn remotes(&self) -> Result<Vec<String>, GitError> {
        Ok(self.remotes.clone())
    }

    fn head(&self) -> Result<Head, GitError> {
        self.head.clone().ok_or_else(|| GitError::RefNotFound {
            refname: "HEAD".to_string(),
        })
    }

    fn log<'a>(&'a self, from: &Oid) -> Result<LogIter<'a>, GitError> {
        let start = self.load(from)?;

        let mut queue = BinaryHeap::new();
        queue.push((start.time, Reverse(from.clone())));
        let mut seen = HashSet::new();
        seen.insert(from.clone());

        Ok(Box::new(MemoryLog {
            graph: self,
            queue,
            seen,
        }))
    }

    fn parents(&self, oid: &Oid) -> Result<Vec<Oid>, GitError> {
        Ok(self.load(oid)?.parents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(graph: &MemoryGraph, from: &Oid) -> Vec<Oid> {
        graph
            .log(from)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn generated_hashes_have_distinct_prefixes() {
        let mut graph = MemoryGraph::new();
        let commits = graph.chain(None, 500);
        let prefixes: HashSet<&str> = commits.iter().map(|c| c.abbrev()).collect();
        assert_eq!(prefixes.len(), 500);
    }

    #[test]
    fn log_is_newest_first() {
        let mut graph = MemoryGraph::new();
        let commits = graph.chain(None, 4);
        let mut expected = commits.clone();
        expected.reverse();
        assert_eq!(walk(&graph, &commits[3]), expected);
    }

    #[test]
    fn log_interleaves_merge_sides_by_time() {
        let mut graph = MemoryGraph::new();
        let root = graph.commit_at(&[], 1);
        let left = graph.commit_at(&[&root], 2);
        let right = graph.commit_at(&[&root], 3);
        let merge = graph.commit_at(&[&left, &right], 4);

        assert_eq!(walk(&graph, &merge), vec![merge, right, left, root]);
    }

    #[test]
    fn log_visits_shared_ancestor_once() {
        let mut graph = MemoryGraph::new();
        let root = graph.commit(&[]);
        let a = graph.commit(&[&root]);
        let b = graph.commit(&[&root]);
        let merge = graph.commit(&[&a, &b]);

        let visited = walk(&graph, &merge);
        assert_eq!(visited.len(), 4);
        assert_eq!(visited.last(), Some(&root));
    }

    #[test]
    fn broken_commit_fails_loads() {
        let mut graph = MemoryGraph::new();
        let a = graph.commit(&[]);
        let b = graph.commit(&[&a]);
        graph.break_commit(&a);

        assert!(matches!(
            graph.parents(&a),
            Err(GitError::ObjectNotFound { .. })
        ));
        let steps: Vec<_> = graph.log(&b).unwrap().collect();
        assert!(steps[0].is_ok());
        assert!(steps[1].is_err());
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn unborn_head() {
        let graph = MemoryGraph::new();
        assert!(matches!(graph.head(), Err(GitError::RefNotFound { .. })));
    }

    #[test]
    fn moving_a_branch_replaces_it() {
        let mut graph = MemoryGraph::new();
        let a = graph.commit(&[]);
        let b = graph.commit(&[&a]);
        graph.branch("main", &a);
        graph.branch("main", &b);

        let branches = graph.local_branches().unwrap();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].oid, b);
    }
}
