//! describe::reach
//!
//! Memoized ancestor reachability over the parent graph.
//!
//! # Design
//!
//! [`ReachabilityMemo`] is bound to a single target commit at construction,
//! so answers recorded for one target can never leak into a query about
//! another. Probing many branch tips against the same target shares the memo,
//! which is what keeps overlapping histories cheap: once a commit is known
//! to reach (or not reach) the target, no other tip re-walks past it.
//!
//! The search is an explicit-stack depth-first traversal. History depth
//! costs heap, never call stack.

use std::collections::HashMap;

use crate::core::types::Oid;
use crate::git::{CommitGraph, GitError};

/// Answers for "can this commit reach the target?", for one target.
#[derive(Debug, Clone)]
pub struct ReachabilityMemo {
    target: Oid,
    known: HashMap<Oid, bool>,
}

/// A commit under exploration and the next parent to try.
struct Frame {
    oid: Oid,
    parents: Vec<Oid>,
    next: usize,
}

impl ReachabilityMemo {
    /// Create an empty memo for `target`.
    pub fn new(target: Oid) -> Self {
        Self {
            target,
            known: HashMap::new(),
        }
    }

    /// The commit every query in this memo is about.
    pub fn target(&self) -> &Oid {
        &self.target
    }

    /// Number of commits with a recorded answer.
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Check if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Recorded answer for `oid`, if it was visited.
    pub fn get(&self, oid: &Oid) -> Option<bool> {
        self.known.get(oid).copied()
    }

    /// Check if the target is `start` or one of its ancestors.
    ///
    /// # Errors
    ///
    /// Fails if a commit on the explored paths cannot be loaded. Answers
    /// recorded before the failure remain valid.
    pub fn reaches<G: CommitGraph + ?Sized>(
        &mut self,
        graph: &G,
        start: &Oid,
    ) -> Result<bool, GitError> {
        if *start == self.target {
            self.known.insert(start.clone(), true);
            return Ok(true);
        }
        if let Some(answer) = self.get(start) {
            return Ok(answer);
        }

        let mut stack = vec![Frame {
            parents: graph.parents(start)?,
            oid: start.clone(),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(parent) = frame.parents.get(frame.next).cloned() else {
                // Every parent explored without finding the target
                self.known.insert(frame.oid.clone(), false);
                stack.pop();
                continue;
            };
            frame.next += 1;

            let found = parent == self.target || self.get(&parent) == Some(true);
            if found {
                // Every frame on the stack is a descendant of `parent`
                self.known.insert(parent, true);
                for frame in stack.drain(..) {
                    self.known.insert(frame.oid, true);
                }
                return Ok(true);
            }
            if self.known.contains_key(&parent) {
                continue;
            }

            let parents = graph.parents(&parent)?;
            stack.push(Frame {
                oid: parent,
                parents,
                next: 0,
            });
        }

        Ok(false)
    }
}

/// Check if `target` is `start` or one of its ancestors, with a fresh memo.
///
/// # Example
///
/// ```
/// use tagver::describe::reaches;
/// use tagver::git::memory::MemoryGraph;
///
/// let mut graph = MemoryGraph::new();
/// let a = graph.commit(&[]);
/// let b = graph.commit(&[&a]);
///
/// assert!(reaches(&graph, &b, &a).unwrap());
/// assert!(!reaches(&graph, &a, &b).unwrap());
/// assert!(reaches(&graph, &a, &a).unwrap());
/// ```
pub fn reaches<G: CommitGraph + ?Sized>(
    graph: &G,
    start: &Oid,
    target: &Oid,
) -> Result<bool, GitError> {
    ReachabilityMemo::new(target.clone()).reaches(graph, start)
}
