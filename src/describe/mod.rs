//! describe
//!
//! The describe engine: nearest tag, commit distance, and the branch that
//! contains a detached HEAD.
//!
//! # Modules
//!
//! - [`tags`] - Tag index keyed by effective target commit
//! - [`tiebreak`] - Semver choice among tags on one commit
//! - [`walk`] - The describe algorithm
//! - [`reach`] - Memoized ancestor reachability
//! - [`branch`] - Branch resolution for detached HEAD
//!
//! # Ownership
//!
//! Every structure built here ([`TagIndex`], [`ReachabilityMemo`]) belongs to
//! the single call that created it. Nothing is cached across calls, so the
//! engine can be invoked repeatedly against a changing repository.
//!
//! # Example
//!
//! ```
//! use tagver::describe::{describe, resolve_branch};
//! use tagver::git::memory::MemoryGraph;
//!
//! let mut graph = MemoryGraph::new();
//! let a = graph.commit(&[]);
//! let b = graph.commit(&[&a]);
//! let c = graph.commit(&[&b]);
//! graph.tag_lightweight("v1.0.0", &b);
//! graph.branch("main", &c);
//! graph.detach_head(&c);
//!
//! let result = describe(&graph, &c).unwrap();
//! assert_eq!(result.tag.as_deref(), Some("v1.0.0"));
//! assert_eq!(result.distance, 1);
//! assert_eq!(result.abbreviated_hash.as_deref(), Some(c.abbrev()));
//!
//! assert_eq!(resolve_branch(&graph).unwrap().as_str(), "main");
//! ```

pub mod branch;
pub mod reach;
pub mod tags;
pub mod tiebreak;
pub mod walk;

pub use branch::{current_branch, resolve_branch};
pub use reach::{reaches, ReachabilityMemo};
pub use tags::TagIndex;
pub use tiebreak::{parse_tag_version, pick_best};
pub use walk::{describe, describe_head, DescribeResult};

use thiserror::Error;

use crate::git::GitError;

/// Errors from the describe engine.
#[derive(Debug, Error)]
pub enum DescribeError {
    /// The repository could not be read.
    #[error(transparent)]
    GraphAccess(#[from] GitError),

    /// A well-formed query with no answer.
    #[error("{0}")]
    NotFound(String),
}
