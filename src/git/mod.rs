//! git
//!
//! Single interface for all repository reads.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. The describe engine talks to
//! the [`CommitGraph`] trait; [`Git`] implements it with the `git2` crate and
//! is the only code that imports `git2`. [`memory::MemoryGraph`] implements
//! the same trait in memory.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Tag enumeration, with annotated tags dereferenced to their commit
//! - Local and remote-tracking branch enumeration
//! - HEAD resolution (attached or detached)
//! - Committer-time ordered history walks and parent lookup
//!
//! # Invariants
//!
//! - Nothing here writes to the repository
//! - All operations return strong types (Oid, BranchName)
//!
//! # Example
//!
//! ```ignore
//! use tagver::git::{CommitGraph, Git};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for tag in git.tags()? {
//!     println!("{} -> {}", tag.name, tag.commit().abbrev());
//! }
//! ```

mod graph;
mod interface;
pub mod memory;

pub use graph::{BranchKind, BranchRef, CommitGraph, Head, LogIter, TagRef, TagTarget};
pub use interface::{Git, GitError};
