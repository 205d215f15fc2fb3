//! git::graph
//!
//! The read-only commit graph seam.
//!
//! Everything the describe engine needs from a repository is expressed by
//! the [`CommitGraph`] trait: tag and branch enumeration, HEAD, remotes,
//! a committer-time ordered log, and parent lookup. [`super::Git`] implements
//! it over `git2`; [`super::memory::MemoryGraph`] implements it in memory.

use super::GitError;
use crate::core::types::{BranchName, Oid};

/// A commit iterator in reverse-chronological committer-time order.
pub type LogIter<'a> = Box<dyn Iterator<Item = Result<Oid, GitError>> + 'a>;

/// What a tag reference effectively points at.
///
/// Classified once per tag when the accessor enumerates tags, so nothing
/// downstream has to tell lightweight and annotated tags apart by probing
/// the object database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagTarget {
    /// The reference hash is the commit itself.
    Lightweight(Oid),
    /// The reference points at a tag object; this is the object it tags,
    /// peeled through any chain of tag objects.
    Annotated(Oid),
}

impl TagTarget {
    /// The commit the tag effectively points at.
    pub fn commit(&self) -> &Oid {
        match self {
            TagTarget::Lightweight(oid) | TagTarget::Annotated(oid) => oid,
        }
    }

    /// Check if this is an annotated tag.
    pub fn is_annotated(&self) -> bool {
        matches!(self, TagTarget::Annotated(_))
    }
}

/// A tag reference: short name (`v1.2.0`) and its effective target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Short tag name, without `refs/tags/`
    pub name: String,
    /// Effective target
    pub target: TagTarget,
}

impl TagRef {
    /// Create a lightweight tag reference.
    pub fn lightweight(name: impl Into<String>, commit: Oid) -> Self {
        Self {
            name: name.into(),
            target: TagTarget::Lightweight(commit),
        }
    }

    /// Create an annotated tag reference.
    pub fn annotated(name: impl Into<String>, commit: Oid) -> Self {
        Self {
            name: name.into(),
            target: TagTarget::Annotated(commit),
        }
    }

    /// The commit this tag effectively points at.
    pub fn commit(&self) -> &Oid {
        self.target.commit()
    }
}

/// Whether a branch is local or remote-tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// `refs/heads/*`
    Local,
    /// `refs/remotes/*`
    Remote,
}

/// A branch tip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Short name (`main`, `origin/main`)
    pub name: BranchName,
    /// Commit at the tip
    pub oid: Oid,
    /// Local or remote-tracking
    pub kind: BranchKind,
}

/// The current HEAD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD is a symbolic reference to a local branch.
    Branch {
        /// The branch HEAD points to
        name: BranchName,
        /// Commit at the branch tip
        oid: Oid,
    },
    /// HEAD points directly at a commit.
    Detached {
        /// The checked out commit
        oid: Oid,
    },
}

impl Head {
    /// The commit HEAD resolves to.
    pub fn oid(&self) -> &Oid {
        match self {
            Head::Branch { oid, .. } | Head::Detached { oid } => oid,
        }
    }

    /// Check if HEAD is detached.
    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached { .. })
    }
}

/// Read-only access to a repository's commit graph.
///
/// Implementations perform their own I/O synchronously. No method mutates
/// the repository.
pub trait CommitGraph {
    /// Every tag reference, classified as lightweight or annotated.
    fn tags(&self) -> Result<Vec<TagRef>, GitError>;

    /// Every local branch, in enumeration order.
    fn local_branches(&self) -> Result<Vec<BranchRef>, GitError>;

    /// Every remote-tracking branch, in enumeration order.
    fn remote_branches(&self) -> Result<Vec<BranchRef>, GitError>;

    /// Names of the configured remotes.
    fn remotes(&self) -> Result<Vec<String>, GitError>;

    /// The current HEAD.
    ///
    /// Fails with [`GitError::RefNotFound`] when HEAD is unborn.
    fn head(&self) -> Result<Head, GitError>;

    /// Walk ancestry from `from` (inclusive), newest committer time first.
    fn log<'a>(&'a self, from: &Oid) -> Result<LogIter<'a>, GitError>;

    /// Parent hashes of a commit. Empty for a root commit.
    fn parents(&self, oid: &Oid) -> Result<Vec<Oid>, GitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(c: char) -> Oid {
        Oid::new(c.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn tag_target_commit() {
        assert_eq!(TagTarget::Lightweight(oid('a')).commit(), &oid('a'));
        assert_eq!(TagTarget::Annotated(oid('b')).commit(), &oid('b'));
        assert!(TagTarget::Annotated(oid('b')).is_annotated());
        assert!(!TagTarget::Lightweight(oid('a')).is_annotated());
    }

    #[test]
    fn head_accessors() {
        let attached = Head::Branch {
            name: BranchName::new("main").unwrap(),
            oid: oid('c'),
        };
        assert_eq!(attached.oid(), &oid('c'));
        assert!(!attached.is_detached());

        let detached = Head::Detached { oid: oid('d') };
        assert!(detached.is_detached());
    }
}
