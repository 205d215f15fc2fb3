//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to the on-disk repository.
//! All reads flow through [`Git`], which implements [`CommitGraph`] and
//! normalizes `git2` errors into typed failure categories.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RefNotFound`]: Requested ref does not exist (including unborn HEAD)
//! - [`GitError::ObjectNotFound`]: A commit or tag object is missing
//! - [`GitError::Internal`]: Anything else reported by libgit2
//!
//! # Example
//!
//! ```ignore
//! use tagver::git::{CommitGraph, Git};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let head = git.head()?;
//! println!("HEAD is at {}", head.oid().abbrev());
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::graph::{BranchKind, BranchRef, CommitGraph, Head, LogIter, TagRef, TagTarget};
use crate::core::types::{BranchName, Oid, TypeError};

/// Errors from Git operations.
///
/// Every variant is fatal to the describe or resolve call that hit it;
/// repository reads are never retried.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Invalid branch name.
    #[error("invalid ref name: {message}")]
    InvalidRefName {
        /// Description of the problem
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound | git2::ErrorCode::UnbornBranch => {
                if context.starts_with("refs/") || context == "HEAD" || context.contains("ref") {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    fn internal(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidBranchName(msg) => GitError::InvalidRefName { message: msg },
        }
    }
}

fn to_oid(id: git2::Oid) -> Result<Oid, GitError> {
    Ok(Oid::new(id.to_string())?)
}

fn to_git2(oid: &Oid) -> Result<git2::Oid, GitError> {
    git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))
}

/// The Git interface.
///
/// Opens the repository once and answers every [`CommitGraph`] query
/// against it. Bare repositories are supported since nothing here needs a
/// working tree.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        Ok(Self { repo })
    }

    /// Get direct access to the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working tree root, if the repository has one.
    pub fn work_dir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Resolve any revision git understands (`HEAD~2`, `v1.0.0`, a hash)
    /// to the commit it names.
    ///
    /// Annotated tags are peeled to their commit.
    pub fn resolve_revision(&self, rev: &str) -> Result<Oid, GitError> {
        let object = self
            .repo
            .revparse_single(rev)
            .map_err(|e| GitError::from_git2(e, &format!("ref {rev}")))?;
        let commit = object
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, rev))?;

        to_oid(commit.id())
    }

    /// Classify the object a tag ref points at.
    fn tag_target(&self, id: git2::Oid) -> Result<TagTarget, GitError> {
        let object = self
            .repo
            .find_object(id, None)
            .map_err(|e| GitError::from_git2(e, &id.to_string()))?;

        if object.kind() != Some(git2::ObjectType::Tag) {
            return Ok(TagTarget::Lightweight(to_oid(id)?));
        }

        // ObjectType::Any peels until the object is no longer a tag
        let peeled = object
            .peel(git2::ObjectType::Any)
            .map_err(|e| GitError::from_git2(e, &id.to_string()))?;

        Ok(TagTarget::Annotated(to_oid(peeled.id())?))
    }

    fn branches_of(&self, kind: BranchKind) -> Result<Vec<BranchRef>, GitError> {
        let filter = match kind {
            BranchKind::Local => git2::BranchType::Local,
            BranchKind::Remote => git2::BranchType::Remote,
        };
        let branches = self
            .repo
            .branches(Some(filter))
            .map_err(GitError::internal)?;

        let mut result = Vec::new();
        for branch in branches {
            let (branch, _) = branch.map_err(GitError::internal)?;

            // Skip refs with non-UTF8 or invalid names
            let Some(name) = branch.name().ok().flatten() else {
                continue;
            };
            let Ok(name) = BranchName::new(name) else {
                continue;
            };

            let commit = branch
                .get()
                .peel_to_commit()
                .map_err(|e| GitError::from_git2(e, name.as_str()))?;

            result.push(BranchRef {
                name,
                oid: to_oid(commit.id())?,
                kind,
            });
        }

        Ok(result)
    }
}

impl CommitGraph for Git {
    fn tags(&self) -> Result<Vec<TagRef>, GitError> {
        let refs = self
            .repo
            .references_glob("refs/tags/*")
            .map_err(GitError::internal)?;

        let mut tags = Vec::new();
        for reference in refs {
            let reference = reference.map_err(GitError::internal)?;

            let Some(full_name) = reference.name() else {
                continue;
            };
            let name = full_name
                .strip_prefix("refs/tags/")
                .unwrap_or(full_name)
                .to_string();

            let resolved = reference
                .resolve()
                .map_err(|e| GitError::from_git2(e, full_name))?;
            let Some(id) = resolved.target() else {
                continue;
            };

            tags.push(TagRef {
                target: self.tag_target(id)?,
                name,
            });
        }

        Ok(tags)
    }

    fn local_branches(&self) -> Result<Vec<BranchRef>, GitError> {
        self.branches_of(BranchKind::Local)
    }

    fn remote_branches(&self) -> Result<Vec<BranchRef>, GitError> {
        self.branches_of(BranchKind::Remote)
    }

    fn remotes(&self) -> Result<Vec<String>, GitError> {
        let remotes = self.repo.remotes().map_err(GitError::internal)?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    fn head(&self) -> Result<Head, GitError> {
        let head = self
            .repo
            .head()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;

        let oid = to_oid(
            head.peel_to_commit()
                .map_err(|e| GitError::from_git2(e, "HEAD"))?
                .id(),
        )?;

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(Head::Branch {
                    name: BranchName::new(name)?,
                    oid,
                });
            }
        }

        Ok(Head::Detached { oid })
    }

    fn log<'a>(&'a self, from: &Oid) -> Result<LogIter<'a>, GitError> {
        let mut revwalk = self.repo.revwalk().map_err(GitError::internal)?;
        revwalk
            .set_sorting(git2::Sort::TIME)
            .map_err(GitError::internal)?;
        revwalk
            .push(to_git2(from)?)
            .map_err(|e| GitError::from_git2(e, from.as_str()))?;

        Ok(Box::new(revwalk.map(|step| {
            step.map_err(GitError::internal).and_then(to_oid)
        })))
    }

    fn parents(&self, oid: &Oid) -> Result<Vec<Oid>, GitError> {
        let commit = self
            .repo
            .find_commit(to_git2(oid)?)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        commit.parent_ids().map(to_oid).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod git_error {
        use super::*;

        #[test]
        fn error_display_formatting() {
            let err = GitError::ObjectNotFound {
                oid: "abc123".to_string(),
            };
            assert_eq!(err.to_string(), "object not found: abc123");

            let err = GitError::NotARepo {
                path: PathBuf::from("/tmp/nowhere"),
            };
            assert!(err.to_string().contains("/tmp/nowhere"));
        }

        #[test]
        fn type_errors_convert() {
            let err: GitError = TypeError::InvalidOid("short".into()).into();
            assert!(matches!(err, GitError::InvalidOid { .. }));

            let err: GitError = TypeError::InvalidBranchName("a..b".into()).into();
            assert!(matches!(err, GitError::InvalidRefName { .. }));
        }

        #[test]
        fn not_found_maps_by_context() {
            let err = git2::Error::new(
                git2::ErrorCode::NotFound,
                git2::ErrorClass::Reference,
                "missing",
            );
            assert!(matches!(
                GitError::from_git2(err, "HEAD"),
                GitError::RefNotFound { .. }
            ));

            let err = git2::Error::new(
                git2::ErrorCode::NotFound,
                git2::ErrorClass::Odb,
                "missing",
            );
            assert!(matches!(
                GitError::from_git2(err, "abc123"),
                GitError::ObjectNotFound { .. }
            ));
        }

        #[test]
        fn unborn_head_is_ref_not_found() {
            let err = git2::Error::new(
                git2::ErrorCode::UnbornBranch,
                git2::ErrorClass::Reference,
                "unborn",
            );
            assert!(matches!(
                GitError::from_git2(err, "HEAD"),
                GitError::RefNotFound { .. }
            ));
        }
    }
}
