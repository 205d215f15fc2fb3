//! ci
//!
//! Version information supplied by the CI environment.
//!
//! # Overview
//!
//! CI checkouts are usually shallow and detached, so the branch and tag a
//! pipeline runs for are more reliably read from the variables the CI
//! system sets than inferred from the repository.
//!
//! Supported providers:
//! - **GitHub Actions** (`GITHUB_ACTIONS`): `GITHUB_SHA`, `GITHUB_REF_TYPE`,
//!   `GITHUB_REF_NAME`, and `GITHUB_HEAD_REF` for pull requests
//! - **GitLab CI** (`GITLAB_CI`): `CI_COMMIT_SHA`, `CI_COMMIT_TAG`,
//!   `CI_COMMIT_BRANCH`, `CI_MERGE_REQUEST_SOURCE_BRANCH_NAME`,
//!   `CI_EXTERNAL_PULL_REQUEST_SOURCE_BRANCH_NAME`
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use tagver::ci::{refs_from_env, Provider};
//!
//! let env: HashMap<String, String> = [
//!     ("CI", "true"),
//!     ("GITLAB_CI", "true"),
//!     ("CI_COMMIT_SHA", "5227b593aa0011223344556677889900aabbccdd"),
//!     ("CI_COMMIT_TAG", "v1.2.0"),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_string(), v.to_string()))
//! .collect();
//!
//! let refs = refs_from_env(&env).unwrap().unwrap();
//! assert_eq!(refs.provider, Provider::GitLab);
//! assert_eq!(refs.tag.as_deref(), Some("v1.2.0"));
//! assert_eq!(refs.branch, None);
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::core::env::Env;

/// Errors from reading the CI environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CiError {
    /// The provider was detected but a variable it always sets is absent.
    #[error("{provider} environment is missing {var}")]
    MissingVar {
        /// The detected provider
        provider: Provider,
        /// The absent variable
        var: &'static str,
    },
}

/// A supported CI system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    /// GitHub Actions
    GitHub,
    /// GitLab CI/CD
    GitLab,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::GitHub => write!(f, "GitHub Actions"),
            Provider::GitLab => write!(f, "GitLab CI"),
        }
    }
}

/// Refs reported by the CI system. Any field may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CiRefs {
    /// Which CI system reported them
    pub provider: Provider,
    /// Full commit hash being built
    pub commit: Option<String>,
    /// Branch being built
    pub branch: Option<String>,
    /// Tag being built
    pub tag: Option<String>,
}

/// Check if running under any CI system (`CI` is set).
pub fn is_ci(env: &impl Env) -> bool {
    env.is_set("CI")
}

/// Detect a supported provider.
pub fn detect(env: &impl Env) -> Option<Provider> {
    if env.is_set("GITHUB_ACTIONS") {
        Some(Provider::GitHub)
    } else if env.is_set("GITLAB_CI") {
        Some(Provider::GitLab)
    } else {
        None
    }
}

/// Read refs from the CI environment.
///
/// Returns `Ok(None)` when not in CI or the provider is unsupported.
///
/// # Errors
///
/// [`CiError::MissingVar`] when GitHub Actions is detected without
/// `GITHUB_REF_TYPE`.
pub fn refs_from_env(env: &impl Env) -> Result<Option<CiRefs>, CiError> {
    if !is_ci(env) {
        return Ok(None);
    }
    match detect(env) {
        Some(Provider::GitHub) => github(env).map(Some),
        Some(Provider::GitLab) => Ok(Some(gitlab(env))),
        None => Ok(None),
    }
}

fn github(env: &impl Env) -> Result<CiRefs, CiError> {
    let ref_type = env.var("GITHUB_REF_TYPE").ok_or(CiError::MissingVar {
        provider: Provider::GitHub,
        var: "GITHUB_REF_TYPE",
    })?;

    let mut refs = CiRefs {
        provider: Provider::GitHub,
        commit: env.non_empty("GITHUB_SHA"),
        branch: None,
        tag: None,
    };

    // Pull request runs report "<n>/merge" as the ref name
    if let Some(head_ref) = env.non_empty("GITHUB_HEAD_REF") {
        refs.branch = Some(head_ref);
        return Ok(refs);
    }

    match ref_type.as_str() {
        "branch" => refs.branch = env.non_empty("GITHUB_REF_NAME"),
        "tag" => refs.tag = env.non_empty("GITHUB_REF_NAME"),
        _ => {}
    }
    Ok(refs)
}

fn gitlab(env: &impl Env) -> CiRefs {
    let commit = env.non_empty("CI_COMMIT_SHA");

    if let Some(tag) = env.non_empty("CI_COMMIT_TAG") {
        return CiRefs {
            provider: Provider::GitLab,
            commit,
            branch: None,
            tag: Some(tag),
        };
    }

    let branch = [
        "CI_COMMIT_BRANCH",
        "CI_MERGE_REQUEST_SOURCE_BRANCH_NAME",
        "CI_EXTERNAL_PULL_REQUEST_SOURCE_BRANCH_NAME",
    ]
    .iter()
    .find_map(|key| env.non_empty(key));

    CiRefs {
        provider: Provider::GitLab,
        commit,
        branch,
        tag: None,
    }
}
