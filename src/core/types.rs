//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Oid`] - Commit hash (SHA-1 or SHA-256 hex)
//! - [`BranchName`] - Validated local or remote-tracking branch short name
//!
//! # Validation
//!
//! These types enforce validity at construction time. A hash that is not
//! hex, or a branch name git would refuse, cannot be represented.
//!
//! # Examples
//!
//! ```
//! use tagver::core::types::{BranchName, Oid};
//!
//! let branch = BranchName::new("origin/feature-x").unwrap();
//! let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//! assert_eq!(oid.abbrev(), "abc123de");
//!
//! assert!(BranchName::new("invalid..name").is_err());
//! assert!(Oid::new("not-a-sha").is_err());
//! # let _ = branch;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// A git commit hash.
///
/// Hashes are normalized to lowercase, so equality is by value regardless of
/// how the hex was spelled on input.
///
/// # Example
///
/// ```
/// use tagver::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(7), "abc123d");
/// assert_eq!(oid.abbrev(), "abc123de");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Length of the abbreviated hash printed in version identifiers.
    pub const ABBREV_LEN: usize = 8;

    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a 40 or 64
    /// character hex string.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        Self::validate(&oid)?;
        Ok(Self(oid))
    }

    /// Get the first `len` characters, or the whole hash if `len` is larger.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Get the fixed-length abbreviation used in version identifiers.
    pub fn abbrev(&self) -> &str {
        self.short(Self::ABBREV_LEN)
    }

    fn validate(oid: &str) -> Result<(), TypeError> {
        // SHA-1 is 40 hex chars, SHA-256 is 64
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated branch short name.
///
/// Used for both local branches (`main`) and remote-tracking branches
/// (`origin/main`). Names must conform to git's refname rules
/// (see `git check-ref-format`):
/// - Cannot be empty or exactly `@`
/// - Cannot start with `.` or `-`
/// - Cannot end with `.lock` or `/`
/// - Cannot contain `..`, `@{`, `//`, or ASCII control characters
/// - Cannot contain spaces, `~`, `^`, `:`, `\`, `?`, `*`, `[`
///
/// # Example
///
/// ```
/// use tagver::core::types::BranchName;
///
/// let name = BranchName::new("feature/my-branch").unwrap();
/// assert_eq!(name.as_str(), "feature/my-branch");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        let reject = |why: &str| Err(TypeError::InvalidBranchName(why.to_string()));

        if name.is_empty() {
            return reject("branch name cannot be empty");
        }
        if name == "@" {
            return reject("branch name cannot be '@' (reserved)");
        }
        if name.starts_with('-') {
            return reject("branch name cannot start with '-'");
        }
        if name.ends_with('/') {
            return reject("branch name cannot end with '/'");
        }
        for seq in ["..", "@{", "//"] {
            if name.contains(seq) {
                return Err(TypeError::InvalidBranchName(format!(
                    "branch name cannot contain '{seq}'"
                )));
            }
        }

        const INVALID_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(TypeError::InvalidBranchName(format!(
                "branch name cannot contain '{c}'"
            )));
        }
        if name.chars().any(|c| c.is_ascii_control()) {
            return reject("branch name cannot contain control characters");
        }

        // Component rules also cover a leading '.' and a trailing ".lock"
        for component in name.split('/') {
            if component.starts_with('.') {
                return reject("path component cannot start with '.'");
            }
            if component.ends_with(".lock") {
                return reject("path component cannot end with '.lock'");
            }
        }

        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod oid {
        use super::*;

        #[test]
        fn valid_sha1() {
            assert!(Oid::new("abc123def4567890abc123def4567890abc12345").is_ok());
        }

        #[test]
        fn valid_sha256() {
            let sha256 = "a".repeat(64);
            assert!(Oid::new(sha256).is_ok());
        }

        #[test]
        fn normalizes_to_lowercase() {
            let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
            assert_eq!(oid, Oid::new("abc123def4567890abc123def4567890abc12345").unwrap());
        }

        #[test]
        fn abbrev_is_eight_chars() {
            let oid = Oid::new("5227b593aa0011223344556677889900aabbccdd").unwrap();
            assert_eq!(oid.abbrev(), "5227b593");
        }

        #[test]
        fn short_clamps_to_length() {
            let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
            assert_eq!(oid.short(100).len(), 40);
        }

        #[test]
        fn invalid_length() {
            assert!(matches!(Oid::new("abc123"), Err(TypeError::InvalidOid(_))));
        }

        #[test]
        fn non_hex_rejected() {
            let bad = "g".repeat(40);
            assert!(Oid::new(bad).is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
            let json = serde_json::to_string(&oid).unwrap();
            assert_eq!(json, "\"abc123def4567890abc123def4567890abc12345\"");
            let parsed: Oid = serde_json::from_str(&json).unwrap();
            assert_eq!(oid, parsed);
        }
    }

    mod branch_name {
        use super::*;

        #[test]
        fn valid_branch_names() {
            assert!(BranchName::new("main").is_ok());
            assert!(BranchName::new("origin/feature-x").is_ok());
            assert!(BranchName::new("user@feature").is_ok());
            assert!(BranchName::new("release/1.2").is_ok());
        }

        #[test]
        fn empty_name_rejected() {
            assert!(BranchName::new("").is_err());
        }

        #[test]
        fn reserved_at_rejected() {
            assert!(BranchName::new("@").is_err());
        }

        #[test]
        fn leading_dot_or_dash_rejected() {
            assert!(BranchName::new(".hidden").is_err());
            assert!(BranchName::new("-flag").is_err());
            assert!(BranchName::new("origin/.hidden").is_err());
        }

        #[test]
        fn lock_suffix_rejected() {
            assert!(BranchName::new("branch.lock").is_err());
            assert!(BranchName::new("branch.lock/child").is_err());
        }

        #[test]
        fn forbidden_sequences_rejected() {
            assert!(BranchName::new("a..b").is_err());
            assert!(BranchName::new("a@{b").is_err());
            assert!(BranchName::new("a//b").is_err());
            assert!(BranchName::new("trailing/").is_err());
        }

        #[test]
        fn special_chars_rejected() {
            for c in [' ', '~', '^', ':', '\\', '?', '*', '['] {
                let name = format!("bad{c}name");
                assert!(BranchName::new(&name).is_err(), "{name:?} accepted");
            }
        }

        #[test]
        fn control_chars_rejected() {
            assert!(BranchName::new("bad\tname").is_err());
        }
    }
}
