//! describe::tiebreak
//!
//! Choosing one tag when several point at the same commit.
//!
//! Tag names are compared as semantic versions. Names that are not versions
//! (`latest`, `stable`) are left out of the comparison instead of failing,
//! so decoration tags can share a commit with release tags.

use std::cmp::Ordering;

use semver::Version;
use tracing::debug;

use crate::git::TagRef;

/// Parse a tag name as a semantic version.
///
/// Accepts the shapes release tags are commonly written in: an optional
/// leading `v`/`V`, and a version core of one to three numeric components
/// (missing components are zero).
///
/// # Example
///
/// ```
/// use semver::Version;
/// use tagver::describe::parse_tag_version;
///
/// assert_eq!(parse_tag_version("v1.2.3"), Some(Version::new(1, 2, 3)));
/// assert_eq!(parse_tag_version("1.10"), Some(Version::new(1, 10, 0)));
/// assert_eq!(parse_tag_version("v2-rc1").unwrap().pre.as_str(), "rc1");
/// assert_eq!(parse_tag_version("latest"), None);
/// ```
pub fn parse_tag_version(name: &str) -> Option<Version> {
    let raw = name.strip_prefix(['v', 'V']).unwrap_or(name);
    if let Ok(version) = Version::parse(raw) {
        return Some(version);
    }

    let split = raw.find(['-', '+']).unwrap_or(raw.len());
    let (core, suffix) = raw.split_at(split);
    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 2
        || !parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    let mut padded = parts.join(".");
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    Version::parse(&padded).ok()
}

/// Semver precedence: major, minor, patch, then pre-release.
///
/// Build metadata does not take part.
fn precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

/// Pick the best tag among those pointing at one commit.
///
/// A single candidate is returned as is, without parsing. Otherwise the
/// candidate with the highest semver precedence wins; equal precedence is
/// settled by the lexicographically greatest name. When no name parses as a
/// version, the lexicographically greatest name is chosen.
///
/// Returns `None` only for an empty slice.
///
/// # Example
///
/// ```
/// use tagver::core::types::Oid;
/// use tagver::describe::pick_best;
/// use tagver::git::TagRef;
///
/// let commit = Oid::new("a".repeat(40)).unwrap();
/// let tags = vec![
///     TagRef::lightweight("v1.2.0", commit.clone()),
///     TagRef::lightweight("v1.10.0", commit.clone()),
///     TagRef::lightweight("latest", commit),
/// ];
/// assert_eq!(pick_best(&tags).unwrap().name, "v1.10.0");
/// ```
pub fn pick_best(candidates: &[TagRef]) -> Option<&TagRef> {
    match candidates {
        [] => None,
        [only] => Some(only),
        _ => {
            let best = candidates
                .iter()
                .filter_map(|tag| parse_tag_version(&tag.name).map(|v| (v, tag)))
                .max_by(|(va, a), (vb, b)| precedence(va, vb).then_with(|| a.name.cmp(&b.name)));

            if let Some((version, tag)) = best {
                debug!(tag = %tag.name, %version, candidates = candidates.len(), "tie-break");
                return Some(tag);
            }

            let fallback = candidates.iter().max_by(|a, b| a.name.cmp(&b.name));
            if let Some(tag) = fallback {
                debug!(tag = %tag.name, "no candidate parses as semver, picking greatest name");
            }
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Oid;

    fn tags(names: &[&str]) -> Vec<TagRef> {
        let commit = Oid::new("b".repeat(40)).unwrap();
        names
            .iter()
            .map(|n| TagRef::lightweight(*n, commit.clone()))
            .collect()
    }

    fn best(names: &[&str]) -> Option<String> {
        pick_best(&tags(names)).map(|t| t.name.clone())
    }

    mod parse {
        use super::*;

        #[test]
        fn with_and_without_prefix() {
            assert_eq!(parse_tag_version("v1.2.3"), Some(Version::new(1, 2, 3)));
            assert_eq!(parse_tag_version("V1.2.3"), Some(Version::new(1, 2, 3)));
            assert_eq!(parse_tag_version("1.2.3"), Some(Version::new(1, 2, 3)));
        }

        #[test]
        fn short_cores_are_padded() {
            assert_eq!(parse_tag_version("v1"), Some(Version::new(1, 0, 0)));
            assert_eq!(parse_tag_version("1.4"), Some(Version::new(1, 4, 0)));
            let v = parse_tag_version("1.4+build.7").unwrap();
            assert_eq!(v.build.as_str(), "build.7");
        }

        #[test]
        fn prerelease_kept() {
            let v = parse_tag_version("v1.0.0-rc1").unwrap();
            assert_eq!(v.pre.as_str(), "rc1");
        }

        #[test]
        fn non_versions_rejected() {
            for name in ["latest", "stable", "v", "", "1.2.3.4", "v1..2", "release-1.0"] {
                assert_eq!(parse_tag_version(name), None, "{name:?} parsed");
            }
        }
    }

    #[test]
    fn empty_is_none() {
        assert!(pick_best(&[]).is_none());
    }

    #[test]
    fn single_candidate_returned_without_parsing() {
        assert_eq!(best(&["not-a-version"]).as_deref(), Some("not-a-version"));
    }

    #[test]
    fn numeric_not_lexicographic() {
        assert_eq!(best(&["v1.2.0", "v1.10.0"]).as_deref(), Some("v1.10.0"));
        assert_eq!(best(&["v1.10.0", "v1.2.0"]).as_deref(), Some("v1.10.0"));
        assert_eq!(best(&["v0.0.9", "v0.0.10"]).as_deref(), Some("v0.0.10"));
    }

    #[test]
    fn release_beats_prerelease() {
        assert_eq!(best(&["v1.0.0-rc1", "v1.0.0"]).as_deref(), Some("v1.0.0"));
        assert_eq!(best(&["v1.0.0", "v1.0.0-rc1"]).as_deref(), Some("v1.0.0"));
    }

    #[test]
    fn prerelease_ordering() {
        assert_eq!(
            best(&["v2.0.0-alpha", "v2.0.0-beta", "v2.0.0-alpha.1"]).as_deref(),
            Some("v2.0.0-beta")
        );
    }

    #[test]
    fn decoration_tags_ignored() {
        assert_eq!(best(&["latest", "v0.3.0", "stable"]).as_deref(), Some("v0.3.0"));
    }

    #[test]
    fn no_parseable_names_is_deterministic() {
        assert_eq!(best(&["latest", "stable", "edge"]).as_deref(), Some("stable"));
        assert_eq!(best(&["stable", "edge", "latest"]).as_deref(), Some("stable"));
    }

    #[test]
    fn equal_precedence_settled_by_name() {
        assert_eq!(best(&["1.0.0", "v1.0.0"]).as_deref(), Some("v1.0.0"));
        assert_eq!(best(&["v1.0.0", "1.0.0"]).as_deref(), Some("v1.0.0"));
    }
}
