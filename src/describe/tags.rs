//! describe::tags
//!
//! Index of tags by the commit they effectively point at.

use std::collections::HashMap;

use tracing::debug;

use crate::core::types::Oid;
use crate::git::{CommitGraph, GitError, TagRef};

/// Every tag in the repository, bucketed by effective target commit.
///
/// Annotated tags are keyed by the commit they tag, never by the tag
/// object's own hash. A commit may carry several tags, e.g. a lightweight
/// and an annotated tag cut at the same point.
#[derive(Debug, Default)]
pub struct TagIndex {
    buckets: HashMap<Oid, Vec<TagRef>>,
}

impl TagIndex {
    /// Build the index from the live tag set.
    ///
    /// # Errors
    ///
    /// Any failure to enumerate or classify tags aborts the build.
    pub fn build<G: CommitGraph + ?Sized>(graph: &G) -> Result<Self, GitError> {
        let tags = graph.tags()?;
        debug!(count = tags.len(), "indexing tags");
        Ok(Self::from_tags(tags))
    }

    /// Build the index from an already enumerated tag list.
    pub fn from_tags(tags: impl IntoIterator<Item = TagRef>) -> Self {
        let mut buckets: HashMap<Oid, Vec<TagRef>> = HashMap::new();
        for tag in tags {
            buckets.entry(tag.commit().clone()).or_default().push(tag);
        }
        Self { buckets }
    }

    /// Tags pointing at `commit`, if any.
    pub fn get(&self, commit: &Oid) -> Option<&[TagRef]> {
        self.buckets
            .get(commit)
            .map(Vec::as_slice)
            .filter(|tags| !tags.is_empty())
    }

    /// Number of tagged commits.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Check if the repository has no tags at all.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::memory::MemoryGraph;

    #[test]
    fn empty_repository() {
        let mut graph = MemoryGraph::new();
        let a = graph.commit(&[]);

        let index = TagIndex::build(&graph).unwrap();
        assert!(index.is_empty());
        assert!(index.get(&a).is_none());
    }

    #[test]
    fn annotated_and_lightweight_share_bucket() {
        let mut graph = MemoryGraph::new();
        let a = graph.commit(&[]);
        let b = graph.commit(&[&a]);
        graph.tag_lightweight("v1.0.0", &b);
        graph.tag_annotated("release-1", &b);
        graph.tag_annotated("v0.1.0", &a);

        let index = TagIndex::build(&graph).unwrap();
        assert_eq!(index.len(), 2);

        let names: Vec<&str> = index
            .get(&b)
            .unwrap()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["v1.0.0", "release-1"]);
        assert_eq!(index.get(&a).unwrap().len(), 1);
    }

    #[test]
    fn every_tag_lands_in_exactly_one_bucket() {
        let mut graph = MemoryGraph::new();
        let commits = graph.chain(None, 5);
        for (i, c) in commits.iter().enumerate() {
            graph.tag_lightweight(&format!("v0.{i}.0"), c);
            if i % 2 == 0 {
                graph.tag_annotated(&format!("v0.{i}.1"), c);
            }
        }

        let index = TagIndex::build(&graph).unwrap();
        let total: usize = commits
            .iter()
            .map(|c| index.get(c).map_or(0, <[TagRef]>::len))
            .sum();
        assert_eq!(total, graph.tags().unwrap().len());
    }
}
