use crate::domain::model::{Feed, FeedItem};
use std::collections::HashSet;

/// Author identifiers whose items are suppressed. Entries are lowercased at
/// construction; membership is a case-insensitive exact match.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    authors: HashSet<String>,
}

impl ExclusionSet {
    pub fn new(authors: &[String]) -> Self {
        let authors = authors
            .iter()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        Self { authors }
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn contains(&self, author: &str) -> bool {
        self.authors.contains(&author.to_lowercase())
    }

    /// Author-field strategy: an item is suppressed iff its author field,
    /// lowercased, is a member of the set. Items without an author are
    /// always kept; exclusion fails safe toward inclusion.
    pub fn keeps(&self, item: &FeedItem) -> bool {
        match item.author.as_deref() {
            Some(author) => !self.contains(author),
            None => true,
        }
    }
}

/// Drop suppressed items, preserving the relative order of the rest.
pub fn filter_feed(mut feed: Feed, excluded: &ExclusionSet) -> Feed {
    if excluded.is_empty() {
        return feed;
    }
    feed.items.retain(|item| excluded.keeps(item));
    feed
}
