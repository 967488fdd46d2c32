//! Navigation indexer.
//!
//! Groups entries into sidebar buckets and derives the reading order used
//! for previous/next links. Both views come from the same ordered buckets,
//! so the link sequence always matches the sidebar top to bottom.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::entry::{DocEntry, NavGroup, NavItem, PrevNext};
use crate::ordering::{compare_entries, compare_order, compare_titles};

/// Entries of one group, already sorted.
struct Bucket<'a> {
    title: &'a str,
    order: Option<i64>,
    entries: Vec<&'a DocEntry>,
}

/// Builds navigation views from documentation entries.
///
/// Holds explicit group positions; groups without one sort after all
/// positioned groups, by title. The indexer keeps no state between calls.
#[derive(Clone, Debug, Default)]
pub struct NavIndexer {
    group_orders: HashMap<String, i64>,
}

impl NavIndexer {
    /// Create an indexer with no explicit group positions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Give the group titled `title` an explicit position.
    #[must_use]
    pub fn with_group_order(mut self, title: impl Into<String>, order: i64) -> Self {
        self.group_orders.insert(title.into(), order);
        self
    }

    /// Give several groups explicit positions.
    #[must_use]
    pub fn with_group_orders<I, S>(mut self, orders: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        self.group_orders
            .extend(orders.into_iter().map(|(title, order)| (title.into(), order)));
        self
    }

    /// Build the ordered sidebar tree.
    ///
    /// Every entry lands in exactly one group, the one named by its `group`.
    /// An empty input yields an empty tree.
    #[must_use]
    pub fn build_tree(&self, entries: &[DocEntry]) -> Vec<NavGroup> {
        let groups: Vec<NavGroup> = self
            .buckets(entries)
            .into_iter()
            .map(|bucket| NavGroup {
                title: bucket.title.to_owned(),
                order: bucket.order,
                items: bucket.entries.into_iter().map(NavItem::from).collect(),
            })
            .collect();

        tracing::debug!(
            entry_count = entries.len(),
            group_count = groups.len(),
            "Navigation tree built"
        );
        groups
    }

    /// All entries in reading order (the sidebar tree, flattened).
    #[must_use]
    pub fn reading_order<'a>(&self, entries: &'a [DocEntry]) -> Vec<&'a DocEntry> {
        self.buckets(entries)
            .into_iter()
            .flat_map(|bucket| bucket.entries)
            .collect()
    }

    /// Previous and next documents around `current_path`.
    ///
    /// Unknown paths yield an empty [`PrevNext`].
    #[must_use]
    pub fn prev_next(&self, entries: &[DocEntry], current_path: &str) -> PrevNext {
        let ordered = self.reading_order(entries);
        let Some(index) = ordered.iter().position(|entry| entry.path == current_path) else {
            tracing::debug!(path = current_path, "No navigation entry for path");
            return PrevNext::default();
        };

        PrevNext {
            prev: index
                .checked_sub(1)
                .and_then(|i| ordered.get(i))
                .map(|entry| entry.link()),
            next: ordered.get(index + 1).map(|entry| entry.link()),
        }
    }

    /// Partition entries by group and sort groups and members.
    fn buckets<'a>(&self, entries: &'a [DocEntry]) -> Vec<Bucket<'a>> {
        let mut by_group: HashMap<&'a str, Vec<&'a DocEntry>> = HashMap::new();
        for entry in entries {
            by_group.entry(entry.group.as_str()).or_default().push(entry);
        }

        let mut buckets: Vec<Bucket<'a>> = by_group
            .into_iter()
            .map(|(title, mut members)| {
                members.sort_by(|a, b| compare_entries(a, b));
                Bucket {
                    title,
                    order: self.group_orders.get(title).copied(),
                    entries: members,
                }
            })
            .collect();

        buckets.sort_by(compare_buckets);
        buckets
    }
}

fn compare_buckets(a: &Bucket<'_>, b: &Bucket<'_>) -> Ordering {
    compare_order(a.order, b.order).then_with(|| compare_titles(a.title, b.title))
}
