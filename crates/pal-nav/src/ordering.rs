//! Sort rules shared by entries and groups.

use std::cmp::Ordering;

use crate::entry::DocEntry;

/// Compare optional orders; present values come first, ascending.
pub(crate) fn compare_order(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Alphabetical title comparison: case-folded first, exact text breaks ties.
pub(crate) fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Total order for entries inside one group.
pub(crate) fn compare_entries(a: &DocEntry, b: &DocEntry) -> Ordering {
    compare_order(a.order, b.order)
        .then_with(|| compare_titles(&a.title, &b.title))
        .then_with(|| a.path.cmp(&b.path))
}
