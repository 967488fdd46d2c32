//! Sidebar navigation and previous/next links for paldocs.
//!
//! This crate turns a flat collection of [`DocEntry`] records into:
//! - a grouped, ordered sidebar tree ([`build_navigation_tree`])
//! - previous/next links for any document ([`resolve_prev_next`])
//!
//! # Ordering
//!
//! Entries are ordered within their group by explicit `order` (entries
//! without one come last), then by title, then by path. Groups use the same
//! rule applied to their explicit order (see [`NavIndexer::with_group_order`]),
//! falling back to the group title. The previous/next sequence is the
//! sidebar tree read top to bottom.
//!
//! # Example
//!
//! ```
//! use pal_nav::{DocEntry, build_navigation_tree, resolve_prev_next};
//!
//! let entries = vec![
//!     DocEntry::new("B", "Guide", "/b").with_order(2),
//!     DocEntry::new("A", "Guide", "/a").with_order(1),
//!     DocEntry::new("C", "Guide", "/c"),
//! ];
//!
//! let tree = build_navigation_tree(&entries);
//! let hrefs: Vec<_> = tree[0].items.iter().map(|item| item.href.as_str()).collect();
//! assert_eq!(hrefs, ["/a", "/b", "/c"]);
//!
//! let links = resolve_prev_next(&entries, "/b");
//! assert_eq!(links.prev.unwrap().href, "/a");
//! assert_eq!(links.next.unwrap().href, "/c");
//! ```

mod entry;
mod indexer;
mod ordering;

pub use entry::{DocEntry, NavGroup, NavItem, NavLink, PrevNext};
pub use indexer::NavIndexer;

/// Build the sidebar tree with no explicit group ordering.
///
/// Groups are sorted by title. See [`NavIndexer::build_tree`].
#[must_use]
pub fn build_navigation_tree(entries: &[DocEntry]) -> Vec<NavGroup> {
    NavIndexer::new().build_tree(entries)
}

/// Resolve previous/next links with no explicit group ordering.
///
/// See [`NavIndexer::prev_next`].
#[must_use]
pub fn resolve_prev_next(entries: &[DocEntry], current_path: &str) -> PrevNext {
    NavIndexer::new().prev_next(entries, current_path)
}
