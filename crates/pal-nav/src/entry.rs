//! Navigation data types.

use serde::Serialize;

/// One documentation page as seen by the navigation indexer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocEntry {
    /// Display title.
    pub title: String,
    /// Sidebar group label.
    pub group: String,
    /// Position within the group. Entries without one sort last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Canonical link target, unique across the corpus (e.g. "/docs/introduction").
    pub path: String,
}

impl DocEntry {
    /// Create an entry without an explicit order.
    pub fn new(title: impl Into<String>, group: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            group: group.into(),
            order: None,
            path: path.into(),
        }
    }

    /// Set the in-group order.
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Link to this entry.
    #[must_use]
    pub fn link(&self) -> NavLink {
        NavLink {
            title: self.title.clone(),
            href: self.path.clone(),
        }
    }
}

/// Sidebar item inside a [`NavGroup`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub href: String,
    /// In-group order copied from the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl From<&DocEntry> for NavItem {
    fn from(entry: &DocEntry) -> Self {
        Self {
            title: entry.title.clone(),
            href: entry.path.clone(),
            order: entry.order,
        }
    }
}

/// Titled, ordered bucket of sidebar items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    /// Group label.
    pub title: String,
    /// Explicit group position, if one was configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Items sorted by order, title, path.
    pub items: Vec<NavItem>,
}

impl NavGroup {
    /// Whether `path` is one of this group's pages or lies below one.
    ///
    /// The sidebar expands groups for which this holds.
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.items.iter().any(|item| path.starts_with(&item.href))
    }
}

/// Title and target of a previous/next link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub href: String,
}

/// Neighbours of a document in reading order.
///
/// Both sides are absent when the document is unknown.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrevNext {
    /// Preceding document, absent for the first one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<NavLink>,
    /// Following document, absent for the last one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
}

impl PrevNext {
    /// True when neither link is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}
