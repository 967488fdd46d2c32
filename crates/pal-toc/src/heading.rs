//! Heading entries and the table-of-contents view built from them.

/// One heading of a rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Visible heading text.
    pub text: String,
    /// Fragment identifier of the heading element.
    pub slug: String,
}

impl HeadingEntry {
    /// Create a heading entry.
    pub fn new(level: u8, text: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            slug: slug.into(),
        }
    }
}

/// Inclusive range of heading levels shown in the table of contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TocLevels {
    /// Shallowest level shown.
    pub min: u8,
    /// Deepest level shown.
    pub max: u8,
}

impl TocLevels {
    /// Create a level range.
    #[must_use]
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// Whether `level` is displayed.
    #[must_use]
    pub fn contains(self, level: u8) -> bool {
        (self.min..=self.max).contains(&level)
    }
}

impl Default for TocLevels {
    /// Levels 2 and 3: the page title (level 1) and deep headings are hidden.
    fn default() -> Self {
        Self { min: 2, max: 3 }
    }
}

/// Table-of-contents line ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TocItem {
    /// Heading level.
    pub level: u8,
    /// Link text.
    pub text: String,
    /// Link target fragment.
    pub slug: String,
    /// Nested below the shallowest shown level.
    pub indent: bool,
    /// Currently the reader's position.
    pub active: bool,
}

/// Headings within `levels`, in document order.
pub fn toc_entries(headings: &[HeadingEntry], levels: TocLevels) -> Vec<&HeadingEntry> {
    headings
        .iter()
        .filter(|heading| levels.contains(heading.level))
        .collect()
}

/// Build display lines, marking the heading whose slug is `active_slug`.
pub fn toc_view(
    headings: &[HeadingEntry],
    levels: TocLevels,
    active_slug: Option<&str>,
) -> Vec<TocItem> {
    toc_entries(headings, levels)
        .into_iter()
        .map(|heading| TocItem {
            level: heading.level,
            text: heading.text.clone(),
            slug: heading.slug.clone(),
            indent: heading.level > levels.min,
            active: active_slug == Some(heading.slug.as_str()),
        })
        .collect()
}
