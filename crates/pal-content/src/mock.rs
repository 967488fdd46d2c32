//! In-memory content source for tests.

use std::path::{Path, PathBuf};

use crate::collection::sort_unique;
use crate::document::Document;
use crate::error::ContentError;
use crate::source::ContentSource;

/// Content source holding file contents in memory.
///
/// Files go through the same frontmatter parsing as [`FsSource`](crate::FsSource),
/// so invalid files are skipped on scan.
///
/// # Example
///
/// ```ignore
/// use pal_content::{ContentSource, MockSource};
///
/// let source = MockSource::new()
///     .with_page("docs/cli.mdx", "CLI", "Packages", Some(1));
/// let docs = source.scan()?;
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockSource {
    files: Vec<(PathBuf, String)>,
}

impl MockSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw file at a content-relative path.
    #[must_use]
    pub fn with_file(mut self, rel_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.push((rel_path.into(), content.into()));
        self
    }

    /// Add a page with generated frontmatter and an empty body.
    #[must_use]
    pub fn with_page(
        self,
        rel_path: impl Into<PathBuf>,
        title: &str,
        group: &str,
        order: Option<i64>,
    ) -> Self {
        let order = order.map(|o| format!("order: {o}\n")).unwrap_or_default();
        let content = format!("---\ntitle: \"{title}\"\ngroup: \"{group}\"\n{order}---\n");
        self.with_file(rel_path, content)
    }
}

impl ContentSource for MockSource {
    fn scan(&self) -> Result<Vec<Document>, ContentError> {
        let documents = self
            .files
            .iter()
            .filter_map(|(rel_path, content)| parse_or_warn(rel_path, content))
            .collect();
        sort_unique(documents)
    }
}

fn parse_or_warn(rel_path: &Path, content: &str) -> Option<Document> {
    Document::parse(rel_path, rel_path, content)
        .inspect_err(|e| {
            tracing::warn!(path = %rel_path.display(), error = %e, "Invalid frontmatter, skipping");
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mock_scan() {
        let source = MockSource::new()
            .with_page("docs/packages/cli.mdx", "CLI", "Packages", Some(2))
            .with_page("docs/introduction.mdx", "Introduction", "Getting Started", None)
            .with_file("docs/broken.mdx", "no frontmatter");

        let docs = source.scan().unwrap();

        let paths: Vec<_> = docs.iter().map(Document::path).collect();
        assert_eq!(paths, vec!["/docs/introduction", "/docs/packages/cli"]);
        assert_eq!(docs[1].entry.order, Some(2));
    }

    #[test]
    fn test_mock_duplicate() {
        let source = MockSource::new()
            .with_page("docs/a.mdx", "A", "G", None)
            .with_page("docs/a/index.mdx", "A2", "G", None);

        assert!(matches!(source.scan(), Err(ContentError::DuplicatePath { .. })));
    }
}
