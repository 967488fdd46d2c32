//! Content source trait and filesystem implementation.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::collection::sort_unique;
use crate::document::Document;
use crate::error::ContentError;

/// Default pattern for documentation files.
pub const DEFAULT_PATTERN: &str = "docs/**/*.mdx";

/// Supplier of documentation pages.
pub trait ContentSource {
    /// Scan and return all documents, sorted by path.
    ///
    /// Files with missing or invalid frontmatter are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] if the content root cannot be read or two
    /// files map to the same document path.
    fn scan(&self) -> Result<Vec<Document>, ContentError>;
}

/// Documentation pages read from a directory tree.
///
/// Files are selected by a glob pattern matched against their path
/// relative to the source directory. Hidden files and directories are
/// skipped.
#[derive(Debug, Clone)]
pub struct FsSource {
    source_dir: PathBuf,
    pattern: Pattern,
}

impl FsSource {
    /// Create a source over `source_dir` using [`DEFAULT_PATTERN`].
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            pattern: default_pattern(),
        }
    }

    /// Create a source selecting files with `pattern`.
    pub fn with_pattern(source_dir: impl Into<PathBuf>, pattern: &str) -> Result<Self, ContentError> {
        Ok(Self {
            source_dir: source_dir.into(),
            pattern: Pattern::new(pattern)?,
        })
    }

    /// Content root.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Whether a content-relative path is selected by the pattern.
    #[must_use]
    pub fn matches(&self, rel_path: &Path) -> bool {
        self.pattern.matches(&to_slash(rel_path))
    }

    fn collect_files(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ContentError> {
        let entries = fs::read_dir(dir).map_err(|e| ContentError::io(dir, e))?;

        for entry in entries.filter_map(Result::ok) {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.collect_files(&path, files)?;
            } else if let Ok(rel_path) = path.strip_prefix(&self.source_dir) {
                if self.matches(rel_path) {
                    files.push(path);
                }
            }
        }

        Ok(())
    }

    fn load_file(&self, path: &Path) -> Option<Document> {
        let rel_path = path.strip_prefix(&self.source_dir).unwrap_or(path);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read document, skipping");
                return None;
            }
        };
        match Document::parse(rel_path, path, &content) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Invalid frontmatter, skipping");
                None
            }
        }
    }
}

impl ContentSource for FsSource {
    fn scan(&self) -> Result<Vec<Document>, ContentError> {
        let mut files = Vec::new();
        self.collect_files(&self.source_dir, &mut files)?;

        let documents: Vec<Document> = files.iter().filter_map(|path| self.load_file(path)).collect();
        tracing::debug!(
            source_dir = %self.source_dir.display(),
            files = files.len(),
            documents = documents.len(),
            "Scanned content"
        );

        sort_unique(documents)
    }
}

fn default_pattern() -> Pattern {
    Pattern::new(DEFAULT_PATTERN).unwrap()
}

/// Relative path with `/` separators.
fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn page(title: &str, group: &str) -> String {
        format!("---\ntitle: {title}\ngroup: {group}\n---\n\n## Overview\n")
    }

    #[test]
    fn test_scan_selects_pattern_and_derives_paths() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "docs/introduction.mdx", &page("Introduction", "Getting Started"));
        write(temp.path(), "docs/mdc-templates/index.mdx", &page("MDC", "MDC Templates"));
        write(temp.path(), "docs/packages/cli.mdx", &page("CLI", "Packages"));
        write(temp.path(), "docs/notes.md", &page("Notes", "Other"));
        write(temp.path(), "blog/post.mdx", &page("Post", "Blog"));

        let docs = FsSource::new(temp.path()).scan().unwrap();

        let paths: Vec<_> = docs.iter().map(Document::path).collect();
        assert_eq!(
            paths,
            vec!["/docs/introduction", "/docs/mdc-templates", "/docs/packages/cli"]
        );
    }

    #[test]
    fn test_scan_skips_invalid_frontmatter() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "docs/good.mdx", &page("Good", "Guide"));
        write(temp.path(), "docs/missing.mdx", "# No frontmatter\n");
        write(temp.path(), "docs/untitled.mdx", "---\ngroup: Guide\n---\n");

        let docs = FsSource::new(temp.path()).scan().unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title(), "Good");
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "docs/.draft.mdx", &page("Draft", "Guide"));
        write(temp.path(), "docs/.cache/page.mdx", &page("Cached", "Guide"));
        write(temp.path(), "docs/page.mdx", &page("Page", "Guide"));

        let docs = FsSource::new(temp.path()).scan().unwrap();

        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_scan_duplicate_paths() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "docs/cli.mdx", &page("CLI", "Packages"));
        write(temp.path(), "docs/cli/index.mdx", &page("CLI Index", "Packages"));

        let result = FsSource::new(temp.path()).scan();

        assert!(matches!(result, Err(ContentError::DuplicatePath { ref path, .. }) if path == "/docs/cli"));
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let temp = tempfile::tempdir().unwrap();

        let result = FsSource::new(temp.path().join("missing")).scan();

        assert!(matches!(result, Err(ContentError::Io { .. })));
    }

    #[test]
    fn test_custom_pattern() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "guide/a.md", &page("A", "Guide"));
        write(temp.path(), "guide/b.mdx", &page("B", "Guide"));

        let source = FsSource::with_pattern(temp.path(), "**/*.md").unwrap();
        let docs = source.scan().unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].path(), "/guide/a");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = FsSource::with_pattern("content", "docs/[");

        assert!(matches!(result, Err(ContentError::Pattern(_))));
    }

    #[test]
    fn test_scan_keeps_frontmatter_fields() {
        let temp = tempfile::tempdir().unwrap();
        write(
            temp.path(),
            "docs/introduction.mdx",
            "---\ntitle: Introduction\ngroup: Getting Started\norder: 1\ndescription: Start here\ntoc: false\n---\nBody\n",
        );

        let docs = FsSource::new(temp.path()).scan().unwrap();

        assert_eq!(docs[0].entry.order, Some(1));
        assert_eq!(docs[0].description.as_deref(), Some("Start here"));
        assert!(!docs[0].toc);
        assert_eq!(docs[0].body, "Body\n");
        assert!(docs[0].source_path.ends_with("docs/introduction.mdx"));
    }
}
