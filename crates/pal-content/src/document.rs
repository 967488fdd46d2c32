//! Parsed documentation pages.

use std::path::{Component, Path, PathBuf};

use pal_nav::DocEntry;
use serde::Serialize;

use crate::error::FrontmatterError;
use crate::frontmatter;

/// One documentation page with its navigation entry and body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Navigation record (title, group, order, path).
    #[serde(flatten)]
    pub entry: DocEntry,
    /// Summary from frontmatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the page shows a table of contents.
    pub toc: bool,
    /// Markdown body after the frontmatter block.
    #[serde(skip)]
    pub body: String,
    /// Source file the document was read from.
    pub source_path: PathBuf,
}

impl Document {
    /// Parse a page from its contents.
    ///
    /// `rel_path` is the file location relative to the content root and
    /// determines the document path; `source_path` is kept for reporting.
    pub fn parse(
        rel_path: &Path,
        source_path: impl Into<PathBuf>,
        content: &str,
    ) -> Result<Self, FrontmatterError> {
        let (fm, body) = frontmatter::parse(content)?;

        let mut entry = DocEntry::new(fm.title, fm.group, file_path_to_doc_path(rel_path));
        entry.order = fm.order;

        Ok(Self {
            entry,
            description: fm.description,
            toc: fm.toc,
            body: body.to_owned(),
            source_path: source_path.into(),
        })
    }

    /// Document path (e.g. "/docs/introduction").
    #[must_use]
    pub fn path(&self) -> &str {
        &self.entry.path
    }

    /// Page title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.entry.title
    }

    /// Path without its first segment, as used in route parameters.
    #[must_use]
    pub fn slug_as_params(&self) -> &str {
        slug_as_params(&self.entry.path)
    }
}

/// Convert a content-relative file path to a document path.
///
/// Examples:
/// - `docs/introduction.mdx` -> `/docs/introduction`
/// - `docs/mdc-templates/index.mdx` -> `/docs/mdc-templates`
/// - `index.mdx` -> `/`
#[must_use]
pub fn file_path_to_doc_path(rel_path: &Path) -> String {
    let segments: Vec<String> = rel_path
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let Some((file_name, dirs)) = segments.split_last() else {
        return "/".to_owned();
    };

    let stem = Path::new(file_name)
        .file_stem()
        .map_or_else(|| file_name.clone(), |s| s.to_string_lossy().into_owned());

    let mut parts: Vec<&str> = dirs.iter().map(String::as_str).collect();
    if stem != "index" {
        parts.push(&stem);
    }

    format!("/{}", parts.join("/"))
}

/// Path without its first segment (`/docs/cli/generate` -> `cli/generate`).
#[must_use]
pub fn slug_as_params(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    trimmed.split_once('/').map_or("", |(_, rest)| rest)
}
