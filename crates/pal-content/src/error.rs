//! Content error types.

use std::path::PathBuf;

/// Frontmatter problems in a single file.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// The file does not open with a `---` block.
    #[error("Missing frontmatter block")]
    Missing,
    /// The opening `---` is never closed.
    #[error("Unterminated frontmatter block")]
    Unterminated,
    /// The block is not valid YAML for the expected fields.
    #[error("Invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A required field is absent or empty.
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),
}

/// Content source errors.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Directory or file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configured file pattern is not a valid glob.
    #[error("Invalid content pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// A single file failed to parse.
    #[error("{}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    /// Two files map to the same document path.
    #[error(
        "Duplicate document path {path}: {} and {}",
        first.display(),
        second.display()
    )]
    DuplicatePath {
        path: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
