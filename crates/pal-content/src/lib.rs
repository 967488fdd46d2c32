//! Documentation content for paldocs.
//!
//! This crate reads documentation pages and their YAML frontmatter:
//! - [`ContentSource`] trait with a `scan()` method
//! - [`FsSource`] reading files matching a glob pattern under a directory
//! - [`MockSource`] for testing (behind `mock` feature flag)
//! - [`Collection`] for path lookup and navigation entries
//!
//! # Paths
//!
//! A document's path is its file path relative to the content root with
//! the extension removed, `/index` collapsed and a leading `/`
//! (`docs/mdc-templates/index.mdx` -> `/docs/mdc-templates`). Its route
//! form drops the first segment (`mdc-templates`).
//!
//! # Example
//!
//! ```ignore
//! use pal_content::{Collection, FsSource};
//!
//! let collection = Collection::load(&FsSource::new("content"))?;
//! let doc = collection.get("packages/cli");
//! ```

mod collection;
mod document;
mod error;
mod frontmatter;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use collection::Collection;
pub use document::{Document, file_path_to_doc_path, slug_as_params};
pub use error::{ContentError, FrontmatterError};
pub use frontmatter::{Frontmatter, split_frontmatter};
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{ContentSource, DEFAULT_PATTERN, FsSource};
