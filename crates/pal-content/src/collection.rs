//! The loaded document corpus.

use pal_nav::DocEntry;

use crate::document::Document;
use crate::error::ContentError;
use crate::source::ContentSource;

/// All documents of a site, sorted by path with unique paths.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    documents: Vec<Document>,
}

impl Collection {
    /// Build a collection, rejecting duplicate paths.
    pub fn new(documents: Vec<Document>) -> Result<Self, ContentError> {
        Ok(Self {
            documents: sort_unique(documents)?,
        })
    }

    /// Scan `source` into a collection.
    pub fn load<S: ContentSource + ?Sized>(source: &S) -> Result<Self, ContentError> {
        let documents = source.scan()?;
        tracing::debug!(count = documents.len(), "Content loaded");
        Self::new(documents)
    }

    /// Documents sorted by path.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Navigation entries in path order.
    #[must_use]
    pub fn entries(&self) -> Vec<DocEntry> {
        self.documents.iter().map(|doc| doc.entry.clone()).collect()
    }

    /// Find a document by full path (`/docs/cli`) or route form (`cli`).
    ///
    /// Trailing slashes are ignored.
    #[must_use]
    pub fn get(&self, query: &str) -> Option<&Document> {
        let query = query.trim();
        if query.starts_with('/') {
            let wanted = match query.trim_end_matches('/') {
                "" => "/",
                trimmed => trimmed,
            };
            return self.by_path(wanted);
        }

        let wanted = query.trim_end_matches('/');
        self.documents
            .iter()
            .find(|doc| doc.slug_as_params() == wanted)
            .or_else(|| self.by_path(&format!("/{wanted}")))
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn by_path(&self, path: &str) -> Option<&Document> {
        self.documents
            .binary_search_by(|doc| doc.path().cmp(path))
            .ok()
            .map(|index| &self.documents[index])
    }
}

/// Sort by path and fail on the first duplicate.
pub(crate) fn sort_unique(mut documents: Vec<Document>) -> Result<Vec<Document>, ContentError> {
    documents.sort_by(|a, b| a.path().cmp(b.path()));

    if let Some(pair) = documents.windows(2).find(|pair| pair[0].path() == pair[1].path()) {
        return Err(ContentError::DuplicatePath {
            path: pair[0].path().to_owned(),
            first: pair[0].source_path.clone(),
            second: pair[1].source_path.clone(),
        });
    }

    Ok(documents)
}
