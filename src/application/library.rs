use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::Document;
use crate::storage::FileStore;

use super::LibraryError;

impl Document {
    /// Write this document to `path` in `store`.
    pub fn save<S: FileStore + ?Sized>(&self, store: &mut S, path: &str) -> Result<(), LibraryError> {
        store.save(path, &self.encode())?;
        Ok(())
    }

    /// Read and parse the document stored at `path`.
    pub fn load<S: FileStore + ?Sized>(store: &S, path: &str) -> Result<Self, LibraryError> {
        let text = store.load(path)?;
        Document::parse(&text).map_err(|source| LibraryError::Malformed {
            path: path.to_string(),
            source,
        })
    }
}

/// A title-keyed collection of documents persisted through a [`FileStore`].
///
/// Each document lives at `<base_path>/<title>.doc`.
#[derive(Debug)]
pub struct Library<S> {
    store: S,
    base_path: String,
    documents: BTreeMap<String, Document>,
}

impl<S: FileStore> Library<S> {
    pub fn new(store: S, base_path: impl Into<String>) -> Self {
        Self {
            store,
            base_path: base_path.into(),
            documents: BTreeMap::new(),
        }
    }

    /// Check that `title` names a single file directly under the base path.
    fn check_title(title: &str) -> Result<(), LibraryError> {
        if title.is_empty() {
            return Err(LibraryError::EmptyTitle);
        }
        if title.contains(['/', '\\', '\0']) || title == "." || title == ".." {
            return Err(LibraryError::InvalidTitle(title.to_string()));
        }
        Ok(())
    }

    pub fn document_path(&self, title: &str) -> String {
        if self.base_path.is_empty() {
            format!("{}.doc", title)
        } else {
            format!("{}/{}.doc", self.base_path.trim_end_matches('/'), title)
        }
    }

    /// Add a document and save it. Returns the path it was saved to.
    ///
    /// Titles must be non-empty, free of path separators and unique, both in
    /// the catalog and in the store. Nothing changes when the document is
    /// rejected.
    pub fn add_document(&mut self, document: Document) -> Result<String, LibraryError> {
        Self::check_title(&document.title)?;

        let path = self.document_path(&document.title);
        if self.documents.contains_key(&document.title) || self.store.exists(&path) {
            warn!(title = %document.title, "duplicate document title");
            return Err(LibraryError::DuplicateTitle(document.title));
        }

        document.save(&mut self.store, &path)?;
        debug!(title = %document.title, %path, "document added");
        self.documents.insert(document.title.clone(), document);
        Ok(path)
    }

    pub fn get_document(&self, title: &str) -> Option<&Document> {
        self.documents.get(title)
    }

    /// Replace a document's content and save it again.
    pub fn update_content(
        &mut self,
        title: &str,
        content: impl Into<String>,
    ) -> Result<(), LibraryError> {
        let path = self.document_path(title);
        let mut updated = self
            .documents
            .get(title)
            .cloned()
            .ok_or_else(|| LibraryError::DocumentNotFound(title.to_string()))?;

        updated.content = content.into();
        updated.save(&mut self.store, &path)?;
        self.documents.insert(title.to_string(), updated);
        Ok(())
    }

    /// Read a document back from the store into the catalog.
    pub fn load_document(&mut self, title: &str) -> Result<&Document, LibraryError> {
        Self::check_title(title)?;
        let path = self.document_path(title);
        if !self.store.exists(&path) {
            return Err(LibraryError::DocumentNotFound(title.to_string()));
        }

        let document = Document::load(&self.store, &path)?;
        let slot = self.documents.entry(title.to_string()).or_default();
        *slot = document;
        Ok(slot)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
