use std::collections::BTreeMap;

use super::{FileStore, StorageError};

/// In-memory store. Used as the test double for [`super::DiskStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Stored paths in lexical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl FileStore for MemoryStore {
    fn save(&mut self, path: &str, content: &str) -> Result<(), StorageError> {
        self.files.insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn load(&self, path: &str) -> Result<String, StorageError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        store.save("library/a.doc", "hello").unwrap();

        assert!(store.exists("library/a.doc"));
        assert_eq!(store.load("library/a.doc").unwrap(), "hello");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = MemoryStore::new();
        store.save("a", "first").unwrap();
        store.save("a", "second").unwrap();

        assert_eq!(store.load("a").unwrap(), "second");
        assert_eq!(store.paths().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let store = MemoryStore::new();
        assert!(!store.exists("missing"));
        assert!(matches!(
            store.load("missing"),
            Err(StorageError::NotFound(path)) if path == "missing"
        ));
    }
}
