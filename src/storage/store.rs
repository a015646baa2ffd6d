use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Path escapes the store root: {0}")]
    InvalidPath(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Minimal file-system abstraction used by the document library.
///
/// Paths are plain `/`-separated strings interpreted by the implementation.
pub trait FileStore {
    /// Write `content` to `path`, replacing any previous content.
    fn save(&mut self, path: &str, content: &str) -> Result<(), StorageError>;

    /// Read the content stored at `path`.
    fn load(&self, path: &str) -> Result<String, StorageError>;

    fn exists(&self, path: &str) -> bool;
}

impl<S: FileStore + ?Sized> FileStore for &mut S {
    fn save(&mut self, path: &str, content: &str) -> Result<(), StorageError> {
        (**self).save(path, content)
    }

    fn load(&self, path: &str) -> Result<String, StorageError> {
        (**self).load(path)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }
}
