use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::{FileStore, StorageError};

/// File store backed by a directory on the local file system.
///
/// Paths passed to the store are resolved relative to `root`. Absolute
/// paths and paths containing `..` are refused.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !contained {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

fn io_error(path: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_string(),
        source,
    }
}

impl FileStore for DiskStore {
    fn save(&mut self, path: &str, content: &str) -> Result<(), StorageError> {
        let full_path = self.resolve(path)?;
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(path, e))?;
        }
        fs::write(&full_path, content).map_err(|e| io_error(path, e))?;
        tracing::debug!(path = %full_path.display(), bytes = content.len(), "saved file");
        Ok(())
    }

    fn load(&self, path: &str) -> Result<String, StorageError> {
        fs::read_to_string(self.resolve(path)?).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
            _ => io_error(path, e),
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let mut store = DiskStore::new(temp.path());

        store.save("library/nested/test.txt", "Test content").unwrap();

        assert!(temp.path().join("library/nested/test.txt").is_file());
        assert!(store.exists("library/nested/test.txt"));
    }

    #[test]
    fn test_load_returns_saved_content() {
        let temp = TempDir::new().unwrap();
        let mut store = DiskStore::new(temp.path());

        store.save("test.txt", "Test content").unwrap();

        assert_eq!(store.load("test.txt").unwrap(), "Test content");
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = DiskStore::new(temp.path());

        assert!(!store.exists("missing.txt"));
        assert!(matches!(
            store.load("missing.txt"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let temp = TempDir::new().unwrap();
        let mut store = DiskStore::new(temp.path());
        store.save("dir/file.txt", "x").unwrap();

        assert!(!store.exists("dir"));
    }

    #[test]
    fn test_paths_outside_root_are_refused() {
        let temp = TempDir::new().unwrap();
        let mut store = DiskStore::new(temp.path().join("root"));

        for path in ["../outside.txt", "nested/../../outside.txt", "/tmp/outside.txt"] {
            assert!(
                matches!(store.save(path, "x"), Err(StorageError::InvalidPath(_))),
                "{path} should be refused"
            );
            assert!(matches!(store.load(path), Err(StorageError::InvalidPath(_))));
            assert!(!store.exists(path));
        }

        assert!(!temp.path().join("outside.txt").exists());
    }
}
