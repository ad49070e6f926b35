//! Storage of the document currently edited through the server

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tempfile::NamedTempFile;

/// The current document, shared between the server threads.
///
/// Writes are serialized. A file-backed store replaces its file atomically:
/// a failed write leaves the previous document in place.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<Backend>,
}

enum Backend {
    File { path: PathBuf, lock: Mutex<()> },
    Memory(Mutex<String>),
}

impl DocumentStore {
    /// Opens a file-backed store, creating the parent directories if needed.
    ///
    /// The file itself is only created on the first save.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = non_empty_parent(&path) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            backend: Arc::new(Backend::File {
                path,
                lock: Mutex::new(()),
            }),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(Backend::Memory(Mutex::new(String::new()))),
        }
    }

    pub fn location(&self) -> Option<&Path> {
        match &*self.backend {
            Backend::File { path, .. } => Some(path),
            Backend::Memory(_) => None,
        }
    }

    /// The current document, empty if nothing has been saved yet.
    pub fn load(&self) -> io::Result<String> {
        match &*self.backend {
            Backend::File { path, .. } => match fs::read_to_string(path) {
                Ok(document) => Ok(document),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
                Err(e) => Err(e),
            },
            Backend::Memory(document) => Ok(document
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()),
        }
    }

    pub fn save(&self, document: &str) -> io::Result<()> {
        match &*self.backend {
            Backend::File { path, lock } => {
                let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
                let dir = non_empty_parent(path).unwrap_or(Path::new("."));
                let mut file = NamedTempFile::new_in(dir)?;
                file.write_all(document.as_bytes())?;
                file.as_file().sync_all()?;
                file.persist(path).map_err(|e| e.error)?;
                Ok(())
            }
            Backend::Memory(current) => {
                document.clone_into(&mut current.lock().unwrap_or_else(PoisonError::into_inner));
                Ok(())
            }
        }
    }
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic_in_result_fn)]

    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[test]
    fn memory_store() -> io::Result<()> {
        let store = DocumentStore::in_memory();
        assert_eq!(store.load()?, "");
        assert!(store.location().is_none());
        store.save("<s> <p> <o> .")?;
        assert_eq!(store.clone().load()?, "<s> <p> <o> .");
        Ok(())
    }

    #[test]
    fn missing_file_is_an_empty_document() -> io::Result<()> {
        let dir = TempDir::new().map_err(io::Error::other)?;
        let store = DocumentStore::open(dir.child("sub").child("document.ttl").path())?;
        assert_eq!(store.load()?, "");
        Ok(())
    }

    #[test]
    fn file_store_survives_reopening() -> io::Result<()> {
        let dir = TempDir::new().map_err(io::Error::other)?;
        let file = dir.child("document.ttl");
        DocumentStore::open(file.path())?.save("first")?;
        let store = DocumentStore::open(file.path())?;
        assert_eq!(store.load()?, "first");
        store.save("second")?;
        file.assert("second");
        assert_eq!(store.location(), Some(file.path()));
        Ok(())
    }
}
