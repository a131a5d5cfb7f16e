pub mod collection;
pub mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

pub use error::{Result, StoreError};

/// Flat-file holder of the whole message collection.
///
/// The collection lives in one JSON document. Every operation reads or
/// replaces that document in full while holding `lock`, so overlapping
/// creates cannot drop each other's entries.
pub struct MessageStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl MessageStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let store = Self {
            path,
            lock: Mutex::new(()),
        };

        let dir = store.dir();
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        info!("Message store at {}", store.path.display());
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the document; temp files are created here so the
    /// final rename never crosses a filesystem.
    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        f()
    }
}
