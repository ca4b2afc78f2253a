//! File-backed storage backend.
//!
//! Each key is a file under the data directory:
//!
//! ```text
//! <data_dir>/
//!     cart
//!     theme_mode
//!     ...
//! ```
//!
//! Writes go to a sibling `.tmp` file first and are renamed into place, so a
//! crash mid-write leaves the previous value intact.

use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{KeyValueStore, is_valid_key};

/// Storage that persists each key as a file in a directory.
///
/// The directory is created lazily on the first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        if is_valid_key(key) {
            Some(self.dir.join(key))
        } else {
            tracing::warn!(key, "Rejected invalid storage key");
            None
        }
    }

    async fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, path = %path.display(), error = %e, "Storage read failed");
                None
            }
        }
    }

    async fn write(&self, key: &str, value: &str) -> bool {
        let Some(path) = self.path_for(key) else {
            return false;
        };
        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            tracing::warn!(
                dir = %self.dir.display(),
                error = %e,
                "Failed to create storage directory"
            );
            return false;
        }

        let tmp = self.dir.join(format!(".{key}.tmp"));
        if let Err(e) = tokio::fs::write(&tmp, value).await {
            tracing::warn!(key, error = %e, "Storage write failed");
            return false;
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            tracing::warn!(key, error = %e, "Storage rename failed");
            let _ = tokio::fs::remove_file(&tmp).await;
            return false;
        }
        true
    }

    async fn delete(&self, key: &str) -> bool {
        let Some(path) = self.path_for(key) else {
            return false;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage remove failed");
                false
            }
        }
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> impl Future<Output = Option<String>> + Send {
        self.read(key)
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = bool> + Send {
        self.write(key, value)
    }

    fn remove(&self, key: &str) -> impl Future<Output = bool> + Send {
        self.delete(key)
    }
}
