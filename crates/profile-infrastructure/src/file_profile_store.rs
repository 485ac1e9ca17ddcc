//! File-backed profile store.
//!
//! Each key maps to `<root>/<key>.json`. Blocking file work runs on the
//! tokio blocking pool so callers on the async runtime never stall.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use profile_core::error::{ProfileError, Result};
use profile_core::profile::ProfileStore;

use crate::paths::ProfilePaths;
use crate::storage::AtomicTextFile;

/// Key-value store persisting one JSON file per key.
///
/// # Example
///
/// ```ignore
/// use profile_infrastructure::FileProfileStore;
/// use profile_core::profile::{ProfileStore, PROFILE_STORAGE_KEY};
///
/// let store = FileProfileStore::new("/tmp/student-profile");
/// store.set(PROFILE_STORAGE_KEY, "{...}".to_string()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    root: PathBuf,
}

impl FileProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a store rooted at the resolved data directory.
    pub fn from_paths(paths: &ProfilePaths) -> Result<Self> {
        Ok(Self::new(paths.data_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a key to its file, refusing keys that could escape the root.
    fn record_file(&self, key: &str) -> Result<AtomicTextFile> {
        let invalid = key.is_empty()
            || key.starts_with('.')
            || key.contains("..")
            || key.contains(['/', '\\']);
        if invalid {
            return Err(ProfileError::storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(AtomicTextFile::new(self.root.join(format!("{}.json", key))))
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file = self.record_file(key)?;
        tracing::debug!("[FileProfileStore] Reading {:?}", file.path());

        tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| ProfileError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let file = self.record_file(key)?;
        tracing::debug!(
            "[FileProfileStore] Writing {} bytes to {:?}",
            value.len(),
            file.path()
        );

        tokio::task::spawn_blocking(move || file.save(&value))
            .await
            .map_err(|e| ProfileError::internal(format!("Failed to join task: {}", e)))?
    }
}
