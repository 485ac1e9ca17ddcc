//! Atomic text file operations.
//!
//! Each save writes a uniquely named temp file in the target's directory,
//! fsyncs it and renames it over the target, so readers see either the old
//! record or the new one. Writers serialise on a sibling `.lock` file that is
//! never removed, so every writer locks the same inode.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::Builder;

use profile_core::error::{ProfileError, Result};

/// Handle to a text file replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct AtomicTextFile {
    path: PathBuf,
}

impl AtomicTextFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(text))`: File exists and has content
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read the file
    pub fn load(&self) -> Result<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(content))
    }

    /// Replaces the file content under the write lock.
    pub fn save(&self, content: &str) -> Result<()> {
        let parent = self.parent_dir()?;
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let _lock = FileLock::acquire(&self.path)?;
        self.write_atomically(parent, content)
    }

    fn write_atomically(&self, parent: &Path, content: &str) -> Result<()> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| ProfileError::io("Path has no file name"))?;

        let mut tmp_file = Builder::new()
            .prefix(&format!(".{}.", file_name.to_string_lossy()))
            .suffix(".tmp")
            .tempfile_in(parent)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.as_file().sync_all()?;

        tmp_file
            .persist(&self.path)
            .map_err(|e| ProfileError::from(e.error))?;
        Ok(())
    }

    fn parent_dir(&self) -> Result<&Path> {
        self.path
            .parent()
            .ok_or_else(|| ProfileError::io("Path has no parent directory"))
    }
}

/// Exclusive advisory lock, released when the handle is dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.with_extension("lock"))?;

        file.lock_exclusive()
            .map_err(|e| ProfileError::storage(format!("Failed to acquire lock: {}", e)))?;

        Ok(FileLock { file })
    }
}
