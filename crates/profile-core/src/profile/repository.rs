//! Profile store trait.

use async_trait::async_trait;

use crate::error::Result;

/// Key under which the single profile record is stored.
pub const PROFILE_STORAGE_KEY: &str = "profile";

/// Key-value persistence boundary holding serialized records.
///
/// The store knows nothing about `Profile`; encoding is the caller's job.
/// No ordering or locking is promised between concurrent `set` calls: the
/// last write observed by the backend wins.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Reads the text stored under `key`, or `None` if nothing was stored.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the text stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<()>;
}
