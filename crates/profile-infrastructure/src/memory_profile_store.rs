//! In-memory profile store.
//!
//! Keeps records for the lifetime of the process and remembers every write,
//! which makes it the store of choice for previews and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use profile_core::error::Result;
use profile_core::profile::ProfileStore;

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, String>,
    writes: Vec<(String, String)>,
}

/// Cloneable handle; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `value` under `key`.
    ///
    /// Seeding is not counted as a write.
    pub fn with_record(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut inner = Inner::default();
        inner.records.insert(key.into(), value.into());
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Every `set` call so far as `(key, value)`, oldest first.
    pub async fn writes(&self) -> Vec<(String, String)> {
        self.inner.lock().await.writes.clone()
    }

    pub async fn write_count(&self) -> usize {
        self.inner.lock().await.writes.len()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.lock().await.records.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.writes.push((key.to_string(), value.clone()));
        inner.records.insert(key.to_string(), value);
        Ok(())
    }
}
