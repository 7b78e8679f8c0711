//! Get-or-create cache guarded by a single lock

use crate::error::DevBuildResult;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A cached value that must be re-validated every time it is handed out
pub trait Revalidate {
    /// Re-read whatever the value was built from and refresh internal state
    fn revalidate(&self) -> DevBuildResult<()>;
}

/// Keyed cache of lazily constructed, long-lived values
///
/// Lookup, re-validation and construction all run inside one critical
/// section over the whole map, so a slow check for one key blocks every
/// other key until it finishes. Entries are never evicted.
///
/// The lock is not reentrant: `create` and [`Revalidate::revalidate`] must
/// not call back into the same cache, or the calling thread deadlocks.
pub struct KeyedCache<R> {
    entries: Mutex<HashMap<String, Arc<R>>>,
}

impl<R: Revalidate> KeyedCache<R> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the entry for `key`, building it with `create` if absent
    ///
    /// An existing entry is re-validated before it is returned. When
    /// `create` fails nothing is inserted and the key stays absent.
    pub fn get_or_create<F>(&self, key: &str, create: F) -> DevBuildResult<Arc<R>>
    where
        F: FnOnce() -> DevBuildResult<R>,
    {
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get(key) {
            debug!("Cache hit for {}, revalidating", key);
            entry.revalidate()?;
            return Ok(Arc::clone(entry));
        }

        debug!("Cache miss for {}, building", key);
        let entry = Arc::new(create()?);
        entries.insert(key.to_string(), Arc::clone(&entry));
        Ok(entry)
    }

    /// Number of ready entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    /// Keys of ready entries, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.entries.lock().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl<R: Revalidate> Default for KeyedCache<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for KeyedCache<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedCache")
            .field("len", &self.entries.lock().len())
            .finish()
    }
}
