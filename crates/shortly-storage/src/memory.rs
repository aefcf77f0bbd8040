use async_trait::async_trait;
use dashmap::DashMap;
use shortly_core::error::Result;
use shortly_core::KeyValueStore;

/// In-memory implementation of the [`KeyValueStore`] trait using DashMap.
///
/// Nothing survives the process; useful for tests and throwaway runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    storage: DashMap<String, String>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.storage.get(key).map(|value| value.clone()))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.storage.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.storage.remove(key);
        Ok(())
    }
}
