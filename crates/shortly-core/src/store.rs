use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A persistent string key-value store.
///
/// This is the only place state survives between runs: the mapping table
/// and the event log are each kept as one JSON document under their own key.
/// Implementations only need whole-value reads and writes; callers layer
/// their own load-mutate-save cycles on top.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Prepares the backend (e.g. creates its data directory).
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    /// Returns the value stored under `key`, or `None` if the key is absent.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. It is not an error if the key does not exist.
    async fn remove_item(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn init(&self) -> Result<()> {
        (**self).init().await
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key).await
    }
}
