use async_trait::async_trait;
use shortly_core::error::{Result, StorageError};
use shortly_core::KeyValueStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::trace;

/// File-backed implementation of the [`KeyValueStore`] trait.
///
/// Each key is kept in its own `<key>.json` file inside the data directory.
/// Writes go to a temporary sibling first and are then renamed into place, so
/// a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created by
    /// [`KeyValueStore::init`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(dir);
        store.init().await?;
        Ok(store)
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn map_io_error(path: &Path, err: std::io::Error) -> StorageError {
    let message = format!("{}: {err}", path.display());

    match err.kind() {
        ErrorKind::PermissionDenied | ErrorKind::NotFound => StorageError::Unavailable(message),
        ErrorKind::InvalidData => StorageError::Serialization(message),
        _ => StorageError::Operation(message),
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn init(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| map_io_error(&self.dir, e))
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(map_io_error(&path, err)),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| map_io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| map_io_error(&path, e))?;

        trace!(path = %path.display(), "wrote key");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(map_io_error(&path, err)),
        }
    }
}
