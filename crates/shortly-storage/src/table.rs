use shortly_core::error::{Result, StorageError};
use shortly_core::{ClickRecord, KeyValueStore, ShortCode, ShortcodeEntry, Table};
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// Key under which the mapping table is persisted.
pub const STORE_KEY: &str = "shortly_store_v1";

/// The mapping table persisted as one JSON document in a [`KeyValueStore`].
///
/// Every mutation is a full load-mutate-save cycle. [`ShortcodeTable::transact`]
/// runs those cycles one at a time, so two concurrent writers sharing this
/// table cannot overwrite each other's changes. Writers that bypass the table
/// and talk to the store directly get no such guarantee.
#[derive(Debug)]
pub struct ShortcodeTable<S> {
    store: S,
    key: String,
    write_lock: Mutex<()>,
}

/// A loaded copy of the table handed to a [`ShortcodeTable::transact`] closure.
///
/// Mutating calls mark the transaction dirty; only dirty transactions are
/// written back.
#[derive(Debug, Default)]
pub struct Transaction {
    table: Table,
    dirty: bool,
}

impl Transaction {
    fn new(table: Table) -> Self {
        Self {
            table,
            dirty: false,
        }
    }

    pub fn contains(&self, code: &ShortCode) -> bool {
        self.table.contains_key(code)
    }

    pub fn get(&self, code: &ShortCode) -> Option<&ShortcodeEntry> {
        self.table.get(code)
    }

    pub fn get_mut(&mut self, code: &ShortCode) -> Option<&mut ShortcodeEntry> {
        let entry = self.table.get_mut(code);
        if entry.is_some() {
            self.dirty = true;
        }
        entry
    }

    /// Inserts `entry` under `code` unless the code is already taken.
    /// Returns `false`, leaving the table untouched, on conflict.
    pub fn insert(&mut self, code: ShortCode, entry: ShortcodeEntry) -> bool {
        if self.table.contains_key(&code) {
            return false;
        }
        self.table.insert(code, entry);
        self.dirty = true;
        true
    }

    pub fn remove(&mut self, code: &ShortCode) -> Option<ShortcodeEntry> {
        let removed = self.table.remove(code);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl<S: KeyValueStore> ShortcodeTable<S> {
    /// Creates a table persisted under [`STORE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORE_KEY)
    }

    /// Creates a table persisted under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Initializes the underlying store.
    pub async fn init(&self) -> Result<()> {
        self.store.init().await
    }

    async fn load(&self) -> Result<Table> {
        let Some(raw) = self.store.get_item(&self.key).await? else {
            return Ok(Table::new());
        };

        serde_json::from_str(&raw).map_err(|e| {
            StorageError::Serialization(format!("table under '{}' is unreadable: {e}", self.key))
        })
    }

    async fn save(&self, table: &Table) -> Result<()> {
        let raw = serde_json::to_string(table)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set_item(&self.key, raw).await
    }

    /// Runs one load-mutate-save cycle.
    ///
    /// The closure sees the freshly loaded table; if it mutated anything the
    /// table is written back before the lock is released.
    pub async fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Transaction) -> T + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut tx = Transaction::new(self.load().await?);
        let output = f(&mut tx);

        if tx.dirty {
            self.save(&tx.table).await?;
            trace!(key = %self.key, entries = tx.table.len(), "saved table");
        }

        Ok(output)
    }

    /// Returns the entry for `code`, expired or not.
    pub async fn lookup(&self, code: &ShortCode) -> Result<Option<ShortcodeEntry>> {
        let mut table = self.load().await?;
        Ok(table.remove(code))
    }

    /// Inserts a new entry. Returns `false` if the code is already taken.
    pub async fn insert(&self, code: ShortCode, entry: ShortcodeEntry) -> Result<bool> {
        self.transact(move |tx| tx.insert(code, entry)).await
    }

    /// Appends `click` to the entry for `code`.
    /// Returns `false` if the code does not exist.
    pub async fn record_click(&self, code: &ShortCode, click: ClickRecord) -> Result<bool> {
        let recorded = self
            .transact(|tx| match tx.get_mut(code) {
                Some(entry) => {
                    entry.clicks.push(click);
                    true
                }
                None => false,
            })
            .await?;

        debug!(code = %code, recorded, "record click");
        Ok(recorded)
    }

    /// Deletes the entry for `code`. Returns `true` if it existed.
    pub async fn remove(&self, code: &ShortCode) -> Result<bool> {
        self.transact(|tx| tx.remove(code).is_some()).await
    }

    /// Deletes the whole table, including its persisted key.
    pub async fn clear_all(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store.remove_item(&self.key).await
    }

    /// Returns a snapshot of every entry.
    pub async fn list_all(&self) -> Result<Table> {
        self.load().await
    }
}
